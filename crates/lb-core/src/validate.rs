//! Field-level validation for elements and layouts.
//!
//! These are the same bounds the REST layer enforces, so a document that
//! passes here is accepted by the backend unchanged. Text lengths are
//! counted in characters, not bytes.

use crate::id::ElementId;
use crate::model::{Element, ElementKind};
use std::collections::HashSet;
use thiserror::Error;

pub const MIN_POSITION: i32 = 0;
pub const MAX_POSITION: i32 = 10_000;
pub const MIN_ELEMENT_DIMENSION: i32 = 1;
pub const MAX_ELEMENT_DIMENSION: i32 = 1_000;
pub const MAX_TEXT_LENGTH: usize = 500;
pub const MAX_BUTTON_TEXT_LENGTH: usize = 100;
pub const MAX_ALT_TEXT_LENGTH: usize = 200;
pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 72;
pub const MAX_FONT_FAMILY_LENGTH: usize = 50;
pub const MAX_LAYOUT_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "{axis} position {value} is outside [{min}, {max}]",
        min = MIN_POSITION,
        max = MAX_POSITION
    )]
    Position { axis: &'static str, value: i32 },
    #[error(
        "{dimension} {value} is outside [{min}, {max}]",
        min = MIN_ELEMENT_DIMENSION,
        max = MAX_ELEMENT_DIMENSION
    )]
    Dimension { dimension: &'static str, value: i32 },
    #[error("{field} is required")]
    Blank { field: &'static str },
    #[error("{field} must be no more than {max} characters (got {len})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error(
        "font size {0} is outside [{min}, {max}]",
        min = MIN_FONT_SIZE,
        max = MAX_FONT_SIZE
    )]
    FontSize(u32),
    #[error("layout has {count} elements, the limit is {max}")]
    TooManyElements { count: usize, max: usize },
    #[error("duplicate element id {0}")]
    DuplicateId(ElementId),
}

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}

fn check_position(axis: &'static str, value: i32) -> Result<(), ValidationError> {
    if (MIN_POSITION..=MAX_POSITION).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::Position { axis, value })
    }
}

fn check_dimension(dimension: &'static str, value: i32) -> Result<(), ValidationError> {
    if (MIN_ELEMENT_DIMENSION..=MAX_ELEMENT_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::Dimension { dimension, value })
    }
}

/// Validate geometry and type-specific payload of one element.
///
/// # Errors
/// Returns the first failing field, geometry before payload.
pub fn validate_element(element: &Element) -> Result<(), ValidationError> {
    check_dimension("width", element.width)?;
    check_dimension("height", element.height)?;
    check_position("x", element.x)?;
    check_position("y", element.y)?;

    match &element.kind {
        ElementKind::Text {
            text,
            font_size,
            font_family,
        } => {
            check_text("text", text, MAX_TEXT_LENGTH)?;
            if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(font_size) {
                return Err(ValidationError::FontSize(*font_size));
            }
            check_text("font family", font_family, MAX_FONT_FAMILY_LENGTH)
        }
        ElementKind::Image { alt, .. } => check_text("alt text", alt, MAX_ALT_TEXT_LENGTH),
        ElementKind::Button { text } => check_text("button text", text, MAX_BUTTON_TEXT_LENGTH),
    }
}

/// Validate a whole element collection: size limit, unique ids, and every
/// element's fields.
///
/// # Errors
/// Returns the first violation found.
pub fn validate_elements(elements: &[Element], max_elements: usize) -> Result<(), ValidationError> {
    if elements.len() > max_elements {
        return Err(ValidationError::TooManyElements {
            count: elements.len(),
            max: max_elements,
        });
    }
    let mut seen = HashSet::with_capacity(elements.len());
    for element in elements {
        if !seen.insert(element.id) {
            return Err(ValidationError::DuplicateId(element.id));
        }
        validate_element(element)?;
    }
    Ok(())
}

/// Validate a layout's display name.
///
/// # Errors
/// Blank names and names over the length limit are rejected.
pub fn validate_layout_name(name: &str) -> Result<(), ValidationError> {
    check_text("layout name", name, MAX_LAYOUT_NAME_LENGTH)
}
