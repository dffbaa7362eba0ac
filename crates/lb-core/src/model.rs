//! Element data model for layout documents.
//!
//! An [`Element`] is a typed rectangle placed on the canvas. Geometry is
//! shared by every type; the type-specific payload lives in [`ElementKind`].
//! The serde representation is the flat camelCase object the REST layer
//! exchanges, e.g.
//!
//! ```json
//! {"id":"e1","x":0,"y":0,"width":50,"height":40,
//!  "type":"text","text":"Text Box","fontSize":14,"fontFamily":"Arial"}
//! ```

use crate::geometry::{Point, Position, Rect, Size, snap_to_grid};
use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Defaults ────────────────────────────────────────────────────────────

pub const DEFAULT_TEXT_CONTENT: &str = "Text Box";
pub const DEFAULT_FONT_SIZE: u32 = 14;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_IMAGE_SRC: &str = "/placeholder-image.jpg";
pub const DEFAULT_IMAGE_ALT: &str = "Image";
pub const DEFAULT_BUTTON_TEXT: &str = "Button";

/// New elements are 5 × 4 grid units.
pub const DEFAULT_WIDTH_UNITS: i32 = 5;
pub const DEFAULT_HEIGHT_UNITS: i32 = 4;

// ─── Types ───────────────────────────────────────────────────────────────

/// The tag of an element. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Button,
}

impl ElementType {
    pub const ALL: [ElementType; 3] = [ElementType::Text, ElementType::Image, ElementType::Button];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Button => "button",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        font_size: u32,
        font_family: String,
    },
    Image {
        src: String,
        alt: String,
    },
    Button {
        text: String,
    },
}

impl ElementKind {
    /// The payload a freshly created element of `element_type` carries.
    pub fn default_for(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Text => ElementKind::Text {
                text: DEFAULT_TEXT_CONTENT.to_string(),
                font_size: DEFAULT_FONT_SIZE,
                font_family: DEFAULT_FONT_FAMILY.to_string(),
            },
            ElementType::Image => ElementKind::Image {
                src: DEFAULT_IMAGE_SRC.to_string(),
                alt: DEFAULT_IMAGE_ALT.to_string(),
            },
            ElementType::Button => ElementKind::Button {
                text: DEFAULT_BUTTON_TEXT.to_string(),
            },
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Text { .. } => ElementType::Text,
            ElementKind::Image { .. } => ElementType::Image,
            ElementKind::Button { .. } => ElementType::Button,
        }
    }
}

/// A positioned, typed rectangle on the layout canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(id: ElementId, kind: ElementKind, rect: Rect) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            kind,
        }
    }

    /// Create an element with the default payload and size for its type,
    /// placed at `at` snapped to the grid.
    pub fn create(id: ElementId, element_type: ElementType, at: Point, grid: i32) -> Self {
        let rect = Rect::new(
            snap_to_grid(at.x, grid),
            snap_to_grid(at.y, grid),
            grid * DEFAULT_WIDTH_UNITS,
            grid * DEFAULT_HEIGHT_UNITS,
        );
        Self::new(id, ElementKind::default_for(element_type), rect)
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub fn set_position(&mut self, position: Position) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn set_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }

    /// Merge a partial update into this element.
    ///
    /// Payload fields that do not belong to this element's type are ignored;
    /// the id and type never change.
    pub fn apply(&mut self, update: &ElementUpdate) {
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }

        match &mut self.kind {
            ElementKind::Text {
                text,
                font_size,
                font_family,
            } => {
                if let Some(t) = &update.text {
                    text.clone_from(t);
                }
                if let Some(size) = update.font_size {
                    *font_size = size;
                }
                if let Some(family) = &update.font_family {
                    font_family.clone_from(family);
                }
            }
            ElementKind::Image { src, alt } => {
                if let Some(s) = &update.src {
                    src.clone_from(s);
                }
                if let Some(a) = &update.alt {
                    alt.clone_from(a);
                }
            }
            ElementKind::Button { text } => {
                if let Some(t) = &update.text {
                    text.clone_from(t);
                }
            }
        }
    }

    /// A copy of this element with `update` applied.
    pub fn updated(&self, update: &ElementUpdate) -> Self {
        let mut next = self.clone();
        next.apply(update);
        next
    }
}

// ─── Partial updates ─────────────────────────────────────────────────────

/// A partial edit of an element's fields (inspector edits, inline text edits).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementUpdate {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub text: Option<String>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub src: Option<String>,
    pub alt: Option<String>,
}

impl ElementUpdate {
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the update sets position or size.
    pub fn touches_geometry(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GRID_SIZE;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_uses_type_defaults() {
        let el = Element::create(
            ElementId::intern("t1"),
            ElementType::Text,
            Point::new(0.0, 0.0),
            GRID_SIZE,
        );
        assert_eq!(el.rect(), Rect::new(0, 0, 50, 40));
        assert_eq!(
            el.kind,
            ElementKind::Text {
                text: "Text Box".into(),
                font_size: 14,
                font_family: "Arial".into(),
            }
        );
    }

    #[test]
    fn create_snaps_position() {
        let el = Element::create(
            ElementId::intern("b1"),
            ElementType::Button,
            Point::new(26.0, 44.0),
            GRID_SIZE,
        );
        assert_eq!(el.position(), Position { x: 30, y: 40 });
        assert_eq!(el.element_type(), ElementType::Button);
    }

    #[test]
    fn json_shape_is_flat_camel_case() {
        let el = Element::create(
            ElementId::intern("e1"),
            ElementType::Text,
            Point::default(),
            GRID_SIZE,
        );
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "e1",
                "type": "text",
                "x": 0,
                "y": 0,
                "width": 50,
                "height": 40,
                "text": "Text Box",
                "fontSize": 14,
                "fontFamily": "Arial",
            })
        );
    }

    #[test]
    fn parses_image_element() {
        let el: Element = serde_json::from_str(
            r#"{"id":"img","type":"image","x":10,"y":20,"width":100,"height":80,
                "src":"/cat.png","alt":"A cat"}"#,
        )
        .unwrap();
        assert_eq!(el.element_type(), ElementType::Image);
        assert_eq!(el.rect(), Rect::new(10, 20, 100, 80));
    }

    #[test]
    fn apply_ignores_foreign_payload_fields() {
        let mut el = Element::create(
            ElementId::intern("img2"),
            ElementType::Image,
            Point::default(),
            GRID_SIZE,
        );
        let update = ElementUpdate {
            alt: Some("Logo".into()),
            text: Some("ignored".into()),
            font_size: Some(30),
            ..ElementUpdate::default()
        };
        el.apply(&update);
        assert_eq!(
            el.kind,
            ElementKind::Image {
                src: DEFAULT_IMAGE_SRC.into(),
                alt: "Logo".into(),
            }
        );
    }

    #[test]
    fn updated_leaves_original_untouched() {
        let el = Element::create(
            ElementId::intern("btn"),
            ElementType::Button,
            Point::default(),
            GRID_SIZE,
        );
        let next = el.updated(&ElementUpdate::text("Submit"));
        assert_eq!(el.kind, ElementKind::Button { text: "Button".into() });
        assert_eq!(next.kind, ElementKind::Button { text: "Submit".into() });
        assert_eq!(next.id, el.id);
    }

    #[test]
    fn empty_update() {
        assert!(ElementUpdate::default().is_empty());
        assert!(!ElementUpdate::position(0, 0).is_empty());
    }

    #[test]
    fn geometry_updates() {
        assert!(ElementUpdate::position(0, 0).touches_geometry());
        assert!(ElementUpdate::size(50, 40).touches_geometry());
        assert!(!ElementUpdate::text("Hi").touches_geometry());
        assert!(!ElementUpdate::default().touches_geometry());
    }
}
