//! Grid geometry: snapping, clamping, and collision detection.
//!
//! Element geometry is integral and grid-aligned; pointer coordinates are
//! `f64` because browser pointer events may carry fractional pixels. Every
//! function here is pure and never panics: huge or non-finite pointer values
//! saturate instead of overflowing.
//!
//! Gesture math is always computed from the gesture-start geometry plus the
//! total pointer delta, never incrementally from the previous frame, so a
//! result depends only on (start snapshot, current pointer).

use crate::id::ElementId;
use crate::model::Element;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default grid unit in canvas pixels.
pub const GRID_SIZE: i32 = 10;

// ─── Primitives ──────────────────────────────────────────────────────────

/// Pointer position in canvas-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Top-left corner of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
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

    /// Strict AABB overlap; rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        do_rectangles_overlap(self, other)
    }
}

/// The drawable surface elements are confined to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
    /// Grid unit every position and size snaps to.
    pub grid: i32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Canvas {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            grid: GRID_SIZE,
        }
    }

    pub const fn with_grid(mut self, grid: i32) -> Self {
        self.grid = grid;
        self
    }

    /// Largest grid-aligned value not exceeding `value`.
    fn align_down(&self, value: i32) -> i32 {
        let grid = self.grid.max(1);
        value.div_euclid(grid) * grid
    }
}

// ─── Snapping & clamping ─────────────────────────────────────────────────

/// Round `value` to the nearest multiple of `grid`.
///
/// Halves round toward positive infinity (`2.5 → 3`, `-2.5 → -2`), so a
/// drag of +25 and a drag of -25 land symmetrically around the start.
/// Results saturate at the largest representable multiple; `NaN` snaps
/// to 0. A non-positive `grid` is treated as 1.
pub fn snap_to_grid(value: f64, grid: i32) -> i32 {
    let grid = grid.max(1);
    let units = ((value / f64::from(grid)) + 0.5).floor();
    let max_units = f64::from(i32::MAX / grid);
    let min_units = f64::from(i32::MIN / grid);
    (units.clamp(min_units, max_units) as i32).saturating_mul(grid)
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`i32::clamp`] this never panics: when `max < min` (an element
/// larger than the canvas) the lower bound wins.
pub fn clamp_to_bounds(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}

/// Fit a rectangle onto the canvas grid.
///
/// Position and size are snapped to the grid. Each dimension is kept
/// between one grid unit and the (grid-aligned) canvas extent, then the
/// position is clamped so the rectangle lies fully inside.
pub fn clamp_element_to_canvas(rect: Rect, canvas: &Canvas) -> Rect {
    let g = canvas.grid.max(1);
    let width = clamp_to_bounds(
        snap_to_grid(f64::from(rect.width), g),
        g,
        canvas.align_down(canvas.width),
    );
    let height = clamp_to_bounds(
        snap_to_grid(f64::from(rect.height), g),
        g,
        canvas.align_down(canvas.height),
    );
    Rect {
        x: clamp_to_bounds(
            snap_to_grid(f64::from(rect.x), g),
            0,
            canvas.align_down(canvas.width.saturating_sub(width)),
        ),
        y: clamp_to_bounds(
            snap_to_grid(f64::from(rect.y), g),
            0,
            canvas.align_down(canvas.height.saturating_sub(height)),
        ),
        width,
        height,
    }
}

// ─── Gesture math ────────────────────────────────────────────────────────

/// Compute the grid-snapped position of an element being dragged.
///
/// `origin` is the element's position at gesture start; `pointer` and
/// `start` are the current and gesture-start pointer positions. The
/// result always keeps the element fully inside `canvas`, even when the
/// pointer leaves it.
pub fn calculate_grid_position(
    origin: Position,
    pointer: Point,
    start: Point,
    size: Size,
    canvas: &Canvas,
) -> Position {
    let new_x = f64::from(origin.x) + (pointer.x - start.x);
    let new_y = f64::from(origin.y) + (pointer.y - start.y);

    let snapped_x = snap_to_grid(new_x, canvas.grid);
    let snapped_y = snap_to_grid(new_y, canvas.grid);

    Position {
        x: clamp_to_bounds(
            snapped_x,
            0,
            canvas.align_down(canvas.width.saturating_sub(size.width)),
        ),
        y: clamp_to_bounds(
            snapped_y,
            0,
            canvas.align_down(canvas.height.saturating_sub(size.height)),
        ),
    }
}

/// Compute the grid-snapped size of an element being resized from its
/// bottom-right corner. The top-left `at` never moves.
///
/// Each dimension is at least one grid unit and never extends past the
/// canvas edge.
pub fn calculate_grid_resize(
    start_size: Size,
    pointer: Point,
    start: Point,
    at: Position,
    canvas: &Canvas,
) -> Size {
    let g = canvas.grid;
    let new_width = start_size
        .width
        .saturating_add(snap_to_grid(pointer.x - start.x, g))
        .max(g);
    let new_height = start_size
        .height
        .saturating_add(snap_to_grid(pointer.y - start.y, g))
        .max(g);

    Size {
        width: clamp_to_bounds(
            new_width,
            g,
            canvas.align_down(canvas.width.saturating_sub(at.x)),
        ),
        height: clamp_to_bounds(
            new_height,
            g,
            canvas.align_down(canvas.height.saturating_sub(at.y)),
        ),
    }
}

// ─── Collision ───────────────────────────────────────────────────────────

/// Strict axis-aligned bounding box test. Symmetric; touching edges are
/// not an overlap.
pub fn do_rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.x + a.width <= b.x
        || a.x >= b.x + b.width
        || a.y + a.height <= b.y
        || a.y >= b.y + b.height)
}

/// True iff `element` overlaps any other element (by id) in `all`.
/// An element never collides with itself; `None` never collides.
pub fn will_element_collide(element: Option<&Element>, all: &[Element]) -> bool {
    let Some(element) = element else {
        return false;
    };
    let rect = element.rect();
    all.iter()
        .any(|other| other.id != element.id && do_rectangles_overlap(&rect, &other.rect()))
}

/// Ids of every other element that `element` overlaps.
pub fn colliding_ids(element: &Element, all: &[Element]) -> SmallVec<[ElementId; 4]> {
    let rect = element.rect();
    all.iter()
        .filter(|other| other.id != element.id && do_rectangles_overlap(&rect, &other.rect()))
        .map(|other| other.id)
        .collect()
}
