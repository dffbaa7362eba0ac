pub mod config;
pub mod geometry;
pub mod id;
pub mod model;
pub mod store;
pub mod validate;

pub use config::{ConfigError, EditorConfig};
pub use geometry::{
    Canvas, GRID_SIZE, Point, Position, Rect, Size, calculate_grid_position,
    calculate_grid_resize, clamp_element_to_canvas, clamp_to_bounds, colliding_ids,
    do_rectangles_overlap, snap_to_grid, will_element_collide,
};
pub use id::{ElementId, IdSequence};
pub use model::{Element, ElementKind, ElementType, ElementUpdate};
pub use store::ElementStore;
pub use validate::{ValidationError, validate_element, validate_elements, validate_layout_name};
