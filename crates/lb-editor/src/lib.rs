pub mod gesture;
pub mod history;
pub mod replay;
pub mod session;

pub use gesture::{Gesture, GestureKind, GestureOutcome};
pub use history::{ActionKind, HistoryAction, HistoryManager, HistoryState};
pub use replay::{apply_redo, apply_undo};
pub use session::{EditError, EditorSession};
