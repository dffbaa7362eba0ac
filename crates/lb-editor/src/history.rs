//! Undo/Redo history.
//!
//! Every committed edit is recorded as a `HistoryAction`. Actions are pushed
//! to a bounded undo stack; undo moves the top action to the redo stack and
//! hands it back to the caller, who replays its inverse (see
//! [`crate::replay`]). The history itself never touches element state.
//!
//! Drag and resize gestures use **collection-snapshot actions**: the full
//! element list is captured at gesture start and at commit, so undo/redo
//! swaps the whole collection in a single step. Field edits store only the
//! one element they touched.

use lb_core::id::ElementId;
use lb_core::model::Element;
use std::fmt;

/// Discriminant of a [`HistoryAction`], for callers that only need the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Add,
    Delete,
    Update,
    Move,
    Resize,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Add => "ADD",
            ActionKind::Delete => "DELETE",
            ActionKind::Update => "UPDATE",
            ActionKind::Move => "MOVE",
            ActionKind::Resize => "RESIZE",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reversible edit.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    /// An element was created.
    Add { element: Element, description: String },
    /// An element was removed.
    Delete { element: Element, description: String },
    /// One element's fields changed.
    Update {
        previous: Element,
        next: Element,
        description: String,
    },
    /// A drag gesture committed. Snapshots cover the whole collection.
    Move {
        element_id: ElementId,
        previous: Vec<Element>,
        next: Vec<Element>,
        description: String,
    },
    /// A resize gesture committed. Snapshots cover the whole collection.
    Resize {
        element_id: ElementId,
        previous: Vec<Element>,
        next: Vec<Element>,
        description: String,
    },
}

impl HistoryAction {
    pub fn add(element: Element) -> Self {
        let description = format!("Add {} element", element.element_type());
        HistoryAction::Add {
            element,
            description,
        }
    }

    pub fn delete(element: Element) -> Self {
        let description = format!("Delete {}", element.element_type());
        HistoryAction::Delete {
            element,
            description,
        }
    }

    pub fn update(previous: Element, next: Element) -> Self {
        let description = format!("Update {}", next.element_type());
        HistoryAction::Update {
            previous,
            next,
            description,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            HistoryAction::Add { .. } => ActionKind::Add,
            HistoryAction::Delete { .. } => ActionKind::Delete,
            HistoryAction::Update { .. } => ActionKind::Update,
            HistoryAction::Move { .. } => ActionKind::Move,
            HistoryAction::Resize { .. } => ActionKind::Resize,
        }
    }

    /// Id of the element this action is about.
    pub fn element_id(&self) -> ElementId {
        match self {
            HistoryAction::Add { element, .. } | HistoryAction::Delete { element, .. } => {
                element.id
            }
            HistoryAction::Update { next, .. } => next.id,
            HistoryAction::Move { element_id, .. } | HistoryAction::Resize { element_id, .. } => {
                *element_id
            }
        }
    }

    /// Human-readable label. Diagnostic only; replay never reads it.
    pub fn description(&self) -> &str {
        match self {
            HistoryAction::Add { description, .. }
            | HistoryAction::Delete { description, .. }
            | HistoryAction::Update { description, .. }
            | HistoryAction::Move { description, .. }
            | HistoryAction::Resize { description, .. } => description,
        }
    }
}

/// Point-in-time summary of the stacks, for toolbar state and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryState {
    pub undo_len: usize,
    pub redo_len: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Bounded linear undo/redo stacks.
///
/// A new action always clears the redo stack: there is no redo tree.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: Vec<HistoryAction>,
    redo_stack: Vec<HistoryAction>,
    /// Maximum undo depth.
    max_size: usize,
}

impl HistoryManager {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_size),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record a committed edit.
    ///
    /// Clears the redo stack. When the undo stack exceeds its bound the
    /// oldest action is dropped and can no longer be undone.
    pub fn add_action(&mut self, action: HistoryAction) {
        log::debug!("history: record {} ({})", action.kind(), action.description());
        self.undo_stack.push(action);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.max_size {
            let evicted = self.undo_stack.remove(0);
            log::debug!("history: full, dropped oldest {}", evicted.kind());
        }
    }

    /// Move the most recent action to the redo stack and return it.
    /// The caller replays its inverse.
    pub fn undo(&mut self) -> Option<&HistoryAction> {
        let action = self.undo_stack.pop()?;
        self.redo_stack.push(action);
        self.redo_stack.last()
    }

    /// Move the most recently undone action back to the undo stack and
    /// return it. The caller re-applies it.
    pub fn redo(&mut self) -> Option<&HistoryAction> {
        let action = self.redo_stack.pop()?;
        self.undo_stack.push(action);
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Forget everything (a different document was opened).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            undo_len: self.undo_stack.len(),
            redo_len: self.redo_stack.len(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}
