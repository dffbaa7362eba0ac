//! Editing session: one open document's elements, history, and gesture.
//!
//! A session is created when a document is opened and replaced (or
//! [`EditorSession::load`]ed) when the user switches documents, so history
//! never bleeds from one layout into another. All mutation goes through
//! `&mut self`; pointer handlers always see the latest committed
//! collection.

use crate::gesture::{Gesture, GestureKind, GestureOutcome};
use crate::history::{ActionKind, HistoryAction, HistoryManager, HistoryState};
use crate::replay::{apply_redo, apply_undo};
use lb_core::config::{ConfigError, EditorConfig};
use lb_core::geometry::{Canvas, Point, clamp_element_to_canvas, colliding_ids};
use lb_core::id::{ElementId, IdSequence};
use lb_core::model::{Element, ElementType, ElementUpdate};
use lb_core::store::ElementStore;
use lb_core::validate::{ValidationError, validate_element, validate_elements};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("no element with id {0}")]
    UnknownElement(ElementId),
    #[error("a drag or resize is already in progress")]
    GestureInProgress,
    #[error("the layout is open read-only")]
    ReadOnly,
    #[error("layout already has the maximum of {0} elements")]
    ElementLimit(usize),
    #[error("element {id} would overlap {other}")]
    Collision { id: ElementId, other: ElementId },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct EditorSession {
    config: EditorConfig,
    canvas: Canvas,
    elements: ElementStore,
    history: HistoryManager,
    ids: IdSequence,
    gesture: Option<Gesture>,
    read_only: bool,
}

impl EditorSession {
    /// Start an empty document.
    ///
    /// # Errors
    /// Rejects configs that fail [`EditorConfig::validate`].
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: EditorConfig) -> Self {
        Self {
            canvas: config.canvas(),
            history: HistoryManager::new(config.max_history_size),
            config,
            elements: ElementStore::new(),
            ids: IdSequence::default(),
            gesture: None,
            read_only: false,
        }
    }

    /// Open an existing document.
    ///
    /// # Errors
    /// Rejects invalid configs and collections that fail
    /// [`validate_elements`].
    pub fn with_elements(config: EditorConfig, elements: Vec<Element>) -> Result<Self, EditError> {
        let mut session = Self::new(config)?;
        session.load(elements)?;
        Ok(session)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn elements(&self) -> &[Element] {
        self.elements.as_slice()
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.elements.find(id)
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    // ─── Document lifecycle ──────────────────────────────────────────────

    /// Replace the document and forget all history.
    ///
    /// # Errors
    /// Rejects invalid collections; the current document is kept.
    pub fn load(&mut self, elements: Vec<Element>) -> Result<(), EditError> {
        validate_elements(&elements, self.config.max_elements)?;
        log::debug!("session: load {} elements", elements.len());
        self.ids.reset();
        self.ids.resume_after(elements.iter().map(|el| el.id));
        self.elements.replace_all(elements);
        self.history.clear();
        self.gesture = None;
        Ok(())
    }

    /// Preview and read-only views: edits and gestures are refused and
    /// undo/redo do nothing. Entering read-only cancels an active gesture.
    pub fn set_read_only(&mut self, read_only: bool) {
        if read_only {
            if let Some(gesture) = self.gesture.take() {
                gesture.cancel(&mut self.elements);
            }
        }
        self.read_only = read_only;
    }

    /// Forget undo/redo history without touching the document.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The canvas was re-measured. Elements that no longer fit are pulled
    /// back inside (and shrunk if larger than the canvas); this is layout
    /// housekeeping and is not recorded.
    ///
    /// # Errors
    /// Rejects a canvas smaller than one grid unit; nothing changes.
    pub fn set_canvas_size(&mut self, width: i32, height: i32) -> Result<(), ConfigError> {
        let grid = self.config.grid_size;
        if width < grid || height < grid {
            return Err(ConfigError::CanvasTooSmall {
                width,
                height,
                grid,
            });
        }
        self.canvas = Canvas::new(width, height).with_grid(grid);
        let canvas = self.canvas;
        let clamped: Vec<Element> = self
            .elements
            .iter()
            .map(|el| {
                let mut el = el.clone();
                let rect = clamp_element_to_canvas(el.rect(), &canvas);
                el.set_position(rect.position());
                el.set_size(rect.size());
                el
            })
            .collect();
        log::debug!("session: canvas re-measured to {width}x{height}");
        self.elements.replace_all(clamped);
        Ok(())
    }

    // ─── Element edits ───────────────────────────────────────────────────

    fn ensure_editable(&self) -> Result<(), EditError> {
        if self.read_only {
            return Err(EditError::ReadOnly);
        }
        if self.gesture.is_some() {
            return Err(EditError::GestureInProgress);
        }
        Ok(())
    }

    /// Create an element of `element_type` at the canvas origin.
    ///
    /// # Errors
    /// Fails when read-only, while a gesture is active, or when the layout
    /// is full.
    pub fn add_element(&mut self, element_type: ElementType) -> Result<ElementId, EditError> {
        self.ensure_editable()?;
        if self.elements.len() >= self.config.max_elements {
            return Err(EditError::ElementLimit(self.config.max_elements));
        }

        let elements = &self.elements;
        let id = self.ids.next_free(|id| elements.contains(id));
        let element = Element::create(id, element_type, Point::default(), self.canvas.grid);

        self.history.add_action(HistoryAction::add(element.clone()));
        self.elements.push(element);
        Ok(id)
    }

    /// Merge `update` into element `id`.
    ///
    /// Position and size edits go through the same grid snapping and
    /// canvas clamping as gestures, and are refused if the result would
    /// overlap another element. An update that changes nothing is not
    /// recorded.
    ///
    /// # Errors
    /// Unknown ids, invalid results and overlaps are rejected and leave
    /// the document unchanged.
    pub fn update_element(
        &mut self,
        id: ElementId,
        update: &ElementUpdate,
    ) -> Result<(), EditError> {
        self.ensure_editable()?;
        let previous = self
            .elements
            .find(id)
            .cloned()
            .ok_or(EditError::UnknownElement(id))?;
        let mut next = previous.updated(update);
        if update.touches_geometry() {
            let rect = clamp_element_to_canvas(next.rect(), &self.canvas);
            next.set_position(rect.position());
            next.set_size(rect.size());
        }
        validate_element(&next)?;
        if update.touches_geometry() {
            if let Some(&other) = colliding_ids(&next, self.elements.as_slice()).first() {
                return Err(EditError::Collision { id, other });
            }
        }
        if next == previous {
            log::debug!("session: update of {id} changes nothing");
            return Ok(());
        }

        self.elements.replace(id, next.clone());
        self.history.add_action(HistoryAction::update(previous, next));
        Ok(())
    }

    /// Remove element `id`, returning it.
    ///
    /// # Errors
    /// Unknown ids are rejected.
    pub fn delete_element(&mut self, id: ElementId) -> Result<Element, EditError> {
        self.ensure_editable()?;
        let removed = self
            .elements
            .remove(id)
            .ok_or(EditError::UnknownElement(id))?;
        self.history.add_action(HistoryAction::delete(removed.clone()));
        Ok(removed)
    }

    // ─── Gestures ────────────────────────────────────────────────────────

    fn begin(&mut self, kind: GestureKind, id: ElementId, pointer: Point) -> Result<(), EditError> {
        self.ensure_editable()?;
        let gesture =
            Gesture::begin(kind, id, &self.elements, pointer).ok_or(EditError::UnknownElement(id))?;
        self.gesture = Some(gesture);
        Ok(())
    }

    /// Pointer-down on an element body.
    ///
    /// # Errors
    /// Fails for unknown ids, when read-only, or while another gesture is
    /// active.
    pub fn begin_drag(&mut self, id: ElementId, pointer: Point) -> Result<(), EditError> {
        self.begin(GestureKind::Move, id, pointer)
    }

    /// Pointer-down on an element's resize handle.
    ///
    /// # Errors
    /// Fails for unknown ids, when read-only, or while another gesture is
    /// active.
    pub fn begin_resize(&mut self, id: ElementId, pointer: Point) -> Result<(), EditError> {
        self.begin(GestureKind::Resize, id, pointer)
    }

    /// Pointer-move. Ignored when no gesture is active.
    pub fn pointer_move(&mut self, pointer: Point) {
        if let Some(gesture) = &self.gesture {
            gesture.update(pointer, &self.canvas, &mut self.elements);
        }
    }

    /// Pointer-up: commit or revert the active gesture.
    /// Returns `None` when no gesture was active.
    pub fn pointer_up(&mut self) -> Option<GestureOutcome> {
        let gesture = self.gesture.take()?;
        let outcome = gesture.finish(&mut self.elements);
        if let GestureOutcome::Committed(action) = &outcome {
            self.history.add_action(action.clone());
        }
        Some(outcome)
    }

    // ─── Undo / Redo ─────────────────────────────────────────────────────

    /// Revert the most recent action. Returns its kind, or `None` when
    /// there is nothing to undo, a gesture is active, or the session is
    /// read-only.
    pub fn undo(&mut self) -> Option<ActionKind> {
        if self.ensure_editable().is_err() {
            log::debug!("session: undo ignored");
            return None;
        }
        let action = self.history.undo()?;
        log::debug!("session: undo {}", action.description());
        apply_undo(action, &mut self.elements);
        Some(action.kind())
    }

    /// Re-apply the most recently undone action.
    pub fn redo(&mut self) -> Option<ActionKind> {
        if self.ensure_editable().is_err() {
            log::debug!("session: redo ignored");
            return None;
        }
        let action = self.history.redo()?;
        log::debug!("session: redo {}", action.description());
        apply_redo(action, &mut self.elements);
        Some(action.kind())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::from_valid(EditorConfig::default())
    }
}
