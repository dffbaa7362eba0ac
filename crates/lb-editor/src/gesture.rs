//! Drag and resize gestures.
//!
//! A gesture spans pointer-down to pointer-up. [`Gesture::begin`] captures
//! the whole collection plus the subject's original geometry; every
//! [`Gesture::update`] recomputes tentative geometry from that capture and
//! the *total* pointer delta, so rounding never accumulates across frames.
//! [`Gesture::finish`] is the only commit point: it runs the collision
//! check once and either yields a history action or restores the capture.

use crate::history::HistoryAction;
use lb_core::geometry::{
    Canvas, Point, Rect, calculate_grid_position, calculate_grid_resize, colliding_ids,
    will_element_collide,
};
use lb_core::id::ElementId;
use lb_core::model::Element;
use lb_core::store::ElementStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Translate the element; size is fixed.
    Move,
    /// Grow or shrink from the bottom-right corner; position is fixed.
    Resize,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Geometry changed and the final state is collision-free.
    Committed(HistoryAction),
    /// The final state collided; the collection was restored.
    Reverted,
    /// The pointer came back to where it started; nothing to record.
    Unchanged,
}

/// An in-flight drag or resize.
#[derive(Debug, Clone)]
pub struct Gesture {
    kind: GestureKind,
    element_id: ElementId,
    /// Pointer position at pointer-down.
    start: Point,
    /// Subject geometry at pointer-down.
    origin: Rect,
    /// Whole collection at pointer-down, for revert and for the action.
    snapshot: Vec<Element>,
}

impl Gesture {
    /// Start a gesture on `element_id`. Returns `None` if it does not exist.
    pub fn begin(
        kind: GestureKind,
        element_id: ElementId,
        store: &ElementStore,
        pointer: Point,
    ) -> Option<Self> {
        let origin = store.find(element_id)?.rect();
        log::debug!("gesture: begin {kind:?} on {element_id}");
        Some(Self {
            kind,
            element_id,
            start: pointer,
            origin,
            snapshot: store.snapshot(),
        })
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    /// The collection as it was at pointer-down.
    pub fn snapshot(&self) -> &[Element] {
        &self.snapshot
    }

    /// Write the tentative geometry for `pointer` into `store`.
    pub fn update(&self, pointer: Point, canvas: &Canvas, store: &mut ElementStore) {
        let Some(element) = store.find_mut(self.element_id) else {
            return;
        };
        match self.kind {
            GestureKind::Move => {
                let pos = calculate_grid_position(
                    self.origin.position(),
                    pointer,
                    self.start,
                    self.origin.size(),
                    canvas,
                );
                element.set_position(pos);
            }
            GestureKind::Resize => {
                let size = calculate_grid_resize(
                    self.origin.size(),
                    pointer,
                    self.start,
                    self.origin.position(),
                    canvas,
                );
                element.set_size(size);
            }
        }
        log::trace!(
            "gesture: {:?} {} -> {:?}",
            self.kind,
            self.element_id,
            element.rect()
        );
    }

    /// Abandon the gesture and restore the collection captured at begin.
    pub fn cancel(self, store: &mut ElementStore) {
        log::debug!("gesture: cancel {:?} on {}", self.kind, self.element_id);
        store.replace_all(self.snapshot);
    }

    /// Release the pointer: commit, revert, or report no change.
    pub fn finish(self, store: &mut ElementStore) -> GestureOutcome {
        let current = store.find(self.element_id);
        if will_element_collide(current, store.as_slice()) {
            if let Some(element) = current {
                log::debug!(
                    "gesture: {:?} on {} collides with {:?}, reverting",
                    self.kind,
                    self.element_id,
                    colliding_ids(element, store.as_slice()).as_slice()
                );
            }
            store.replace_all(self.snapshot);
            return GestureOutcome::Reverted;
        }

        if store.as_slice() == self.snapshot.as_slice() {
            return GestureOutcome::Unchanged;
        }

        let label = current
            .map(|el| el.element_type().as_str())
            .unwrap_or("element");
        let next = store.snapshot();
        let action = match self.kind {
            GestureKind::Move => HistoryAction::Move {
                element_id: self.element_id,
                previous: self.snapshot,
                next,
                description: format!("Move {label}"),
            },
            GestureKind::Resize => HistoryAction::Resize {
                element_id: self.element_id,
                previous: self.snapshot,
                next,
                description: format!("Resize {label}"),
            },
        };
        log::debug!("gesture: commit {}", action.description());
        GestureOutcome::Committed(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ActionKind;
    use lb_core::geometry::{GRID_SIZE, Position, Size};
    use lb_core::model::{ElementKind, ElementType};

    fn el(id: &str, x: i32, y: i32) -> Element {
        Element::new(
            ElementId::intern(id),
            ElementKind::default_for(ElementType::Text),
            Rect::new(x, y, 50, 40),
        )
    }

    fn store(elements: Vec<Element>) -> ElementStore {
        ElementStore::from_elements(elements)
    }

    #[test]
    fn begin_on_missing_element() {
        let s = store(vec![]);
        let missing = ElementId::intern("nope");
        assert!(Gesture::begin(GestureKind::Move, missing, &s, Point::default()).is_none());
    }

    #[test]
    fn move_recomputes_from_start() {
        let id = ElementId::intern("g1");
        let mut s = store(vec![el("g1", 0, 0)]);
        let canvas = Canvas::default();
        let g = Gesture::begin(GestureKind::Move, id, &s, Point::new(100.0, 100.0)).unwrap();

        // Many tiny steps must land where one big step lands.
        for step in 1..=23 {
            g.update(Point::new(100.0 + f64::from(step), 100.0), &canvas, &mut s);
        }
        assert_eq!(s.find(id).unwrap().position(), Position { x: 20, y: 0 });

        g.update(Point::new(123.0, 117.0), &canvas, &mut s);
        assert_eq!(s.find(id).unwrap().position(), Position { x: 20, y: 20 });
        assert_eq!(
            s.find(id).unwrap().size(),
            Size {
                width: 50,
                height: 40
            }
        );
    }

    #[test]
    fn resize_keeps_anchor() {
        let id = ElementId::intern("g2");
        let mut s = store(vec![el("g2", 100, 100)]);
        let g = Gesture::begin(GestureKind::Resize, id, &s, Point::default()).unwrap();
        g.update(Point::new(28.0, -200.0), &Canvas::default(), &mut s);

        let resized = s.find(id).unwrap();
        assert_eq!(resized.position(), Position { x: 100, y: 100 });
        assert_eq!(
            resized.size(),
            Size {
                width: 80,
                height: GRID_SIZE
            }
        );
    }

    #[test]
    fn commit_records_before_and_after() {
        let id = ElementId::intern("g3");
        let mut s = store(vec![el("g3", 0, 0), el("g3b", 200, 200)]);
        let before = s.snapshot();
        let g = Gesture::begin(GestureKind::Move, id, &s, Point::default()).unwrap();
        g.update(Point::new(60.0, 0.0), &Canvas::default(), &mut s);

        match g.finish(&mut s) {
            GestureOutcome::Committed(action) => {
                assert_eq!(action.kind(), ActionKind::Move);
                assert_eq!(action.element_id(), id);
                assert_eq!(action.description(), "Move text");
                let HistoryAction::Move { previous, next, .. } = action else {
                    panic!("expected move");
                };
                assert_eq!(previous, before);
                assert_eq!(next, s.snapshot());
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn collision_reverts_to_snapshot() {
        let id = ElementId::intern("g4");
        let mut s = store(vec![el("g4", 0, 0), el("g4b", 100, 0)]);
        let before = s.snapshot();
        let g = Gesture::begin(GestureKind::Move, id, &s, Point::default()).unwrap();
        g.update(Point::new(80.0, 0.0), &Canvas::default(), &mut s);
        assert_eq!(s.find(id).unwrap().x, 80);

        assert_eq!(g.finish(&mut s), GestureOutcome::Reverted);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn touching_neighbour_is_allowed() {
        let id = ElementId::intern("g5");
        let mut s = store(vec![el("g5", 0, 0), el("g5b", 100, 0)]);
        let g = Gesture::begin(GestureKind::Move, id, &s, Point::default()).unwrap();
        g.update(Point::new(50.0, 0.0), &Canvas::default(), &mut s);
        assert!(matches!(g.finish(&mut s), GestureOutcome::Committed(_)));
        assert_eq!(s.find(id).unwrap().x, 50);
    }

    #[test]
    fn cancel_restores_snapshot() {
        let id = ElementId::intern("g7");
        let mut s = store(vec![el("g7", 0, 0)]);
        let before = s.snapshot();
        let g = Gesture::begin(GestureKind::Resize, id, &s, Point::default()).unwrap();
        g.update(Point::new(100.0, 100.0), &Canvas::default(), &mut s);
        g.cancel(&mut s);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn round_trip_pointer_is_unchanged() {
        let id = ElementId::intern("g6");
        let mut s = store(vec![el("g6", 30, 30)]);
        let g = Gesture::begin(GestureKind::Move, id, &s, Point::new(5.0, 5.0)).unwrap();
        g.update(Point::new(90.0, 40.0), &Canvas::default(), &mut s);
        g.update(Point::new(6.0, 4.0), &Canvas::default(), &mut s);
        assert_eq!(g.finish(&mut s), GestureOutcome::Unchanged);
    }
}
