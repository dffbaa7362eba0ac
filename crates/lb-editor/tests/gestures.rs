//! Integration tests: drag/resize gestures against a loaded layout.

use lb_core::geometry::{Point, Position, Size};
use lb_core::model::Element;
use lb_core::{EditorConfig, ElementId};
use lb_editor::{ActionKind, EditorSession, GestureOutcome};
use pretty_assertions::assert_eq;

const LAYOUT: &str = r#"[
  {"id":"title","type":"text","x":0,"y":0,"width":200,"height":40,
   "text":"Welcome","fontSize":24,"fontFamily":"Georgia"},
  {"id":"hero","type":"image","x":0,"y":60,"width":300,"height":200,
   "src":"/hero.png","alt":"Hero"},
  {"id":"cta","type":"button","x":320,"y":60,"width":100,"height":40,
   "text":"Start"}
]"#;

fn session() -> EditorSession {
    let _ = env_logger::builder().is_test(true).try_init();
    let elements: Vec<Element> = serde_json::from_str(LAYOUT).unwrap();
    EditorSession::with_elements(EditorConfig::default(), elements).unwrap()
}

fn id(s: &str) -> ElementId {
    ElementId::intern(s)
}

#[test]
fn drag_onto_neighbour_reverts_without_history() {
    let mut s = session();
    let before = s.elements().to_vec();

    s.begin_drag(id("cta"), Point::new(330.0, 70.0)).unwrap();
    // Intermediate frames may overlap freely.
    s.pointer_move(Point::new(200.0, 100.0));
    assert_eq!(
        s.find(id("cta")).map(Element::position),
        Some(Position { x: 190, y: 90 })
    );
    assert_eq!(s.pointer_up(), Some(GestureOutcome::Reverted));

    assert_eq!(s.elements(), before.as_slice());
    assert!(!s.can_undo());
}

#[test]
fn drag_past_canvas_edge_is_clamped() {
    let mut s = session();
    s.begin_drag(id("cta"), Point::new(0.0, 0.0)).unwrap();
    s.pointer_move(Point::new(5000.0, 5000.0));
    assert!(matches!(s.pointer_up(), Some(GestureOutcome::Committed(_))));
    assert_eq!(
        s.find(id("cta")).map(Element::position),
        Some(Position { x: 700, y: 560 })
    );
}

#[test]
fn drag_next_to_neighbour_commits() {
    let mut s = session();
    // Slide the button left until it touches the image's right edge.
    s.begin_drag(id("cta"), Point::new(0.0, 0.0)).unwrap();
    s.pointer_move(Point::new(-20.0, 0.0));
    let outcome = s.pointer_up().unwrap();
    assert!(matches!(outcome, GestureOutcome::Committed(ref a) if a.kind() == ActionKind::Move));
    assert_eq!(
        s.find(id("cta")).map(Element::position),
        Some(Position { x: 300, y: 60 })
    );
}

#[test]
fn resize_into_neighbour_reverts() {
    let mut s = session();
    s.begin_resize(id("title"), Point::new(200.0, 40.0)).unwrap();
    s.pointer_move(Point::new(200.0, 80.0));
    assert_eq!(
        s.find(id("title")).map(Element::size),
        Some(Size {
            width: 200,
            height: 80
        })
    );
    assert_eq!(s.pointer_up(), Some(GestureOutcome::Reverted));
    assert_eq!(
        s.find(id("title")).map(Element::size),
        Some(Size {
            width: 200,
            height: 40
        })
    );
}

#[test]
fn click_without_motion_records_nothing() {
    let mut s = session();
    s.begin_drag(id("hero"), Point::new(10.0, 70.0)).unwrap();
    s.pointer_move(Point::new(12.0, 71.0));
    assert_eq!(s.pointer_up(), Some(GestureOutcome::Unchanged));
    assert!(!s.can_undo());
}

#[test]
fn undo_after_reverted_gesture_skips_it() {
    let mut s = session();

    s.begin_drag(id("title"), Point::new(0.0, 0.0)).unwrap();
    s.pointer_move(Point::new(400.0, 0.0));
    assert!(matches!(s.pointer_up(), Some(GestureOutcome::Committed(_))));

    s.begin_drag(id("title"), Point::new(0.0, 0.0)).unwrap();
    s.pointer_move(Point::new(-100.0, 60.0));
    assert_eq!(s.pointer_up(), Some(GestureOutcome::Reverted));

    assert_eq!(s.undo(), Some(ActionKind::Move));
    assert_eq!(
        s.find(id("title")).map(Element::position),
        Some(Position { x: 0, y: 0 })
    );
    assert!(!s.can_undo());
}
