//! Replaying history actions against an element collection.
//!
//! | action | undo | redo |
//! |--------|------|------|
//! | Add | remove the element | re-insert it |
//! | Delete | re-insert the element | remove it |
//! | Update | restore `previous` in place | restore `next` in place |
//! | Move / Resize | swap in `previous` | swap in `next` |

use crate::history::HistoryAction;
use lb_core::store::ElementStore;

/// Apply the inverse of `action` to `store`.
pub fn apply_undo(action: &HistoryAction, store: &mut ElementStore) {
    match action {
        HistoryAction::Add { element, .. } => {
            store.remove(element.id);
        }
        HistoryAction::Delete { element, .. } => store.push(element.clone()),
        HistoryAction::Update { previous, .. } => {
            if !store.replace(previous.id, previous.clone()) {
                log::debug!("replay: undo update of missing element {}", previous.id);
            }
        }
        HistoryAction::Move { previous, .. } | HistoryAction::Resize { previous, .. } => {
            store.replace_all(previous.clone());
        }
    }
}

/// Re-apply `action` to `store`.
pub fn apply_redo(action: &HistoryAction, store: &mut ElementStore) {
    match action {
        HistoryAction::Add { element, .. } => store.push(element.clone()),
        HistoryAction::Delete { element, .. } => {
            store.remove(element.id);
        }
        HistoryAction::Update { next, .. } => {
            if !store.replace(next.id, next.clone()) {
                log::debug!("replay: redo update of missing element {}", next.id);
            }
        }
        HistoryAction::Move { next, .. } | HistoryAction::Resize { next, .. } => {
            store.replace_all(next.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lb_core::geometry::{GRID_SIZE, Point};
    use lb_core::id::ElementId;
    use lb_core::model::{Element, ElementType, ElementUpdate};
    use pretty_assertions::assert_eq;

    fn el(id: &str) -> Element {
        Element::create(ElementId::intern(id), ElementType::Button, Point::default(), GRID_SIZE)
    }

    #[test]
    fn add_roundtrip() {
        let a = el("ra");
        let action = HistoryAction::add(a.clone());
        let mut store = ElementStore::from_elements(vec![a.clone()]);

        apply_undo(&action, &mut store);
        assert!(store.is_empty());
        apply_redo(&action, &mut store);
        assert_eq!(store.as_slice(), &[a]);
    }

    #[test]
    fn delete_roundtrip() {
        let a = el("rd");
        let action = HistoryAction::delete(a.clone());
        let mut store = ElementStore::new();

        apply_undo(&action, &mut store);
        assert_eq!(store.as_slice(), &[a]);
        apply_redo(&action, &mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn update_roundtrip_touches_only_subject() {
        let p = el("ru");
        let n = p.updated(&ElementUpdate::text("Buy now"));
        let other = el("bystander").updated(&ElementUpdate::position(100, 0));
        let action = HistoryAction::update(p.clone(), n.clone());
        let mut store = ElementStore::from_elements(vec![n.clone(), other.clone()]);

        apply_undo(&action, &mut store);
        assert_eq!(store.as_slice(), &[p, other.clone()]);
        apply_redo(&action, &mut store);
        assert_eq!(store.as_slice(), &[n, other]);
    }

    #[test]
    fn move_swaps_whole_collection() {
        let before = vec![el("m1"), el("m2").updated(&ElementUpdate::position(100, 100))];
        let mut after = before.clone();
        after[0].x = 40;
        let action = HistoryAction::Move {
            element_id: after[0].id,
            previous: before.clone(),
            next: after.clone(),
            description: "Move button".into(),
        };
        let mut store = ElementStore::from_elements(after.clone());

        apply_undo(&action, &mut store);
        assert_eq!(store.as_slice(), before.as_slice());
        apply_redo(&action, &mut store);
        assert_eq!(store.as_slice(), after.as_slice());
    }
}
