//! Ordered element collection for one document.
//!
//! Order carries no geometric meaning but is preserved so rendering stays
//! stable: re-inserted elements go to the end, replaced elements keep their
//! slot.

use crate::id::ElementId;
use crate::model::Element;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.find(id).is_some()
    }

    /// Append an element at the top of the stacking order.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Remove the element with `id`, returning it if present.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let pos = self.elements.iter().position(|el| el.id == id)?;
        Some(self.elements.remove(pos))
    }

    /// Replace the element with `id` in place. Returns false if absent.
    pub fn replace(&mut self, id: ElementId, element: Element) -> bool {
        match self.find_mut(id) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }

    /// Swap in an entirely new collection.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// An owned copy of the current collection.
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    pub fn into_vec(self) -> Vec<Element> {
        self.elements
    }
}

impl<'a> IntoIterator for &'a ElementStore {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
