use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Process-wide interner shared by every session.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned element id. Serializes as its plain string form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a string as an ElementId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

/// Per-document id allocator producing `e1`, `e2`, ...
///
/// Each editing session owns one, so ids are deterministic within a
/// document and never depend on what other documents have allocated.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: &'static str,
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new("e")
    }
}

impl IdSequence {
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    /// Allocate the next id for which `taken` returns false.
    pub fn next_free(&mut self, taken: impl Fn(ElementId) -> bool) -> ElementId {
        loop {
            let id = ElementId::intern(&format!("{}{}", self.prefix, self.next));
            self.next += 1;
            if !taken(id) {
                return id;
            }
        }
    }

    /// Restart numbering from 1.
    pub fn reset(&mut self) {
        self.next = 1;
    }

    /// Continue numbering past every `<prefix><n>` id in `ids`, so ids from
    /// a loaded document are never handed out again even after deletion.
    pub fn resume_after(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        let highest = ids
            .into_iter()
            .filter_map(|id| self.sequence_number(id))
            .max();
        if let Some(n) = highest {
            self.next = self.next.max(n.saturating_add(1));
        }
    }

    fn sequence_number(&self, id: ElementId) -> Option<u64> {
        let digits = id.as_str().strip_prefix(self.prefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}
