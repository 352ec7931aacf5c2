//! Stable class identifiers
//!
//! This module provides the [`ClassId`] type, an index into the class arena
//! owned by the entity store. A class keeps its id for its whole lifetime,
//! including across renames, so anything that refers to a class by id
//! (relationships, for example) never has to be rewritten when the class's
//! display name changes.

use std::fmt;

/// Arena index identifying one class.
///
/// Ids are handed out sequentially and never reused within one store, so a
/// stale id simply resolves to nothing once its class is deleted.
///
/// # Examples
///
/// ```
/// use umlkit_core::identifier::ClassId;
///
/// let first = ClassId::new(0);
/// let second = first.next();
///
/// assert_ne!(first, second);
/// assert_eq!(second.index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(usize);

impl ClassId {
    /// Creates a `ClassId` from a raw arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the id that follows this one in allocation order.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for ClassId {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_index() {
        let id = ClassId::new(7);
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn test_next_is_monotonic() {
        let id = ClassId::new(0);
        let next = id.next();

        assert!(next > id);
        assert_eq!(next.next().index(), 2);
    }

    #[test]
    fn test_display_trait() {
        let id = ClassId::new(3);
        assert_eq!(format!("{}", id), "#3");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = ClassId::new(1);
        let id2 = ClassId::from(1);
        let id3 = ClassId::new(2);

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }
}
