//! The in-progress composition: an ordered list of content sources.

use crate::domain::errors::CompositionError;
use crate::domain::model::CompositionItem;

/// Ordered, duplicate-free list of composition items for one session.
///
/// Insertion order is the text concatenation order. The store is never
/// persisted on its own; it is either discarded at the end of a session or
/// saved explicitly through the preset repository.
#[derive(Debug, Default, Clone)]
pub struct CompositionStore {
    items: Vec<CompositionItem>,
}

impl CompositionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a store wholesale, e.g. from a loaded preset. Duplicate
    /// entries in the input are dropped, keeping the first occurrence.
    pub fn from_items(items: Vec<CompositionItem>) -> Self {
        let mut store = Self::new();
        for item in items {
            let _ = store.add(item);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CompositionItem] {
        &self.items
    }

    /// Read-only copy of the current order.
    pub fn snapshot(&self) -> Vec<CompositionItem> {
        self.items.clone()
    }

    /// Append an item, rejecting one already present.
    pub fn add(&mut self, item: CompositionItem) -> Result<(), CompositionError> {
        if self.items.contains(&item) {
            return Err(CompositionError::DuplicateItem);
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove and return the item at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<CompositionItem, CompositionError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Move the item at `from` to position `to` (remove-then-insert), shifting
    /// everything in between.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), CompositionError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    /// Exchange the items at positions `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), CompositionError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.items.swap(a, b);
        Ok(())
    }

    /// Reverse the whole sequence in place.
    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn check_index(&self, index: usize) -> Result<(), CompositionError> {
        if index >= self.items.len() {
            return Err(CompositionError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> CompositionItem {
        CompositionItem::File(name.into())
    }

    #[test]
    fn add_rejects_duplicate_path() {
        let mut store = CompositionStore::new();
        store.add(file("/p/a.md")).unwrap();
        assert_eq!(
            store.add(file("/p/a.md")),
            Err(CompositionError::DuplicateItem)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_rejects_second_placeholder_and_leaves_store_unchanged() {
        let mut store = CompositionStore::new();
        store.add(file("/p/a.md")).unwrap();
        store.add(CompositionItem::Clipboard).unwrap();

        let before = store.snapshot();
        assert_eq!(
            store.add(CompositionItem::Clipboard),
            Err(CompositionError::DuplicateItem)
        );
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn move_to_is_remove_then_insert() {
        let mut store = CompositionStore::new();
        store.add(file("/a")).unwrap();
        store.add(file("/b")).unwrap();
        store.add(file("/c")).unwrap();

        store.move_to(0, 2).unwrap();
        assert_eq!(store.snapshot(), vec![file("/b"), file("/c"), file("/a")]);
    }

    #[test]
    fn swap_exchanges_positions() {
        let mut store = CompositionStore::new();
        store.add(file("/a")).unwrap();
        store.add(file("/b")).unwrap();
        store.add(file("/c")).unwrap();

        store.swap(0, 2).unwrap();
        assert_eq!(store.snapshot(), vec![file("/c"), file("/b"), file("/a")]);
    }

    #[test]
    fn invalid_indices_are_reported() {
        let mut store = CompositionStore::new();
        store.add(file("/a")).unwrap();

        assert!(matches!(
            store.remove_at(3),
            Err(CompositionError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(store.move_to(0, 1).is_err());
        assert!(store.swap(1, 0).is_err());
    }

    #[test]
    fn reverse_and_clear() {
        let mut store = CompositionStore::new();
        store.add(file("/a")).unwrap();
        store.add(CompositionItem::Clipboard).unwrap();

        store.reverse();
        assert_eq!(
            store.snapshot(),
            vec![CompositionItem::Clipboard, file("/a")]
        );

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn from_items_drops_duplicates() {
        let store = CompositionStore::from_items(vec![
            file("/a"),
            CompositionItem::Clipboard,
            file("/a"),
        ]);
        assert_eq!(store.snapshot(), vec![file("/a"), CompositionItem::Clipboard]);
    }
}
