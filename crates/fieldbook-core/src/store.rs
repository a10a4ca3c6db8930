//! In-memory list of resources held by a client. Supports whole-list replace and append.
//! No persistence; the list is discarded when the process exits.

/// Ordered resources: server order after a load, then append order for created items.
/// Whatever is rendered is exactly this list, never filtered or sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList<T> {
    items: Vec<T>,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the whole list (used by loads, so reloading never duplicates).
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Append one item and return a reference to it.
    pub fn push(&mut self, item: T) -> &T {
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a ResourceList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_drops_previous_items() {
        let mut list = ResourceList::new();
        list.replace(vec![1, 2]);
        list.replace(vec![1, 2]);
        assert_eq!(list.as_slice(), &[1, 2]);
    }

    #[test]
    fn push_appends_at_end() {
        let mut list = ResourceList::new();
        list.replace(vec!["a"]);
        assert_eq!(*list.push("b"), "b");
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn new_list_is_empty() {
        let list: ResourceList<u8> = ResourceList::default();
        assert!(list.is_empty());
    }
}
