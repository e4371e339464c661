//! Ordered child collection of a directory.

use std::slice;

use crate::node::NodeId;

/// Ordered ids of a directory's children.
///
/// Lookups return `None` when nothing matches; that is a normal outcome,
/// not an error. [`Children::without`] builds an owned copy, so a collection
/// held elsewhere is never affected by it. [`Children::remove`] is the only
/// in-place mutation and is reserved for the tree itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(Vec<NodeId>);

impl Children {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Position of `target` by identity.
    pub fn find(&self, target: NodeId) -> Option<usize> {
        self.0.iter().position(|&id| id == target)
    }

    /// Position of the first id satisfying `pred`.
    pub fn position(&self, pred: impl FnMut(&NodeId) -> bool) -> Option<usize> {
        self.0.iter().position(pred)
    }

    /// Check whether `target` is in the collection.
    pub fn contains(&self, target: NodeId) -> bool {
        self.find(target).is_some()
    }

    /// Copy of this collection with `target` excised.
    ///
    /// Relative order of the remaining ids is preserved. If `target` is
    /// absent the copy equals the original.
    pub fn without(&self, target: NodeId) -> Children {
        match self.find(target) {
            Some(index) => self.without_index(index),
            None => self.clone(),
        }
    }

    /// Copy of this collection with the id at `index` excised.
    pub(crate) fn without_index(&self, index: usize) -> Children {
        let mut ids = Vec::with_capacity(self.0.len().saturating_sub(1));
        ids.extend_from_slice(&self.0[..index]);
        ids.extend_from_slice(&self.0[index + 1..]);
        Children(ids)
    }

    /// Remove `target` in place, returning the position it occupied.
    pub(crate) fn remove(&mut self, target: NodeId) -> Option<usize> {
        let index = self.find(target)?;
        self.0.remove(index);
        Some(index)
    }

    pub(crate) fn push(&mut self, id: NodeId) {
        self.0.push(id);
    }

    pub(crate) fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&NodeId) -> K) {
        self.0.sort_by_key(key);
    }

    /// Get the id at `index`.
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.0.get(index).copied()
    }

    /// Iterate the ids in order.
    pub fn iter(&self) -> std::iter::Copied<slice::Iter<'_, NodeId>> {
        self.0.iter().copied()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no children.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the ids as a slice.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }
}

impl From<Vec<NodeId>> for Children {
    fn from(ids: Vec<NodeId>) -> Self {
        Self(ids)
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Children {
        raw.iter().map(|&n| NodeId::new(n)).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_find() {
        let children = ids(&[4, 7, 9]);
        assert_eq!(children.find(NodeId::new(7)), Some(1));
        assert_eq!(children.find(NodeId::new(5)), None);
        assert!(children.contains(NodeId::new(9)));
    }

    #[test]
    fn test_without_preserves_order_and_original() {
        let children = ids(&[1, 2, 3, 4]);
        let trimmed = children.without(NodeId::new(2));

        assert_eq!(trimmed, ids(&[1, 3, 4]));
        // The source collection is a separate allocation and stays intact.
        assert_eq!(children, ids(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_without_missing_is_unchanged() {
        let children = ids(&[1, 2]);
        assert_eq!(children.without(NodeId::new(9)), children);
    }

    #[test]
    fn test_remove_in_place() {
        let mut children = ids(&[1, 2, 3]);
        assert_eq!(children.remove(NodeId::new(3)), Some(2));
        assert_eq!(children.remove(NodeId::new(3)), None);
        assert_eq!(children, ids(&[1, 2]));
    }
}
