//! Homogeneous lists of unnamed tags

use crate::error::{Error, Result};
use crate::tag::{TagNode, TagValueMut};
use crate::types::TagType;

/// An ordered sequence of nodes that all share one [`TagType`]
///
/// The value type is fixed while the list holds entries. Every operation that fails
/// leaves the list untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagList {
    value_type: TagType,
    items: Vec<TagNode>,
}

impl TagList {
    /// Create an empty list that accepts `value_type`
    pub fn new(value_type: TagType) -> Self {
        Self {
            value_type,
            items: Vec::new(),
        }
    }

    /// Create a list from existing nodes, checking each against `value_type`
    pub fn with_items(value_type: TagType, items: Vec<TagNode>) -> Result<Self> {
        if let Some(wrong) = items.iter().find(|i| i.tag_type() != value_type) {
            return Err(Error::TypeMismatch {
                expected: value_type,
                found: wrong.tag_type(),
            });
        }

        Ok(Self { value_type, items })
    }

    pub fn value_type(&self) -> TagType {
        self.value_type
    }

    /// Change the accepted type, failing with [`Error::ListNotEmpty`] once entries exist
    pub fn change_value_type(&mut self, value_type: TagType) -> Result<()> {
        if value_type != self.value_type && !self.items.is_empty() {
            return Err(Error::ListNotEmpty(self.items.len()));
        }

        self.value_type = value_type;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check(&self, node: &TagNode) -> Result<()> {
        if node.tag_type() != self.value_type {
            return Err(Error::TypeMismatch {
                expected: self.value_type,
                found: node.tag_type(),
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize, len: usize) -> Result<()> {
        if index >= len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    /// Append a node of the list's value type
    pub fn push(&mut self, node: impl Into<TagNode>) -> Result<()> {
        let node = node.into();
        self.check(&node)?;
        self.items.push(node);
        Ok(())
    }

    /// Insert a node at `index`, shifting later entries back. `index` may equal `len`.
    pub fn insert(&mut self, index: usize, node: impl Into<TagNode>) -> Result<()> {
        let node = node.into();
        self.check(&node)?;
        self.check_index(index, self.items.len() + 1)?;
        self.items.insert(index, node);
        Ok(())
    }

    /// Replace the node at `index`, returning the previous one
    pub fn set(&mut self, index: usize, node: impl Into<TagNode>) -> Result<TagNode> {
        let node = node.into();
        self.check(&node)?;
        self.check_index(index, self.items.len())?;
        Ok(std::mem::replace(&mut self.items[index], node))
    }

    /// Remove and return the node at `index`
    pub fn remove(&mut self, index: usize) -> Result<TagNode> {
        self.check_index(index, self.items.len())?;
        Ok(self.items.remove(index))
    }

    /// Remove the first node equal to `node`, reporting whether one was found
    pub fn remove_item(&mut self, node: &TagNode) -> bool {
        match self.items.iter().position(|i| i == node) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&TagNode> {
        self.items.get(index)
    }

    /// Like [`TagList::get`] but fails with [`Error::IndexOutOfRange`]
    pub fn try_get(&self, index: usize) -> Result<&TagNode> {
        self.check_index(index, self.items.len())?;
        Ok(&self.items[index])
    }

    /// A type preserving mutable view of the node at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<TagValueMut<'_>> {
        self.items.get_mut(index).map(TagNode::value_mut)
    }

    pub fn contains(&self, node: &TagNode) -> bool {
        self.items.contains(node)
    }

    /// Index of the first node matching `predicate`
    pub fn find(&self, predicate: impl FnMut(&TagNode) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    pub fn retain(&mut self, predicate: impl FnMut(&TagNode) -> bool) {
        self.items.retain(predicate);
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Remove every entry. The value type is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagNode> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = TagValueMut<'_>> {
        self.items.iter_mut().map(TagNode::value_mut)
    }

    pub fn as_slice(&self) -> &[TagNode] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a TagNode;
    type IntoIter = std::slice::Iter<'a, TagNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for TagList {
    type Item = TagNode;
    type IntoIter = std::vec::IntoIter<TagNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
