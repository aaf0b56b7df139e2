//! Named tag collections

use std::ops::Index;

use indexmap::map::{IntoIter, Iter, IterMut, Keys};
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::tag::TagNode;

/// A set of uniquely named nodes
///
/// Entries keep their insertion order so a tree read from a stream is written back in
/// the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagCompound {
    entries: IndexMap<String, TagNode>,
}

impl TagCompound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TagNode> {
        self.entries.get(name)
    }

    /// Like [`TagCompound::get`] but fails with [`Error::KeyNotFound`]
    pub fn try_get(&self, name: &str) -> Result<&TagNode> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::KeyNotFound(name.to_owned()))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TagNode> {
        self.entries.get_mut(name)
    }

    /// Insert or replace the entry `name`, returning the replaced node.
    ///
    /// A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<TagNode>) -> Option<TagNode> {
        self.entries.insert(name.into(), node.into())
    }

    /// Insert a new entry, failing with [`Error::DuplicateKey`] if `name` is taken
    pub fn add(&mut self, name: impl Into<String>, node: impl Into<TagNode>) -> Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::DuplicateKey(name));
        }

        self.entries.insert(name, node.into());
        Ok(())
    }

    /// Remove the entry `name`, keeping the order of the others
    pub fn remove(&mut self, name: &str) -> Option<TagNode> {
        self.entries.shift_remove(name)
    }

    /// Give the entry `from` the name `to` without moving it
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> Result<()> {
        let to = to.into();
        if from == to {
            return match self.entries.contains_key(from) {
                true => Ok(()),
                false => Err(Error::KeyNotFound(to)),
            };
        }
        if self.entries.contains_key(&to) {
            return Err(Error::DuplicateKey(to));
        }

        let (index, _, node) = self
            .entries
            .shift_remove_full(from)
            .ok_or_else(|| Error::KeyNotFound(from.to_owned()))?;
        self.entries.shift_insert(index, to, node);

        Ok(())
    }

    /// Copy every entry of `other` whose name is not present yet
    pub fn merge_from(&mut self, other: &TagCompound) {
        for (name, node) in other {
            if !self.entries.contains_key(name) {
                self.entries.insert(name.clone(), node.clone());
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> Keys<'_, String, TagNode> {
        self.entries.keys()
    }

    pub fn iter(&self) -> Iter<'_, String, TagNode> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, String, TagNode> {
        self.entries.iter_mut()
    }
}

impl Index<&str> for TagCompound {
    type Output = TagNode;

    /// # Panics
    ///
    /// Panics when no entry is named `name`.
    fn index(&self, name: &str) -> &Self::Output {
        &self.entries[name]
    }
}

impl<'a> IntoIterator for &'a TagCompound {
    type Item = (&'a String, &'a TagNode);
    type IntoIter = Iter<'a, String, TagNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for TagCompound {
    type Item = (String, TagNode);
    type IntoIter = IntoIter<String, TagNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<TagNode>> FromIterator<(K, V)> for TagCompound {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::compound::TagCompound;
    use crate::error::{Error, Result};
    use crate::tag::TagNode;

    fn sample() -> TagCompound {
        [
            ("a", TagNode::Int(1)),
            ("b", TagNode::Int(2)),
            ("c", TagNode::Int(3)),
        ]
        .into_iter()
        .collect()
    }

    fn keys(compound: &TagCompound) -> Vec<&str> {
        compound.keys().map(String::as_str).collect()
    }

    #[test]
    fn add_rejects_duplicates() -> Result<()> {
        let mut compound = sample();
        compound.add("d", TagNode::Int(4))?;

        assert!(matches!(
            compound.add("a", TagNode::Int(9)),
            Err(Error::DuplicateKey(key)) if key == "a"
        ));
        assert_eq!(compound.try_get("a")?.to_int()?, 1);
        assert_eq!(compound.len(), 4);

        Ok(())
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut compound = sample();
        let old = compound.insert("a", "x");

        assert_eq!(old, Some(TagNode::Int(1)));
        assert_eq!(keys(&compound), ["a", "b", "c"]);
        assert_eq!(compound["a"], TagNode::from("x"));
    }

    #[test]
    fn remove_keeps_order() {
        let mut compound = sample();

        assert_eq!(compound.remove("b"), Some(TagNode::Int(2)));
        assert_eq!(compound.remove("b"), None);
        assert_eq!(keys(&compound), ["a", "c"]);
    }

    #[test]
    fn rename_keeps_position() -> Result<()> {
        let mut compound = sample();
        compound.rename("b", "z")?;

        assert_eq!(keys(&compound), ["a", "z", "c"]);
        assert_eq!(compound.try_get("z")?.to_int()?, 2);

        assert!(matches!(
            compound.rename("a", "c"),
            Err(Error::DuplicateKey(_))
        ));
        assert!(matches!(
            compound.rename("missing", "y"),
            Err(Error::KeyNotFound(key)) if key == "missing"
        ));
        compound.rename("a", "a")?;
        assert_eq!(keys(&compound), ["a", "z", "c"]);

        Ok(())
    }

    #[test]
    fn try_get_missing() {
        assert!(matches!(
            sample().try_get("nope"),
            Err(Error::KeyNotFound(key)) if key == "nope"
        ));
    }

    #[test]
    fn merge_from_keeps_existing() {
        let mut compound = sample();
        let other: TagCompound = [("a", TagNode::Int(100)), ("d", TagNode::Int(4))]
            .into_iter()
            .collect();

        compound.merge_from(&other);

        assert_eq!(keys(&compound), ["a", "b", "c", "d"]);
        assert_eq!(compound["a"], TagNode::Int(1));
        assert_eq!(compound["d"], TagNode::Int(4));
    }
}
