//! Flat byte form of a single named tag, for copy and paste between editors

use tracing::instrument;

use crate::compound::TagCompound;
use crate::error::{Error, Result};
use crate::tag::TagNode;
use crate::tree::NbtTree;

/// A named node detached from its tree
///
/// The buffer is an uncompressed, unnamed root compound holding one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardData {
    pub name: String,
    pub node: TagNode,
}

impl ClipboardData {
    pub fn new(name: impl Into<String>, node: impl Into<TagNode>) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
        }
    }

    #[instrument(skip(self), fields(name = %self.name), err)]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut root = TagCompound::new();
        root.insert(self.name.clone(), self.node.clone());

        let mut bytes = Vec::new();
        NbtTree::with_root("", root).write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Parse a buffer, failing with [`Error::InvalidClipboardData`] unless it holds
    /// exactly one entry
    #[instrument(skip(bytes), err)]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let tree = NbtTree::read_from(bytes)?;
        if tree.root.len() != 1 {
            return Err(Error::InvalidClipboardData(tree.root.len()));
        }

        let (name, node) = tree
            .root
            .into_iter()
            .next()
            .ok_or(Error::InvalidClipboardData(0))?;

        Ok(Self { name, node })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::{assert_eq, assert_str_eq};
    use tracing_test::traced_test;

    use crate::clipboard::ClipboardData;
    use crate::error::{Error, Result};
    use crate::list::TagList;
    use crate::tag::TagNode;
    use crate::types::TagType;

    #[traced_test]
    #[test]
    fn buffer_layout() -> Result<()> {
        let bytes = ClipboardData::new("hp", TagNode::Short(20)).to_bytes()?;

        #[rustfmt::skip]
        let expected = [
            0x0A, 0x00, 0x00,
            0x02, 0x00, 0x02, b'h', b'p', 0x00, 0x14,
            0x00,
        ];

        assert_str_eq!(format!("{:02X?}", bytes), format!("{:02X?}", expected));

        Ok(())
    }

    #[traced_test]
    #[test]
    fn nested_nodes_survive() -> Result<()> {
        let mut list = TagList::new(TagType::String);
        list.push("a")?;
        list.push("b")?;

        let data = ClipboardData::new("Lore", list);
        let copy = ClipboardData::from_bytes(&data.to_bytes()?)?;

        assert_eq!(copy, data);

        Ok(())
    }

    #[traced_test]
    #[test]
    fn empty_root_is_rejected() {
        let bytes = [0x0A, 0x00, 0x00, 0x00];
        let result = ClipboardData::from_bytes(&bytes);

        assert!(matches!(result, Err(Error::InvalidClipboardData(0))));
    }
}
