//! A complete document made of a named root compound

use std::io::{Read, Write};

use tracing::{debug, instrument};

use crate::compound::TagCompound;
use crate::compression::{CompressionMethod, NbtBlockReader, NbtBlockWriter};
use crate::error::{Error, Result};
use crate::read::NbtReader;
use crate::tag::TagNode;
use crate::write::NbtWriter;

/// A named root compound, the unit stored in files, region documents and the clipboard
///
/// ```
/// use nbt_tag::{NbtTree, TagNode};
///
/// let mut tree = NbtTree::new("root");
/// tree.root.insert("x", TagNode::Int(42));
///
/// let mut bytes = Vec::new();
/// tree.write_to(&mut bytes)?;
///
/// let copy = NbtTree::read_from(&bytes[..])?;
/// assert_eq!(copy, tree);
/// # Ok::<(), nbt_tag::error::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtTree {
    /// Name written in front of the root, usually empty
    pub name: String,

    pub root: TagCompound,
}

impl NbtTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: TagCompound::new(),
        }
    }

    pub fn with_root(name: impl Into<String>, root: TagCompound) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Read exactly one root tag from an uncompressed stream.
    ///
    /// A stream starting with an end marker yields an empty, unnamed tree. A root that
    /// is not a compound fails with [`Error::InvalidRoot`].
    #[instrument(skip(reader), err)]
    pub fn read_from(reader: impl Read) -> Result<Self> {
        let mut reader = NbtReader::new(reader);

        match reader.read_named()? {
            None => {
                debug!("stream starts with an end marker");
                Ok(Self::default())
            }
            Some((name, TagNode::Compound(root))) => Ok(Self { name, root }),
            Some((_, node)) => Err(Error::InvalidRoot(node.tag_type())),
        }
    }

    /// Write the tree to an uncompressed stream
    #[instrument(skip(self, writer), fields(name = %self.name), err)]
    pub fn write_to(&self, writer: impl Write) -> Result<()> {
        NbtWriter::new(writer).write_root(&self.name, &self.root)
    }

    /// Read a tree framed with `compression`
    pub fn read_compressed(reader: impl Read, compression: CompressionMethod) -> Result<Self> {
        Self::read_from(NbtBlockReader::new(reader, compression))
    }

    /// Write the tree framed with `compression`, returning the inner writer
    pub fn write_compressed<W: Write>(&self, writer: W, compression: CompressionMethod) -> Result<W> {
        let mut writer = NbtBlockWriter::new(writer, compression);
        self.write_to(&mut writer)?;
        Ok(writer.finish()?)
    }
}
