//! Types for encoding NBT streams

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::compound::TagCompound;
use crate::error::{Error, Result};
use crate::list::TagList;
use crate::mutf8;
use crate::read::MAX_DEPTH;
use crate::tag::TagNode;
use crate::types::TagType;

/// Writes tags to an uncompressed big endian stream
///
/// Every node is written with its current type, so an empty list still carries its
/// value type.
pub struct NbtWriter<W: Write> {
    writer: W,
    depth: usize,
}

impl<W: Write> NbtWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, depth: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a type byte, name and payload.
    ///
    /// A [`TagNode::End`] is rejected as it has no name.
    pub fn write_named(&mut self, name: &str, node: &TagNode) -> Result<()> {
        if node.tag_type() == TagType::End {
            return Err(Error::InvalidTagType(TagType::End.id()));
        }

        self.writer.write_u8(node.tag_type().id())?;
        self.write_string(name)?;
        self.write_payload(node)
    }

    /// Write a named compound, the framing used for every document root
    pub fn write_root(&mut self, name: &str, root: &TagCompound) -> Result<()> {
        self.writer.write_u8(TagType::Compound.id())?;
        self.write_string(name)?;
        self.nested(|w| w.write_compound(root))
    }

    /// Write a lone [`TagType::End`] marker
    pub fn write_end(&mut self) -> Result<()> {
        self.writer.write_u8(TagType::End.id())?;
        Ok(())
    }

    /// Write a node without its type byte or name
    pub fn write_payload(&mut self, node: &TagNode) -> Result<()> {
        let w = &mut self.writer;

        match node {
            TagNode::End => {}
            TagNode::Byte(v) => w.write_i8(*v)?,
            TagNode::Short(v) => w.write_i16::<BigEndian>(*v)?,
            TagNode::Int(v) => w.write_i32::<BigEndian>(*v)?,
            TagNode::Long(v) => w.write_i64::<BigEndian>(*v)?,
            TagNode::Float(v) => w.write_f32::<BigEndian>(*v)?,
            TagNode::Double(v) => w.write_f64::<BigEndian>(*v)?,
            TagNode::ByteArray(v) => {
                self.write_len(v.len())?;
                self.writer.write_all(v)?;
            }
            TagNode::String(v) => self.write_string(v)?,
            TagNode::List(v) => self.nested(|w| w.write_list(v))?,
            TagNode::Compound(v) => self.nested(|w| w.write_compound(v))?,
            TagNode::IntArray(v) => {
                self.write_len(v.len())?;
                for value in v {
                    self.writer.write_i32::<BigEndian>(*value)?;
                }
            }
        }

        Ok(())
    }

    fn nested(&mut self, write: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthLimitExceeded(MAX_DEPTH));
        }

        self.depth += 1;
        let result = write(self);
        self.depth -= 1;

        result
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| Error::SequenceTooLong(len))?;
        self.writer.write_i32::<BigEndian>(len)?;
        Ok(())
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        let bytes = mutf8::encode(text);
        let len = i16::try_from(bytes.len()).map_err(|_| Error::StringTooLong(bytes.len()))?;

        self.writer.write_i16::<BigEndian>(len)?;
        self.writer.write_all(&bytes)?;
        Ok(())
    }

    fn write_list(&mut self, list: &TagList) -> Result<()> {
        if list.value_type() == TagType::End && !list.is_empty() {
            return Err(Error::InvalidTagType(TagType::End.id()));
        }

        self.writer.write_u8(list.value_type().id())?;
        self.write_len(list.len())?;
        for node in list {
            self.write_payload(node)?;
        }

        Ok(())
    }

    fn write_compound(&mut self, compound: &TagCompound) -> Result<()> {
        for (name, node) in compound {
            self.write_named(name, node)?;
        }

        self.write_end()
    }
}
