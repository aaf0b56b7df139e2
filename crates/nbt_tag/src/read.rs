//! Types for decoding NBT streams

use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::compound::TagCompound;
use crate::error::{Error, Result};
use crate::list::TagList;
use crate::mutf8;
use crate::tag::TagNode;
use crate::types::TagType;

/// Deepest nesting of lists and compounds accepted by the reader and the writer
pub const MAX_DEPTH: usize = 512;

// Upper bound on what is allocated up front for a length read from the stream
const PREALLOC_LIMIT: usize = 4096;

pub(crate) trait EofExt<T> {
    fn or_eof(self) -> Result<T>;
}

impl<T> EofExt<T> for io::Result<T> {
    fn or_eof(self) -> Result<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfStream,
            _ => Error::IOError(e),
        })
    }
}

/// Reads tags from an uncompressed big endian stream
///
/// Wrap the source in a decoder from [`crate::compression`] to read compressed data.
///
/// ```
/// use nbt_tag::read::NbtReader;
/// use nbt_tag::TagNode;
///
/// #[rustfmt::skip]
/// let bytes = [
///     0x03,             // TAG_INT
///     0x00, 0x01, b'x', // name
///     0x00, 0x00, 0x00, 0x2A,
/// ];
///
/// let mut reader = NbtReader::new(&bytes[..]);
/// let (name, node) = reader.read_named()?.unwrap();
///
/// assert_eq!(name, "x");
/// assert_eq!(node, TagNode::Int(42));
/// # Ok::<(), nbt_tag::error::Error>(())
/// ```
pub struct NbtReader<R: Read> {
    reader: R,
    depth: usize,
}

impl<R: Read> NbtReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, depth: 0 }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read a type byte, returning [`TagType::End`] unchanged
    pub fn read_type(&mut self) -> Result<TagType> {
        TagType::from_id(self.reader.read_u8().or_eof()?)
    }

    /// Read one complete named tag.
    ///
    /// Returns `None` when the stream holds a [`TagType::End`] marker instead.
    pub fn read_named(&mut self) -> Result<Option<(String, TagNode)>> {
        let tag_type = self.read_type()?;
        if tag_type == TagType::End {
            return Ok(None);
        }

        let name = self.read_string()?;
        let node = self.read_payload(tag_type)?;

        Ok(Some((name, node)))
    }

    /// Read the payload of a tag whose type is already known
    pub fn read_payload(&mut self, tag_type: TagType) -> Result<TagNode> {
        let r = &mut self.reader;

        Ok(match tag_type {
            TagType::End => TagNode::End,
            TagType::Byte => TagNode::Byte(r.read_i8().or_eof()?),
            TagType::Short => TagNode::Short(r.read_i16::<BigEndian>().or_eof()?),
            TagType::Int => TagNode::Int(r.read_i32::<BigEndian>().or_eof()?),
            TagType::Long => TagNode::Long(r.read_i64::<BigEndian>().or_eof()?),
            TagType::Float => TagNode::Float(r.read_f32::<BigEndian>().or_eof()?),
            TagType::Double => TagNode::Double(r.read_f64::<BigEndian>().or_eof()?),
            TagType::ByteArray => {
                let len = self.read_len()?;
                TagNode::ByteArray(self.read_bytes(len)?)
            }
            TagType::String => TagNode::String(self.read_string()?),
            TagType::List => TagNode::List(self.nested(Self::read_list)?),
            TagType::Compound => TagNode::Compound(self.nested(Self::read_compound)?),
            TagType::IntArray => {
                let len = self.read_len()?;
                let mut values = Vec::with_capacity(len.min(PREALLOC_LIMIT));
                for _ in 0..len {
                    values.push(self.reader.read_i32::<BigEndian>().or_eof()?);
                }
                TagNode::IntArray(values)
            }
        })
    }

    fn nested<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthLimitExceeded(MAX_DEPTH));
        }

        self.depth += 1;
        let result = read(self);
        self.depth -= 1;

        result
    }

    fn read_len(&mut self) -> Result<usize> {
        let len = self.reader.read_i32::<BigEndian>().or_eof()?;
        usize::try_from(len).map_err(|_| Error::NegativeLength(i64::from(len)))
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut buffer)?;

        if buffer.len() != len {
            return Err(Error::UnexpectedEndOfStream);
        }
        Ok(buffer)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.reader.read_i16::<BigEndian>().or_eof()?;
        let len = usize::try_from(len).map_err(|_| Error::NegativeLength(i64::from(len)))?;
        let bytes = self.read_bytes(len)?;

        Ok(mutf8::decode(&bytes).into_owned())
    }

    fn read_list(&mut self) -> Result<TagList> {
        let value_type = self.read_type()?;
        let count = self.read_len()?;

        if value_type == TagType::End && count > 0 {
            return Err(Error::InvalidTagType(TagType::End.id()));
        }

        let mut list = TagList::new(value_type);
        for _ in 0..count {
            let node = self.read_payload(value_type)?;
            list.push(node)?;
        }

        Ok(list)
    }

    fn read_compound(&mut self) -> Result<TagCompound> {
        let mut compound = TagCompound::new();
        while let Some((name, node)) = self.read_named()? {
            compound.insert(name, node);
        }

        Ok(compound)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::read::{NbtReader, MAX_DEPTH};
    use crate::tag::TagNode;
    use crate::types::TagType;

    #[test]
    fn end_marker_reads_as_none() -> Result<()> {
        let mut reader = NbtReader::new(&[0x00][..]);
        assert!(reader.read_named()?.is_none());

        Ok(())
    }

    #[test]
    fn empty_list_of_end() -> Result<()> {
        #[rustfmt::skip]
        let bytes = [
            0x00,                   // TAG_END
            0x00, 0x00, 0x00, 0x00, // count
        ];

        let node = NbtReader::new(&bytes[..]).read_payload(TagType::List)?;
        let list = node.to_list()?;

        assert_eq!(list.value_type(), TagType::End);
        assert!(list.is_empty());

        Ok(())
    }

    #[test]
    fn list_of_end_with_entries() {
        let bytes = [0x00, 0x00, 0x00, 0x00, 0x02];
        let result = NbtReader::new(&bytes[..]).read_payload(TagType::List);

        assert!(matches!(result, Err(Error::InvalidTagType(0))));
    }

    #[test]
    fn negative_lengths() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFE];
        let result = NbtReader::new(&bytes[..]).read_payload(TagType::ByteArray);
        assert!(matches!(result, Err(Error::NegativeLength(-2))));

        let bytes = [0xFF, 0xFF];
        let result = NbtReader::new(&bytes[..]).read_payload(TagType::String);
        assert!(matches!(result, Err(Error::NegativeLength(-1))));
    }

    #[test]
    fn truncated_payloads() {
        let result = NbtReader::new(&[0x00, 0x01][..]).read_payload(TagType::Int);
        assert!(matches!(result, Err(Error::UnexpectedEndOfStream)));

        let bytes = [0x00, 0x00, 0x00, 0x10, 0x01, 0x02];
        let result = NbtReader::new(&bytes[..]).read_payload(TagType::ByteArray);
        assert!(matches!(result, Err(Error::UnexpectedEndOfStream)));
    }

    #[test]
    fn unknown_type_byte() {
        let result = NbtReader::new(&[0x0C, 0x00, 0x00][..]).read_named();
        assert!(matches!(result, Err(Error::InvalidTagType(0x0C))));
    }

    #[test]
    fn nesting_limit() {
        // lists of lists, each holding one entry, deeper than the limit
        let mut bytes = Vec::new();
        for _ in 0..=MAX_DEPTH {
            bytes.extend_from_slice(&[0x09, 0x00, 0x00, 0x00, 0x01]);
        }

        let result = NbtReader::new(&bytes[..]).read_payload(TagType::List);
        assert!(matches!(result, Err(Error::DepthLimitExceeded(MAX_DEPTH))));
    }

    #[test]
    fn compound_keeps_last_duplicate() -> Result<()> {
        #[rustfmt::skip]
        let bytes = [
            0x01, 0x00, 0x01, b'a', 0x01,
            0x01, 0x00, 0x01, b'a', 0x02,
            0x00,
        ];

        let node = NbtReader::new(&bytes[..]).read_payload(TagType::Compound)?;
        let compound = node.to_compound()?;

        assert_eq!(compound.len(), 1);
        assert_eq!(compound["a"], TagNode::Byte(2));

        Ok(())
    }
}
