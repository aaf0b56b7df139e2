//! Base types for the structure of an NBT stream.

use derive_more::Display;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{Error, Result};

/// Type discriminant written in front of every tag
///
/// The numeric value of each variant is the byte used on the wire.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum TagType {
    /// Marks the end of a compound, or an empty root
    #[display("TAG_END")]
    End = 0,

    /// Signed 8 bit integer
    #[display("TAG_BYTE")]
    Byte = 1,

    /// Signed 16 bit integer
    #[display("TAG_SHORT")]
    Short = 2,

    /// Signed 32 bit integer
    #[display("TAG_INT")]
    Int = 3,

    /// Signed 64 bit integer
    #[display("TAG_LONG")]
    Long = 4,

    /// 32 bit IEEE float
    #[display("TAG_FLOAT")]
    Float = 5,

    /// 64 bit IEEE float
    #[display("TAG_DOUBLE")]
    Double = 6,

    /// Length prefixed run of bytes
    #[display("TAG_BYTE_ARRAY")]
    ByteArray = 7,

    /// Length prefixed modified UTF-8 text
    #[display("TAG_STRING")]
    String = 8,

    /// Homogeneous sequence of unnamed tags
    #[display("TAG_LIST")]
    List = 9,

    /// Set of named tags terminated by [`TagType::End`]
    #[display("TAG_COMPOUND")]
    Compound = 10,

    /// Length prefixed run of 32 bit integers
    #[display("TAG_INT_ARRAY")]
    IntArray = 11,
}

impl Default for TagType {
    fn default() -> Self {
        TagType::End
    }
}

impl TagType {
    /// Decode a type byte read from a stream
    pub fn from_id(id: u8) -> Result<Self> {
        TagType::try_from(id).map_err(|_| Error::InvalidTagType(id))
    }

    /// The byte written on the wire for this type
    pub fn id(self) -> u8 {
        self.into()
    }

    /// Whether a node of this type may be viewed as `target`.
    ///
    /// Integers widen towards [`TagType::Long`] and floats towards [`TagType::Double`].
    /// Narrowing is never allowed.
    pub fn widens_to(self, target: TagType) -> bool {
        use TagType::*;

        if self == target {
            return true;
        }

        matches!(
            (self, target),
            (Byte, Short | Int | Long) | (Short, Int | Long) | (Int, Long) | (Float, Double)
        )
    }

    /// Whether this type carries a single fixed size value
    pub fn is_numeric(self) -> bool {
        use TagType::*;
        matches!(self, Byte | Short | Int | Long | Float | Double)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::TagType;

    #[test]
    fn decode_known_ids() -> Result<()> {
        assert_eq!(TagType::from_id(0)?, TagType::End);
        assert_eq!(TagType::from_id(8)?, TagType::String);
        assert_eq!(TagType::from_id(11)?, TagType::IntArray);
        assert_eq!(TagType::Compound.id(), 10);

        Ok(())
    }

    #[test]
    fn decode_unknown_id() {
        assert!(matches!(TagType::from_id(12), Err(Error::InvalidTagType(12))));
        assert!(matches!(
            TagType::from_id(0xFF),
            Err(Error::InvalidTagType(0xFF))
        ));
    }

    #[test]
    fn widening_rules() {
        assert!(TagType::Byte.widens_to(TagType::Long));
        assert!(TagType::Short.widens_to(TagType::Int));
        assert!(TagType::Float.widens_to(TagType::Double));
        assert!(TagType::List.widens_to(TagType::List));

        assert!(!TagType::Long.widens_to(TagType::Int));
        assert!(!TagType::Int.widens_to(TagType::Float));
        assert!(!TagType::Double.widens_to(TagType::Float));
        assert!(!TagType::ByteArray.widens_to(TagType::IntArray));
    }

    #[test]
    fn display_names() {
        assert_eq!(TagType::ByteArray.to_string(), "TAG_BYTE_ARRAY");
        assert_eq!(TagType::End.to_string(), "TAG_END");
    }
}
