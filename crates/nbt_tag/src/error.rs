//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

use crate::types::TagType;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// a length prefix in the stream was negative
    #[error("read error: negative length {0}")]
    NegativeLength(i64),

    /// a type byte in the stream does not name a tag type
    #[error("read error: invalid tag type {0:#04x}")]
    InvalidTagType(u8),

    /// the stream ended in the middle of a tag
    #[error("read error: unexpected end of stream")]
    UnexpectedEndOfStream,

    /// tags are nested deeper than the reader allows
    #[error("read error: tags nested deeper than {0} levels")]
    DepthLimitExceeded(usize),

    /// a string does not fit in a 16 bit length prefix
    #[error("write error: string of {0} bytes is too long")]
    StringTooLong(usize),

    /// an array or list does not fit in a 32 bit length prefix
    #[error("write error: sequence of {0} elements is too long")]
    SequenceTooLong(usize),

    /// the root of the stream is not a compound
    #[error("root tag is {0}, expected TAG_COMPOUND")]
    InvalidRoot(TagType),

    /// a node was viewed as a type it can not be converted to
    #[error("can not cast {from} to {to}")]
    InvalidCast {
        /// the node's actual type
        from: TagType,
        /// the requested type
        to: TagType,
    },

    /// a node of the wrong type was inserted in a list
    #[error("list holds {expected}, got {found}")]
    TypeMismatch {
        /// the list's value type
        expected: TagType,
        /// the type of the rejected node
        found: TagType,
    },

    /// the value type of a list can only change while it is empty
    #[error("can not change value type of a list holding {0} entries")]
    ListNotEmpty(usize),

    /// no entry with this name exists in the compound
    #[error("key {0:?} not found")]
    KeyNotFound(String),

    /// an entry with this name already exists in the compound
    #[error("key {0:?} already exists")]
    DuplicateKey(String),

    /// an index past the end of a list
    #[error("index {index} out of range for list of {len} entries")]
    IndexOutOfRange {
        /// requested index
        index: usize,
        /// length of the list
        len: usize,
    },

    /// a compression tag that is not known
    #[error("unknown compression method {0}")]
    UnknownCompression(u8),

    /// the file could not be parsed as compressed or as raw NBT
    #[error("file is not a readable nbt file")]
    UnreadableFile,

    /// the buffer does not hold a single named tag
    #[error("clipboard data must hold exactly one tag, found {0}")]
    InvalidClipboardData(usize),

    /// Transparent warpper for [`serde_json::Error`]
    #[cfg(feature = "serde")]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
