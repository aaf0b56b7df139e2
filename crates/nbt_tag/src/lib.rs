//! This library handles reading, editing and writing **NBT** (Named Binary Tag) data.
//!
//! # NBT Format Documentation
//!
//! NBT is a tree of typed values. A document is a single named compound, stored either
//! standalone (`.dat`, `.nbt`, `.schematic`) or as a document inside a region file. All
//! multi-byte values are big-endian.
//!
//! ## Tag Types
//!
//! Every tag starts with a one byte type.
//!
//! | Id   | Type             | Payload                                                          |
//! |------|------------------|------------------------------------------------------------------|
//! | 0x00 | `TAG_END`        | None. Closes a compound                                          |
//! | 0x01 | `TAG_BYTE`       | 1 byte: signed integer                                           |
//! | 0x02 | `TAG_SHORT`      | 2 bytes: signed integer                                          |
//! | 0x03 | `TAG_INT`        | 4 bytes: signed integer                                          |
//! | 0x04 | `TAG_LONG`       | 8 bytes: signed integer                                          |
//! | 0x05 | `TAG_FLOAT`      | 4 bytes: IEEE 754 float                                          |
//! | 0x06 | `TAG_DOUBLE`     | 8 bytes: IEEE 754 float                                          |
//! | 0x07 | `TAG_BYTE_ARRAY` | 4 bytes length, then `length` bytes                              |
//! | 0x08 | `TAG_STRING`     | 2 bytes length, then `length` bytes of modified UTF-8            |
//! | 0x09 | `TAG_LIST`       | 1 byte element type, 4 bytes count, then `count` payloads        |
//! | 0x0A | `TAG_COMPOUND`   | Named tags, then a `TAG_END`                                     |
//! | 0x0B | `TAG_INT_ARRAY`  | 4 bytes length, then `length` 4 byte signed integers             |
//!
//! ### Named Tags
//!
//! Inside a compound, and at the root of a document, each tag has the following layout:
//!
//! | Offset (bytes) | Field   | Description                                              |
//! |----------------|---------|----------------------------------------------------------|
//! | 0x0000         | Type    | 1 byte: tag type id                                      |
//! | 0x0001         | Length  | 2 bytes: signed length of the name                       |
//! | 0x0003         | Name    | (Length) bytes: modified UTF-8 name                      |
//! | 0x0003 + n     | Payload | Depends on the type, see above                           |
//!
//! List elements carry no type or name, only their payload.
//!
//! - **Lengths**: All lengths are signed. A negative length is an error.
//! - **Lists**: An empty list may carry any element type, usually `TAG_END`.
//! - **Root**: The root is a compound, usually with an empty name. A document that
//!   starts with `TAG_END` is read as an empty tree.
//!
//! ## Compression
//!
//! Standalone files are usually gzip compressed, region documents usually zlib. See
//! [`CompressionMethod`].
//!
//! ## Additional Information
//!
//! - **File Extension**: `.dat`, `.nbt`, `.schematic`
//! - **Endianness**: Big-endian for all multi-byte values
//!

pub mod clipboard;
pub mod compound;
pub mod compression;
pub mod error;
pub mod file;
pub mod list;
pub mod mutf8;
pub mod read;
#[cfg(feature = "serde")]
pub mod serde;
pub mod tag;
pub mod tree;
pub mod types;
pub mod write;

pub use clipboard::ClipboardData;
pub use compound::TagCompound;
pub use compression::CompressionMethod;
pub use file::{NbtFile, NbtFileOptions};
pub use list::TagList;
pub use tag::{TagNode, TagValueMut};
pub use tree::NbtTree;
pub use types::TagType;
