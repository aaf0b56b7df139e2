//! A region file stores up to 1024 independently compressed NBT documents in 4096 byte
//! sectors, one slot for every coordinate of a 32 by 32 grid.
//!
//! # Format
//!
//! All integers are big endian.
//!
//! ## Header
//!
//! | Sector | Contents                                                          |
//! |--------|-------------------------------------------------------------------|
//! | 0      | 1024 `u32` offset entries, `(first sector << 8) \| sector count`  |
//! | 1      | 1024 `u32` timestamps of the last write, seconds since the epoch  |
//!
//! An offset entry of zero marks an empty slot. The slot of `(x, z)` is
//! `(x mod 32) + (z mod 32) * 32` with a non-negative modulo.
//!
//! ## Document
//!
//! | Field       | Type | Description                                         |
//! |-------------|------|-----------------------------------------------------|
//! | Length      | u32  | Size of the compression byte plus the payload       |
//! | Compression | u8   | 1 for gzip, 2 for zlib, 3 for none                  |
//! | Payload     | data | Compressed NBT stream                               |
//!
//! Documents start on a sector boundary and are zero padded to the end of their last
//! sector. A document spans at most 255 sectors.
//!

pub mod error;
pub mod name;
pub mod read;
pub mod region;
pub mod sectors;
pub mod types;
pub mod write;

pub use name::{RegionFormat, RegionName};
pub use read::RegionDocument;
pub use region::{RegionFile, RegionOptions};
pub use write::DocumentWriter;
