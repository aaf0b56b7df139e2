//! Base types for structure of a region file.

use binrw::{BinRead, BinWrite};
use nbt_tag::CompressionMethod;

/// Size of one sector, the allocation unit of the file
pub const SECTOR_BYTES: usize = 4096;

/// Number of document slots, one per coordinate in a 32 by 32 grid
pub const SLOT_COUNT: usize = 1024;

/// Sectors taken by the offset and timestamp tables
pub const HEADER_SECTORS: usize = 2;

/// Bytes in front of every document: a length and a compression byte
pub const DOCUMENT_HEADER_BYTES: usize = 5;

/// The sector count of an offset entry is a single byte
pub const MAX_DOCUMENT_SECTORS: usize = 255;

/// Map document coordinates to a slot index
///
/// Coordinates wrap into the 32 by 32 grid, so `(-1, 0)` and `(31, 0)` share a slot.
pub fn slot_index(x: i32, z: i32) -> usize {
    (x.rem_euclid(32) + z.rem_euclid(32) * 32) as usize
}

/// Local coordinates of a slot index
pub fn slot_coords(slot: usize) -> (i32, i32) {
    ((slot % 32) as i32, (slot / 32) as i32)
}

/// Offset table entry
///
/// The upper three bytes hold the first sector of the document and the low byte the
/// number of sectors it spans. Zero marks an empty slot.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(big)]
pub struct SlotEntry(pub u32);

impl SlotEntry {
    pub const EMPTY: SlotEntry = SlotEntry(0);

    pub fn new(sector: usize, count: usize) -> Self {
        Self(((sector as u32) << 8) | (count as u32 & 0xFF))
    }

    /// First sector of the document
    pub fn sector(&self) -> usize {
        (self.0 >> 8) as usize
    }

    /// Number of sectors the document spans
    pub fn count(&self) -> usize {
        (self.0 & 0xFF) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Region file header
///
/// The first sector holds the offset entries and the second the timestamps of the last
/// write, both indexed by [`slot_index`]. All data is stored in big endian format.
#[derive(BinRead, BinWrite, Debug, Clone, PartialEq)]
#[brw(big)]
pub struct RegionHeader {
    #[br(count = SLOT_COUNT)]
    pub offsets: Vec<SlotEntry>,

    /// Seconds since the unix epoch
    #[br(count = SLOT_COUNT)]
    pub timestamps: Vec<u32>,
}

impl Default for RegionHeader {
    fn default() -> Self {
        Self {
            offsets: vec![SlotEntry::EMPTY; SLOT_COUNT],
            timestamps: vec![0; SLOT_COUNT],
        }
    }
}

/// Document header
///
/// Stored at the start of the document's first sector. `length` counts the
/// compression byte and the payload.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(big)]
pub struct DocumentHeader {
    pub length: u32,

    pub compression: CompressionMethod,
}

impl DocumentHeader {
    /// Size of the compressed payload following the header
    pub fn payload_len(&self) -> u64 {
        u64::from(self.length.saturating_sub(1))
    }
}
