//! The region container and its slot table

use std::fmt::{self, Debug};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use binrw::{BinRead, BinWrite};
use bon::Builder;
use byteorder::{BigEndian, ReadBytesExt};
use nbt_tag::CompressionMethod;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::sectors::SectorMap;
use crate::types::{
    slot_coords, slot_index, RegionHeader, SlotEntry, HEADER_SECTORS, SECTOR_BYTES, SLOT_COUNT,
};

/// Options used when writing documents
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct RegionOptions {
    /// The compression method used for new documents
    #[builder(default)]
    pub compression: CompressionMethod,
}

/// A region file holding up to 1024 compressed documents
///
/// The slot table is read once when the file is opened. Document bytes are read and
/// written on every access, and every write rewrites the header before returning.
///
/// ```
/// use std::io::{Cursor, Read, Write};
/// use nbt_region::{RegionFile, RegionOptions};
///
/// let mut region = RegionFile::new(Cursor::new(Vec::new()), RegionOptions::default())?;
///
/// let mut writer = region.document_writer(3, 5);
/// writer.write_all(b"0123456789")?;
/// writer.finish()?;
///
/// let mut data = Vec::new();
/// region.document(3, 5)?.read_to_end(&mut data)?;
/// assert_eq!(data, b"0123456789");
/// # Ok::<(), nbt_region::error::Error>(())
/// ```
pub struct RegionFile<F> {
    pub(crate) inner: F,
    pub(crate) header: RegionHeader,
    pub(crate) sectors: SectorMap,
    pub(crate) options: RegionOptions,
}

impl<F> Debug for RegionFile<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RegionFile")
            .field("documents", &self.document_count())
            .field("sectors", &self.sectors.len())
            .field("options", &self.options)
            .finish()
    }
}

impl RegionFile<File> {
    /// Open a region file, creating it when it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, RegionOptions::default())
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn open_with(path: impl AsRef<Path>, options: RegionOptions) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        Self::new(file, options)
    }
}

impl<F> RegionFile<F> {
    pub fn options(&self) -> RegionOptions {
        self.options
    }

    /// Change the compression used for documents written from now on
    pub fn set_compression(&mut self, compression: CompressionMethod) {
        self.options.compression = compression;
    }

    pub fn has_document(&self, x: i32, z: i32) -> bool {
        !self.header.offsets[slot_index(x, z)].is_empty()
    }

    /// Number of slots holding a document
    pub fn document_count(&self) -> usize {
        self.header.offsets.iter().filter(|e| !e.is_empty()).count()
    }

    /// Local coordinates of every stored document, in slot order
    pub fn documents(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.header
            .offsets
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_empty())
            .map(|(slot, _)| slot_coords(slot))
    }

    /// The offset entry of a stored document
    pub fn document_location(&self, x: i32, z: i32) -> Option<SlotEntry> {
        Some(self.header.offsets[slot_index(x, z)]).filter(|e| !e.is_empty())
    }

    /// Seconds since the unix epoch of the last write to the slot, zero when unknown
    pub fn timestamp(&self, x: i32, z: i32) -> u32 {
        self.header.timestamps[slot_index(x, z)]
    }

    /// Number of sectors in the file, header included
    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    /// Sectors not used by the header or any document
    pub fn free_sectors(&self) -> impl Iterator<Item = usize> + '_ {
        self.sectors.free_sectors()
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: Read + Write + Seek> RegionFile<F> {
    /// Load the slot table of a region stream
    ///
    /// A stream shorter than the header is extended with empty tables and a stream that
    /// does not end on a sector boundary is padded. Offset entries that point outside
    /// the file, overlap the header or another document, or hold a document that does
    /// not fit its run are dropped and their sectors treated as free.
    #[instrument(skip_all, err)]
    pub fn new(mut inner: F, options: RegionOptions) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        let header_len = (HEADER_SECTORS * SECTOR_BYTES) as u64;
        let padded = if len < header_len {
            header_len
        } else {
            len.div_ceil(SECTOR_BYTES as u64) * SECTOR_BYTES as u64
        };

        if padded != len {
            debug!(len, padded, "padding region file");
            io::copy(&mut io::repeat(0).take(padded - len), &mut inner)?;
            inner.flush()?;
        }

        inner.seek(SeekFrom::Start(0))?;
        let mut header = RegionHeader::read(&mut inner)?;
        let mut sectors = SectorMap::new((padded / SECTOR_BYTES as u64) as usize);

        for slot in 0..SLOT_COUNT {
            let entry = header.offsets[slot];
            if entry.is_empty() {
                continue;
            }

            match Self::check_entry(&mut inner, entry, &sectors)? {
                None => sectors.reserve(entry.sector(), entry.count()),
                Some(reason) => {
                    warn!(
                        slot,
                        sector = entry.sector(),
                        count = entry.count(),
                        reason,
                        "ignoring corrupt offset entry"
                    );
                    header.offsets[slot] = SlotEntry::EMPTY;
                }
            }
        }

        Ok(Self {
            inner,
            header,
            sectors,
            options,
        })
    }

    /// The reason an entry cannot be trusted, if any
    fn check_entry(
        inner: &mut F,
        entry: SlotEntry,
        sectors: &SectorMap,
    ) -> Result<Option<&'static str>> {
        if entry.count() == 0 {
            return Ok(Some("empty run"));
        }
        if entry.sector() < HEADER_SECTORS {
            return Ok(Some("overlaps the header"));
        }
        if entry.sector() + entry.count() > sectors.len() {
            return Ok(Some("past the end of the file"));
        }
        if !sectors.is_run_free(entry.sector(), entry.count()) {
            return Ok(Some("overlaps another document"));
        }

        inner.seek(SeekFrom::Start((entry.sector() * SECTOR_BYTES) as u64))?;
        let length = inner.read_u32::<BigEndian>()? as usize;
        let compression = inner.read_u8()?;

        if length == 0 || length + 4 > entry.count() * SECTOR_BYTES {
            return Ok(Some("length does not fit its run"));
        }
        if CompressionMethod::try_from(compression).is_err() {
            return Ok(Some("unknown compression"));
        }

        Ok(None)
    }

    /// Remove a document, reporting whether one was stored
    #[instrument(skip(self), err)]
    pub fn delete_document(&mut self, x: i32, z: i32) -> Result<bool> {
        let slot = slot_index(x, z);
        let entry = self.header.offsets[slot];
        if entry.is_empty() {
            return Ok(false);
        }

        self.sectors.release(entry.sector(), entry.count());
        self.header.offsets[slot] = SlotEntry::EMPTY;
        self.header.timestamps[slot] = 0;
        self.write_header()?;

        Ok(true)
    }

    pub fn set_timestamp(&mut self, x: i32, z: i32, timestamp: u32) -> Result<()> {
        self.header.timestamps[slot_index(x, z)] = timestamp;
        self.write_header()
    }

    pub(crate) fn write_header(&mut self) -> Result<()> {
        self.inner.seek(SeekFrom::Start(0))?;
        self.header.write(&mut self.inner)?;
        self.inner.flush()?;
        Ok(())
    }
}
