//! Writing documents into a region file

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use binrw::BinWrite;
use nbt_tag::compression::NbtBlockWriter;
use nbt_tag::{CompressionMethod, NbtTree};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::region::RegionFile;
use crate::types::{
    slot_index, DocumentHeader, SlotEntry, DOCUMENT_HEADER_BYTES, MAX_DOCUMENT_SECTORS,
    SECTOR_BYTES,
};

/// Buffers a document and stores it when finished
///
/// Nothing reaches the file until [`DocumentWriter::finish`] is called or the writer is
/// dropped. Errors from a drop are logged, call `finish` to see them. A writer that saw
/// a failed write, or is dropped while panicking, discards its buffer.
pub struct DocumentWriter<'a, F: Read + Write + Seek> {
    region: &'a mut RegionFile<F>,
    x: i32,
    z: i32,
    block: Option<NbtBlockWriter<Vec<u8>>>,
}

impl<F: Read + Write + Seek> DocumentWriter<'_, F> {
    /// Compress the buffered bytes and store them
    pub fn finish(mut self) -> Result<()> {
        self.commit()
    }

    fn commit(&mut self) -> Result<()> {
        match self.block.take() {
            Some(block) => {
                let compression = self.region.options.compression;
                let payload = block.finish()?;
                self.region
                    .store_document(self.x, self.z, compression, &payload)
            }
            None => Ok(()),
        }
    }
}

impl<F: Read + Write + Seek> Write for DocumentWriter<'_, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(block) = self.block.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "document writer already finished or failed",
            ));
        };

        let written = block.write(buf);
        if written.is_err() {
            self.block = None;
        }
        written
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.block.as_mut() {
            Some(block) => block.flush(),
            None => Ok(()),
        }
    }
}

impl<F: Read + Write + Seek> Drop for DocumentWriter<'_, F> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.block = None;
            return;
        }

        if let Err(err) = self.commit() {
            warn!(x = self.x, z = self.z, %err, "failed to store document on drop");
        }
    }
}

impl<F: Read + Write + Seek> RegionFile<F> {
    /// Start a document for `(x, z)`, replacing any stored one when finished
    pub fn document_writer(&mut self, x: i32, z: i32) -> DocumentWriter<'_, F> {
        let compression = self.options.compression;
        DocumentWriter {
            region: self,
            x,
            z,
            block: Some(NbtBlockWriter::new(Vec::new(), compression)),
        }
    }

    /// Store a tree for `(x, z)` with the configured compression
    ///
    /// The tree is serialized completely before the file is touched, so a tree that
    /// can not be written leaves the stored document as it was.
    #[instrument(skip(self, tree), err)]
    pub fn write_tree(&mut self, x: i32, z: i32, tree: &NbtTree) -> Result<()> {
        let compression = self.options.compression;
        let payload = tree.write_compressed(Vec::new(), compression)?;
        self.store_document(x, z, compression, &payload)
    }

    /// Store an already compressed payload
    ///
    /// The document is rewritten in place when it still fits its run, the unused tail
    /// is freed. Otherwise it moves to the first free run large enough, or to the end
    /// of the file, and its old run is freed. Other documents never move. The sector
    /// map and the tables only change after the data was written.
    #[instrument(skip(self, payload), fields(len = payload.len()), err)]
    pub(crate) fn store_document(
        &mut self,
        x: i32,
        z: i32,
        compression: CompressionMethod,
        payload: &[u8],
    ) -> Result<()> {
        let needed = (DOCUMENT_HEADER_BYTES + payload.len()).div_ceil(SECTOR_BYTES);
        if needed > MAX_DOCUMENT_SECTORS {
            return Err(Error::DocumentTooLarge(needed));
        }

        let slot = slot_index(x, z);
        let old = self.header.offsets[slot];

        let placement = if !old.is_empty() && needed <= old.count() {
            Placement::InPlace(old.sector())
        } else if let Some(start) = self.sectors.find_run(needed) {
            Placement::Reuse(start)
        } else {
            Placement::Append(self.sectors.len())
        };
        debug!(?placement, needed, "placing document");

        let header = DocumentHeader {
            length: payload.len() as u32 + 1,
            compression,
        };

        let mut block = io::Cursor::new(Vec::with_capacity(needed * SECTOR_BYTES));
        header.write(&mut block)?;
        block.write_all(payload)?;
        let mut block = block.into_inner();
        block.resize(needed * SECTOR_BYTES, 0);

        let start = placement.start();
        self.inner
            .seek(SeekFrom::Start((start * SECTOR_BYTES) as u64))?;
        self.inner.write_all(&block)?;

        match placement {
            Placement::InPlace(start) => self
                .sectors
                .release(start + needed, old.count() - needed),
            Placement::Reuse(start) => {
                self.sectors.reserve(start, needed);
                if !old.is_empty() {
                    self.sectors.release(old.sector(), old.count());
                }
            }
            Placement::Append(_) => {
                self.sectors.grow(needed);
                if !old.is_empty() {
                    self.sectors.release(old.sector(), old.count());
                }
            }
        }

        self.header.offsets[slot] = SlotEntry::new(start, needed);
        self.header.timestamps[slot] = now();
        self.write_header()
    }
}

/// Where a document's sectors come from
#[derive(Debug, Clone, Copy)]
enum Placement {
    /// The slot's current run
    InPlace(usize),
    /// A free run inside the file
    Reuse(usize),
    /// New sectors at the end of the file
    Append(usize),
}

impl Placement {
    fn start(self) -> usize {
        match self {
            Placement::InPlace(start) | Placement::Reuse(start) | Placement::Append(start) => {
                start
            }
        }
    }
}

fn now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or_default()
}
