//! Reading documents out of a region file

use std::fmt::{self, Debug};
use std::io::{self, Read, Seek, SeekFrom, Take, Write};

use binrw::BinRead;
use nbt_tag::compression::NbtBlockReader;
use nbt_tag::{CompressionMethod, NbtTree};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::region::RegionFile;
use crate::types::{slot_index, DocumentHeader, SECTOR_BYTES};

/// A decompressing reader over one stored document
pub struct RegionDocument<'a, F: Read> {
    header: DocumentHeader,
    reader: NbtBlockReader<Take<&'a mut F>>,
}

impl<F: Read> Debug for RegionDocument<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RegionDocument({:?})", self.header)
    }
}

impl<F: Read> RegionDocument<'_, F> {
    /// Get the compression method the document was stored with
    pub fn compression(&self) -> CompressionMethod {
        self.header.compression
    }

    /// Get the size of the document, in bytes, in the file
    pub fn compressed_size(&self) -> u64 {
        self.header.payload_len()
    }
}

impl<F: Read> Read for RegionDocument<'_, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl<F: Read + Write + Seek> RegionFile<F> {
    /// Open the document stored for `(x, z)`
    ///
    /// Fails with [`Error::DocumentNotFound`] when the slot is empty.
    #[instrument(skip(self))]
    pub fn document(&mut self, x: i32, z: i32) -> Result<RegionDocument<'_, F>> {
        let entry = self.header.offsets[slot_index(x, z)];
        if entry.is_empty() {
            return Err(Error::DocumentNotFound { x, z });
        }

        self.inner
            .seek(SeekFrom::Start((entry.sector() * SECTOR_BYTES) as u64))?;
        let header = DocumentHeader::read(&mut self.inner)?;
        let payload = (&mut self.inner).take(header.payload_len());

        Ok(RegionDocument {
            header,
            reader: NbtBlockReader::new(payload, header.compression),
        })
    }

    /// Read the document stored for `(x, z)` as a tree
    #[instrument(skip(self), err)]
    pub fn read_tree(&mut self, x: i32, z: i32) -> Result<NbtTree> {
        Ok(NbtTree::read_from(self.document(x, z)?)?)
    }
}
