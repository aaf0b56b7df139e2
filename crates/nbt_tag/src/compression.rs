//! Stream compression and decompression handling.

use std::io::{self, Read, Write};

use binrw::{BinRead, BinWrite};
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use tracing::instrument;

use crate::error::Error;

/// Identifies the framing used around an NBT stream
///
/// The numeric value is the compression byte stored in front of region documents.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[brw(repr=u8)]
pub enum CompressionMethod {
    /// Gzip with a file header, the usual framing for standalone files
    GZip = 1,

    /// Zlib, the usual framing for region documents
    #[default]
    Zlib = 2,

    /// Stores the data as it is
    None = 3,
}

impl TryFrom<u8> for CompressionMethod {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CompressionMethod::GZip),
            2 => Ok(CompressionMethod::Zlib),
            3 => Ok(CompressionMethod::None),
            _ => Err(Error::UnknownCompression(value)),
        }
    }
}

impl From<CompressionMethod> for u8 {
    fn from(value: CompressionMethod) -> Self {
        value as u8
    }
}

/// Decompressing reader selected by a [`CompressionMethod`]
pub enum NbtBlockReader<R: Read> {
    Raw(R),
    GZip(Box<GzDecoder<R>>),
    Zlib(Box<ZlibDecoder<R>>),
}

impl<R: Read> NbtBlockReader<R> {
    #[instrument(skip(reader))]
    pub fn new(reader: R, compression: CompressionMethod) -> Self {
        match compression {
            CompressionMethod::None => NbtBlockReader::Raw(reader),
            CompressionMethod::GZip => NbtBlockReader::GZip(Box::new(GzDecoder::new(reader))),
            CompressionMethod::Zlib => NbtBlockReader::Zlib(Box::new(ZlibDecoder::new(reader))),
        }
    }

    pub fn compression(&self) -> CompressionMethod {
        match self {
            NbtBlockReader::Raw(_) => CompressionMethod::None,
            NbtBlockReader::GZip(_) => CompressionMethod::GZip,
            NbtBlockReader::Zlib(_) => CompressionMethod::Zlib,
        }
    }

    pub fn into_inner(self) -> R {
        match self {
            NbtBlockReader::Raw(r) => r,
            NbtBlockReader::GZip(r) => r.into_inner(),
            NbtBlockReader::Zlib(r) => r.into_inner(),
        }
    }
}

impl<R: Read> Read for NbtBlockReader<R> {
    #[instrument(level = "trace", skip_all, err)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            NbtBlockReader::Raw(r) => r.read(buf),
            NbtBlockReader::GZip(r) => r.read(buf),
            NbtBlockReader::Zlib(r) => r.read(buf),
        }
    }

    #[instrument(level = "trace", skip_all, err)]
    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        match self {
            NbtBlockReader::Raw(r) => r.read_to_end(buf),
            NbtBlockReader::GZip(r) => r.read_to_end(buf),
            NbtBlockReader::Zlib(r) => r.read_to_end(buf),
        }
    }
}

/// Compressing writer selected by a [`CompressionMethod`]
///
/// Call [`NbtBlockWriter::finish`] to write the trailing compressed bytes.
pub enum NbtBlockWriter<W: Write> {
    Raw(W),
    GZip(Box<GzEncoder<W>>),
    Zlib(Box<ZlibEncoder<W>>),
}

impl<W: Write> NbtBlockWriter<W> {
    #[instrument(skip(writer))]
    pub fn new(writer: W, compression: CompressionMethod) -> Self {
        match compression {
            CompressionMethod::None => NbtBlockWriter::Raw(writer),
            CompressionMethod::GZip => NbtBlockWriter::GZip(Box::new(GzEncoder::new(
                writer,
                Compression::default(),
            ))),
            CompressionMethod::Zlib => NbtBlockWriter::Zlib(Box::new(ZlibEncoder::new(
                writer,
                Compression::default(),
            ))),
        }
    }

    /// Flush the encoder and hand back the inner writer
    #[instrument(skip(self), err)]
    pub fn finish(self) -> io::Result<W> {
        match self {
            NbtBlockWriter::Raw(w) => Ok(w),
            NbtBlockWriter::GZip(w) => w.finish(),
            NbtBlockWriter::Zlib(w) => w.finish(),
        }
    }
}

impl<W: Write> Write for NbtBlockWriter<W> {
    #[instrument(level = "trace", skip_all, err)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            NbtBlockWriter::Raw(w) => w.write(buf),
            NbtBlockWriter::GZip(w) => w.write(buf),
            NbtBlockWriter::Zlib(w) => w.write(buf),
        }
    }

    #[instrument(level = "trace", skip_all, err)]
    fn flush(&mut self) -> io::Result<()> {
        match self {
            NbtBlockWriter::Raw(w) => w.flush(),
            NbtBlockWriter::GZip(w) => w.flush(),
            NbtBlockWriter::Zlib(w) => w.flush(),
        }
    }
}
