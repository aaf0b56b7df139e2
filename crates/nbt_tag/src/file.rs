//! Standalone NBT files such as `level.dat` or `.schematic`

use std::fs;
use std::path::Path;

use bon::Builder;
use tracing::{debug, instrument};

use crate::compression::CompressionMethod;
use crate::error::{Error, Result};
use crate::tree::NbtTree;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Options for how an NBT file should be written
#[derive(Debug, Clone, Copy, Builder)]
pub struct NbtFileOptions {
    /// Framing used when the file is saved
    #[builder(default = CompressionMethod::GZip)]
    pub compression: CompressionMethod,
}

impl Default for NbtFileOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A tree loaded from, or headed for, a standalone file
///
/// The framing found when reading is kept, so a file is saved back the way it was
/// found.
///
/// ```no_run
/// use nbt_tag::file::NbtFile;
///
/// let mut file = NbtFile::read("level.dat")?;
/// file.tree.root.insert("hardcore", nbt_tag::TagNode::Byte(1));
/// file.write("level.dat")?;
/// # Ok::<(), nbt_tag::error::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtFile {
    pub tree: NbtTree,
    pub compression: CompressionMethod,
}

impl NbtFile {
    pub fn new(tree: NbtTree, options: NbtFileOptions) -> Self {
        Self {
            tree,
            compression: options.compression,
        }
    }

    /// Read a file from disk, detecting its framing
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parse file contents.
    ///
    /// Gzip is tried first when the gzip magic is present, then the bytes are read as
    /// uncompressed NBT. Fails with [`Error::UnreadableFile`] when neither works.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut candidates = Vec::with_capacity(2);
        if bytes.starts_with(&GZIP_MAGIC) {
            candidates.push(CompressionMethod::GZip);
        }
        candidates.push(CompressionMethod::None);

        for compression in candidates {
            match NbtTree::read_compressed(bytes, compression) {
                Ok(tree) => {
                    debug!(?compression, "read nbt file");
                    return Ok(Self { tree, compression });
                }
                Err(e) => debug!(?compression, error = %e, "framing did not match"),
            }
        }

        Err(Error::UnreadableFile)
    }

    /// Serialize the tree with the file's framing
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.tree.write_compressed(Vec::new(), self.compression)
    }

    /// Write the file to disk, replacing any existing contents
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
