//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent warpper for [`nbt_tag::error::Error`]
    #[error(transparent)]
    NbtError(#[from] nbt_tag::error::Error),

    /// no document is stored for the requested coordinates
    #[error("no document stored at ({x}, {z})")]
    DocumentNotFound { x: i32, z: i32 },

    /// a document needs more sectors than an offset entry can describe
    #[error("document needs {0} sectors, at most 255 are allowed")]
    DocumentTooLarge(usize),

    /// {0}
    #[error("not a region file name: {0}")]
    InvalidFileName(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
