use std::io;

use thiserror::Error;

/// Errors originating from the console adapter.
#[derive(Debug, Error)]
pub enum Error {
    #[error("console backend call failed: {0}")]
    Backend(#[from] io::Error),
}

/// Convenient result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
