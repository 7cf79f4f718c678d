use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon size must be at least 1 px")]
    ZeroSize,

    #[error("cannot allocate a {size}x{size} canvas")]
    Canvas { size: u32 },

    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to save {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
