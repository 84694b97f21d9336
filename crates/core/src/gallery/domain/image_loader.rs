use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::face_image::FaceImage;

#[derive(Error, Debug)]
pub enum ImageReadError {
    #[error("failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("image {path} decoded to zero dimensions")]
    ZeroSized { path: PathBuf },
}

/// Domain interface for turning an image path into a normalized face crop.
///
/// Implementations convert to single-channel intensity and resize to the
/// run's fixed target resolution, so every image entering the classifier
/// has identical dimensions.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<FaceImage, ImageReadError>;
}
