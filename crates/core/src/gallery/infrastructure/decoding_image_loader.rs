use std::path::Path;
use std::sync::Arc;

use image::imageops::{self, FilterType};

use crate::gallery::domain::image_loader::{ImageLoader, ImageReadError};
use crate::shared::face_image::FaceImage;
use crate::storage::domain::image_store::ImageStore;

/// Decodes gallery and query files (PNG, JPEG, PGM) into fixed-size
/// grayscale face crops.
///
/// Reads bytes through the storage collaborator, converts to luma, and
/// bilinear-resizes to the target resolution. A source already at the
/// target size passes through untouched.
pub struct DecodingImageLoader {
    store: Arc<dyn ImageStore>,
    target_width: u32,
    target_height: u32,
}

impl DecodingImageLoader {
    pub fn new(store: Arc<dyn ImageStore>, target_width: u32, target_height: u32) -> Self {
        Self {
            store,
            target_width,
            target_height,
        }
    }
}

impl ImageLoader for DecodingImageLoader {
    fn load(&self, path: &Path) -> Result<FaceImage, ImageReadError> {
        let bytes = self
            .store
            .read_bytes(path)
            .map_err(|source| ImageReadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let decoded = image::load_from_memory(&bytes).map_err(|e| ImageReadError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let gray = decoded.to_luma8();
        if gray.width() == 0 || gray.height() == 0 {
            return Err(ImageReadError::ZeroSized {
                path: path.to_path_buf(),
            });
        }

        let gray = if gray.dimensions() == (self.target_width, self.target_height) {
            gray
        } else {
            imageops::resize(
                &gray,
                self.target_width,
                self.target_height,
                FilterType::Triangle,
            )
        };

        Ok(FaceImage::new(
            gray.into_raw(),
            self.target_width,
            self.target_height,
        ))
    }
}
