use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::gallery::domain::image_loader::{ImageLoader, ImageReadError};
use crate::gallery::domain::label_codec::{self, LabelFormatError};
use crate::gallery::domain::training_set::{TrainingSample, TrainingSet};
use crate::shared::constants::GALLERY_EXTENSIONS;
use crate::storage::domain::image_store::ImageStore;

#[derive(Error, Debug)]
pub enum DatasetBuildError {
    #[error("failed to list gallery directory {dir}: {source}")]
    List {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Image(#[from] ImageReadError),
    #[error(transparent)]
    Label(#[from] LabelFormatError),
    #[error("no gallery images with accepted extensions in {dir}")]
    EmptyDataset { dir: PathBuf },
}

/// Builds a [`TrainingSet`] from one gallery directory listing.
///
/// Entries whose name does not end in an accepted image extension are
/// ignored. An accepted entry that fails to load, or whose name fails to
/// decode a label, aborts the whole build; there is no partial-success
/// mode. A listing that yields zero accepted entries is an error rather
/// than an empty training set.
pub struct DatasetBuilder {
    store: Arc<dyn ImageStore>,
    loader: Box<dyn ImageLoader>,
}

impl DatasetBuilder {
    pub fn new(store: Arc<dyn ImageStore>, loader: Box<dyn ImageLoader>) -> Self {
        Self { store, loader }
    }

    pub fn build(&self, dir: &Path) -> Result<TrainingSet, DatasetBuildError> {
        let entries = self
            .store
            .list_entries(dir)
            .map_err(|source| DatasetBuildError::List {
                dir: dir.to_path_buf(),
                source,
            })?;

        let mut samples = Vec::new();
        for name in entries.iter().filter(|n| has_accepted_extension(n)) {
            let image = self.loader.load(&dir.join(name))?;
            let label = label_codec::decode(name)?;
            samples.push(TrainingSample { image, label });
        }

        if samples.is_empty() {
            return Err(DatasetBuildError::EmptyDataset {
                dir: dir.to_path_buf(),
            });
        }

        log::debug!(
            "Built training set: {} samples from {}",
            samples.len(),
            dir.display()
        );
        Ok(TrainingSet::new(samples))
    }
}

fn has_accepted_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    GALLERY_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}
