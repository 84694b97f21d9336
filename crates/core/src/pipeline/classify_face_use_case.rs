use std::path::Path;

use crate::gallery::domain::dataset_builder::DatasetBuilder;
use crate::gallery::domain::image_loader::ImageLoader;
use crate::gallery::domain::training_set::Label;
use crate::recognition::domain::face_recognizer::FaceRecognizer;

/// Single-query classification pipeline:
/// load query → build training set → train → predict.
pub struct ClassifyFaceUseCase {
    loader: Box<dyn ImageLoader>,
    builder: DatasetBuilder,
    recognizer: Box<dyn FaceRecognizer>,
}

impl ClassifyFaceUseCase {
    pub fn new(
        loader: Box<dyn ImageLoader>,
        builder: DatasetBuilder,
        recognizer: Box<dyn FaceRecognizer>,
    ) -> Self {
        Self {
            loader,
            builder,
            recognizer,
        }
    }

    /// Runs the whole pipeline once. Straight-line: the first failing step
    /// aborts the run, and nothing is retried or persisted.
    pub fn execute(
        &mut self,
        gallery_dir: &Path,
        query_path: &Path,
    ) -> Result<Label, Box<dyn std::error::Error>> {
        let query = self.loader.load(query_path)?;

        let training_set = self.builder.build(gallery_dir)?;
        log::info!(
            "Training on {} gallery images across {} classes",
            training_set.len(),
            training_set.class_count()
        );

        self.recognizer.train(&training_set)?;
        let label = self.recognizer.predict(&query)?;
        log::info!("Query {} classified as {label}", query_path.display());
        Ok(label)
    }
}
