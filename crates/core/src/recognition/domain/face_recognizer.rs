use thiserror::Error;

use crate::gallery::domain::training_set::{Label, TrainingSet};
use crate::shared::face_image::FaceImage;

#[derive(Error, Debug)]
pub enum TrainError {
    #[error("cannot train on an empty training set")]
    EmptyTrainingSet,
    #[error("discriminant training requires at least 2 distinct labels, found {found}")]
    InsufficientClasses { found: usize },
    #[error("within-class scatter matrix could not be factorized")]
    DegenerateScatter,
}

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("predict called before train")]
    Untrained,
    #[error("query dimensions {actual:?} do not match training dimensions {expected:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Domain interface for subspace-projection face classification.
///
/// `train` fits the internal model from exactly one training set; the model
/// is write-once and lives for the rest of the run (there is no retraining
/// or incremental update). `predict` projects a query into the fitted
/// subspace and returns the label of the nearest training sample, breaking
/// distance ties toward the earliest sample.
pub trait FaceRecognizer {
    fn train(&mut self, training_set: &TrainingSet) -> Result<(), TrainError>;

    fn predict(&self, image: &FaceImage) -> Result<Label, PredictError>;
}
