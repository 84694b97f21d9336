use crate::gallery::domain::training_set::{Label, TrainingSet};
use crate::recognition::domain::face_recognizer::{FaceRecognizer, PredictError, TrainError};
use crate::recognition::infrastructure::subspace::{self, SubspaceModel};
use crate::shared::face_image::FaceImage;

/// Variance-maximizing subspace recognizer (eigenface family).
///
/// Projects onto the principal components of the training set and
/// classifies by nearest neighbor in the projected space. Trains on any
/// non-empty gallery, including a single-class one; use the fisherface
/// variant when between-class separation matters.
pub struct EigenfaceRecognizer {
    num_components: Option<usize>,
    model: Option<SubspaceModel>,
}

impl EigenfaceRecognizer {
    pub fn new() -> Self {
        Self {
            num_components: None,
            model: None,
        }
    }

    /// Clamp the number of retained principal components.
    pub fn with_components(num_components: usize) -> Self {
        Self {
            num_components: Some(num_components),
            model: None,
        }
    }
}

impl Default for EigenfaceRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceRecognizer for EigenfaceRecognizer {
    fn train(&mut self, training_set: &TrainingSet) -> Result<(), TrainError> {
        let dimensions = training_set
            .dimensions()
            .ok_or(TrainError::EmptyTrainingSet)?;

        let data = subspace::data_matrix(training_set);
        let mean = subspace::mean_column(&data);
        let centered = subspace::center_columns(&data, &mean);

        let n = training_set.len();
        let max_components = self.num_components.unwrap_or(n).min(n);
        let basis = subspace::pca_basis(&centered, max_components);
        log::debug!(
            "Eigenface subspace: {} of {} requested components retained",
            basis.ncols(),
            max_components
        );

        let projections = subspace::project_columns(&basis, &centered);
        let labels = training_set.samples().iter().map(|s| s.label).collect();
        self.model = Some(SubspaceModel::new(
            mean,
            basis,
            projections,
            labels,
            dimensions,
        ));
        Ok(())
    }

    fn predict(&self, image: &FaceImage) -> Result<Label, PredictError> {
        let model = self.model.as_ref().ok_or(PredictError::Untrained)?;
        if image.dimensions() != model.dimensions() {
            return Err(PredictError::ShapeMismatch {
                expected: model.dimensions(),
                actual: image.dimensions(),
            });
        }
        Ok(model.classify(image))
    }
}
