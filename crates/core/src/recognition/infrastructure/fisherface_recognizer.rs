use std::collections::BTreeMap;

use ndarray::{s, Array1, Array2, Axis};

use crate::gallery::domain::training_set::{Label, TrainingSet};
use crate::recognition::domain::face_recognizer::{FaceRecognizer, PredictError, TrainError};
use crate::recognition::infrastructure::linalg;
use crate::recognition::infrastructure::subspace::{self, SubspaceModel};
use crate::shared::face_image::FaceImage;

/// Ridge added to the within-class scatter diagonal before factorization,
/// relative to its mean diagonal magnitude. `Sw` is identically zero when
/// every class holds a single sample.
const SCATTER_RIDGE: f64 = 1e-6;

/// Discriminant subspace recognizer (fisherface family).
///
/// Reduces with PCA to at most N - c dimensions, then applies linear
/// discriminant analysis to find the c - 1 axes that maximize between-class
/// scatter relative to within-class scatter, and classifies by nearest
/// neighbor in that space. Requires at least two distinct labels; a
/// single-class gallery is a hard training error, not a silent fallback to
/// the variance-only variant.
pub struct FisherfaceRecognizer {
    model: Option<SubspaceModel>,
}

impl FisherfaceRecognizer {
    pub fn new() -> Self {
        Self { model: None }
    }
}

impl Default for FisherfaceRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceRecognizer for FisherfaceRecognizer {
    fn train(&mut self, training_set: &TrainingSet) -> Result<(), TrainError> {
        let dimensions = training_set
            .dimensions()
            .ok_or(TrainError::EmptyTrainingSet)?;
        let classes = training_set.class_count();
        if classes < 2 {
            return Err(TrainError::InsufficientClasses { found: classes });
        }

        let n = training_set.len();
        let labels: Vec<Label> = training_set.samples().iter().map(|s| s.label).collect();

        let data = subspace::data_matrix(training_set);
        let mean = subspace::mean_column(&data);
        let centered = subspace::center_columns(&data, &mean);

        // PCA first so the scatter matrices live in a space of at most
        // N - c dimensions, where Sw can be made full rank.
        let pca_components = (n - classes).max(1);
        let pca = subspace::pca_basis(&centered, pca_components);
        let reduced = subspace::project_columns(&pca, &centered);

        let lda = discriminant_basis(&reduced, &labels, classes)?;
        let basis = pca.dot(&lda);
        let projections = reduced.dot(&lda);
        log::debug!(
            "Fisherface subspace: {} discriminant axes over {} principal components",
            basis.ncols(),
            pca.ncols()
        );

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

/// LDA axes in the PCA-reduced space: the leading eigenvectors of
/// `Sw^-1 Sb`, obtained through Cholesky whitening of `Sw` so the
/// eigenproblem stays symmetric. At most c - 1 axes carry discriminative
/// information.
fn discriminant_basis(
    reduced: &Array2<f64>, // n × k, row per sample
    labels: &[Label],
    classes: usize,
) -> Result<Array2<f64>, TrainError> {
    let n = reduced.nrows();
    let k = reduced.ncols();
    let global_mean = reduced.sum_axis(Axis(0)) / n as f64;

    let mut class_sums: BTreeMap<Label, (Array1<f64>, usize)> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        let entry = class_sums
            .entry(label)
            .or_insert_with(|| (Array1::zeros(k), 0));
        entry.0 += &reduced.row(i);
        entry.1 += 1;
    }

    let mut class_means: BTreeMap<Label, Array1<f64>> = BTreeMap::new();
    let mut sb = Array2::<f64>::zeros((k, k));
    for (label, (sum, count)) in &class_sums {
        let class_mean = sum / *count as f64;
        let diff = &class_mean - &global_mean;
        sb.scaled_add(*count as f64, &outer(&diff, &diff));
        class_means.insert(*label, class_mean);
    }

    let mut sw = Array2::<f64>::zeros((k, k));
    for (i, &label) in labels.iter().enumerate() {
        let diff = reduced.row(i).to_owned() - &class_means[&label];
        sw += &outer(&diff, &diff);
    }

    // Keep the factorization defined when some class has a single sample.
    let ridge = SCATTER_RIDGE * (sw.diag().sum() / k.max(1) as f64).max(1.0);
    for i in 0..k {
        sw[[i, i]] += ridge;
    }

    let chol = linalg::cholesky_lower(&sw).ok_or(TrainError::DegenerateScatter)?;

    // M = L^-1 Sb L^-T is symmetric and shares its eigenvalues with Sw^-1 Sb.
    let half = linalg::solve_lower(&chol, &sb);
    let whitened = linalg::solve_lower(&chol, &half.t().to_owned());

    let (_eigenvalues, eigenvectors) = linalg::symmetric_eigen(&whitened);
    let axes = (classes - 1).min(k);

    // w = L^-T q maps whitened eigenvectors back to the reduced space.
    let leading = eigenvectors.slice(s![.., ..axes]).to_owned();
    let mut lda = linalg::solve_lower_transpose(&chol, &leading);
    for mut col in lda.columns_mut() {
        let norm = col.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            col /= norm;
        }
    }
    Ok(lda)
}

fn outer(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    let a2 = a.view().insert_axis(Axis(1));
    let b2 = b.view().insert_axis(Axis(0));
    a2.dot(&b2)
}
