//! Shared machinery for the subspace recognizers: mean image, centered data
//! matrix, PCA basis via the Gram-matrix trick, projection, and
//! nearest-neighbor search in the projected space.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::gallery::domain::training_set::{Label, TrainingSet};
use crate::recognition::infrastructure::linalg;
use crate::shared::face_image::FaceImage;

/// Relative cutoff below which Gram-matrix eigenvalues count as
/// rank-deficient and contribute no basis axis.
const EIGENVALUE_CUTOFF: f64 = 1e-10;

/// Fitted subspace state shared by the eigenface and fisherface
/// recognizers: the mean image, the projection basis (one column per
/// retained axis), and the projected training samples with their labels.
///
/// Write-once: built by `train`, read by every subsequent `predict`.
pub struct SubspaceModel {
    mean: Array1<f64>,
    basis: Array2<f64>,       // d × k
    projections: Array2<f64>, // n × k, row per training sample
    labels: Vec<Label>,
    dimensions: (u32, u32),
}

impl SubspaceModel {
    pub fn new(
        mean: Array1<f64>,
        basis: Array2<f64>,
        projections: Array2<f64>,
        labels: Vec<Label>,
        dimensions: (u32, u32),
    ) -> Self {
        debug_assert_eq!(projections.nrows(), labels.len());
        debug_assert_eq!(basis.ncols(), projections.ncols());
        Self {
            mean,
            basis,
            projections,
            labels,
            dimensions,
        }
    }

    /// Training-time `(width, height)`; queries must match exactly.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    pub fn num_components(&self) -> usize {
        self.basis.ncols()
    }

    /// Project a query into the subspace and return the label of the
    /// nearest training sample.
    pub fn classify(&self, image: &FaceImage) -> Label {
        debug_assert_eq!(image.len(), self.mean.len());
        let centered = to_vector(image) - &self.mean;
        let projected = self.basis.t().dot(&centered);
        nearest_label(&self.projections, &self.labels, projected.view())
    }
}

/// Flatten to f64 intensities in row-major order.
pub fn to_vector(image: &FaceImage) -> Array1<f64> {
    Array1::from_iter(image.data().iter().map(|&p| p as f64))
}

/// Column-per-sample data matrix (d × n). The training set must be
/// non-empty with all samples at identical dimensions.
pub fn data_matrix(training_set: &TrainingSet) -> Array2<f64> {
    let n = training_set.len();
    let d = training_set.samples()[0].image.len();
    let mut data = Array2::<f64>::zeros((d, n));
    for (j, sample) in training_set.samples().iter().enumerate() {
        debug_assert_eq!(sample.image.len(), d, "samples must share dimensions");
        for (i, &p) in sample.image.data().iter().enumerate() {
            data[[i, j]] = p as f64;
        }
    }
    data
}

/// Mean of the columns of `data` (the mean image).
pub fn mean_column(data: &Array2<f64>) -> Array1<f64> {
    data.sum_axis(Axis(1)) / data.ncols() as f64
}

/// Subtract the mean from every column.
pub fn center_columns(data: &Array2<f64>, mean: &Array1<f64>) -> Array2<f64> {
    let mut centered = data.clone();
    for mut col in centered.columns_mut() {
        col -= mean;
    }
    centered
}

/// PCA basis of the centered data via the Gram-matrix trick: eigenvectors
/// of the N×N matrix `A^T A` lifted through `A` and normalized, keeping at
/// most `max_components` axes with non-negligible variance.
///
/// Returns a d × k matrix with orthonormal columns, strongest axis first;
/// k can be less than `max_components` when the data is rank-deficient.
pub fn pca_basis(centered: &Array2<f64>, max_components: usize) -> Array2<f64> {
    let n = centered.ncols();
    let gram = centered.t().dot(centered);
    let (eigenvalues, eigenvectors) = linalg::symmetric_eigen(&gram);

    let cutoff = eigenvalues.iter().fold(0.0_f64, |acc, &v| acc.max(v)) * EIGENVALUE_CUTOFF;
    let mut columns: Vec<Array1<f64>> = Vec::new();
    for i in 0..n {
        if columns.len() == max_components {
            break;
        }
        let lambda = eigenvalues[i];
        if lambda <= cutoff {
            break; // sorted descending, nothing useful remains
        }
        let axis = centered.dot(&eigenvectors.column(i)) / lambda.sqrt();
        columns.push(axis);
    }

    let d = centered.nrows();
    let mut basis = Array2::<f64>::zeros((d, columns.len()));
    for (j, col) in columns.iter().enumerate() {
        basis.column_mut(j).assign(col);
    }
    basis
}

/// Project every column of `centered` into the basis; one row per sample.
pub fn project_columns(basis: &Array2<f64>, centered: &Array2<f64>) -> Array2<f64> {
    centered.t().dot(basis)
}

/// Index-stable nearest neighbor: a strictly smaller distance wins, so
/// ties keep the earliest training sample.
fn nearest_label(projections: &Array2<f64>, labels: &[Label], query: ArrayView1<f64>) -> Label {
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;
    for (i, row) in projections.rows().into_iter().enumerate() {
        let distance = squared_distance(row, query);
        if distance < best_distance {
            best_distance = distance;
            best_index = i;
        }
    }
    labels[best_index]
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}
