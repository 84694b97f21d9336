//! Dense symmetric linear algebra for the subspace recognizers.
//!
//! Self-contained routines over `ndarray`. The matrices involved are at
//! most N×N for N training samples, so cyclic Jacobi is plenty.

use ndarray::{Array1, Array2};

const JACOBI_MAX_SWEEPS: usize = 64;
const JACOBI_TOLERANCE: f64 = 1e-12;

/// Eigenvalues and eigenvectors of a symmetric matrix, sorted by descending
/// eigenvalue. Eigenvectors are the columns of the returned matrix.
pub fn symmetric_eigen(matrix: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols(), "matrix must be square");

    let mut a = matrix.clone();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..JACOBI_MAX_SWEEPS {
        if off_diagonal_norm(&a) <= JACOBI_TOLERANCE * frobenius_norm(&a).max(1.0) {
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                rotate(&mut a, &mut v, p, q);
            }
        }
    }

    sort_descending(&a, &v)
}

/// One two-sided Jacobi rotation zeroing `a[p][q]`.
fn rotate(a: &mut Array2<f64>, v: &mut Array2<f64>, p: usize, q: usize) {
    let apq = a[[p, q]];
    if apq == 0.0 {
        return;
    }

    let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
    let t = if theta >= 0.0 {
        1.0 / (theta + (theta * theta + 1.0).sqrt())
    } else {
        -1.0 / (-theta + (theta * theta + 1.0).sqrt())
    };
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    let n = a.nrows();
    // A <- A J, then A <- J^T A; V accumulates the column rotations.
    for k in 0..n {
        let akp = a[[k, p]];
        let akq = a[[k, q]];
        a[[k, p]] = c * akp - s * akq;
        a[[k, q]] = s * akp + c * akq;
    }
    for k in 0..n {
        let apk = a[[p, k]];
        let aqk = a[[q, k]];
        a[[p, k]] = c * apk - s * aqk;
        a[[q, k]] = s * apk + c * aqk;
    }
    for k in 0..n {
        let vkp = v[[k, p]];
        let vkq = v[[k, q]];
        v[[k, p]] = c * vkp - s * vkq;
        v[[k, q]] = s * vkp + c * vkq;
    }
}

fn off_diagonal_norm(a: &Array2<f64>) -> f64 {
    let n = a.nrows();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[[i, j]] * a[[i, j]];
            }
        }
    }
    sum.sqrt()
}

fn frobenius_norm(a: &Array2<f64>) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn sort_descending(a: &Array2<f64>, v: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[[j, j]].total_cmp(&a[[i, i]]));

    let mut eigenvalues = Array1::<f64>::zeros(n);
    let mut eigenvectors = Array2::<f64>::zeros((n, n));
    for (dst, &src) in order.iter().enumerate() {
        eigenvalues[dst] = a[[src, src]];
        eigenvectors.column_mut(dst).assign(&v.column(src));
    }
    (eigenvalues, eigenvectors)
}

/// Lower-triangular Cholesky factor `L` with `L L^T = A`, or `None` when the
/// matrix is not positive definite.
pub fn cholesky_lower(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols(), "matrix must be square");

    let mut l = Array2::<f64>::zeros((n, n));
    for j in 0..n {
        let mut diag = a[[j, j]];
        for k in 0..j {
            diag -= l[[j, k]] * l[[j, k]];
        }
        if diag <= 0.0 {
            return None;
        }
        l[[j, j]] = diag.sqrt();

        for i in (j + 1)..n {
            let mut sum = a[[i, j]];
            for k in 0..j {
                sum -= l[[i, k]] * l[[j, k]];
            }
            l[[i, j]] = sum / l[[j, j]];
        }
    }
    Some(l)
}

/// Solve `L X = B` by forward substitution, column by column.
pub fn solve_lower(l: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    let n = l.nrows();
    let m = b.ncols();
    debug_assert_eq!(n, b.nrows(), "dimension mismatch");

    let mut x = Array2::<f64>::zeros((n, m));
    for col in 0..m {
        for i in 0..n {
            let mut sum = b[[i, col]];
            for k in 0..i {
                sum -= l[[i, k]] * x[[k, col]];
            }
            x[[i, col]] = sum / l[[i, i]];
        }
    }
    x
}

/// Solve `L^T X = B` by back substitution, column by column.
pub fn solve_lower_transpose(l: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    let n = l.nrows();
    let m = b.ncols();
    debug_assert_eq!(n, b.nrows(), "dimension mismatch");

    let mut x = Array2::<f64>::zeros((n, m));
    for col in 0..m {
        for i in (0..n).rev() {
            let mut sum = b[[i, col]];
            for k in (i + 1)..n {
                sum -= l[[k, i]] * x[[k, col]];
            }
            x[[i, col]] = sum / l[[i, i]];
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_symmetric_eigen_diagonal_matrix() {
        let a = array![[1.0, 0.0], [0.0, 3.0]];
        let (values, _vectors) = symmetric_eigen(&a);
        assert_relative_eq!(values[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(values[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric_eigen_known_pair() {
        // [[2,1],[1,2]] has eigenvalues 3 and 1 with (1,1) and (1,-1) axes.
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let (values, vectors) = symmetric_eigen(&a);
        assert_relative_eq!(values[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(values[1], 1.0, epsilon = 1e-9);

        let v0 = vectors.column(0);
        assert_relative_eq!(v0[0].abs(), v0[1].abs(), epsilon = 1e-9);
        assert_relative_eq!(
            v0[0] * v0[0] + v0[1] * v0[1],
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_symmetric_eigen_reconstructs_matrix() {
        let a = array![
            [4.0, 1.0, 0.5],
            [1.0, 3.0, 0.2],
            [0.5, 0.2, 1.0]
        ];
        let (values, vectors) = symmetric_eigen(&a);

        let lambda = Array2::from_diag(&values);
        let reconstructed = vectors.dot(&lambda).dot(&vectors.t());
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(reconstructed[[i, j]], a[[i, j]], epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_symmetric_eigen_vectors_orthonormal() {
        let a = array![[5.0, 2.0], [2.0, 1.0]];
        let (_values, vectors) = symmetric_eigen(&a);
        let gram = vectors.t().dot(&vectors);
        assert_relative_eq!(gram[[0, 0]], 1.0, epsilon = 1e-9);
        assert_relative_eq!(gram[[1, 1]], 1.0, epsilon = 1e-9);
        assert_relative_eq!(gram[[0, 1]], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cholesky_known_factor() {
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let l = cholesky_lower(&a).unwrap();
        assert_relative_eq!(l[[0, 0]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(l[[1, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(l[[1, 1]], 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(l[[0, 1]], 0.0);
    }

    #[test]
    fn test_cholesky_roundtrip() {
        let a = array![
            [6.0, 2.0, 1.0],
            [2.0, 5.0, 2.0],
            [1.0, 2.0, 4.0]
        ];
        let l = cholesky_lower(&a).unwrap();
        let reconstructed = l.dot(&l.t());
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(reconstructed[[i, j]], a[[i, j]], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_cholesky_rejects_indefinite() {
        let a = array![[1.0, 2.0], [2.0, 1.0]];
        assert!(cholesky_lower(&a).is_none());
    }

    #[test]
    fn test_cholesky_rejects_zero_matrix() {
        let a = Array2::<f64>::zeros((2, 2));
        assert!(cholesky_lower(&a).is_none());
    }

    #[test]
    fn test_solve_lower() {
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let l = cholesky_lower(&a).unwrap();
        let b = array![[2.0], [3.0]];
        let x = solve_lower(&l, &b);
        let back = l.dot(&x);
        assert_relative_eq!(back[[0, 0]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(back[[1, 0]], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_lower_transpose() {
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let l = cholesky_lower(&a).unwrap();
        let b = array![[1.0], [2.0]];
        let x = solve_lower_transpose(&l, &b);
        let back = l.t().dot(&x);
        assert_relative_eq!(back[[0, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(back[[1, 0]], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solves_invert_positive_definite_matrix() {
        // L^-T (L^-1 A) = A^-1 A = I for A = L L^T.
        let a = array![[6.0, 2.0], [2.0, 5.0]];
        let l = cholesky_lower(&a).unwrap();
        let y = solve_lower(&l, &a);
        let identity = solve_lower_transpose(&l, &y);
        assert_relative_eq!(identity[[0, 0]], 1.0, epsilon = 1e-10);
        assert_relative_eq!(identity[[1, 1]], 1.0, epsilon = 1e-10);
        assert_relative_eq!(identity[[0, 1]], 0.0, epsilon = 1e-10);
        assert_relative_eq!(identity[[1, 0]], 0.0, epsilon = 1e-10);
    }
}
