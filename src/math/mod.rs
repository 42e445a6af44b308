//! Mathematical utilities for laminate calculations

pub mod abd;
pub mod transform;

use nalgebra::{Matrix3, Matrix6, Vector3, Vector6};

pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;

pub use abd::{assemble_abd, StiffnessMatrices};
pub use transform::{
    strain_transformation, stress_transformation, transformed_reduced_stiffness, PlyTransform,
};

/// Solve a linear system using LU decomposition with partial pivoting
///
/// Returns `None` when the decomposition hits a zero pivot.
pub fn solve_linear_system(a: &Mat6, b: &Vec6) -> Option<Vec6> {
    a.lu().solve(b)
}

/// Estimate the 2-norm condition number of a 6x6 matrix after symmetric
/// diagonal (Jacobi) scaling.
///
/// Scaling by `1/sqrt(|a_ii|)` removes the unit mismatch between the
/// extensional and bending blocks, so the estimate measures genuine rank
/// deficiency rather than the choice of length unit. Rows with a zero
/// diagonal are left unscaled.
pub fn condition_estimate(a: &Mat6) -> f64 {
    let mut scale = [1.0; 6];
    for (i, s) in scale.iter_mut().enumerate() {
        let d = a[(i, i)].abs();
        if d > 0.0 && d.is_finite() {
            *s = 1.0 / d.sqrt();
        }
    }

    let scaled = Mat6::from_fn(|i, j| a[(i, j)] * scale[i] * scale[j]);
    if scaled.iter().any(|v| !v.is_finite()) {
        return f64::INFINITY;
    }

    let sv = scaled.singular_values();
    let s_max = sv.max();
    let s_min = sv.min();

    if s_min <= 0.0 {
        f64::INFINITY
    } else {
        s_max / s_min
    }
}

/// Check that a 3x3 matrix is symmetric to a tolerance relative to its
/// largest entry
pub fn is_symmetric(m: &Mat3, rel_tol: f64) -> bool {
    let scale = m.amax();
    if scale == 0.0 {
        return true;
    }
    (0..3).all(|i| (0..3).all(|j| (m[(i, j)] - m[(j, i)]).abs() <= rel_tol * scale))
}
