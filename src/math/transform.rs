//! Ply coordinate transformations
//!
//! Rotates the material-axis reduced stiffness of a ply into the laminate
//! (global) frame. Two operators are involved:
//! - [T] maps global stresses `[sx, sy, txy]` to material-axis stresses
//! - [Te] maps global strains `[ex, ey, gxy]` (engineering shear) to
//!   material-axis strains
//!
//! The global-axis reduced stiffness is `Qbar = inv(T) * Q * Te`.

use super::Mat3;

/// Stress transformation matrix [T] for a fiber angle in radians
pub fn stress_transformation(theta: f64) -> Mat3 {
    let c = theta.cos();
    let s = theta.sin();

    #[rustfmt::skip]
    let t = Mat3::new(
        c * c,   s * s,  2.0 * s * c,
        s * s,   c * c,  -2.0 * s * c,
        -s * c,  s * c,  c * c - s * s,
    );
    t
}

/// Strain transformation matrix [Te] for a fiber angle in radians
///
/// Differs from [T] only in where the factor of 2 lands, because the shear
/// component is the engineering shear strain.
pub fn strain_transformation(theta: f64) -> Mat3 {
    let c = theta.cos();
    let s = theta.sin();

    #[rustfmt::skip]
    let t_e = Mat3::new(
        c * c,        s * s,        s * c,
        s * s,        c * c,        -s * c,
        -2.0 * s * c, 2.0 * s * c,  c * c - s * s,
    );
    t_e
}

/// Compute the global-axis reduced stiffness `Qbar = inv(T) * Q * Te`
///
/// A rotation by `theta` is undone by a rotation by `-theta`, so `inv(T)` is
/// formed as `T(-theta)` and never needs a numerical inversion.
pub fn transformed_reduced_stiffness(theta: f64, q: &Mat3) -> Mat3 {
    let t_inv = stress_transformation(-theta);
    let t_e = strain_transformation(theta);
    t_inv * q * t_e
}

/// Per-ply transformation operators and the resulting global stiffness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlyTransform {
    /// Stress transformation [T]
    pub t: Mat3,
    /// Strain transformation [Te]
    pub t_e: Mat3,
    /// Global-axis reduced stiffness [Qbar]
    pub q_bar: Mat3,
}

impl PlyTransform {
    /// Build the transform set for a fiber angle in radians
    pub fn new(theta: f64, q: &Mat3) -> Self {
        Self {
            t: stress_transformation(theta),
            t_e: strain_transformation(theta),
            q_bar: transformed_reduced_stiffness(theta, q),
        }
    }
}
