//! Through-thickness integration of ply stiffness into the laminate
//! extensional (A), coupling (B) and bending (D) matrices.

use super::{Mat3, Mat6};

/// The A, B, D submatrices and the assembled 6x6 ABD operator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StiffnessMatrices {
    /// Extensional stiffness [A]
    pub a: Mat3,
    /// Extension-bending coupling stiffness [B]
    pub b: Mat3,
    /// Bending stiffness [D]
    pub d: Mat3,
    /// Block matrix [[A, B], [B, D]]
    pub abd: Mat6,
}

/// Integrate per-ply global stiffness over the laminate thickness.
///
/// Each entry of `plies` is `(q_bar, thickness, z_top)` where `z_top` is the
/// upper bound of the ply's z-interval. The ply's lower bound is taken as
/// `z_top - t`, so the coupling and bending terms are evaluated as
///
/// ```text
/// B += 1/2 * Qbar * (z_top^2 - (z_top - t)^2)
/// D += 1/3 * Qbar * (z_top^3 - (z_top - t)^3)
/// ```
pub fn assemble_abd<'a, I>(plies: I) -> StiffnessMatrices
where
    I: IntoIterator<Item = (&'a Mat3, f64, f64)>,
{
    let mut a = Mat3::zeros();
    let mut b = Mat3::zeros();
    let mut d = Mat3::zeros();

    for (q_bar, t, z) in plies {
        let z_bottom = z - t;
        let dz2 = z.powi(2) - z_bottom.powi(2);
        let dz3 = z.powi(3) - z_bottom.powi(3);

        for i in 0..3 {
            for j in 0..3 {
                a[(i, j)] += q_bar[(i, j)] * t;
                b[(i, j)] += 0.5 * q_bar[(i, j)] * dz2;
                d[(i, j)] += (1.0 / 3.0) * q_bar[(i, j)] * dz3;
            }
        }
    }

    let mut abd = Mat6::zeros();
    abd.fixed_view_mut::<3, 3>(0, 0).copy_from(&a);
    abd.fixed_view_mut::<3, 3>(0, 3).copy_from(&b);
    abd.fixed_view_mut::<3, 3>(3, 0).copy_from(&b);
    abd.fixed_view_mut::<3, 3>(3, 3).copy_from(&d);

    StiffnessMatrices { a, b, d, abd }
}
