//! Result types for laminate analysis

use serde::{Deserialize, Serialize};

use crate::loads::LoadState;
use crate::math::{Vec3, Vec6};

/// Midplane strains and curvatures solving `ABD * x = load`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseState {
    /// Midplane strains [ex, ey, gxy]
    pub midplane_strain: Vec3,
    /// Curvatures [kx, ky, kxy]
    pub curvature: Vec3,
}

impl ResponseState {
    /// Create from strain and curvature components
    pub fn new(midplane_strain: [f64; 3], curvature: [f64; 3]) -> Self {
        Self {
            midplane_strain: Vec3::from(midplane_strain),
            curvature: Vec3::from(curvature),
        }
    }

    /// Split the 6-vector solution into strains (first 3) and curvatures
    pub fn from_vector(x: &Vec6) -> Self {
        Self {
            midplane_strain: Vec3::new(x[0], x[1], x[2]),
            curvature: Vec3::new(x[3], x[4], x[5]),
        }
    }

    /// Stack into the 6-vector `[eps0; kappa]`
    pub fn as_vector(&self) -> Vec6 {
        Vec6::new(
            self.midplane_strain[0],
            self.midplane_strain[1],
            self.midplane_strain[2],
            self.curvature[0],
            self.curvature[1],
            self.curvature[2],
        )
    }

    /// Strain at a through-thickness position: eps0 + z * kappa
    pub fn strain_at(&self, z: f64) -> Vec3 {
        self.midplane_strain + self.curvature * z
    }
}

/// Strains and stresses at the mid-surface of one ply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlyMechanicalState {
    /// 1-based ply number
    pub ply: usize,
    /// Fiber angle in degrees
    pub angle: f64,
    /// z-coordinate the state was evaluated at
    pub z_mid: f64,
    /// Global strains [ex, ey, gxy]
    pub global_strain: Vec3,
    /// Global stresses [sx, sy, txy]
    pub global_stress: Vec3,
    /// Material-axis strains [e1, e2, g12]
    pub local_strain: Vec3,
    /// Material-axis stresses [s1, s2, t12]
    pub local_stress: Vec3,
}

/// Homogenized membrane properties of the laminate
///
/// Derived from [A] only, so extension-bending coupling is not represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineeringConstants {
    /// Effective modulus along x
    pub ex: f64,
    /// Effective modulus along y
    pub ey: f64,
    /// Effective in-plane shear modulus
    pub gxy: f64,
    /// Poisson ratio nu_xy
    pub nu_xy: f64,
    /// Poisson ratio nu_yx
    pub nu_yx: f64,
}

/// Number of plies found at one distinct angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleCount {
    pub angle: f64,
    pub count: usize,
}

/// Angle-distribution summary of a stacking sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayupDistribution {
    /// Every distinct angle in order of first appearance
    pub counts: Vec<AngleCount>,
    /// Plies at 0 degrees
    pub zero_count: usize,
    /// Plies at +45 or -45 degrees
    pub plus_minus_45_count: usize,
    /// Plies at 90 degrees
    pub ninety_count: usize,
    /// Percentage of plies at 0 degrees
    pub zero_percent: f64,
    /// Percentage of plies at +/-45 degrees
    pub plus_minus_45_percent: f64,
    /// Percentage of plies at 90 degrees
    pub ninety_percent: f64,
    /// Total number of plies, including angles outside the named buckets
    pub total_plies: usize,
}

/// Complete response of a laminate to one load state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaminateAnalysis {
    /// Applied load
    pub load: LoadState,
    /// Midplane strains and curvatures
    pub response: ResponseState,
    /// Per-ply strains and stresses, ordered by ply number
    pub plies: Vec<PlyMechanicalState>,
    /// Homogenized engineering constants
    pub engineering_constants: EngineeringConstants,
    /// Angle distribution of the stacking sequence
    pub layup: LayupDistribution,
}

impl LaminateAnalysis {
    /// Ply with the largest absolute fiber-direction stress
    pub fn max_fiber_stress(&self) -> Option<&PlyMechanicalState> {
        self.plies.iter().max_by(|a, b| {
            a.local_stress[0]
                .abs()
                .total_cmp(&b.local_stress[0].abs())
        })
    }
}
