//! Applied force and moment resultants

use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::math::{Vec3, Vec6};

/// Force resultants `[Nx, Ny, Nxy]` and moment resultants `[Mx, My, Mxy]`,
/// all per unit width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadState {
    /// In-plane force resultants [Nx, Ny, Nxy]
    pub forces: Vec3,
    /// Moment resultants [Mx, My, Mxy]
    pub moments: Vec3,
}

impl LoadState {
    /// Create a load state from force and moment resultants
    pub fn new(forces: [f64; 3], moments: [f64; 3]) -> Self {
        Self {
            forces: Vec3::from(forces),
            moments: Vec3::from(moments),
        }
    }

    /// In-plane forces only
    pub fn in_plane(nx: f64, ny: f64, nxy: f64) -> Self {
        Self::new([nx, ny, nxy], [0.0; 3])
    }

    /// Moments only
    pub fn bending(mx: f64, my: f64, mxy: f64) -> Self {
        Self::new([0.0; 3], [mx, my, mxy])
    }

    /// Stack into the 6-vector `[N; M]`
    pub fn as_vector(&self) -> Vec6 {
        Vec6::new(
            self.forces[0],
            self.forces[1],
            self.forces[2],
            self.moments[0],
            self.moments[1],
            self.moments[2],
        )
    }

    /// Split a 6-vector `[N; M]` back into resultants
    pub fn from_vector(v: &Vec6) -> Self {
        Self {
            forces: Vec3::new(v[0], v[1], v[2]),
            moments: Vec3::new(v[3], v[4], v[5]),
        }
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            forces: self.forces * factor,
            moments: self.moments * factor,
        }
    }

    /// Whether every component is finite
    pub fn is_finite(&self) -> bool {
        self.forces.iter().chain(self.moments.iter()).all(|v| v.is_finite())
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::new([0.0; 3], [0.0; 3])
    }
}

impl Add for LoadState {
    type Output = LoadState;

    fn add(self, rhs: LoadState) -> LoadState {
        LoadState {
            forces: self.forces + rhs.forces,
            moments: self.moments + rhs.moments,
        }
    }
}
