//! Ply definition and through-thickness geometry

use std::sync::Arc;

use crate::elements::MaterialProperties;
use crate::math::{Mat3, PlyTransform};

/// Through-thickness coordinates of one ply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlyCoordinates {
    /// Upper bound of the ply's z-interval (interface with the next ply)
    pub z_top: f64,
    /// Mid-surface of the ply
    pub z_mid: f64,
}

/// Compute z-coordinates for an ordered list of ply thicknesses.
///
/// The midplane sits at z = 0. Ply 1 is the top ply and starts at
/// z = -h/2; z grows with ply index, so `z_top` is strictly increasing and
/// the last ply ends at z = +h/2.
pub fn ply_coordinates(thicknesses: &[f64]) -> Vec<PlyCoordinates> {
    let total: f64 = thicknesses.iter().sum();
    let mut current_z = -total / 2.0;

    thicknesses
        .iter()
        .map(|&t| {
            let coords = PlyCoordinates {
                z_top: current_z + t,
                z_mid: current_z + t / 2.0,
            };
            current_z += t;
            coords
        })
        .collect()
}

/// A single ply of a laminate
///
/// Geometry and stiffness are computed once when the owning laminate is
/// built and never change afterward.
#[derive(Debug, Clone)]
pub struct Ply {
    /// Fiber angle in degrees, measured from the laminate x-axis
    pub angle: f64,
    /// Ply thickness
    pub thickness: f64,
    /// Shared material definition
    pub material: Arc<MaterialProperties>,

    pub(crate) coords: PlyCoordinates,
    pub(crate) q: Mat3,
    pub(crate) transform: PlyTransform,
}

impl Ply {
    pub(crate) fn new(
        angle: f64,
        thickness: f64,
        material: Arc<MaterialProperties>,
        coords: PlyCoordinates,
        q: Mat3,
    ) -> Self {
        let transform = PlyTransform::new(angle.to_radians(), &q);
        Self {
            angle,
            thickness,
            material,
            coords,
            q,
            transform,
        }
    }

    /// Upper bound of the ply's z-interval
    pub fn z_top(&self) -> f64 {
        self.coords.z_top
    }

    /// Lower bound of the ply's z-interval
    pub fn z_bottom(&self) -> f64 {
        self.coords.z_top - self.thickness
    }

    /// Mid-surface z-coordinate
    pub fn z_mid(&self) -> f64 {
        self.coords.z_mid
    }

    /// Material-axis reduced stiffness [Q]
    pub fn q(&self) -> &Mat3 {
        &self.q
    }

    /// Global-axis reduced stiffness [Qbar]
    pub fn q_bar(&self) -> &Mat3 {
        &self.transform.q_bar
    }

    /// Stress transformation [T]
    pub fn stress_transform(&self) -> &Mat3 {
        &self.transform.t
    }

    /// Strain transformation [Te]
    pub fn strain_transform(&self) -> &Mat3 {
        &self.transform.t_e
    }
}
