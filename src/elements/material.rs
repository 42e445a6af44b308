//! Orthotropic ply material properties

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::math::Mat3;

/// Smallest admissible |1 - v12*v21| before the material-axis stiffness is
/// treated as singular
pub const DEGENERACY_TOLERANCE: f64 = 1e-9;

/// Orthotropic properties of a unidirectional ply
///
/// All moduli share one pressure unit. The minor Poisson ratio is always
/// derived from the major one and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Longitudinal (fiber direction) modulus
    #[serde(rename = "E11")]
    pub e11: f64,
    /// Transverse modulus
    #[serde(rename = "E22")]
    pub e22: f64,
    /// In-plane shear modulus
    #[serde(rename = "G12")]
    pub g12: f64,
    /// Major Poisson ratio
    #[serde(rename = "V12")]
    pub v12: f64,
    /// Strength envelope: fiber tension, fiber compression, transverse
    /// tension, transverse compression, shear
    #[serde(rename = "max_stress", default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<[f64; 5]>,
    /// Strain-limit envelope, same component order as `strength`
    #[serde(rename = "max_strain", default, skip_serializing_if = "Option::is_none")]
    pub strain_limits: Option<[f64; 5]>,
}

impl MaterialProperties {
    /// Create a material from its four elastic constants
    pub fn new(e11: f64, e22: f64, g12: f64, v12: f64) -> Self {
        Self {
            e11,
            e22,
            g12,
            v12,
            strength: None,
            strain_limits: None,
        }
    }

    /// Attach a strength envelope
    pub fn with_strength(mut self, strength: [f64; 5]) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Attach a strain-limit envelope
    pub fn with_strain_limits(mut self, strain_limits: [f64; 5]) -> Self {
        self.strain_limits = Some(strain_limits);
        self
    }

    /// Minor Poisson ratio v21 = v12 * E22 / E11
    pub fn v21(&self) -> f64 {
        self.v12 * self.e22 / self.e11
    }

    /// Material-axis reduced stiffness [Q]
    ///
    /// Fails with `DegenerateMaterial` when 1 - v12*v21 vanishes (or is not
    /// finite), since [Q] would then be singular.
    pub fn reduced_stiffness(&self) -> LaminateResult<Mat3> {
        let v21 = self.v21();
        let denom = 1.0 - self.v12 * v21;

        if !denom.is_finite() || denom.abs() < DEGENERACY_TOLERANCE {
            return Err(LaminateError::DegenerateMaterial {
                e11: self.e11,
                e22: self.e22,
                v12: self.v12,
                denominator: denom,
            });
        }

        #[rustfmt::skip]
        let q = Mat3::new(
            self.e11 / denom,            v21 * self.e11 / denom,  0.0,
            self.v12 * self.e22 / denom, self.e22 / denom,        0.0,
            0.0,                         0.0,                     self.g12,
        );
        Ok(q)
    }

    /// Whether the constants fall in the physically plausible range
    /// (positive moduli, 0 < v12 < 1, positive definite [Q]).
    ///
    /// Implausible materials are still accepted by the solver; callers get a
    /// warning in the log instead of an error.
    pub fn is_physically_plausible(&self) -> bool {
        let positive = self.e11 > 0.0 && self.e22 > 0.0 && self.g12 > 0.0;
        let poisson = self.v12 > 0.0 && self.v12 < 1.0;
        let definite = self
            .reduced_stiffness()
            .map(|q| q.cholesky().is_some())
            .unwrap_or(false);
        positive && poisson && definite
    }

    /// T300/5208 graphite/epoxy (psi)
    ///
    /// Preset strengths come from tables that list them in ksi (217.5 here is
    /// stored as 217.5e3). They are rescaled to psi so that strength divided
    /// by the matching modulus gives the tabulated strain limit.
    pub fn t300_5208() -> Self {
        Self::new(26.25e6, 1.49e6, 1.04e6, 0.28)
            .with_strength([217.5e3, 217.5e3, 5.8e3, 35.7e3, 9.86e3])
            .with_strain_limits([0.00829, -0.00829, 0.00389, -0.02396, 0.00948])
    }

    /// B(4)/5505 boron/epoxy (psi, strengths rescaled from ksi)
    pub fn boron_5505() -> Self {
        Self::new(29.59e6, 2.68e6, 0.81e6, 0.23)
            .with_strength([182.7e3, 362.5e3, 8.85e3, 29.3e3, 9.72e3])
            .with_strain_limits([0.00617, -0.01225, 0.00330, -0.01093, 0.0120])
    }

    /// AS/3501 graphite/epoxy (psi, strengths rescaled from ksi)
    pub fn as_3501() -> Self {
        Self::new(20.01e6, 1.3e6, 1.03e6, 0.3)
            .with_strength([209.9e3, 209.9e3, 7.5e3, 29.9e3, 13.5e3])
            .with_strain_limits([0.01049, -0.01049, 0.00577, -0.0230, 0.01311])
    }

    /// Scotchply 1002 glass/epoxy (psi, strengths rescaled from ksi)
    pub fn scotchply_1002() -> Self {
        Self::new(5.6e6, 1.2e6, 0.6e6, 0.26)
            .with_strength([154e3, 88.5e3, 4.5e3, 17.1e3, 10.4e3])
            .with_strain_limits([0.0275, -0.0158, 0.00375, -0.01425, 0.01733])
    }

    /// Kevlar 49 aramid/epoxy (psi, strengths rescaled from ksi)
    pub fn kevlar49() -> Self {
        Self::new(11.02e6, 0.8e6, 0.33e6, 0.34)
            .with_strength([203e3, 34.1e3, 1.74e3, 7.69e3, 4.93e3])
            .with_strain_limits([0.01842, -0.00309, 0.00217, -0.00961, 0.01494])
    }
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self::t300_5208()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_preset_strengths_match_strain_limits() {
        let presets = [
            MaterialProperties::t300_5208(),
            MaterialProperties::boron_5505(),
            MaterialProperties::as_3501(),
            MaterialProperties::scotchply_1002(),
            MaterialProperties::kevlar49(),
        ];
        for mat in presets {
            let strength = mat.strength.unwrap();
            let strain = mat.strain_limits.unwrap();
            let moduli = [mat.e11, mat.e11, mat.e22, mat.e22, mat.g12];
            for i in 0..5 {
                assert_relative_eq!(strength[i] / moduli[i], strain[i].abs(), max_relative = 0.01);
            }
        }
    }

    #[test]
    fn test_minor_poisson_is_derived() {
        let mat = MaterialProperties::t300_5208();
        assert_relative_eq!(mat.v21(), 0.28 * 1.49e6 / 26.25e6, max_relative = 1e-15);
    }

    #[test]
    fn test_reduced_stiffness_symmetric_and_positive_definite() {
        for mat in [
            MaterialProperties::t300_5208(),
            MaterialProperties::boron_5505(),
            MaterialProperties::as_3501(),
            MaterialProperties::scotchply_1002(),
            MaterialProperties::kevlar49(),
        ] {
            let q = mat.reduced_stiffness().unwrap();
            assert_relative_eq!(q[(0, 1)], q[(1, 0)], max_relative = 1e-12);
            assert!(q.cholesky().is_some());
            assert!(mat.is_physically_plausible());
        }
    }

    #[test]
    fn test_reduced_stiffness_values() {
        let mat = MaterialProperties::new(26.25e6, 1.49e6, 1.04e6, 0.28);
        let q = mat.reduced_stiffness().unwrap();
        let denom = 1.0 - 0.28 * mat.v21();

        assert_relative_eq!(q[(0, 0)], 26.25e6 / denom, max_relative = 1e-14);
        assert_relative_eq!(q[(1, 1)], 1.49e6 / denom, max_relative = 1e-14);
        assert_eq!(q[(2, 2)], 1.04e6);
        assert_eq!(q[(0, 2)], 0.0);
        assert_eq!(q[(2, 1)], 0.0);
    }

    #[test]
    fn test_degenerate_material_rejected() {
        // v12 = v21 = 1 makes 1 - v12*v21 vanish
        let mat = MaterialProperties::new(10e6, 10e6, 4e6, 1.0);
        let err = mat.reduced_stiffness().unwrap_err();
        assert!(matches!(err, LaminateError::DegenerateMaterial { .. }));
    }

    #[test]
    fn test_zero_longitudinal_modulus_rejected() {
        let mat = MaterialProperties::new(0.0, 1e6, 1e6, 0.3);
        assert!(matches!(
            mat.reduced_stiffness(),
            Err(LaminateError::DegenerateMaterial { .. })
        ));
    }

    #[test]
    fn test_implausible_material_flagged_not_rejected() {
        let mat = MaterialProperties::new(10e6, 1e6, 0.5e6, 1.5);
        assert!(mat.reduced_stiffness().is_ok());
        assert!(!mat.is_physically_plausible());
    }

    #[test]
    fn test_json_uses_catalog_field_names() {
        let json = serde_json::to_value(MaterialProperties::t300_5208()).unwrap();
        assert_eq!(json["E11"], 26.25e6);
        assert_eq!(json["V12"], 0.28);
        assert!(json["max_stress"].is_array());

        let bare: MaterialProperties =
            serde_json::from_str(r#"{"E11": 1.0e6, "E22": 1.0e5, "G12": 5.0e4, "V12": 0.3}"#)
                .unwrap();
        assert!(bare.strength.is_none());
    }
}
