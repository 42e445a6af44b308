//! Laminate - ordered ply stack with its coupled stiffness operator

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::analysis::{layup, SolverOptions};
use crate::catalog::MaterialCatalog;
use crate::elements::{ply_coordinates, MaterialProperties, Ply};
use crate::error::{LaminateError, LaminateResult};
use crate::loads::LoadState;
use crate::math::{self, Mat3, Mat6, StiffnessMatrices};
use crate::results::{
    EngineeringConstants, LaminateAnalysis, LayupDistribution, PlyMechanicalState, ResponseState,
};

/// Relative tolerance on A00*A11 below which the engineering constants are
/// undefined
const ENGINEERING_CONSTANT_TOLERANCE: f64 = 1e-12;

/// One ply of a layup specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlySpec {
    /// Fiber angle in degrees
    pub angle: f64,
    /// Ply thickness
    pub thickness: f64,
    /// Material name, resolved against a catalog
    pub material: String,
}

/// Ordered stacking sequence referencing catalog materials by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayupSpec {
    pub plies: Vec<PlySpec>,
}

impl LayupSpec {
    /// Same material and thickness for every angle
    pub fn uniform(angles: &[f64], thickness: f64, material: &str) -> Self {
        Self {
            plies: angles
                .iter()
                .map(|&angle| PlySpec {
                    angle,
                    thickness,
                    material: material.to_string(),
                })
                .collect(),
        }
    }
}

/// A laminate built from an ordered ply stack
///
/// z-coordinates, per-ply transforms and the ABD matrix are computed once in
/// the constructor. No method mutates them, so a `Laminate` can be shared
/// across threads and queried concurrently.
#[derive(Debug, Clone)]
pub struct Laminate {
    plies: Vec<Ply>,
    total_thickness: f64,
    stiffness: StiffnessMatrices,
    condition: f64,
}

impl Laminate {
    /// Build a laminate from parallel angle (degrees), thickness and
    /// material lists. Ply 1 is the first entry.
    pub fn new(
        angles: &[f64],
        thicknesses: &[f64],
        materials: &[Arc<MaterialProperties>],
    ) -> LaminateResult<Self> {
        validate_layup(angles, thicknesses, materials)?;

        // Material checks run before any per-ply matrix work; plies sharing
        // an Arc share one [Q].
        let mut distinct: Vec<(&Arc<MaterialProperties>, Mat3)> = Vec::new();
        let mut q_per_ply = Vec::with_capacity(materials.len());
        for material in materials {
            let q = match distinct.iter().find(|(m, _)| Arc::ptr_eq(m, material)) {
                Some((_, q)) => *q,
                None => {
                    let q = material.reduced_stiffness()?;
                    if !material.is_physically_plausible() {
                        log::warn!(
                            "Material E11={}, E22={}, G12={}, v12={} is outside the physically plausible range",
                            material.e11, material.e22, material.g12, material.v12
                        );
                    }
                    distinct.push((material, q));
                    q
                }
            };
            q_per_ply.push(q);
        }

        let coords = ply_coordinates(thicknesses);
        let plies: Vec<Ply> = angles
            .iter()
            .zip(thicknesses)
            .zip(materials)
            .zip(coords)
            .zip(q_per_ply)
            .map(|((((&angle, &t), material), c), q)| Ply::new(angle, t, Arc::clone(material), c, q))
            .collect();

        let total_thickness = thicknesses.iter().sum();
        let stiffness =
            math::assemble_abd(plies.iter().map(|p| (p.q_bar(), p.thickness, p.z_top())));
        let condition = math::condition_estimate(&stiffness.abd);

        log::debug!(
            "Built laminate: {} plies, h = {}, ABD condition estimate = {:e}",
            plies.len(),
            total_thickness,
            condition
        );

        Ok(Self {
            plies,
            total_thickness,
            stiffness,
            condition,
        })
    }

    /// Build a laminate where every ply shares one thickness and material
    pub fn uniform(
        angles: &[f64],
        thickness: f64,
        material: Arc<MaterialProperties>,
    ) -> LaminateResult<Self> {
        let thicknesses = vec![thickness; angles.len()];
        let materials = vec![material; angles.len()];
        Self::new(angles, &thicknesses, &materials)
    }

    /// Build a laminate from a layup specification, resolving material names
    /// against a catalog
    pub fn from_layup(layup: &LayupSpec, catalog: &MaterialCatalog) -> LaminateResult<Self> {
        let materials = layup
            .plies
            .iter()
            .map(|p| {
                catalog
                    .get(&p.material)
                    .ok_or_else(|| LaminateError::MaterialNotFound(p.material.clone()))
            })
            .collect::<LaminateResult<Vec<_>>>()?;
        let angles: Vec<f64> = layup.plies.iter().map(|p| p.angle).collect();
        let thicknesses: Vec<f64> = layup.plies.iter().map(|p| p.thickness).collect();

        Self::new(&angles, &thicknesses, &materials)
    }

    // ========================
    // Accessors
    // ========================

    /// Plies in stacking order
    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    /// Number of plies
    pub fn ply_count(&self) -> usize {
        self.plies.len()
    }

    /// Ply by 1-based number
    pub fn ply(&self, ply_number: usize) -> LaminateResult<&Ply> {
        ply_number
            .checked_sub(1)
            .and_then(|i| self.plies.get(i))
            .ok_or(LaminateError::PlyIndexOutOfRange {
                ply: ply_number,
                count: self.plies.len(),
            })
    }

    /// Fiber angles in stacking order
    pub fn angles(&self) -> Vec<f64> {
        self.plies.iter().map(|p| p.angle).collect()
    }

    /// Sum of ply thicknesses
    pub fn total_thickness(&self) -> f64 {
        self.total_thickness
    }

    /// Extensional stiffness [A]
    pub fn a(&self) -> &Mat3 {
        &self.stiffness.a
    }

    /// Coupling stiffness [B]
    pub fn b(&self) -> &Mat3 {
        &self.stiffness.b
    }

    /// Bending stiffness [D]
    pub fn d(&self) -> &Mat3 {
        &self.stiffness.d
    }

    /// Assembled 6x6 ABD matrix
    pub fn abd(&self) -> &Mat6 {
        &self.stiffness.abd
    }

    /// Condition estimate of the diagonally scaled ABD matrix
    pub fn condition_estimate(&self) -> f64 {
        self.condition
    }

    // ========================
    // Response
    // ========================

    /// Solve for midplane strains and curvatures with default options
    pub fn solve(&self, load: &LoadState) -> LaminateResult<ResponseState> {
        self.solve_with(load, &SolverOptions::default())
    }

    /// Solve `ABD * x = load` by LU decomposition
    pub fn solve_with(
        &self,
        load: &LoadState,
        options: &SolverOptions,
    ) -> LaminateResult<ResponseState> {
        if !load.is_finite() {
            return Err(LaminateError::InvalidInput(format!(
                "load state contains non-finite components: {:?}",
                load.as_vector().as_slice()
            )));
        }

        let limit = options.condition_limit;
        if !(self.condition <= limit) {
            return Err(LaminateError::SingularLaminate {
                condition: self.condition,
                limit,
            });
        }

        let x = math::solve_linear_system(&self.stiffness.abd, &load.as_vector())
            .filter(|x| x.iter().all(|v| v.is_finite()))
            .ok_or(LaminateError::SingularLaminate {
                condition: f64::INFINITY,
                limit,
            })?;

        let response = ResponseState::from_vector(&x);
        if options.log {
            log::info!(
                "Solved laminate ({} plies): eps0 = {:?}, kappa = {:?}",
                self.plies.len(),
                response.midplane_strain.as_slice(),
                response.curvature.as_slice()
            );
        }
        Ok(response)
    }

    /// Load resultants implied by a response: ABD * x
    pub fn implied_load(&self, response: &ResponseState) -> LoadState {
        LoadState::from_vector(&(self.stiffness.abd * response.as_vector()))
    }

    /// Global and material-axis strain/stress at the mid-surface of a ply
    /// (1-based)
    pub fn ply_state(
        &self,
        response: &ResponseState,
        ply_number: usize,
    ) -> LaminateResult<PlyMechanicalState> {
        let ply = self.ply(ply_number)?;

        let global_strain = response.strain_at(ply.z_mid());
        let global_stress = ply.q_bar() * global_strain;
        let local_strain = ply.strain_transform() * global_strain;
        let local_stress = ply.stress_transform() * global_stress;

        Ok(PlyMechanicalState {
            ply: ply_number,
            angle: ply.angle,
            z_mid: ply.z_mid(),
            global_strain,
            global_stress,
            local_strain,
            local_stress,
        })
    }

    /// States for every ply in stacking order
    pub fn ply_states(&self, response: &ResponseState) -> LaminateResult<Vec<PlyMechanicalState>> {
        (1..=self.plies.len())
            .map(|n| self.ply_state(response, n))
            .collect()
    }

    // ========================
    // Summaries
    // ========================

    /// Homogenized membrane engineering constants from [A]
    pub fn engineering_constants(&self) -> LaminateResult<EngineeringConstants> {
        let a = &self.stiffness.a;
        let h = self.total_thickness;
        let (a00, a01, a11, a22) = (a[(0, 0)], a[(0, 1)], a[(1, 1)], a[(2, 2)]);

        let product = a00 * a11;
        let scale = a.amax();
        if !product.is_finite() || product.abs() <= ENGINEERING_CONSTANT_TOLERANCE * scale * scale {
            return Err(LaminateError::DegenerateLaminate(format!(
                "A00*A11 = {product:e} is too small relative to max|A| = {scale:e}"
            )));
        }

        let reduction = 1.0 - a01.powi(2) / product;
        Ok(EngineeringConstants {
            ex: (a00 / h) * reduction,
            ey: (a11 / h) * reduction,
            gxy: a22 / h,
            nu_xy: a01 / a11,
            nu_yx: a01 / a00,
        })
    }

    /// Angle distribution of the stacking sequence
    pub fn layup_distribution(&self) -> LayupDistribution {
        layup::summarize(&self.angles())
    }

    /// Solve one load state and collect every derived quantity
    pub fn analyze(
        &self,
        load: &LoadState,
        options: &SolverOptions,
    ) -> LaminateResult<LaminateAnalysis> {
        let response = self.solve_with(load, options)?;
        Ok(LaminateAnalysis {
            load: *load,
            plies: self.ply_states(&response)?,
            engineering_constants: self.engineering_constants()?,
            layup: self.layup_distribution(),
            response,
        })
    }
}

/// Shape checks that must pass before any matrix is built
fn validate_layup(
    angles: &[f64],
    thicknesses: &[f64],
    materials: &[Arc<MaterialProperties>],
) -> LaminateResult<()> {
    if angles.is_empty() {
        return Err(LaminateError::InvalidLayup(
            "laminate must contain at least one ply".to_string(),
        ));
    }
    if angles.len() != thicknesses.len() || angles.len() != materials.len() {
        return Err(LaminateError::InvalidLayup(format!(
            "list lengths differ: {} angles, {} thicknesses, {} materials",
            angles.len(),
            thicknesses.len(),
            materials.len()
        )));
    }
    for (i, (&angle, &t)) in angles.iter().zip(thicknesses).enumerate() {
        if !angle.is_finite() {
            return Err(LaminateError::InvalidLayup(format!(
                "ply {} has non-finite angle {angle}",
                i + 1
            )));
        }
        if !(t > 0.0) || !t.is_finite() {
            return Err(LaminateError::InvalidLayup(format!(
                "ply {} has non-positive thickness {t}",
                i + 1
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::is_symmetric;
    use approx::assert_relative_eq;

    fn t300() -> Arc<MaterialProperties> {
        Arc::new(MaterialProperties::t300_5208())
    }

    #[test]
    fn test_single_zero_ply_uniaxial_strain() {
        let mat = t300();
        let t = 0.005;
        let lam = Laminate::uniform(&[0.0], t, mat.clone()).unwrap();

        let nx = 100.0;
        let r = lam.solve(&LoadState::in_plane(nx, 0.0, 0.0)).unwrap();

        assert_relative_eq!(r.midplane_strain[0], nx / (mat.e11 * t), max_relative = 1e-9);
        assert_relative_eq!(
            r.midplane_strain[1],
            -mat.v12 * nx / (mat.e11 * t),
            max_relative = 1e-9
        );
        assert!(r.curvature.amax() < 1e-9);
    }

    #[test]
    fn test_single_ply_engineering_constants_recover_material() {
        let mat = t300();
        let lam = Laminate::uniform(&[0.0], 0.005, mat.clone()).unwrap();
        let ec = lam.engineering_constants().unwrap();

        assert_relative_eq!(ec.ex, mat.e11, max_relative = 1e-10);
        assert_relative_eq!(ec.ey, mat.e22, max_relative = 1e-10);
        assert_relative_eq!(ec.gxy, mat.g12, max_relative = 1e-10);
        assert_relative_eq!(ec.nu_xy, mat.v12, max_relative = 1e-10);
        assert_relative_eq!(ec.nu_yx, mat.v21(), max_relative = 1e-10);
    }

    #[test]
    fn test_ply_state_fiber_stress() {
        let t = 0.005;
        let lam = Laminate::uniform(&[0.0], t, t300()).unwrap();
        let nx = 250.0;
        let r = lam.solve(&LoadState::in_plane(nx, 0.0, 0.0)).unwrap();
        let s = lam.ply_state(&r, 1).unwrap();

        assert_relative_eq!(s.global_stress[0], nx / t, max_relative = 1e-9);
        assert_relative_eq!(s.local_stress[0], nx / t, max_relative = 1e-9);
        assert!(s.global_stress[1].abs() < 1e-6 * nx / t);
    }

    #[test]
    fn test_zero_curvature_at_midplane_gives_midplane_strain() {
        let lam = Laminate::uniform(&[30.0], 0.005, t300()).unwrap();
        assert_eq!(lam.plies()[0].z_mid(), 0.0);

        let r = ResponseState::new([1e-3, 2e-4, -3e-4], [0.0, 0.0, 0.0]);
        let s = lam.ply_state(&r, 1).unwrap();
        assert_eq!(s.global_strain, r.midplane_strain);

        // Curvature has no effect at z = 0 either
        let bent = ResponseState::new([1e-3, 2e-4, -3e-4], [0.5, -0.2, 0.1]);
        assert_eq!(lam.ply_state(&bent, 1).unwrap().global_strain, bent.midplane_strain);
    }

    #[test]
    fn test_ply_index_bounds() {
        let lam = Laminate::uniform(&[0.0, 90.0, 0.0], 0.005, t300()).unwrap();
        let r = ResponseState::new([1e-4, 0.0, 0.0], [0.0; 3]);

        assert!(lam.ply_state(&r, 1).is_ok());
        assert!(lam.ply_state(&r, 3).is_ok());
        assert!(matches!(
            lam.ply_state(&r, 0),
            Err(LaminateError::PlyIndexOutOfRange { ply: 0, count: 3 })
        ));
        assert!(matches!(
            lam.ply_state(&r, 4),
            Err(LaminateError::PlyIndexOutOfRange { ply: 4, count: 3 })
        ));
    }

    #[test]
    fn test_angle_ply_q_bar_and_abd_symmetric() {
        let lam = Laminate::uniform(&[15.0, -40.0, 75.0, 90.0, 0.0], 0.005, t300()).unwrap();
        for ply in lam.plies() {
            assert!(is_symmetric(ply.q_bar(), 1e-10));
        }
        assert!(is_symmetric(lam.a(), 1e-10));
        assert!(is_symmetric(lam.b(), 1e-10));
        assert!(is_symmetric(lam.d(), 1e-10));
        assert_relative_eq!(*lam.abd(), lam.abd().transpose(), max_relative = 1e-10, epsilon = 1e-6);
    }

    #[test]
    fn test_unsymmetric_stack_has_coupling() {
        let lam = Laminate::uniform(&[0.0, 90.0], 0.005, t300()).unwrap();
        assert!(lam.b()[(0, 0)].abs() > 1e-3 * lam.a()[(0, 0)] * 0.01);
    }

    #[test]
    fn test_mismatched_lists_rejected() {
        let mat = t300();
        let err = Laminate::new(&[0.0, 90.0], &[0.005], &[mat.clone(), mat]).unwrap_err();
        assert!(matches!(err, LaminateError::InvalidLayup(_)));
    }

    #[test]
    fn test_non_positive_thickness_rejected() {
        let mat = t300();
        for t in [0.0, -0.005, f64::NAN] {
            let err = Laminate::new(&[0.0, 90.0], &[0.005, t], &[mat.clone(), mat.clone()])
                .unwrap_err();
            assert!(matches!(err, LaminateError::InvalidLayup(ref msg) if msg.contains("ply 2")));
        }
    }

    #[test]
    fn test_degenerate_material_fails_construction() {
        let bad = Arc::new(MaterialProperties::new(10e6, 10e6, 4e6, 1.0));
        let err = Laminate::uniform(&[0.0, 90.0], 0.005, bad).unwrap_err();
        assert!(matches!(err, LaminateError::DegenerateMaterial { .. }));
    }

    #[test]
    fn test_zero_shear_modulus_is_singular() {
        let no_shear = Arc::new(MaterialProperties::new(26.25e6, 1.49e6, 0.0, 0.28));
        let lam = Laminate::uniform(&[0.0, 0.0, 0.0], 0.005, no_shear).unwrap();

        let err = lam.solve(&LoadState::in_plane(100.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, LaminateError::SingularLaminate { .. }));
    }

    #[test]
    fn test_condition_limit_is_configurable() {
        let lam = Laminate::uniform(&[0.0, 45.0, -45.0, 90.0], 0.005, t300()).unwrap();
        let load = LoadState::in_plane(100.0, 0.0, 0.0);

        assert!(lam.solve(&load).is_ok());
        let strict = SolverOptions::default().with_condition_limit(1.0);
        assert!(matches!(
            lam.solve_with(&load, &strict),
            Err(LaminateError::SingularLaminate { .. })
        ));
    }

    #[test]
    fn test_zero_transverse_modulus_is_degenerate_for_constants() {
        let no_transverse = Arc::new(MaterialProperties::new(26.25e6, 0.0, 1.04e6, 0.28));
        let lam = Laminate::uniform(&[0.0, 0.0], 0.005, no_transverse).unwrap();
        assert!(matches!(
            lam.engineering_constants(),
            Err(LaminateError::DegenerateLaminate(_))
        ));
    }

    #[test]
    fn test_shared_material_is_not_copied() {
        let mat = t300();
        let lam = Laminate::uniform(&[0.0, 45.0, 90.0], 0.005, mat.clone()).unwrap();
        for ply in lam.plies() {
            assert!(Arc::ptr_eq(&ply.material, &mat));
        }
    }
}
