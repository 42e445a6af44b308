//! Rocket structural components and their approximate flight loads
//!
//! Each component kind turns a set of [`FlightConditions`] into membrane and
//! bending resultants for its skin laminate. The estimates are first-order
//! engineering approximations, not an aerodynamic solution.

mod geometry;

pub use geometry::{AirframeGeometry, FinGeometry, NoseConeGeometry, NoseConeShape};

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::analysis::SolverOptions;
use crate::catalog::MaterialCatalog;
use crate::error::{LaminateError, LaminateResult};
use crate::laminate::Laminate;
use crate::loads::LoadState;
use crate::results::LaminateAnalysis;

/// Square inches per square foot
const SQ_IN_PER_SQ_FT: f64 = 144.0;

/// Flight state a component is loaded by
///
/// Velocity in ft/s, density in slug/ft^3, angle of attack in degrees.
/// Axial load (lb), bending moment (lb-in) and internal pressure (psi) are
/// only used by the airframe and default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightConditions {
    pub velocity: f64,
    pub density: f64,
    pub angle_of_attack: f64,
    #[serde(default)]
    pub axial_load: f64,
    #[serde(default)]
    pub bending_moment: f64,
    #[serde(default)]
    pub internal_pressure: f64,
}

impl FlightConditions {
    pub fn new(velocity: f64, density: f64, angle_of_attack: f64) -> Self {
        Self {
            velocity,
            density,
            angle_of_attack,
            ..Self::default()
        }
    }

    pub fn with_axial_load(mut self, axial_load: f64) -> Self {
        self.axial_load = axial_load;
        self
    }

    pub fn with_bending_moment(mut self, bending_moment: f64) -> Self {
        self.bending_moment = bending_moment;
        self
    }

    pub fn with_internal_pressure(mut self, internal_pressure: f64) -> Self {
        self.internal_pressure = internal_pressure;
        self
    }

    /// Dynamic pressure in psi
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * self.density * self.velocity.powi(2) / SQ_IN_PER_SQ_FT
    }

    fn alpha(&self) -> f64 {
        self.angle_of_attack.to_radians()
    }

    fn validate(&self) -> LaminateResult<()> {
        let fields = [
            ("velocity", self.velocity),
            ("density", self.density),
            ("angle of attack", self.angle_of_attack),
            ("axial load", self.axial_load),
            ("bending moment", self.bending_moment),
            ("internal pressure", self.internal_pressure),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, v)) => Err(LaminateError::InvalidInput(format!(
                "flight condition {name} must be finite, got {v}"
            ))),
            None => Ok(()),
        }
    }
}

/// Maps flight conditions to laminate load resultants
pub trait LoadEstimator {
    fn estimate_loads(&self, conditions: &FlightConditions) -> LoadState;
}

impl LoadEstimator for NoseConeGeometry {
    fn estimate_loads(&self, conditions: &FlightConditions) -> LoadState {
        let q = conditions.dynamic_pressure();
        let alpha = conditions.alpha();
        let normal = q * alpha.sin();
        let axial = q * alpha.cos();

        LoadState::new([axial, normal, 0.0], [0.0, normal * self.base_diameter / 4.0, 0.0])
    }
}

impl LoadEstimator for AirframeGeometry {
    fn estimate_loads(&self, conditions: &FlightConditions) -> LoadState {
        let r = self.radius();
        let axial = conditions.axial_load / (PI * self.diameter);
        let bending = conditions.bending_moment * r / (PI * r.powi(3));
        let hoop = conditions.internal_pressure * r;

        LoadState::in_plane(axial + bending, hoop, 0.0)
    }
}

impl LoadEstimator for FinGeometry {
    fn estimate_loads(&self, conditions: &FlightConditions) -> LoadState {
        let q = conditions.dynamic_pressure();
        let alpha = conditions.alpha();
        let normal_pressure = q * alpha.sin() * alpha.cos();

        LoadState::new(
            [0.0, 0.0, normal_pressure / 2.0],
            [0.0, normal_pressure * self.span / 2.0, 0.0],
        )
    }
}

/// Component kind with its geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component_type", content = "geometry", rename_all = "lowercase")]
pub enum ComponentKind {
    #[serde(rename = "nosecone")]
    NoseCone(NoseConeGeometry),
    Airframe(AirframeGeometry),
    Fin(FinGeometry),
}

impl ComponentKind {
    /// Tag used in catalog files
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentKind::NoseCone(_) => "nosecone",
            ComponentKind::Airframe(_) => "airframe",
            ComponentKind::Fin(_) => "fin",
        }
    }

    pub fn validate(&self) -> LaminateResult<()> {
        match self {
            ComponentKind::NoseCone(g) => g.validate(),
            ComponentKind::Airframe(g) => g.validate(),
            ComponentKind::Fin(g) => g.validate(),
        }
    }
}

impl LoadEstimator for ComponentKind {
    fn estimate_loads(&self, conditions: &FlightConditions) -> LoadState {
        match self {
            ComponentKind::NoseCone(g) => g.estimate_loads(conditions),
            ComponentKind::Airframe(g) => g.estimate_loads(conditions),
            ComponentKind::Fin(g) => g.estimate_loads(conditions),
        }
    }
}

/// Ply thickness used when a catalog entry omits it
pub const DEFAULT_PLY_THICKNESS: f64 = 0.005;

/// A named component with its skin layup
///
/// Serialized flat: `component_type` and `geometry` sit beside the layup
/// fields, and `ply_thickness` is always written as a per-ply list. On read
/// `ply_thickness` may also be a single number shared by every ply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ComponentRecord")]
pub struct Component {
    pub name: String,
    #[serde(flatten)]
    pub kind: ComponentKind,
    pub layup_angles: Vec<f64>,
    #[serde(rename = "ply_thickness")]
    pub ply_thicknesses: Vec<f64>,
    pub material_name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlyThickness {
    Uniform(f64),
    PerPly(Vec<f64>),
}

impl Default for PlyThickness {
    fn default() -> Self {
        PlyThickness::Uniform(DEFAULT_PLY_THICKNESS)
    }
}

/// Catalog entry as read from disk
#[derive(Deserialize)]
struct ComponentRecord {
    #[serde(default)]
    name: String,
    #[serde(flatten)]
    kind: ComponentKind,
    layup_angles: Vec<f64>,
    #[serde(default)]
    ply_thickness: PlyThickness,
    material_name: String,
}

impl From<ComponentRecord> for Component {
    fn from(record: ComponentRecord) -> Self {
        let ply_thicknesses = match record.ply_thickness {
            PlyThickness::Uniform(t) => vec![t; record.layup_angles.len()],
            PlyThickness::PerPly(list) => list,
        };
        Self {
            name: record.name,
            kind: record.kind,
            layup_angles: record.layup_angles,
            ply_thicknesses,
            material_name: record.material_name,
        }
    }
}

impl Component {
    /// Component whose plies all share one thickness
    pub fn new(
        name: &str,
        kind: ComponentKind,
        layup_angles: &[f64],
        ply_thickness: f64,
        material_name: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            layup_angles: layup_angles.to_vec(),
            ply_thicknesses: vec![ply_thickness; layup_angles.len()],
            material_name: material_name.to_string(),
        }
    }

    /// Replace the per-ply thicknesses
    pub fn with_ply_thicknesses(mut self, thicknesses: &[f64]) -> Self {
        self.ply_thicknesses = thicknesses.to_vec();
        self
    }

    /// Build the skin laminate, resolving the material against a catalog
    pub fn build_laminate(&self, materials: &MaterialCatalog) -> LaminateResult<Laminate> {
        let material = materials
            .get(&self.material_name)
            .ok_or_else(|| LaminateError::MaterialNotFound(self.material_name.clone()))?;
        let shared = vec![material; self.layup_angles.len()];
        Laminate::new(&self.layup_angles, &self.ply_thicknesses, &shared)
    }

    /// Loads on the skin for a flight state
    pub fn loads(&self, conditions: &FlightConditions) -> LaminateResult<LoadState> {
        self.kind.validate()?;
        conditions.validate()?;
        Ok(self.kind.estimate_loads(conditions))
    }

    /// Estimate loads, then solve the skin laminate under them
    pub fn analyze(
        &self,
        conditions: &FlightConditions,
        materials: &MaterialCatalog,
        options: &SolverOptions,
    ) -> LaminateResult<ComponentAnalysis> {
        let loads = self.loads(conditions)?;
        let laminate = self.build_laminate(materials)?;
        log::debug!(
            "Analyzing {} '{}' under N = {:?}, M = {:?}",
            self.kind.type_name(),
            self.name,
            loads.forces.as_slice(),
            loads.moments.as_slice()
        );
        let analysis = laminate.analyze(&loads, options)?;

        Ok(ComponentAnalysis {
            component: self.name.clone(),
            conditions: conditions.clone(),
            analysis,
        })
    }
}

/// Outcome of analyzing one component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentAnalysis {
    pub component: String,
    pub conditions: FlightConditions,
    /// Includes the estimated loads as `analysis.load`
    pub analysis: LaminateAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::T300_5208;
    use approx::assert_relative_eq;

    const QUASI_ISO: [f64; 8] = [0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0];

    fn conditions() -> FlightConditions {
        FlightConditions::new(1000.0, 0.002377, 5.0)
    }

    #[test]
    fn test_dynamic_pressure_in_psi() {
        let q = conditions().dynamic_pressure();
        assert_relative_eq!(q, 0.5 * 0.002377 * 1.0e6 / 144.0, max_relative = 1e-12);
    }

    #[test]
    fn test_nose_cone_loads() {
        let nose = NoseConeGeometry::new(NoseConeShape::Ogive, 24.0, 6.0).unwrap();
        let c = conditions();
        let q = c.dynamic_pressure();
        let a = 5.0_f64.to_radians();
        let loads = nose.estimate_loads(&c);

        assert_relative_eq!(loads.forces[0], q * a.cos(), max_relative = 1e-12);
        assert_relative_eq!(loads.forces[1], q * a.sin(), max_relative = 1e-12);
        assert_eq!(loads.forces[2], 0.0);
        assert_relative_eq!(loads.moments[1], q * a.sin() * 6.0 / 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_airframe_loads() {
        let airframe = AirframeGeometry::new(48.0, 6.0).unwrap();
        let c = conditions()
            .with_axial_load(1000.0)
            .with_bending_moment(500.0)
            .with_internal_pressure(10.0);
        let loads = airframe.estimate_loads(&c);

        let expected_nx = 1000.0 / (PI * 6.0) + 500.0 * 3.0 / (PI * 27.0);
        assert_relative_eq!(loads.forces[0], expected_nx, max_relative = 1e-12);
        assert_relative_eq!(loads.forces[1], 30.0, max_relative = 1e-12);
        assert_eq!(loads.moments, LoadState::default().moments);
    }

    #[test]
    fn test_fin_loads_vanish_at_zero_angle_of_attack() {
        let fin = FinGeometry::new(12.0, 6.0, 6.0, 30.0).unwrap();
        let loads = fin.estimate_loads(&FlightConditions::new(1000.0, 0.002377, 0.0));
        assert_eq!(loads, LoadState::default());
    }

    #[test]
    fn test_component_kind_json_layout() {
        let kind = ComponentKind::NoseCone(
            NoseConeGeometry::new(NoseConeShape::Ogive, 24.0, 6.0).unwrap(),
        );
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["component_type"], "nosecone");
        assert_eq!(value["geometry"]["shape"], "ogive");

        let back: ComponentKind = serde_json::from_value(value).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_component_reads_flat_layout_with_scalar_thickness() {
        let text = r#"{
            "component_type": "fin",
            "geometry": { "root_chord": 12, "tip_chord": 6, "span": 6, "sweep": 30 },
            "layup_angles": [0, 90, 90, 0],
            "ply_thickness": 0.005,
            "material_name": "T300/5208_graphite_epoxy"
        }"#;
        let fin: Component = serde_json::from_str(text).unwrap();

        assert_eq!(fin.name, "");
        assert_eq!(fin.kind.type_name(), "fin");
        assert_eq!(fin.ply_thicknesses, vec![0.005; 4]);

        let value = serde_json::to_value(&fin).unwrap();
        assert_eq!(value["component_type"], "fin");
        assert_eq!(value["geometry"]["span"], 6.0);
        assert_eq!(value["ply_thickness"].as_array().unwrap().len(), 4);
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_component_thickness_defaults_when_omitted() {
        let text = r#"{
            "component_type": "airframe",
            "geometry": { "length": 48.0, "diameter": 6.0 },
            "layup_angles": [0.0, 90.0],
            "material_name": "T300/5208_graphite_epoxy"
        }"#;
        let tube: Component = serde_json::from_str(text).unwrap();
        assert_eq!(tube.ply_thicknesses, vec![DEFAULT_PLY_THICKNESS; 2]);
    }

    #[test]
    fn test_per_ply_thicknesses_reach_laminate() {
        let tube = Component::new(
            "tube",
            ComponentKind::Airframe(AirframeGeometry::new(48.0, 6.0).unwrap()),
            &[0.0, 90.0, 0.0],
            0.005,
            T300_5208,
        )
        .with_ply_thicknesses(&[0.004, 0.010, 0.004]);

        let lam = tube.build_laminate(&MaterialCatalog::with_defaults()).unwrap();
        assert_relative_eq!(lam.total_thickness(), 0.018, max_relative = 1e-12);
        assert_eq!(lam.plies()[1].thickness, 0.010);
    }

    #[test]
    fn test_component_analysis() {
        let materials = MaterialCatalog::with_defaults();
        let fin = Component::new(
            "fin",
            ComponentKind::Fin(FinGeometry::new(12.0, 6.0, 6.0, 30.0).unwrap()),
            &QUASI_ISO,
            0.005,
            T300_5208,
        );

        let result = fin
            .analyze(&conditions(), &materials, &SolverOptions::default())
            .unwrap();
        assert_eq!(result.component, "fin");
        assert_eq!(result.analysis.plies.len(), 8);
        assert!(result.analysis.load.moments[1] > 0.0);
    }

    #[test]
    fn test_unknown_material() {
        let airframe = Component::new(
            "tube",
            ComponentKind::Airframe(AirframeGeometry::new(48.0, 6.0).unwrap()),
            &QUASI_ISO,
            0.005,
            "balsa",
        );
        let err = airframe
            .analyze(&conditions(), &MaterialCatalog::with_defaults(), &SolverOptions::default())
            .unwrap_err();
        assert!(matches!(err, LaminateError::MaterialNotFound(name) if name == "balsa"));
    }

    #[test]
    fn test_invalid_geometry_from_data_is_caught() {
        let airframe = Component::new(
            "tube",
            ComponentKind::Airframe(AirframeGeometry {
                length: 48.0,
                diameter: 0.0,
            }),
            &QUASI_ISO,
            0.005,
            T300_5208,
        );
        assert!(matches!(
            airframe.loads(&conditions()),
            Err(LaminateError::InvalidInput(_))
        ));
    }
}
