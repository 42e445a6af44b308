//! Laminate Solver - Classical Lamination Theory for composite layups
//!
//! This library computes the mechanical response of layered fiber-reinforced
//! laminates, supporting:
//! - Reduced and transformed ply stiffness for orthotropic materials
//! - ABD stiffness assembly with membrane/bending coupling
//! - Midplane strain and curvature response to force and moment resultants
//! - Per-ply strains and stresses in global and material axes
//! - Effective engineering constants and stacking-sequence statistics
//! - Material and component catalogs with first-order flight load estimates
//!
//! ## Example
//! ```rust
//! use laminate_solver::prelude::*;
//!
//! let materials = MaterialCatalog::with_defaults();
//! let layup = LayupSpec::uniform(&[0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0], 0.005, T300_5208);
//! let laminate = Laminate::from_layup(&layup, &materials).unwrap();
//!
//! let load = LoadState::in_plane(1000.0, 0.0, 250.0);
//! let analysis = laminate.analyze(&load, &SolverOptions::default()).unwrap();
//!
//! let top = &analysis.plies[0];
//! println!("Ply 1 local stress: {:?}", top.local_stress);
//! ```

pub mod analysis;
pub mod batch;
pub mod catalog;
pub mod components;
pub mod elements;
pub mod error;
pub mod laminate;
pub mod loads;
pub mod math;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{analyze_layup, SolverOptions};
    pub use crate::batch::{run_sweep, solve_load_cases, SweepCase, SweepResult};
    pub use crate::catalog::{
        CatalogLoad, CatalogWarning, ComponentCatalog, MaterialCatalog, T300_5208,
    };
    pub use crate::components::{
        AirframeGeometry, Component, ComponentAnalysis, ComponentKind, FinGeometry,
        FlightConditions, LoadEstimator, NoseConeGeometry, NoseConeShape,
    };
    pub use crate::elements::{MaterialProperties, Ply};
    pub use crate::error::{LaminateError, LaminateResult};
    pub use crate::laminate::{Laminate, LayupSpec, PlySpec};
    pub use crate::loads::LoadState;
    pub use crate::results::{
        EngineeringConstants, LaminateAnalysis, LayupDistribution, PlyMechanicalState,
        ResponseState,
    };
}
