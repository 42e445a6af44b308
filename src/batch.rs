//! Batched solves over many load cases or many layups
//!
//! Every item is solved independently and reports its own result, so one
//! singular layup does not abort the rest of a sweep. Items are processed in
//! parallel via rayon when the `parallel` feature is enabled; results come
//! back in input order either way.

use serde::{Deserialize, Serialize};

use crate::analysis::SolverOptions;
use crate::catalog::MaterialCatalog;
use crate::error::LaminateResult;
use crate::laminate::{Laminate, LayupSpec};
use crate::loads::LoadState;
use crate::results::{LaminateAnalysis, ResponseState};

/// One layup/load pair in a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepCase {
    pub name: String,
    pub layup: LayupSpec,
    pub load: LoadState,
}

/// Outcome of one sweep case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub name: String,
    pub analysis: LaminateAnalysis,
}

/// Solve one laminate under several load states.
///
/// The laminate is immutable, so cases share it without copying.
pub fn solve_load_cases(
    laminate: &Laminate,
    loads: &[LoadState],
    options: &SolverOptions,
) -> Vec<LaminateResult<ResponseState>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        loads
            .par_iter()
            .map(|load| laminate.solve_with(load, options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        loads
            .iter()
            .map(|load| laminate.solve_with(load, options))
            .collect()
    }
}

/// Build and analyze each case against a shared material catalog
pub fn run_sweep(
    cases: &[SweepCase],
    materials: &MaterialCatalog,
    options: &SolverOptions,
) -> Vec<LaminateResult<SweepResult>> {
    log::debug!("Running sweep of {} cases", cases.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        cases
            .par_iter()
            .map(|case| run_case(case, materials, options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        cases
            .iter()
            .map(|case| run_case(case, materials, options))
            .collect()
    }
}

fn run_case(
    case: &SweepCase,
    materials: &MaterialCatalog,
    options: &SolverOptions,
) -> LaminateResult<SweepResult> {
    let laminate = Laminate::from_layup(&case.layup, materials)?;
    let analysis = laminate.analyze(&case.load, options).map_err(|err| {
        log::warn!("Sweep case '{}' failed: {err}", case.name);
        err
    })?;
    Ok(SweepResult {
        name: case.name.clone(),
        analysis,
    })
}
