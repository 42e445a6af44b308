//! Named catalogs of materials and component presets backed by JSON files
//!
//! Both catalogs follow the same load contract: `load` fails loudly, while
//! `load_or_default` always returns a usable catalog and hands any load
//! failure back to the caller as a [`CatalogWarning`].

mod components;
mod materials;

pub use components::ComponentCatalog;
pub use materials::{MaterialCatalog, T300_5208};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::LaminateResult;

/// A catalog file could not be used and built-in defaults were substituted
#[derive(Error, Debug, Clone, PartialEq)]
#[error("could not load catalog {}: {reason} (using built-in defaults)", .path.display())]
pub struct CatalogWarning {
    /// File that failed to load
    pub path: PathBuf,
    /// Why it failed
    pub reason: String,
}

/// Result of `load_or_default`: a usable catalog plus an optional warning
#[derive(Debug, Clone)]
pub struct CatalogLoad<C> {
    pub catalog: C,
    pub warning: Option<CatalogWarning>,
}

impl<C> CatalogLoad<C> {
    /// Whether the catalog came from built-in defaults because loading failed
    pub fn fell_back(&self) -> bool {
        self.warning.is_some()
    }
}

/// Load a catalog, falling back to defaults when the file is missing or
/// unusable. A missing file is not an error; a broken one produces a warning.
pub(crate) fn load_or_default_with<C>(
    path: &Path,
    load: impl FnOnce(&Path) -> LaminateResult<C>,
    defaults: impl FnOnce() -> C,
) -> CatalogLoad<C> {
    if !path.exists() {
        log::info!("Catalog {} not found, using built-in defaults", path.display());
        return CatalogLoad {
            catalog: defaults(),
            warning: None,
        };
    }

    match load(path) {
        Ok(catalog) => CatalogLoad {
            catalog,
            warning: None,
        },
        Err(err) => {
            let warning = CatalogWarning {
                path: path.to_path_buf(),
                reason: err.to_string(),
            };
            log::warn!("{warning}");
            CatalogLoad {
                catalog: defaults(),
                warning: Some(warning),
            }
        }
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> LaminateResult<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> LaminateResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
