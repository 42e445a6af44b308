//! Material catalog

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use super::{load_or_default_with, read_json, write_json, CatalogLoad};
use crate::elements::MaterialProperties;
use crate::error::LaminateResult;

/// Catalog name of the T300/5208 graphite/epoxy preset
pub const T300_5208: &str = "T300/5208_graphite_epoxy";

/// On-disk shape of one catalog entry
#[derive(Debug, Serialize, Deserialize)]
struct MaterialRecord<P> {
    properties: P,
}

/// Named, shared material definitions
///
/// Entries are handed out as `Arc`s so plies reference the catalog's
/// definition instead of copying it.
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    materials: HashMap<String, Arc<MaterialProperties>>,
}

impl MaterialCatalog {
    /// An empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// The five built-in composite materials (psi)
    pub fn with_defaults() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(T300_5208, MaterialProperties::t300_5208());
        catalog.insert("B(4)/5505_boron_epoxy", MaterialProperties::boron_5505());
        catalog.insert("AS/3501_graphite_epoxy", MaterialProperties::as_3501());
        catalog.insert("Scotchply_1002_glass_epoxy", MaterialProperties::scotchply_1002());
        catalog.insert("Kevlar49_aramid_epoxy", MaterialProperties::kevlar49());
        catalog
    }

    /// Register a material, replacing any existing entry with that name
    pub fn insert(&mut self, name: &str, properties: MaterialProperties) -> Arc<MaterialProperties> {
        let shared = Arc::new(properties);
        self.materials.insert(name.to_string(), Arc::clone(&shared));
        shared
    }

    /// Look up a material by name
    pub fn get(&self, name: &str) -> Option<Arc<MaterialProperties>> {
        self.materials.get(name).cloned()
    }

    /// Remove a material; returns false if it was not present
    pub fn remove(&mut self, name: &str) -> bool {
        self.materials.remove(name).is_some()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Parse a catalog from its JSON form
    pub fn from_json(text: &str) -> LaminateResult<Self> {
        let records: BTreeMap<String, MaterialRecord<MaterialProperties>> =
            serde_json::from_str(text)?;
        Ok(Self::from_records(records))
    }

    /// Serialize the catalog to pretty JSON
    pub fn to_json(&self) -> LaminateResult<String> {
        Ok(serde_json::to_string_pretty(&self.records())?)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> LaminateResult<Self> {
        let records: BTreeMap<String, MaterialRecord<MaterialProperties>> =
            read_json(path.as_ref())?;
        Ok(Self::from_records(records))
    }

    /// Load a catalog file, or the built-in defaults if it is missing or
    /// cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> CatalogLoad<Self> {
        load_or_default_with(path.as_ref(), |p| Self::load(p), Self::with_defaults)
    }

    /// Write the catalog to a file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> LaminateResult<()> {
        write_json(path.as_ref(), &self.records())
    }

    fn from_records(records: BTreeMap<String, MaterialRecord<MaterialProperties>>) -> Self {
        let materials = records
            .into_iter()
            .map(|(name, record)| (name, Arc::new(record.properties)))
            .collect();
        Self { materials }
    }

    fn records(&self) -> BTreeMap<&str, MaterialRecord<&MaterialProperties>> {
        self.materials
            .iter()
            .map(|(name, props)| {
                (
                    name.as_str(),
                    MaterialRecord {
                        properties: props.as_ref(),
                    },
                )
            })
            .collect()
    }
}
