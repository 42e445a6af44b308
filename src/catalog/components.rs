//! Component preset catalog

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::{load_or_default_with, read_json, write_json, CatalogLoad, T300_5208};
use crate::components::{
    AirframeGeometry, Component, ComponentKind, FinGeometry, NoseConeGeometry, NoseConeShape,
    DEFAULT_PLY_THICKNESS,
};
use crate::error::{LaminateError, LaminateResult};

const PRESET_LAYUP: [f64; 8] = [0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0];

/// Named component presets
///
/// The file form is a JSON object keyed by component name. Each entry holds
/// `component_type`, `geometry`, `layup_angles`, `ply_thickness` (a number or
/// a per-ply list) and `material_name`. The key wins over any `name` field
/// stored in the entry.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: HashMap<String, Component>,
}

impl ComponentCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard nose cone, airframe and fin in quasi-isotropic T300/5208
    pub fn with_defaults() -> Self {
        let presets = [
            (
                "Standard Nosecone",
                ComponentKind::NoseCone(NoseConeGeometry {
                    shape: NoseConeShape::Ogive,
                    length: 24.0,
                    base_diameter: 6.0,
                }),
            ),
            (
                "Standard Airframe",
                ComponentKind::Airframe(AirframeGeometry {
                    length: 48.0,
                    diameter: 6.0,
                }),
            ),
            (
                "Standard Fin",
                ComponentKind::Fin(FinGeometry {
                    root_chord: 12.0,
                    tip_chord: 6.0,
                    span: 6.0,
                    sweep: 30.0,
                }),
            ),
        ];

        let mut catalog = Self::empty();
        for (name, kind) in presets {
            catalog.insert(Component::new(
                name,
                kind,
                &PRESET_LAYUP,
                DEFAULT_PLY_THICKNESS,
                T300_5208,
            ));
        }
        catalog
    }

    /// Register a component under its own name, replacing any existing entry
    pub fn insert(&mut self, component: Component) {
        self.components.insert(component.name.clone(), component);
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Like `get`, but a missing name is an error
    pub fn require(&self, name: &str) -> LaminateResult<&Component> {
        self.get(name)
            .ok_or_else(|| LaminateError::ComponentNotFound(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.components.remove(name).is_some()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn load(path: impl AsRef<Path>) -> LaminateResult<Self> {
        let entries: BTreeMap<String, Component> = read_json(path.as_ref())?;
        let components = entries
            .into_iter()
            .map(|(name, mut component)| {
                component.name = name.clone();
                component.kind.validate()?;
                Ok((name, component))
            })
            .collect::<LaminateResult<HashMap<_, _>>>()?;
        Ok(Self { components })
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> CatalogLoad<Self> {
        load_or_default_with(path.as_ref(), |p| Self::load(p), Self::with_defaults)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> LaminateResult<()> {
        let sorted: BTreeMap<&str, &Component> = self
            .components
            .iter()
            .map(|(name, c)| (name.as_str(), c))
            .collect();
        write_json(path.as_ref(), &sorted)
    }
}
