//! YAML mixture definitions.
//!
//! ```yaml
//! model: Ideal Gas
//! components:
//!   - name: Nitrogen
//!     mole_fraction: 0.79
//!   - name: Oxygen
//!     mole_fraction: 0.21
//! ```
//!
//! When no component carries a mass fraction, mass fractions are derived from
//! the mole fractions.

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::path::Path;
use tp_fluids::{Component, Mixture, MixtureModel, PropertyOracle};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MixtureFile {
    #[serde(default)]
    pub model: Option<String>,
    pub components: Vec<ComponentEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentEntry {
    pub name: String,
    pub mole_fraction: f64,
    #[serde(default)]
    pub mass_fraction: Option<f64>,
}

impl MixtureFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::MixtureFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| CliError::MixtureFileParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Model named in the file, if any.
    pub fn model(&self) -> CliResult<Option<MixtureModel>> {
        Ok(self.model.as_deref().map(str::parse::<MixtureModel>).transpose()?)
    }

    pub fn to_mixture(&self, oracle: &dyn PropertyOracle) -> CliResult<Mixture> {
        let mut mixture: Mixture = self
            .components
            .iter()
            .map(|c| Component::new(&c.name, c.mole_fraction, c.mass_fraction.unwrap_or(0.0), oracle))
            .collect();
        if self.components.iter().all(|c| c.mass_fraction.is_none()) {
            mixture.mass_fractions_from_moles()?;
        }
        Ok(mixture)
    }
}
