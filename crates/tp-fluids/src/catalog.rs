//! Fluid picker catalog and predefined mixtures.

use crate::Species;
use crate::composition::{Component, Mixture};
use crate::error::{FluidError, FluidResult};
use crate::oracle::PropertyOracle;

/// Whether `species` matches a free-text search (key, display name or alias).
///
/// An empty query matches everything.
pub fn matches_query(species: Species, query: &str) -> bool {
    let query = query.trim().to_ascii_lowercase();
    if query.is_empty() {
        return true;
    }

    species.key().to_ascii_lowercase().contains(&query)
        || species.display_name().to_ascii_lowercase().contains(&query)
        || aliases(species)
            .iter()
            .any(|alias| alias.contains(query.as_str()))
}

fn aliases(species: Species) -> &'static [&'static str] {
    match species {
        Species::Air => &["atmosphere"],
        Species::CO2 => &["carbon dioxide"],
        Species::Propane => &["c3h8"],
        Species::NButane => &["butane"],
        Species::Isobutane => &["i-butane"],
        Species::Isopentane => &["i-pentane"],
        Species::Ammonia => &["nh3"],
        Species::NitrousOxide => &["n2o", "laughing gas"],
        Species::SulfurDioxide => &["so2"],
        Species::HydrogenSulfide => &["h2s"],
        _ => &[],
    }
}

/// Every fluid offered in pickers, sorted.
///
/// Catalog species appear under their display name. Fluids only the backend
/// knows appear under the backend's identifier.
pub fn available_fluids(oracle: &dyn PropertyOracle) -> Vec<String> {
    let mut names: Vec<String> = Species::ALL
        .iter()
        .map(|s| s.display_name().to_string())
        .chain(backend_only_fluids(oracle))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Fluids matching `query`: catalog species in catalog order, then matching
/// backend-only fluids sorted by name.
pub fn search_fluids(query: &str, oracle: &dyn PropertyOracle) -> Vec<String> {
    let needle = query.trim().to_ascii_lowercase();
    let mut extra: Vec<String> = backend_only_fluids(oracle)
        .filter(|name| name.to_ascii_lowercase().contains(&needle))
        .collect();
    extra.sort_unstable();
    extra.dedup();

    Species::ALL
        .into_iter()
        .filter(|&species| matches_query(species, query))
        .map(|species| species.display_name().to_string())
        .chain(extra)
        .collect()
}

/// Backend identifiers that do not resolve to a catalog species.
fn backend_only_fluids(oracle: &dyn PropertyOracle) -> impl Iterator<Item = String> {
    oracle
        .fluid_names()
        .into_iter()
        .filter(|name| name.parse::<Species>().is_err())
}

/// A named composition offered as a starting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredefinedMixture {
    pub name: &'static str,
    /// (fluid, mole fraction)
    pub components: &'static [(&'static str, f64)],
}

pub const PREDEFINED_MIXTURES: [PredefinedMixture; 3] = [
    PredefinedMixture {
        name: "Air",
        components: &[
            ("Nitrogen", 0.78084),
            ("Oxygen", 0.20946),
            ("Argon", 0.00934),
            ("CO2", 0.00036),
        ],
    },
    PredefinedMixture {
        name: "Natural Gas (Typical)",
        components: &[
            ("Methane", 0.85),
            ("Ethane", 0.10),
            ("Propane", 0.03),
            ("n-Butane", 0.015),
            ("CO2", 0.005),
        ],
    },
    PredefinedMixture {
        name: "Flue Gas (Coal)",
        components: &[
            ("CO2", 0.12),
            ("H2O", 0.08),
            ("Nitrogen", 0.75),
            ("Oxygen", 0.05),
        ],
    },
];

pub fn predefined_mixture_names() -> impl Iterator<Item = &'static str> {
    PREDEFINED_MIXTURES.iter().map(|m| m.name)
}

/// Build a predefined mixture with mass fractions derived from its mole fractions.
pub fn predefined_mixture(name: &str, oracle: &dyn PropertyOracle) -> FluidResult<Mixture> {
    let preset = PREDEFINED_MIXTURES
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| FluidError::InvalidArg {
            what: format!("unknown predefined mixture '{}'", name.trim()),
        })?;

    let mut mixture: Mixture = preset
        .components
        .iter()
        .map(|&(fluid, x)| Component::new(fluid, x, 0.0, oracle))
        .collect();
    mixture.mass_fractions_from_moles()?;
    Ok(mixture)
}
