//! Mixture composition: named components with mole and mass fractions.
//!
//! Mole and mass fractions are stored independently. Nothing keeps them in
//! sync implicitly; callers convert explicitly with
//! [`Mixture::mass_fractions_from_moles`] or [`Mixture::mole_fractions_from_mass`].

use crate::error::{FluidError, FluidResult};
use crate::oracle::{FluidConstant, PropertyOracle};
use std::fmt;
use tracing::debug;

/// Molecular weight [g/mol] assumed when the oracle cannot resolve a fluid.
pub const DEFAULT_MOLECULAR_WEIGHT: f64 = 1.0;

/// One constituent of a mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Fluid identifier as given by the user.
    pub name: String,
    /// Mole fraction x (not necessarily normalized).
    pub mole_fraction: f64,
    /// Mass fraction y (not necessarily normalized).
    pub mass_fraction: f64,
    molecular_weight: f64,
}

impl Component {
    /// Create a component, fetching its molecular weight from `oracle` once.
    ///
    /// Falls back to [`DEFAULT_MOLECULAR_WEIGHT`] if the oracle cannot
    /// resolve `name`.
    pub fn new(
        name: impl Into<String>,
        mole_fraction: f64,
        mass_fraction: f64,
        oracle: &dyn PropertyOracle,
    ) -> Self {
        let name = name.into();
        let molecular_weight = match oracle.query_constant(FluidConstant::MolarMass, &name) {
            Ok(kg_per_mol) if kg_per_mol.is_finite() && kg_per_mol > 0.0 => kg_per_mol * 1000.0,
            Ok(bad) => {
                debug!(fluid = %name, value = bad, "non-physical molar mass, using default");
                DEFAULT_MOLECULAR_WEIGHT
            }
            Err(e) => {
                debug!(fluid = %name, error = %e, "molar mass unavailable, using default");
                DEFAULT_MOLECULAR_WEIGHT
            }
        };
        Self {
            name,
            mole_fraction,
            mass_fraction,
            molecular_weight,
        }
    }

    /// Create a component with a known molecular weight [g/mol].
    pub fn with_molecular_weight(
        name: impl Into<String>,
        mole_fraction: f64,
        mass_fraction: f64,
        molecular_weight: f64,
    ) -> FluidResult<Self> {
        if !molecular_weight.is_finite() || molecular_weight <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "molecular weight must be positive and finite",
            });
        }
        Ok(Self {
            name: name.into(),
            mole_fraction,
            mass_fraction,
            molecular_weight,
        })
    }

    /// Molecular weight [g/mol], fixed at construction.
    pub fn molecular_weight(&self) -> f64 {
        self.molecular_weight
    }

    /// Whether this component is water ("water" or "h2o", any case).
    pub fn is_water(&self) -> bool {
        let name = self.name.trim();
        name.eq_ignore_ascii_case("water") || name.eq_ignore_ascii_case("h2o")
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (x={:.4}, y={:.4})",
            self.name, self.mole_fraction, self.mass_fraction
        )
    }
}

/// Ordered collection of components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mixture {
    components: Vec<Component>,
}

impl Mixture {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Σ x_i
    pub fn total_mole_fraction(&self) -> f64 {
        self.components.iter().map(|c| c.mole_fraction).sum()
    }

    /// Σ y_i
    pub fn total_mass_fraction(&self) -> f64 {
        self.components.iter().map(|c| c.mass_fraction).sum()
    }

    /// Mole-weighted molar mass M̄ = Σ x_i·M_i / Σ x_i [g/mol].
    pub fn average_molar_mass(&self) -> FluidResult<f64> {
        average_molar_mass(&self.components)
    }

    /// First water component, if any.
    pub fn find_water(&self) -> Option<&Component> {
        self.components.iter().find(|c| c.is_water())
    }

    /// Scale mole fractions so they sum to 1.
    ///
    /// Leaves the mixture untouched and returns
    /// [`FluidError::ZeroTotalFraction`] when they sum to zero.
    pub fn normalize_mole_fractions(&mut self) -> FluidResult<()> {
        let total = self.total_mole_fraction();
        if total == 0.0 {
            return Err(FluidError::ZeroTotalFraction);
        }
        for c in &mut self.components {
            c.mole_fraction /= total;
        }
        Ok(())
    }

    /// Overwrite mass fractions from mole fractions: y_i = x_i·M_i / M̄.
    ///
    /// Mass fractions sum to Σ x_i, so they are normalized only when the mole
    /// fractions are.
    pub fn mass_fractions_from_moles(&mut self) -> FluidResult<()> {
        let m_avg = self.average_molar_mass()?;
        for c in &mut self.components {
            c.mass_fraction = c.mole_fraction * c.molecular_weight / m_avg;
        }
        Ok(())
    }

    /// Overwrite mole fractions from mass fractions: x_i = (y_i/M_i) / Σ(y_j/M_j).
    pub fn mole_fractions_from_mass(&mut self) -> FluidResult<()> {
        if self.total_mass_fraction() == 0.0 {
            return Err(FluidError::ZeroTotalFraction);
        }
        let moles: f64 = self
            .components
            .iter()
            .map(|c| c.mass_fraction / c.molecular_weight)
            .sum();
        if moles == 0.0 {
            return Err(FluidError::ZeroTotalFraction);
        }
        for c in &mut self.components {
            c.mole_fraction = (c.mass_fraction / c.molecular_weight) / moles;
        }
        Ok(())
    }
}

/// M̄ = Σ x_i·M_i / Σ x_i [g/mol] over a component slice.
pub(crate) fn average_molar_mass(components: &[Component]) -> FluidResult<f64> {
    let total: f64 = components.iter().map(|c| c.mole_fraction).sum();
    if total == 0.0 {
        return Err(FluidError::ZeroTotalFraction);
    }
    let weighted: f64 = components
        .iter()
        .map(|c| c.mole_fraction * c.molecular_weight)
        .sum();
    Ok(weighted / total)
}

impl From<Vec<Component>> for Mixture {
    fn from(components: Vec<Component>) -> Self {
        Self::new(components)
    }
}

impl FromIterator<Component> for Mixture {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Mixture {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
