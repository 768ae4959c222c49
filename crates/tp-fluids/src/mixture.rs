//! Mixture property calculator.
//!
//! Two interchangeable models:
//! - **Ideal gas mixing**: pure-component Cp, Cv, μ and k from the oracle,
//!   combined with simple mixing rules. Density, speed of sound, enthalpy and
//!   entropy follow from ideal-gas relations.
//! - **Humid air**: the water component's mole fraction is turned into a
//!   relative humidity and handed to the oracle's humid-air model. Any failure
//!   falls back to ideal gas mixing for the same inputs.
//!
//! The molar mass used with [`R_UNIVERSAL`] is in g/mol (≡ kg/kmol), matching
//! the kmol basis of the gas constant.

use crate::composition::{Component, average_molar_mass};
use crate::error::{FluidError, FluidResult};
use crate::oracle::{HumidAirParam, Param, PropertyOracle, StateSpec, validation};
use crate::results::PropertyResult;
use std::fmt;
use std::str::FromStr;
use tp_core::units::constants::R_UNIVERSAL;
use tp_core::units::{Pressure, Temperature, k_of, pa_of};
use tracing::warn;

/// Heat capacity ratio used when the mixed Cv is not positive.
pub const GAMMA_FALLBACK: f64 = 1.4;

/// Mixing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixtureModel {
    IdealGasMixing,
    HumidAir,
}

impl MixtureModel {
    pub const ALL: [MixtureModel; 2] = [MixtureModel::IdealGasMixing, MixtureModel::HumidAir];

    pub fn label(self) -> &'static str {
        match self {
            MixtureModel::IdealGasMixing => "Ideal Gas",
            MixtureModel::HumidAir => "Humid Air",
        }
    }
}

impl fmt::Display for MixtureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MixtureModel {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Ideal Gas" | "IdealGasMixing" => Ok(MixtureModel::IdealGasMixing),
            "Humid Air" | "HumidAir" => Ok(MixtureModel::HumidAir),
            other => Err(FluidError::UnknownModel {
                model: other.to_string(),
            }),
        }
    }
}

/// Mixture properties plus the model that actually produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureOutcome {
    /// Model the caller asked for.
    pub requested: MixtureModel,
    /// Model whose results are in `properties`.
    pub model: MixtureModel,
    pub properties: PropertyResult,
    /// Why the requested model was abandoned, when it was.
    pub fallback_reason: Option<String>,
}

impl MixtureOutcome {
    pub fn fell_back(&self) -> bool {
        self.requested != self.model
    }
}

/// Compute mixture properties at temperature `t` and pressure `p`.
///
/// Fails with [`FluidError::EmptyMixture`] without components and with
/// [`FluidError::NonPhysical`] when `t` or `p` is not positive and finite.
/// Both checks run before either model queries the oracle.
pub fn compute(
    oracle: &dyn PropertyOracle,
    components: &[Component],
    t: Temperature,
    p: Pressure,
    model: MixtureModel,
) -> FluidResult<PropertyResult> {
    compute_with_outcome(oracle, components, t, p, model).map(|outcome| outcome.properties)
}

/// Like [`compute`], but reports a humid-air → ideal-gas fallback.
pub fn compute_with_outcome(
    oracle: &dyn PropertyOracle,
    components: &[Component],
    t: Temperature,
    p: Pressure,
    model: MixtureModel,
) -> FluidResult<MixtureOutcome> {
    if components.is_empty() {
        return Err(FluidError::EmptyMixture);
    }
    let (t, p) = (k_of(t), pa_of(p));
    validation::validate_state(&StateSpec::tp(t, p))?;

    let (properties, model_used, fallback_reason) = match model {
        MixtureModel::IdealGasMixing => (ideal_gas_mixing(oracle, components, t, p)?, model, None),
        MixtureModel::HumidAir => match humid_air(oracle, components, t, p) {
            Ok(properties) => (properties, model, None),
            Err(e) => {
                warn!(error = %e, "humid air calculation failed, falling back to ideal gas mixing");
                (
                    ideal_gas_mixing(oracle, components, t, p)?,
                    MixtureModel::IdealGasMixing,
                    Some(e.to_string()),
                )
            }
        },
    };

    Ok(MixtureOutcome {
        requested: model,
        model: model_used,
        properties,
        fallback_reason,
    })
}

/// Ideal-gas mixing rules at T [K], P [Pa].
///
/// A component whose pure properties cannot be resolved is logged and left
/// out of the Cp, Cv, μ and k sums; it still counts towards the molar mass.
fn ideal_gas_mixing(
    oracle: &dyn PropertyOracle,
    components: &[Component],
    t: f64,
    p: f64,
) -> FluidResult<PropertyResult> {
    let total = components.iter().map(|c| c.mole_fraction).sum::<f64>();
    let m_mix = average_molar_mass(components)?;
    let rho = p * m_mix / (R_UNIVERSAL * t);

    let mut cp_mix = 0.0;
    let mut cv_mix = 0.0;
    let mut mu_mix = 0.0;
    let mut k_mix = 0.0;
    let outputs = [Param::Cp, Param::Cv, Param::Viscosity, Param::Conductivity];

    for comp in components.iter().filter(|c| c.mole_fraction > 0.0) {
        let [cp, cv, mu, k] = match oracle.query_many(&outputs, StateSpec::tp(t, p), &comp.name) {
            Ok(values) => match <[f64; 4]>::try_from(values) {
                Ok(values) => values,
                Err(_) => {
                    warn!(component = %comp.name, "oracle returned wrong number of outputs, skipping");
                    continue;
                }
            },
            Err(e) => {
                warn!(component = %comp.name, error = %e, "failed to calculate component properties, skipping");
                continue;
            }
        };

        let mass_frac = comp.mole_fraction * comp.molecular_weight() / m_mix;
        cp_mix += mass_frac * cp;
        cv_mix += mass_frac * cv;

        let mole_frac = comp.mole_fraction / total;
        mu_mix += mole_frac * mu;
        k_mix += mole_frac * k;
    }

    let gamma = if cv_mix > 0.0 {
        cp_mix / cv_mix
    } else {
        GAMMA_FALLBACK
    };
    let speed_of_sound = (gamma * R_UNIVERSAL * t / m_mix).sqrt();

    let mut out = PropertyResult::new();
    out.push("Molar Mass", m_mix / 1000.0, "kg/mol");
    out.push("Density", rho, "kg/m³");
    out.push("Isobaric Heat Capacity", cp_mix, "J/kg/K");
    out.push("Isochoric Heat Capacity", cv_mix, "J/kg/K");
    out.push("Viscosity", mu_mix, "Pa·s");
    out.push("Thermal Conductivity", k_mix, "W/m/K");
    out.push("Speed of Sound", speed_of_sound, "m/s");
    out.push("Compressibility Factor", 1.0, "-");
    // Reference-free approximations.
    out.push("Enthalpy", cp_mix * t, "J/kg");
    out.push("Entropy", cp_mix * t.ln() - (R_UNIVERSAL / m_mix) * p.ln(), "J/kg/K");
    Ok(out)
}

/// Humid-air model at T [K], P [Pa]. Fails on the first oracle error.
///
/// Relative humidity is reported as "Relative Humidity" with unit "%".
fn humid_air(
    oracle: &dyn PropertyOracle,
    components: &[Component],
    t: f64,
    p: f64,
) -> FluidResult<PropertyResult> {
    let water_fraction = components
        .iter()
        .find(|c| c.is_water())
        .map_or(0.0, |c| c.mole_fraction);

    let p_sat = oracle.query(Param::Pressure, StateSpec::tq(t, 0.0), "Water")?;
    let rh = (water_fraction * p / p_sat).min(1.0);

    let volume = oracle.query_humid_air(HumidAirParam::SpecificVolume, t, p, rh)?;
    let enthalpy = oracle.query_humid_air(HumidAirParam::Enthalpy, t, p, rh)?;
    let entropy = oracle.query_humid_air(HumidAirParam::Entropy, t, p, rh)?;
    let humidity_ratio = oracle.query_humid_air(HumidAirParam::HumidityRatio, t, p, rh)?;

    let mut out = PropertyResult::new();
    out.push("Specific Volume", volume, "m³/kg");
    out.push("Density", 1.0 / volume, "kg/m³");
    out.push("Enthalpy", enthalpy, "J/kg");
    out.push("Entropy", entropy, "J/kg/K");
    out.push("Relative Humidity", rh * 100.0, "%");
    out.push("Humidity Ratio", humidity_ratio, "kg/kg");
    Ok(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::StubOracle;
    use proptest::prelude::*;
    use tp_core::units::{k, pa};

    const NAMES: [&str; 4] = ["Nitrogen", "Oxygen", "Argon", "Methane"];

    proptest! {
        #[test]
        fn ideal_gas_is_incompressible_in_z(
            t in 150.0_f64..1500.0,
            p in 1e3_f64..1e7,
            fractions in prop::collection::vec(0.0_f64..1.0, 1..=4),
        ) {
            prop_assume!(fractions.iter().sum::<f64>() > 1e-6);
            let oracle = StubOracle::new();
            let comps: Vec<Component> = fractions
                .iter()
                .zip(NAMES)
                .map(|(&x, name)| Component::new(name, x, 0.0, &oracle))
                .collect();
            let r = compute(&oracle, &comps, k(t), pa(p), MixtureModel::IdealGasMixing).unwrap();
            prop_assert_eq!(r.value("Compressibility Factor"), Some(1.0));
            prop_assert!(r.value("Density").unwrap() > 0.0);
        }
    }
}
