//! Single-point property sweep for a pure fluid.
//!
//! Two independent inputs fix the state; everything the oracle can report is
//! collected into one [`PropertyResult`]. The core state (T, P, D, H, S, U)
//! must resolve. Secondary properties that the backend cannot provide at this
//! state (surface tension of a gas, transport properties inside the dome, ...)
//! become NaN and an unclassifiable phase becomes "Unknown".

use crate::error::{FluidError, FluidResult};
use crate::oracle::{FluidConstant, Param, Phase, PropertyOracle, StateSpec};
use crate::results::PropertyResult;
use crate::units::to_si;
use tracing::debug;

/// One state input: property, value and the unit it is expressed in.
#[derive(Debug, Clone, PartialEq)]
pub struct PointInput {
    pub param: Param,
    pub value: f64,
    pub unit: String,
}

impl PointInput {
    pub fn new(param: Param, value: f64, unit: impl Into<String>) -> Self {
        Self {
            param,
            value,
            unit: unit.into(),
        }
    }

    /// Value in SI.
    ///
    /// Temperature and pressure go through the unit tables; every other
    /// property must already be in its SI unit.
    pub fn to_si(&self) -> FluidResult<f64> {
        let quantity = self.param.quantity().ok_or_else(|| FluidError::InvalidArg {
            what: format!("{} cannot be used as a state input", self.param),
        })?;
        match self.param {
            Param::Temperature | Param::Pressure => to_si(self.value, &self.unit, quantity),
            _ if quantity.is_si_unit(&self.unit) => Ok(self.value),
            _ => Err(FluidError::InvalidUnit {
                unit: self.unit.trim().to_string(),
                quantity,
            }),
        }
    }
}

const CORE: [(Param, &str, &str); 6] = [
    (Param::Temperature, "Temperature", "K"),
    (Param::Pressure, "Pressure", "Pa"),
    (Param::Density, "Density", "kg/m³"),
    (Param::Enthalpy, "Enthalpy", "J/kg"),
    (Param::Entropy, "Entropy", "J/kg/K"),
    (Param::InternalEnergy, "Internal Energy", "J/kg"),
];

const SECONDARY: [(Param, &str, &str); 7] = [
    (Param::Cp, "Isobaric Heat Capacity", "J/kg/K"),
    (Param::Cv, "Isochoric Heat Capacity", "J/kg/K"),
    (Param::Viscosity, "Viscosity", "Pa·s"),
    (Param::Conductivity, "Thermal Conductivity", "W/m/K"),
    (Param::SpeedOfSound, "Speed of Sound", "m/s"),
    (Param::SurfaceTension, "Surface Tension", "N/m"),
    (Param::Quality, "Quality", "-"),
];

/// Evaluate every available property of `fluid` at the state fixed by two inputs.
pub fn compute(
    oracle: &dyn PropertyOracle,
    fluid: &str,
    input1: &PointInput,
    input2: &PointInput,
) -> FluidResult<PropertyResult> {
    if input1.param == input2.param {
        return Err(FluidError::InvalidArg {
            what: format!("both inputs are {}", input1.param),
        });
    }
    let state = StateSpec::new(input1.param, input1.to_si()?, input2.param, input2.to_si()?);

    let core_params = CORE.map(|(param, ..)| param);
    let core = oracle
        .query_many(&core_params, state, fluid)
        .map_err(|e| FluidError::PointCalculationFailed {
            message: e.to_string(),
        })?;
    if core.len() != CORE.len() {
        return Err(FluidError::PointCalculationFailed {
            message: format!("expected {} core outputs, got {}", CORE.len(), core.len()),
        });
    }

    let mut out = PropertyResult::new();
    for ((_, name, unit), value) in CORE.iter().zip(&core) {
        out.push(name, *value, unit);
    }

    for (param, name, unit) in SECONDARY {
        let value = oracle.query(param, state, fluid).unwrap_or_else(|e| {
            debug!(fluid, property = name, error = %e, "property unavailable");
            f64::NAN
        });
        out.push(name, value, unit);
    }

    let phase = oracle.query_phase(state, fluid).unwrap_or_else(|e| {
        debug!(fluid, error = %e, "phase unavailable");
        Phase::Unknown
    });
    out.push_label("Phase", phase.label(), "-");

    let molar_mass = oracle
        .query_constant(FluidConstant::MolarMass, fluid)
        .unwrap_or(f64::NAN);
    let (h, s) = (core[3], core[4]);
    out.push("Molar Mass", molar_mass, "kg/mol");
    out.push("Molar Enthalpy", h * molar_mass, "J/mol");
    out.push("Molar Entropy", s * molar_mass, "J/mol/K");

    Ok(out)
}
