//! Property oracle trait and the vocabulary used to talk to it.
//!
//! The engine never evaluates an equation of state itself. Every physical
//! number comes from a [`PropertyOracle`]: give it two independent state
//! properties plus a fluid identifier and it returns any other property, or
//! fails when the state is not resolvable.

use crate::error::{FluidError, FluidResult};
use crate::units::Quantity;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Thermophysical property that can be used as an oracle input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// Temperature [K]
    Temperature,
    /// Pressure [Pa]
    Pressure,
    /// Mass density [kg/m³]
    Density,
    /// Specific enthalpy [J/kg]
    Enthalpy,
    /// Specific entropy [J/(kg·K)]
    Entropy,
    /// Specific internal energy [J/kg]
    InternalEnergy,
    /// Vapor quality [-]
    Quality,
    /// Isobaric specific heat [J/(kg·K)]
    Cp,
    /// Isochoric specific heat [J/(kg·K)]
    Cv,
    /// Dynamic viscosity [Pa·s]
    Viscosity,
    /// Thermal conductivity [W/(m·K)]
    Conductivity,
    /// Speed of sound [m/s]
    SpeedOfSound,
    /// Surface tension [N/m]
    SurfaceTension,
}

impl Param {
    /// Short CoolProp-style key ("T", "P", "D", ...).
    pub fn key(self) -> &'static str {
        match self {
            Param::Temperature => "T",
            Param::Pressure => "P",
            Param::Density => "D",
            Param::Enthalpy => "H",
            Param::Entropy => "S",
            Param::InternalEnergy => "U",
            Param::Quality => "Q",
            Param::Cp => "Cpmass",
            Param::Cv => "Cvmass",
            Param::Viscosity => "V",
            Param::Conductivity => "L",
            Param::SpeedOfSound => "A",
            Param::SurfaceTension => "I",
        }
    }

    /// Whether the parameter can fix a thermodynamic state as an input.
    pub fn is_state_input(self) -> bool {
        self.quantity().is_some()
    }

    /// Quantity family for state inputs; `None` for derived-only outputs.
    pub fn quantity(self) -> Option<Quantity> {
        match self {
            Param::Temperature => Some(Quantity::Temperature),
            Param::Pressure => Some(Quantity::Pressure),
            Param::Density => Some(Quantity::Density),
            Param::Enthalpy => Some(Quantity::SpecificEnthalpy),
            Param::Entropy => Some(Quantity::SpecificEntropy),
            Param::InternalEnergy => Some(Quantity::SpecificEnergy),
            Param::Quality => Some(Quantity::Quality),
            _ => None,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Param {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "T" | "TEMPERATURE" => Ok(Param::Temperature),
            "P" | "PRESSURE" => Ok(Param::Pressure),
            "D" | "DMASS" | "DENSITY" => Ok(Param::Density),
            "H" | "HMASS" | "ENTHALPY" => Ok(Param::Enthalpy),
            "S" | "SMASS" | "ENTROPY" => Ok(Param::Entropy),
            "U" | "UMASS" | "INTERNAL ENERGY" => Ok(Param::InternalEnergy),
            "Q" | "QUALITY" => Ok(Param::Quality),
            "C" | "CPMASS" | "CP" => Ok(Param::Cp),
            "O" | "CVMASS" | "CV" => Ok(Param::Cv),
            "V" | "VISCOSITY" => Ok(Param::Viscosity),
            "L" | "CONDUCTIVITY" => Ok(Param::Conductivity),
            "A" | "SPEED_OF_SOUND" | "SPEED OF SOUND" => Ok(Param::SpeedOfSound),
            "I" | "SURFACE_TENSION" | "SURFACE TENSION" => Ok(Param::SurfaceTension),
            _ => Err(FluidError::InvalidArg {
                what: format!("unknown property '{}'", s.trim()),
            }),
        }
    }
}

/// Two independent inputs fixing a thermodynamic state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSpec {
    pub first: (Param, f64),
    pub second: (Param, f64),
}

impl StateSpec {
    pub fn new(first: Param, first_value: f64, second: Param, second_value: f64) -> Self {
        Self {
            first: (first, first_value),
            second: (second, second_value),
        }
    }

    /// Temperature [K] and pressure [Pa].
    pub fn tp(t: f64, p: f64) -> Self {
        Self::new(Param::Temperature, t, Param::Pressure, p)
    }

    /// Temperature [K] and density [kg/m³].
    pub fn td(t: f64, d: f64) -> Self {
        Self::new(Param::Temperature, t, Param::Density, d)
    }

    /// Pressure [Pa] and enthalpy [J/kg].
    pub fn ph(p: f64, h: f64) -> Self {
        Self::new(Param::Pressure, p, Param::Enthalpy, h)
    }

    /// Pressure [Pa] and entropy [J/(kg·K)].
    pub fn ps(p: f64, s: f64) -> Self {
        Self::new(Param::Pressure, p, Param::Entropy, s)
    }

    /// Temperature [K] and vapor quality.
    pub fn tq(t: f64, q: f64) -> Self {
        Self::new(Param::Temperature, t, Param::Quality, q)
    }

    /// Pressure [Pa] and vapor quality.
    pub fn pq(p: f64, q: f64) -> Self {
        Self::new(Param::Pressure, p, Param::Quality, q)
    }

    /// Value of `param` when it is one of the two inputs.
    pub fn input(&self, param: Param) -> Option<f64> {
        if self.first.0 == param {
            Some(self.first.1)
        } else if self.second.0 == param {
            Some(self.second.1)
        } else {
            None
        }
    }
}

impl fmt::Display for StateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}, {}={}",
            self.first.0, self.first.1, self.second.0, self.second.1
        )
    }
}

/// State-independent fluid constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluidConstant {
    /// Molar mass [kg/mol]
    MolarMass,
    /// Critical temperature [K]
    CriticalTemperature,
    /// Critical pressure [Pa]
    CriticalPressure,
    /// Triple-point temperature [K]
    TripleTemperature,
    /// Triple-point pressure [Pa]
    TriplePressure,
}

/// Phase classification reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Phase {
    Liquid,
    Gas,
    TwoPhase,
    SupercriticalLiquid,
    SupercriticalGas,
    Supercritical,
    CriticalPoint,
    /// State could not be classified (or the query failed).
    Unknown,
}

impl Phase {
    /// Display label, matching the CoolProp phase strings.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Liquid => "liquid",
            Phase::Gas => "gas",
            Phase::TwoPhase => "twophase",
            Phase::SupercriticalLiquid => "supercritical_liquid",
            Phase::SupercriticalGas => "supercritical_gas",
            Phase::Supercritical => "supercritical",
            Phase::CriticalPoint => "critical_point",
            Phase::Unknown => "Unknown",
        }
    }
}

impl From<Phase> for &'static str {
    fn from(phase: Phase) -> Self {
        phase.label()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Humid-air outputs, evaluated at (T, P, relative humidity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumidAirParam {
    /// Specific volume per kg of humid air [m³/kg]
    SpecificVolume,
    /// Enthalpy per kg of dry air [J/kg]
    Enthalpy,
    /// Entropy per kg of dry air [J/(kg·K)]
    Entropy,
    /// Humidity ratio [kg water / kg dry air]
    HumidityRatio,
}

/// Source of thermophysical properties.
///
/// Implementations must be thread-safe (Send + Sync) so that process paths
/// can be sampled in parallel. Every failure is reported as an error value;
/// implementations never panic on unresolvable states.
pub trait PropertyOracle: Send + Sync {
    /// Backend name (for logging).
    fn name(&self) -> &str;

    /// Evaluate `output` at `state` for `fluid`.
    fn query(&self, output: Param, state: StateSpec, fluid: &str) -> FluidResult<f64>;

    /// Evaluate several outputs at the same state.
    ///
    /// Fails as a whole when any single output fails. Backends that can reuse
    /// one resolved state override this.
    fn query_many(&self, outputs: &[Param], state: StateSpec, fluid: &str) -> FluidResult<Vec<f64>> {
        outputs
            .iter()
            .map(|&output| self.query(output, state, fluid))
            .collect()
    }

    /// State-independent constant of `fluid`.
    fn query_constant(&self, constant: FluidConstant, fluid: &str) -> FluidResult<f64>;

    /// Identifiers of fluids the backend resolves beyond the built-in
    /// [`Species`](crate::Species) catalog. Empty by default.
    fn fluid_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Phase of `fluid` at `state`.
    fn query_phase(&self, state: StateSpec, fluid: &str) -> FluidResult<Phase>;

    /// Humid-air property at temperature `t` [K], pressure `p` [Pa] and
    /// relative humidity `rh` (0-1).
    fn query_humid_air(&self, output: HumidAirParam, t: f64, p: f64, rh: f64) -> FluidResult<f64>;
}

/// Input checks applied before a state reaches the backend.
pub(crate) mod validation {
    use super::*;

    /// Ensure both inputs are finite, distinct and physically plausible.
    pub fn validate_state(state: &StateSpec) -> FluidResult<()> {
        if state.first.0 == state.second.0 {
            return Err(FluidError::InvalidArg {
                what: format!("state inputs must differ, got {} twice", state.first.0),
            });
        }
        validate_input(state.first)?;
        validate_input(state.second)
    }

    fn validate_input((param, value): (Param, f64)) -> FluidResult<()> {
        if !param.is_state_input() {
            return Err(FluidError::NotSupported {
                what: format!("{} cannot be used as a state input", param),
            });
        }
        if !value.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "state input must be finite",
            });
        }
        match param {
            Param::Temperature if value <= 0.0 => Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            }),
            Param::Pressure if value <= 0.0 => Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            }),
            Param::Density if value <= 0.0 => Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            }),
            Param::Quality if !(0.0..=1.0).contains(&value) => Err(FluidError::NonPhysical {
                what: "quality must lie within [0, 1]",
            }),
            _ => Ok(()),
        }
    }
}
