//! CoolProp-backed property oracle.

use crate::error::{FluidError, FluidResult};
use crate::oracle::{
    FluidConstant, HumidAirParam, Param, Phase, PropertyOracle, StateSpec, validation,
};
use crate::species::Species;
use rfluids::io::Phase as BackendPhase;
use rfluids::prelude::*;

/// Refrigerant blends offered next to CoolProp's pure fluid list.
pub const PREDEFINED_BLENDS: [&str; 3] = ["R404A", "R407C", "R410A"];

/// Production oracle over CoolProp (through `rfluids`).
///
/// Fluid identifiers are resolved through [`Species`] first, so aliases such
/// as "H2O" or "Carbon Dioxide" work. Any other CoolProp pure fluid or
/// predefined blend ("Methanol", "R410A") is accepted under its CoolProp
/// name. User-defined mixtures are handled by the mixing rules in
/// [`crate::mixture`].
///
/// Thread-safe: every query builds its own rfluids state, nothing is cached.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoolPropOracle;

impl CoolPropOracle {
    pub fn new() -> Self {
        Self
    }

    fn resolve(fluid: &str) -> FluidResult<Substance> {
        if let Ok(species) = fluid.parse::<Species>() {
            return Ok(species.rfluids_pure().into());
        }
        let name = fluid.trim();
        name.parse::<Pure>()
            .map(Substance::from)
            .or_else(|_| name.parse::<PredefinedMix>().map(Substance::from))
            .map_err(|_| FluidError::NotSupported {
                what: format!("unknown fluid '{}'", name),
            })
    }

    fn backend(fluid: &str) -> FluidResult<Fluid<Undefined>> {
        Fluid::try_from(Self::resolve(fluid)?)
            .map_err(|e| FluidError::oracle(format!("rfluids error building {}: {}", fluid, e)))
    }

    /// Build an rfluids fluid in the requested two-input state.
    fn fluid_at(&self, state: StateSpec, fluid: &str) -> FluidResult<Fluid> {
        validation::validate_state(&state)?;
        Self::backend(fluid)?
            .in_state(to_input(state.first)?, to_input(state.second)?)
            .map_err(|e| {
                FluidError::oracle(format!("rfluids error for {} at {}: {}", fluid, state, e))
            })
    }

    fn phase_of(fluid: &mut Fluid) -> Phase {
        fluid.phase().into()
    }

    fn read(fluid: &mut Fluid, output: Param) -> FluidResult<f64> {
        let value = match output {
            Param::Temperature => fluid.temperature(),
            Param::Pressure => fluid.pressure(),
            Param::Density => fluid.density(),
            Param::Enthalpy => fluid.enthalpy(),
            Param::Entropy => fluid.entropy(),
            Param::InternalEnergy => fluid.internal_energy(),
            Param::Quality => {
                return match fluid.quality() {
                    Ok(q) => Ok(q),
                    // Single-phase states report -1, as CoolProp's PropsSI does.
                    Err(_) if Self::phase_of(fluid) != Phase::TwoPhase => Ok(-1.0),
                    Err(e) => Err(FluidError::oracle(format!(
                        "rfluids error getting quality: {}",
                        e
                    ))),
                };
            }
            Param::Cp => fluid.specific_heat(),
            Param::Cv => fluid.specific_heat_const_volume(),
            Param::Viscosity => fluid.dynamic_viscosity(),
            Param::Conductivity => fluid.conductivity(),
            Param::SpeedOfSound => fluid.sound_speed(),
            Param::SurfaceTension => fluid.surface_tension(),
        };
        value.map_err(|e| FluidError::oracle(format!("rfluids error getting {}: {}", output, e)))
    }
}

fn to_input((param, value): (Param, f64)) -> FluidResult<FluidInput> {
    match param {
        Param::Temperature => Ok(FluidInput::temperature(value)),
        Param::Pressure => Ok(FluidInput::pressure(value)),
        Param::Density => Ok(FluidInput::density(value)),
        Param::Enthalpy => Ok(FluidInput::enthalpy(value)),
        Param::Entropy => Ok(FluidInput::entropy(value)),
        Param::InternalEnergy => Ok(FluidInput::internal_energy(value)),
        Param::Quality => Ok(FluidInput::quality(value)),
        other => Err(FluidError::NotSupported {
            what: format!("{} cannot be used as a state input", other),
        }),
    }
}

impl PropertyOracle for CoolPropOracle {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn query(&self, output: Param, state: StateSpec, fluid: &str) -> FluidResult<f64> {
        let mut backend = self.fluid_at(state, fluid)?;
        Self::read(&mut backend, output)
    }

    fn query_many(&self, outputs: &[Param], state: StateSpec, fluid: &str) -> FluidResult<Vec<f64>> {
        let mut backend = self.fluid_at(state, fluid)?;
        outputs
            .iter()
            .map(|&output| Self::read(&mut backend, output))
            .collect()
    }

    fn query_constant(&self, constant: FluidConstant, fluid: &str) -> FluidResult<f64> {
        let mut backend = Self::backend(fluid)?;
        let value = match constant {
            FluidConstant::MolarMass => backend.molar_mass(),
            FluidConstant::CriticalTemperature => backend.critical_temperature(),
            FluidConstant::CriticalPressure => backend.critical_pressure(),
            FluidConstant::TripleTemperature => backend.triple_temperature(),
            FluidConstant::TriplePressure => backend.triple_pressure(),
        };
        value.map_err(|e| {
            FluidError::oracle(format!("rfluids error getting {:?} of {}: {}", constant, fluid, e))
        })
    }

    /// CoolProp's pure fluid list plus [`PREDEFINED_BLENDS`].
    fn fluid_names(&self) -> Vec<String> {
        let pure = CoolProp::get_global_param(GlobalParam::PureList).unwrap_or_default();
        pure.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .chain(PREDEFINED_BLENDS.iter().map(|name| name.to_string()))
            .collect()
    }

    fn query_phase(&self, state: StateSpec, fluid: &str) -> FluidResult<Phase> {
        let mut backend = self.fluid_at(state, fluid)?;
        Ok(Self::phase_of(&mut backend))
    }

    fn query_humid_air(&self, output: HumidAirParam, t: f64, p: f64, rh: f64) -> FluidResult<f64> {
        validation::validate_state(&StateSpec::tp(t, p))?;
        if !(0.0..=1.0).contains(&rh) {
            return Err(FluidError::NonPhysical {
                what: "relative humidity must lie within [0, 1]",
            });
        }
        let mut air = HumidAir::new()
            .in_state(
                HumidAirInput::pressure(p),
                HumidAirInput::temperature(t),
                HumidAirInput::rel_humidity(rh),
            )
            .map_err(|e| {
                FluidError::oracle(format!(
                    "rfluids humid air error at T={} K, P={} Pa, RH={}: {}",
                    t, p, rh, e
                ))
            })?;
        let value = match output {
            HumidAirParam::SpecificVolume => air.specific_volume(),
            HumidAirParam::Enthalpy => air.enthalpy(),
            HumidAirParam::Entropy => air.entropy(),
            HumidAirParam::HumidityRatio => air.abs_humidity(),
        };
        value.map_err(|e| FluidError::oracle(format!("rfluids error getting {:?}: {}", output, e)))
    }
}

impl From<BackendPhase> for Phase {
    fn from(phase: BackendPhase) -> Self {
        match phase {
            BackendPhase::Liquid => Phase::Liquid,
            BackendPhase::Gas => Phase::Gas,
            BackendPhase::TwoPhase => Phase::TwoPhase,
            BackendPhase::SupercriticalLiquid => Phase::SupercriticalLiquid,
            BackendPhase::SupercriticalGas => Phase::SupercriticalGas,
            BackendPhase::Supercritical => Phase::Supercritical,
            BackendPhase::CriticalPoint => Phase::CriticalPoint,
            BackendPhase::Unknown | BackendPhase::NotImposed => Phase::Unknown,
        }
    }
}
