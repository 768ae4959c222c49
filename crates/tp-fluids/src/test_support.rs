//! Deterministic oracle for unit tests.
//!
//! Models every known fluid as a calorically perfect ideal gas, with a crude
//! two-phase dome for water. Numbers are self-consistent, not physical.

use crate::error::{FluidError, FluidResult};
use crate::oracle::{FluidConstant, HumidAirParam, Param, Phase, PropertyOracle, StateSpec};
use std::collections::HashSet;

const R: f64 = 8.314462618;

/// (name, molar mass kg/mol, cp J/(kg·K), viscosity Pa·s, conductivity W/(m·K))
const FLUIDS: [(&str, f64, f64, f64, f64); 7] = [
    ("Nitrogen", 0.0280134, 1040.0, 1.76e-5, 0.0259),
    ("Oxygen", 0.0319988, 918.0, 2.04e-5, 0.0263),
    ("Argon", 0.039948, 520.0, 2.23e-5, 0.0177),
    ("CO2", 0.0440095, 846.0, 1.49e-5, 0.0166),
    ("Methane", 0.016043, 2220.0, 1.10e-5, 0.0343),
    ("Water", 0.018015, 1996.0, 1.00e-5, 0.0196),
    ("Helium", 0.0040026, 5193.0, 1.99e-5, 0.1513),
];

#[derive(Debug, Clone, Copy)]
struct Gas {
    molar_mass: f64,
    cp: f64,
    viscosity: f64,
    conductivity: f64,
}

impl Gas {
    fn r(&self) -> f64 {
        R / self.molar_mass
    }

    fn cv(&self) -> f64 {
        self.cp - self.r()
    }
}

fn canonical(fluid: &str) -> &str {
    match fluid.trim().to_ascii_lowercase().as_str() {
        "n2" | "nitrogen" => "Nitrogen",
        "o2" | "oxygen" => "Oxygen",
        "ar" | "argon" => "Argon",
        "co2" | "carbondioxide" => "CO2",
        "ch4" | "methane" => "Methane",
        "h2o" | "water" => "Water",
        "he" | "helium" => "Helium",
        _ => "",
    }
}

/// (T [K], P [Pa]) of the water critical point.
pub(crate) const WATER_CRITICAL: (f64, f64) = (647.096, 22.064e6);
/// (T [K], P [Pa]) of the water triple point.
pub(crate) const WATER_TRIPLE: (f64, f64) = (273.16, 611.657);

/// Saturation pressure of the stub water dome [Pa].
pub(crate) fn water_psat(t: f64) -> f64 {
    101_325.0 * (13.0 * (1.0 - 373.15 / t)).exp()
}

pub(crate) fn water_tsat(p: f64) -> f64 {
    373.15 / (1.0 - (p / 101_325.0).ln() / 13.0)
}

/// Ideal-gas stub with failure injection.
#[derive(Debug, Default)]
pub(crate) struct StubOracle {
    failing_fluids: HashSet<String>,
    fail_above_t: Option<f64>,
    humid_air_fails: bool,
    phase_fails: bool,
    extra_fluids: Vec<String>,
}

impl StubOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every query for `fluid` fails.
    pub fn failing_fluid(mut self, fluid: &str) -> Self {
        self.failing_fluids.insert(canonical(fluid).to_string());
        self
    }

    /// State queries with a temperature input above `t` fail.
    pub fn failing_above(mut self, t: f64) -> Self {
        self.fail_above_t = Some(t);
        self
    }

    /// Advertise `names` as backend fluids outside the species catalog.
    pub fn with_extra_fluids(mut self, names: &[&str]) -> Self {
        self.extra_fluids = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Every phase query fails; property queries still resolve.
    pub fn failing_phase(mut self) -> Self {
        self.phase_fails = true;
        self
    }

    /// Every humid-air query fails.
    pub fn failing_humid_air(mut self) -> Self {
        self.humid_air_fails = true;
        self
    }

    fn gas(&self, fluid: &str) -> FluidResult<(&'static str, Gas)> {
        let name = canonical(fluid);
        if self.failing_fluids.contains(name) {
            return Err(FluidError::oracle(format!("stub failure for {}", fluid)));
        }
        FLUIDS
            .iter()
            .find(|(n, ..)| *n == name)
            .map(|&(n, molar_mass, cp, viscosity, conductivity)| {
                (
                    n,
                    Gas {
                        molar_mass,
                        cp,
                        viscosity,
                        conductivity,
                    },
                )
            })
            .ok_or_else(|| FluidError::oracle(format!("unknown fluid {}", fluid)))
    }

    /// Resolve (T, P, D, quality) for a state; quality is -1 when single phase.
    fn resolve(&self, state: StateSpec, name: &str, gas: Gas) -> FluidResult<(f64, f64, f64, f64)> {
        let r = gas.r();
        let fail = || FluidError::oracle(format!("stub cannot resolve {}", state));
        let (t, p, q) = if let (Some(t), Some(p)) =
            (state.input(Param::Temperature), state.input(Param::Pressure))
        {
            (t, p, -1.0)
        } else if let (Some(t), Some(d)) =
            (state.input(Param::Temperature), state.input(Param::Density))
        {
            (t, d * r * t, -1.0)
        } else if let (Some(p), Some(h)) =
            (state.input(Param::Pressure), state.input(Param::Enthalpy))
        {
            (h / gas.cp, p, -1.0)
        } else if let (Some(p), Some(s)) =
            (state.input(Param::Pressure), state.input(Param::Entropy))
        {
            (((s + r * p.ln()) / gas.cp).exp(), p, -1.0)
        } else if let (Some(t), Some(q)) =
            (state.input(Param::Temperature), state.input(Param::Quality))
        {
            if name != "Water" {
                return Err(fail());
            }
            (t, water_psat(t), q)
        } else if let (Some(p), Some(q)) =
            (state.input(Param::Pressure), state.input(Param::Quality))
        {
            if name != "Water" {
                return Err(fail());
            }
            (water_tsat(p), p, q)
        } else {
            return Err(fail());
        };

        if !(t.is_finite() && p.is_finite()) || t <= 0.0 || p <= 0.0 {
            return Err(fail());
        }
        if self.fail_above_t.is_some_and(|limit| t > limit) {
            return Err(FluidError::oracle(format!("stub limit exceeded at T={}", t)));
        }
        let d = if q >= 0.0 {
            let dv = p / (r * t);
            1.0 / ((1.0 - q) / 1000.0 + q / dv)
        } else {
            p / (r * t)
        };
        Ok((t, p, d, q))
    }
}

impl PropertyOracle for StubOracle {
    fn name(&self) -> &str {
        "stub"
    }

    fn query(&self, output: Param, state: StateSpec, fluid: &str) -> FluidResult<f64> {
        let (name, gas) = self.gas(fluid)?;
        let (t, p, d, q) = self.resolve(state, name, gas)?;
        let r = gas.r();
        let (h, s) = if q >= 0.0 {
            let hl = 4180.0 * (t - 273.15);
            let hv = hl + 2.257e6 * (647.0 - t) / (647.0 - 373.15);
            let h = hl + q * (hv - hl);
            (h, h / t)
        } else {
            (gas.cp * t, gas.cp * t.ln() - r * p.ln())
        };
        Ok(match output {
            Param::Temperature => t,
            Param::Pressure => p,
            Param::Density => d,
            Param::Enthalpy => h,
            Param::Entropy => s,
            Param::InternalEnergy => h - p / d,
            Param::Quality => q,
            Param::Cp => gas.cp,
            Param::Cv => gas.cv(),
            Param::Viscosity => gas.viscosity,
            Param::Conductivity => gas.conductivity,
            Param::SpeedOfSound => (gas.cp / gas.cv() * r * t).sqrt(),
            Param::SurfaceTension => {
                return Err(FluidError::oracle("surface tension undefined for a gas"));
            }
        })
    }

    fn query_constant(&self, constant: FluidConstant, fluid: &str) -> FluidResult<f64> {
        let (name, gas) = self.gas(fluid)?;
        match (constant, name) {
            (FluidConstant::MolarMass, _) => Ok(gas.molar_mass),
            (FluidConstant::CriticalTemperature, "Water") => Ok(WATER_CRITICAL.0),
            (FluidConstant::CriticalPressure, "Water") => Ok(WATER_CRITICAL.1),
            (FluidConstant::TripleTemperature, "Water") => Ok(WATER_TRIPLE.0),
            (FluidConstant::TriplePressure, "Water") => Ok(WATER_TRIPLE.1),
            _ => Err(FluidError::NotSupported {
                what: format!("{:?} of {} in stub", constant, name),
            }),
        }
    }

    fn fluid_names(&self) -> Vec<String> {
        FLUIDS
            .iter()
            .map(|(name, ..)| name.to_string())
            .chain(self.extra_fluids.iter().cloned())
            .collect()
    }

    fn query_phase(&self, state: StateSpec, fluid: &str) -> FluidResult<Phase> {
        if self.phase_fails {
            return Err(FluidError::oracle("stub phase failure"));
        }
        let (name, gas) = self.gas(fluid)?;
        let (_, _, _, q) = self.resolve(state, name, gas)?;
        Ok(if q >= 0.0 { Phase::TwoPhase } else { Phase::Gas })
    }

    fn query_humid_air(&self, output: HumidAirParam, t: f64, p: f64, rh: f64) -> FluidResult<f64> {
        if self.humid_air_fails {
            return Err(FluidError::oracle("stub humid air failure"));
        }
        let pv = rh * water_psat(t);
        let w = 0.621945 * pv / (p - pv);
        let tc = t - 273.15;
        Ok(match output {
            HumidAirParam::SpecificVolume => 287.055 * t / p * (1.0 + 1.6078 * w) / (1.0 + w),
            HumidAirParam::Enthalpy => 1006.0 * tc + w * (2.501e6 + 1860.0 * tc),
            HumidAirParam::Entropy => 1006.0 * (t / 273.15).ln(),
            HumidAirParam::HumidityRatio => w,
        })
    }
}
