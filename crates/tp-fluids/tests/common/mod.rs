//! Shared ideal-gas oracle for integration tests.

#![allow(dead_code)]

use tp_fluids::{
    FluidConstant, FluidError, FluidResult, HumidAirParam, Param, Phase, PropertyOracle,
    StateSpec,
};

const R: f64 = 8.314462618;

/// (name, molar mass [kg/mol], cp [J/kg/K])
const GASES: [(&str, f64, f64); 4] = [
    ("Water", 0.018015, 1996.0),
    ("Nitrogen", 0.0280134, 1040.0),
    ("Oxygen", 0.0319988, 918.0),
    ("Argon", 0.039948, 520.0),
];

/// Saturation pressure of the crude water curve [Pa].
pub fn water_psat(t: f64) -> f64 {
    101_325.0 * (12.0 * (1.0 - 373.15 / t)).exp()
}

/// Humidity ratio [kg/kg] at relative humidity `rh` (0-1).
pub fn humidity_ratio(t: f64, p: f64, rh: f64) -> f64 {
    let pv = rh * water_psat(t);
    0.621945 * pv / (p - pv)
}

/// Calorically perfect gases with a crude water saturation curve.
///
/// States hotter than `t_max` are reported as outside the backend's range.
/// Humid-air queries are answered only when `humid_air` is set.
pub struct IdealGasOracle {
    pub t_max: f64,
    pub humid_air: bool,
}

impl Default for IdealGasOracle {
    fn default() -> Self {
        Self {
            t_max: 2000.0,
            humid_air: false,
        }
    }
}

impl IdealGasOracle {
    pub fn with_t_max(t_max: f64) -> Self {
        Self {
            t_max,
            ..Self::default()
        }
    }

    pub fn with_humid_air() -> Self {
        Self {
            humid_air: true,
            ..Self::default()
        }
    }

    fn gas(&self, fluid: &str) -> FluidResult<(f64, f64)> {
        GASES
            .iter()
            .find(|(name, ..)| name.eq_ignore_ascii_case(fluid))
            .map(|&(_, m, cp)| (m, cp))
            .ok_or_else(|| FluidError::oracle(format!("unknown fluid {}", fluid)))
    }

    /// (T, P, quality) of a state; quality is -1 for single phase.
    fn locate(&self, state: StateSpec, fluid: &str) -> FluidResult<(f64, f64, f64)> {
        let (m, cp) = self.gas(fluid)?;
        let r = R / m;
        let (t, p, q) = match (state.first, state.second) {
            ((Param::Temperature, t), (Param::Pressure, p)) => (t, p, -1.0),
            ((Param::Temperature, t), (Param::Density, d)) => (t, d * r * t, -1.0),
            ((Param::Pressure, p), (Param::Enthalpy, h)) => (h / cp, p, -1.0),
            ((Param::Pressure, p), (Param::Entropy, s)) => (((s + r * p.ln()) / cp).exp(), p, -1.0),
            ((Param::Temperature, t), (Param::Quality, q)) if fluid == "Water" => {
                (t, water_psat(t), q)
            }
            _ => return Err(FluidError::oracle(format!("unsupported inputs {}", state))),
        };
        if !(t > 0.0 && p > 0.0) || t > self.t_max {
            return Err(FluidError::oracle(format!("state out of range: {}", state)));
        }
        Ok((t, p, q))
    }
}

impl PropertyOracle for IdealGasOracle {
    fn name(&self) -> &str {
        "ideal-gas"
    }

    fn query(&self, output: Param, state: StateSpec, fluid: &str) -> FluidResult<f64> {
        let (m, cp) = self.gas(fluid)?;
        let r = R / m;
        let (t, p, q) = self.locate(state, fluid)?;
        let (h, s, d) = if q >= 0.0 {
            let hl = 4186.0 * (t - 273.15);
            let h = hl + q * 2.26e6;
            let dv = p / (r * t);
            (h, h / t, 1.0 / ((1.0 - q) / 958.0 + q / dv))
        } else {
            (cp * t, cp * t.ln() - r * p.ln(), p / (r * t))
        };
        Ok(match output {
            Param::Temperature => t,
            Param::Pressure => p,
            Param::Density => d,
            Param::Enthalpy => h,
            Param::Entropy => s,
            Param::InternalEnergy => h - p / d,
            Param::Quality => q,
            Param::Cp => cp,
            Param::Cv => cp - r,
            Param::Viscosity => 1.8e-5,
            Param::Conductivity => 0.026,
            Param::SpeedOfSound => (cp / (cp - r) * r * t).sqrt(),
            Param::SurfaceTension => {
                return Err(FluidError::oracle("no surface tension"));
            }
        })
    }

    fn query_constant(&self, constant: FluidConstant, fluid: &str) -> FluidResult<f64> {
        match constant {
            FluidConstant::MolarMass => self.gas(fluid).map(|(m, _)| m),
            other => Err(FluidError::NotSupported {
                what: format!("{:?}", other),
            }),
        }
    }

    fn query_phase(&self, state: StateSpec, fluid: &str) -> FluidResult<Phase> {
        let (_, _, q) = self.locate(state, fluid)?;
        Ok(if q >= 0.0 { Phase::TwoPhase } else { Phase::Gas })
    }

    fn query_humid_air(&self, output: HumidAirParam, t: f64, p: f64, rh: f64) -> FluidResult<f64> {
        if !self.humid_air {
            return Err(FluidError::NotSupported {
                what: "humid air".to_string(),
            });
        }
        let w = humidity_ratio(t, p, rh);
        let tc = t - 273.15;
        Ok(match output {
            HumidAirParam::SpecificVolume => 287.055 * t / p * (1.0 + 1.6078 * w),
            HumidAirParam::Enthalpy => 1006.0 * tc + w * (2.501e6 + 1860.0 * tc),
            HumidAirParam::Entropy => 1006.0 * (t / 273.15).ln(),
            HumidAirParam::HumidityRatio => w,
        })
    }
}
