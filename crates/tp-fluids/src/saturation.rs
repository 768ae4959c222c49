//! Saturation properties of a pure fluid.
//!
//! [`compute`] is strict: the first failure after the saturation type is
//! parsed, whether a bad unit or an unresolvable state, aborts the whole
//! calculation with [`FluidError::SaturationCalculationFailed`].
//!
//! [`curve`] is tolerant: a point that does not resolve is NaN and the curve
//! keeps its length.

use crate::error::{FluidError, FluidResult};
use crate::oracle::{FluidConstant, Param, PropertyOracle, StateSpec};
use crate::results::{SaturationCurve, SaturationResult};
use crate::units::{Quantity, to_si};
use std::fmt;
use std::str::FromStr;
use tp_core::numeric::linspace;
use tracing::debug;

/// Default number of samples on a saturation curve.
pub const DEFAULT_CURVE_POINTS: usize = 50;

/// Stand-in triple point (water) when the backend has none: (T [K], P [Pa]).
const FALLBACK_TRIPLE: (f64, f64) = (273.16, 611.657);

/// Which saturation property the user specifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaturationType {
    /// Saturation temperature given, pressure resolved.
    Temperature,
    /// Saturation pressure given, temperature resolved.
    Pressure,
}

impl SaturationType {
    pub fn quantity(self) -> Quantity {
        match self {
            SaturationType::Temperature => Quantity::Temperature,
            SaturationType::Pressure => Quantity::Pressure,
        }
    }
}

impl fmt::Display for SaturationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaturationType::Temperature => write!(f, "T"),
            SaturationType::Pressure => write!(f, "P"),
        }
    }
}

impl FromStr for SaturationType {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "T" => Ok(SaturationType::Temperature),
            "P" => Ok(SaturationType::Pressure),
            other => Err(FluidError::InvalidSaturationType {
                sat_type: other.to_string(),
            }),
        }
    }
}

/// Resolve the saturation state of `fluid` from one saturation condition.
///
/// `value` is expressed in `unit`, which must suit `sat_type`.
pub fn compute(
    oracle: &dyn PropertyOracle,
    fluid: &str,
    sat_type: SaturationType,
    value: f64,
    unit: &str,
) -> FluidResult<SaturationResult> {
    resolve(oracle, fluid, sat_type, value, unit).map_err(|e| {
        FluidError::SaturationCalculationFailed {
            message: e.to_string(),
        }
    })
}

fn resolve(
    oracle: &dyn PropertyOracle,
    fluid: &str,
    sat_type: SaturationType,
    value: f64,
    unit: &str,
) -> FluidResult<SaturationResult> {
    let si = to_si(value, unit, sat_type.quantity())?;
    let (t_sat, p_sat) = match sat_type {
        SaturationType::Temperature => {
            (si, oracle.query(Param::Pressure, StateSpec::tq(si, 0.0), fluid)?)
        }
        SaturationType::Pressure => {
            (oracle.query(Param::Temperature, StateSpec::pq(si, 0.0), fluid)?, si)
        }
    };

    let outputs = [Param::Density, Param::Enthalpy, Param::Entropy];
    let liquid = oracle.query_many(&outputs, StateSpec::tq(t_sat, 0.0), fluid)?;
    let vapor = oracle.query_many(&outputs, StateSpec::tq(t_sat, 1.0), fluid)?;
    let ([d_l, h_l, s_l], [d_v, h_v, s_v]) = (three(liquid)?, three(vapor)?);

    Ok(SaturationResult {
        temperature: t_sat,
        pressure: p_sat,
        liquid_density: d_l,
        vapor_density: d_v,
        liquid_enthalpy: h_l,
        vapor_enthalpy: h_v,
        liquid_entropy: s_l,
        vapor_entropy: s_v,
        latent_heat: h_v - h_l,
    })
}

/// Sample the saturation line of `fluid` around the state given by `value`
/// in `unit`.
///
/// The swept variable (`sat_type`) spans 80 % to 120 % of the given value,
/// clipped below by the triple point and above by 99 % of the critical point.
/// A missing triple point falls back to water's, a missing critical point to
/// 1.5 times the given value. The other variable is resolved on the
/// saturated-liquid line.
pub fn curve(
    oracle: &dyn PropertyOracle,
    fluid: &str,
    sat_type: SaturationType,
    value: f64,
    unit: &str,
    num_points: usize,
) -> FluidResult<SaturationCurve> {
    if num_points == 0 {
        return Err(FluidError::InvalidArg {
            what: "a saturation curve needs at least one point".to_string(),
        });
    }
    let center = to_si(value, unit, sat_type.quantity())?;
    let (triple, critical, triple_fallback) = match sat_type {
        SaturationType::Temperature => (
            FluidConstant::TripleTemperature,
            FluidConstant::CriticalTemperature,
            FALLBACK_TRIPLE.0,
        ),
        SaturationType::Pressure => (
            FluidConstant::TriplePressure,
            FluidConstant::CriticalPressure,
            FALLBACK_TRIPLE.1,
        ),
    };
    let lower = constant_or(oracle, triple, fluid, triple_fallback).max(0.8 * center);
    let upper = (0.99 * constant_or(oracle, critical, fluid, 1.5 * center)).min(1.2 * center);

    let swept = linspace(lower, upper, num_points);
    let resolved: Vec<f64> = swept
        .iter()
        .map(|&x| {
            let (output, state) = match sat_type {
                SaturationType::Temperature => (Param::Pressure, StateSpec::tq(x, 0.0)),
                SaturationType::Pressure => (Param::Temperature, StateSpec::pq(x, 0.0)),
            };
            oracle.query(output, state, fluid).unwrap_or_else(|e| {
                debug!(fluid, state = %state, error = %e, "saturation point unresolved");
                f64::NAN
            })
        })
        .collect();

    Ok(match sat_type {
        SaturationType::Temperature => SaturationCurve {
            temperature: swept,
            pressure: resolved,
        },
        SaturationType::Pressure => SaturationCurve {
            temperature: resolved,
            pressure: swept,
        },
    })
}

fn constant_or(
    oracle: &dyn PropertyOracle,
    constant: FluidConstant,
    fluid: &str,
    fallback: f64,
) -> f64 {
    match oracle.query_constant(constant, fluid) {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        Ok(v) => {
            debug!(fluid, ?constant, value = v, "non-physical constant, using fallback");
            fallback
        }
        Err(e) => {
            debug!(fluid, ?constant, error = %e, "constant unavailable, using fallback");
            fallback
        }
    }
}

fn three(values: Vec<f64>) -> FluidResult<[f64; 3]> {
    <[f64; 3]>::try_from(values)
        .map_err(|v| FluidError::oracle(format!("expected 3 outputs, got {}", v.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubOracle, WATER_TRIPLE, water_psat, water_tsat};

    #[test]
    fn saturation_type_parsing() {
        assert_eq!("T".parse::<SaturationType>().unwrap(), SaturationType::Temperature);
        assert_eq!("P".parse::<SaturationType>().unwrap(), SaturationType::Pressure);
        assert_eq!(
            "X".parse::<SaturationType>(),
            Err(FluidError::InvalidSaturationType {
                sat_type: "X".into()
            })
        );
    }

    #[test]
    fn water_at_boiling_point() {
        let oracle = StubOracle::new();
        let sat = compute(&oracle, "Water", SaturationType::Temperature, 100.0, "°C").unwrap();

        assert_eq!(sat.temperature, 100.0 + 273.15);
        assert!((sat.pressure - water_psat(373.15)).abs() < 1e-6);
        assert!(sat.liquid_density > sat.vapor_density);
        assert!(sat.latent_heat > 0.0);
        assert_eq!(sat.latent_heat, sat.vapor_enthalpy - sat.liquid_enthalpy);
    }

    #[test]
    fn pressure_input_resolves_temperature() {
        let oracle = StubOracle::new();
        let sat = compute(&oracle, "Water", SaturationType::Pressure, 1.01325, "bar").unwrap();
        assert!((sat.temperature - 373.15).abs() < 1e-6);
        assert!((sat.pressure - 101_325.0).abs() < 1e-6);
    }

    #[test]
    fn bad_unit_is_wrapped() {
        let oracle = StubOracle::new();
        let err = compute(&oracle, "Water", SaturationType::Temperature, 100.0, "Pa").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to calculate saturation properties: Invalid temperature unit: Pa"
        );
    }

    #[test]
    fn oracle_failure_aborts() {
        // The stub has no two-phase region for nitrogen.
        let oracle = StubOracle::new();
        let err = compute(&oracle, "Nitrogen", SaturationType::Temperature, 77.0, "K").unwrap_err();
        assert!(matches!(err, FluidError::SaturationCalculationFailed { .. }));
    }

    #[test]
    fn water_curve_around_boiling_point() {
        let oracle = StubOracle::new();
        let c = curve(&oracle, "Water", SaturationType::Temperature, 100.0, "°C", 50).unwrap();

        assert_eq!(c.len(), 50);
        assert_eq!(c.pressure.len(), 50);
        assert_eq!(c.failed_points(), 0);
        assert!((c.temperature[0] - 0.8 * 373.15).abs() < 1e-9);
        assert!((c.temperature[49] - 1.2 * 373.15).abs() < 1e-9);
        for (t, p) in c.temperature.iter().zip(&c.pressure) {
            assert!((p - water_psat(*t)).abs() < 1e-6 * p);
        }
        assert!(c.pressure.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn curve_is_clipped_at_triple_and_critical_points() {
        let oracle = StubOracle::new();
        let cold = curve(&oracle, "Water", SaturationType::Temperature, 280.0, "K", 5).unwrap();
        assert_eq!(cold.temperature[0], WATER_TRIPLE.0);

        let hot = curve(&oracle, "Water", SaturationType::Temperature, 600.0, "K", 5).unwrap();
        assert!((hot.temperature[4] - 0.99 * 647.096).abs() < 1e-9);
    }

    #[test]
    fn pressure_curve_resolves_temperatures() {
        let oracle = StubOracle::new();
        let c = curve(&oracle, "Water", SaturationType::Pressure, 1.0, "bar", 11).unwrap();
        assert!((c.pressure[0] - 0.8e5).abs() < 1e-6);
        assert!((c.pressure[10] - 1.2e5).abs() < 1e-6);
        for (t, p) in c.temperature.iter().zip(&c.pressure) {
            assert!((t - water_tsat(*p)).abs() < 1e-9);
        }
    }

    #[test]
    fn unresolved_points_are_nan_and_constants_fall_back() {
        // No two-phase region and no constants for nitrogen in the stub.
        let oracle = StubOracle::new();
        let c = curve(&oracle, "Nitrogen", SaturationType::Temperature, 100.0, "K", 7).unwrap();
        assert_eq!(c.len(), 7);
        assert_eq!(c.failed_points(), 7);
        assert!(c.pressure.iter().all(|p| p.is_nan()));
        // Triple fallback 273.16 K lies above 80 K, so the sweep starts there.
        assert_eq!(c.temperature[0], 273.16);
        assert!((c.temperature[6] - 120.0).abs() < 1e-9);
    }

    #[test]
    fn curve_argument_errors() {
        let oracle = StubOracle::new();
        assert!(matches!(
            curve(&oracle, "Water", SaturationType::Temperature, 100.0, "°C", 0),
            Err(FluidError::InvalidArg { .. })
        ));
        assert!(matches!(
            curve(&oracle, "Water", SaturationType::Pressure, 1.0, "°C", 10),
            Err(FluidError::InvalidUnit { .. })
        ));
    }
}
