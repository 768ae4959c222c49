//! Unit conversion between user-facing units and the internal SI representation.
//!
//! Every calculator works in SI: kelvin, pascal, kg/m³, J/kg, J/(kg·K). Raw
//! values arriving from a UI are normalized here first. The conversion
//! constants are fixed (e.g. `psi = 6894.76 Pa`, `barg` offset 1.01325 bar) so
//! results stay reproducible against reference outputs.

use crate::error::{FluidError, FluidResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tp_core::units::constants::{ATM_PA, ZERO_CELSIUS_K};

/// Physical quantity family of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quantity {
    /// Temperature (canonical: K)
    Temperature,
    /// Absolute pressure (canonical: Pa)
    Pressure,
    /// Mass density (canonical: kg/m³)
    Density,
    /// Specific enthalpy (canonical: J/kg)
    SpecificEnthalpy,
    /// Specific entropy (canonical: J/(kg·K))
    SpecificEntropy,
    /// Specific internal energy (canonical: J/kg)
    SpecificEnergy,
    /// Vapor quality (canonical: 0-1)
    Quality,
}

impl Quantity {
    /// Canonical SI unit label.
    pub fn si_unit(self) -> &'static str {
        match self {
            Self::Temperature => "K",
            Self::Pressure => "Pa",
            Self::Density => "kg/m³",
            Self::SpecificEnthalpy | Self::SpecificEnergy => "J/kg",
            Self::SpecificEntropy => "J/kg/K",
            Self::Quality => "-",
        }
    }

    /// Whether `unit` names this quantity's canonical SI unit.
    ///
    /// An empty unit counts as SI.
    pub fn is_si_unit(self, unit: &str) -> bool {
        let unit = unit.trim();
        if unit.is_empty() || unit == self.si_unit() {
            return true;
        }
        match self {
            Self::Density => matches!(unit, "kg/m3" | "kg/m^3"),
            Self::SpecificEntropy => matches!(unit, "J/(kg·K)" | "J/(kg K)" | "J/kg·K"),
            _ => false,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Pressure => write!(f, "pressure"),
            Self::Density => write!(f, "density"),
            Self::SpecificEnthalpy => write!(f, "specific enthalpy"),
            Self::SpecificEntropy => write!(f, "specific entropy"),
            Self::SpecificEnergy => write!(f, "specific internal energy"),
            Self::Quality => write!(f, "quality"),
        }
    }
}

impl FromStr for Quantity {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t" | "temperature" => Ok(Self::Temperature),
            "p" | "pressure" => Ok(Self::Pressure),
            "d" | "density" => Ok(Self::Density),
            "h" | "enthalpy" | "specific enthalpy" => Ok(Self::SpecificEnthalpy),
            "s" | "entropy" | "specific entropy" => Ok(Self::SpecificEntropy),
            "u" | "internal energy" | "specific internal energy" => Ok(Self::SpecificEnergy),
            "q" | "quality" => Ok(Self::Quality),
            _ => Err(FluidError::InvalidArg {
                what: format!("unknown quantity '{}'", s.trim()),
            }),
        }
    }
}

const TEMPERATURE_UNITS: [&str; 5] = ["K", "°C", "C", "°F", "F"];
const PRESSURE_UNITS: [&str; 10] = [
    "Pa", "kPa", "MPa", "bar", "bara", "barg", "atm", "psi", "psia", "psig",
];

/// Unit strings accepted by [`to_si`] for `quantity`.
///
/// Empty for quantities without a conversion table.
pub fn recognized_units(quantity: Quantity) -> &'static [&'static str] {
    match quantity {
        Quantity::Temperature => &TEMPERATURE_UNITS,
        Quantity::Pressure => &PRESSURE_UNITS,
        _ => &[],
    }
}

/// Convert `value` expressed in `unit` to the SI unit of `quantity`.
///
/// Only temperature and pressure carry conversion tables; every other
/// quantity fails with [`FluidError::InvalidQuantityKind`].
pub fn to_si(value: f64, unit: &str, quantity: Quantity) -> FluidResult<f64> {
    match quantity {
        Quantity::Temperature => match unit.trim() {
            "K" => Ok(value),
            "°C" | "C" => Ok(value + ZERO_CELSIUS_K),
            "°F" | "F" => Ok((value - 32.0) * 5.0 / 9.0 + ZERO_CELSIUS_K),
            other => Err(invalid_unit(other, quantity)),
        },
        Quantity::Pressure => match unit.trim() {
            "Pa" => Ok(value),
            "kPa" => Ok(value * 1000.0),
            "MPa" => Ok(value * 1e6),
            "bar" | "bara" => Ok(value * 1e5),
            "barg" => Ok((value + 1.01325) * 1e5),
            "atm" => Ok(value * ATM_PA),
            "psi" | "psia" => Ok(value * 6894.76),
            "psig" => Ok((value + 14.696) * 6894.76),
            other => Err(invalid_unit(other, quantity)),
        },
        _ => Err(FluidError::InvalidQuantityKind { quantity }),
    }
}

/// Convert an SI `value` of `quantity` into `unit`; inverse of [`to_si`].
pub fn from_si(value: f64, unit: &str, quantity: Quantity) -> FluidResult<f64> {
    match quantity {
        Quantity::Temperature => match unit.trim() {
            "K" => Ok(value),
            "°C" | "C" => Ok(value - ZERO_CELSIUS_K),
            "°F" | "F" => Ok((value - ZERO_CELSIUS_K) * 9.0 / 5.0 + 32.0),
            other => Err(invalid_unit(other, quantity)),
        },
        Quantity::Pressure => match unit.trim() {
            "Pa" => Ok(value),
            "kPa" => Ok(value / 1000.0),
            "MPa" => Ok(value / 1e6),
            "bar" | "bara" => Ok(value / 1e5),
            "barg" => Ok(value / 1e5 - 1.01325),
            "atm" => Ok(value / ATM_PA),
            "psi" | "psia" => Ok(value / 6894.76),
            "psig" => Ok(value / 6894.76 - 14.696),
            other => Err(invalid_unit(other, quantity)),
        },
        _ => Err(FluidError::InvalidQuantityKind { quantity }),
    }
}

fn invalid_unit(unit: &str, quantity: Quantity) -> FluidError {
    FluidError::InvalidUnit {
        unit: unit.to_string(),
        quantity,
    }
}

/// Parse free text such as `"100 °C"` or `"14.7psia"` into an SI value.
///
/// Text without a unit is taken as already SI. Units go through [`to_si`],
/// except that a quantity's own SI unit is always accepted.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> FluidResult<f64> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    if quantity.is_si_unit(&unit) {
        return Ok(value);
    }
    to_si(value, &unit, quantity)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// - "70F" -> (70.0, "F")
/// - "14.7 psia" -> (14.7, "psia")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> FluidResult<(f64, String)> {
    let trimmed = input.trim();

    let split_idx = trimmed
        .char_indices()
        .find(|&(i, c)| !is_numeric_char(trimmed, i, c))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| FluidError::InvalidArg {
        what: format!("could not parse numeric value from '{}'", input),
    })?;

    Ok((value, unit_part.trim().to_string()))
}

/// Digits, sign and decimal point, plus an exponent marker only when a digit
/// follows it (so "1e5" parses but the "e" of a unit does not).
fn is_numeric_char(text: &str, idx: usize, c: char) -> bool {
    if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' {
        return true;
    }
    if c == 'e' || c == 'E' {
        return text[idx + 1..]
            .chars()
            .next()
            .is_some_and(|n| n.is_ascii_digit() || n == '-' || n == '+');
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_constants_are_exact() {
        assert_eq!(to_si(300.0, "K", Quantity::Temperature).unwrap(), 300.0);
        assert_eq!(to_si(100.0, "°C", Quantity::Temperature).unwrap(), 100.0 + 273.15);
        assert_eq!(to_si(25.0, "C", Quantity::Temperature).unwrap(), 25.0 + 273.15);
        assert_eq!(
            to_si(212.0, "°F", Quantity::Temperature).unwrap(),
            (212.0 - 32.0) * 5.0 / 9.0 + 273.15
        );
        assert!((to_si(32.0, "F", Quantity::Temperature).unwrap() - 273.15).abs() < 1e-12);
    }

    #[test]
    fn pressure_constants_are_exact() {
        let p = |v: f64, u: &str| to_si(v, u, Quantity::Pressure).unwrap();
        assert_eq!(p(101325.0, "Pa"), 101325.0);
        assert_eq!(p(1.5, "kPa"), 1500.0);
        assert_eq!(p(2.0, "MPa"), 2e6);
        assert_eq!(p(1.0, "bar"), 1e5);
        assert_eq!(p(1.0, "bara"), 1e5);
        assert_eq!(p(0.0, "barg"), 1.01325 * 1e5);
        assert_eq!(p(1.0, "atm"), 101325.0);
        assert_eq!(p(1.0, "psi"), 6894.76);
        assert_eq!(p(1.0, "psia"), 6894.76);
        assert_eq!(p(0.0, "psig"), 14.696 * 6894.76);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert_eq!(
            to_si(1.0, "mmHg", Quantity::Pressure),
            Err(FluidError::InvalidUnit {
                unit: "mmHg".into(),
                quantity: Quantity::Pressure,
            })
        );
        // Units are case-sensitive: "mpa" is not "MPa".
        assert!(to_si(1.0, "mpa", Quantity::Pressure).is_err());
        // A pressure unit is not a temperature unit.
        assert!(matches!(
            to_si(1.0, "bar", Quantity::Temperature),
            Err(FluidError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn only_temperature_and_pressure_convert() {
        for quantity in [
            Quantity::Density,
            Quantity::SpecificEnthalpy,
            Quantity::SpecificEntropy,
            Quantity::SpecificEnergy,
            Quantity::Quality,
        ] {
            assert_eq!(
                to_si(1.0, "J/kg", quantity),
                Err(FluidError::InvalidQuantityKind { quantity })
            );
            assert!(from_si(1.0, "J/kg", quantity).is_err());
            assert!(recognized_units(quantity).is_empty());
        }
    }

    #[test]
    fn boiling_point_round_trip() {
        let kelvin = to_si(100.0, "°C", Quantity::Temperature).unwrap();
        let back = from_si(kelvin, "°C", Quantity::Temperature).unwrap();
        assert!((back - 100.0).abs() < 1e-9);
    }

    #[test]
    fn quantity_parses_short_keys() {
        assert_eq!("T".parse::<Quantity>().unwrap(), Quantity::Temperature);
        assert_eq!("p".parse::<Quantity>().unwrap(), Quantity::Pressure);
        assert_eq!("H".parse::<Quantity>().unwrap(), Quantity::SpecificEnthalpy);
        assert!("X".parse::<Quantity>().is_err());
    }

    #[test]
    fn parse_text_with_units() {
        assert_eq!(parse_quantity("300 K", Quantity::Temperature).unwrap(), 300.0);
        assert_eq!(parse_quantity("100°C", Quantity::Temperature).unwrap(), 100.0 + 273.15);
        assert_eq!(parse_quantity("1 bar", Quantity::Pressure).unwrap(), 1e5);
        assert_eq!(parse_quantity("1e5", Quantity::Pressure).unwrap(), 1e5);
        assert_eq!(parse_quantity("2.5e-1 MPa", Quantity::Pressure).unwrap(), 2.5e5);
        assert_eq!(parse_quantity("997 kg/m3", Quantity::Density).unwrap(), 997.0);
        assert!(parse_quantity("abc", Quantity::Temperature).is_err());
        assert!(parse_quantity("10 furlong", Quantity::Pressure).is_err());
    }
}
