//! Result containers returned by the calculators.
//!
//! Shapes are fixed per operation: a failed property shows up as NaN (or the
//! "Unknown" phase label), never as a missing entry.

use crate::oracle::Phase;
use serde::Serialize;
use std::fmt;

/// Real or categorical property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Real(f64),
    Label(String),
}

impl PropertyValue {
    pub fn as_real(&self) -> Option<f64> {
        match self {
            PropertyValue::Real(v) => Some(*v),
            PropertyValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            PropertyValue::Real(_) => None,
            PropertyValue::Label(s) => Some(s),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Real(v) if v.is_nan() => write!(f, "NaN"),
            PropertyValue::Real(v) => write!(f, "{:.6e}", v),
            PropertyValue::Label(s) => f.write_str(s),
        }
    }
}

/// One named entry of a [`PropertyResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyEntry {
    pub name: String,
    pub value: PropertyValue,
    pub unit: String,
}

/// Ordered property name → (value, unit) map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyResult {
    entries: Vec<PropertyEntry>,
}

impl PropertyResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a real-valued entry.
    pub fn push(&mut self, name: &str, value: f64, unit: &str) {
        self.push_value(name, PropertyValue::Real(value), unit);
    }

    /// Append a categorical entry.
    pub fn push_label(&mut self, name: &str, label: impl Into<String>, unit: &str) {
        self.push_value(name, PropertyValue::Label(label.into()), unit);
    }

    fn push_value(&mut self, name: &str, value: PropertyValue, unit: &str) {
        self.entries.push(PropertyEntry {
            name: name.to_string(),
            value,
            unit: unit.to_string(),
        });
    }

    pub fn get(&self, name: &str) -> Option<&PropertyEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Real value of `name`, if present and real.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|e| e.value.as_real())
    }

    /// Label of `name`, if present and categorical.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|e| e.value.as_label())
    }

    pub fn unit(&self, name: &str) -> Option<&str> {
        self.get(name).map(|e| e.unit.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-index state along a simulated process path.
///
/// All sequences share one length; index 0 is the initial state and the last
/// index the final state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessPathResult {
    #[serde(rename = "Temperature")]
    pub temperature: Vec<f64>,
    #[serde(rename = "Pressure")]
    pub pressure: Vec<f64>,
    #[serde(rename = "Enthalpy")]
    pub enthalpy: Vec<f64>,
    #[serde(rename = "Entropy")]
    pub entropy: Vec<f64>,
    #[serde(rename = "Density")]
    pub density: Vec<f64>,
    #[serde(rename = "Internal Energy")]
    pub internal_energy: Vec<f64>,
    #[serde(rename = "Quality")]
    pub quality: Vec<f64>,
    #[serde(rename = "Phase")]
    pub phase: Vec<Phase>,
    #[serde(skip)]
    pub(crate) failed: Vec<bool>,
}

impl ProcessPathResult {
    /// Names of the real-valued sequences, in output order.
    pub const SERIES: [&'static str; 7] = [
        "Temperature",
        "Pressure",
        "Enthalpy",
        "Entropy",
        "Density",
        "Internal Energy",
        "Quality",
    ];

    pub(crate) fn with_len(n: usize) -> Self {
        Self {
            temperature: vec![f64::NAN; n],
            pressure: vec![f64::NAN; n],
            enthalpy: vec![f64::NAN; n],
            entropy: vec![f64::NAN; n],
            density: vec![f64::NAN; n],
            internal_energy: vec![f64::NAN; n],
            quality: vec![f64::NAN; n],
            phase: vec![Phase::Unknown; n],
            failed: vec![false; n],
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// Real-valued sequence by display name.
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        match name {
            "Temperature" => Some(&self.temperature),
            "Pressure" => Some(&self.pressure),
            "Enthalpy" => Some(&self.enthalpy),
            "Entropy" => Some(&self.entropy),
            "Density" => Some(&self.density),
            "Internal Energy" => Some(&self.internal_energy),
            "Quality" => Some(&self.quality),
            _ => None,
        }
    }

    /// Count of samples whose derived state could not be resolved.
    pub fn failed_samples(&self) -> usize {
        self.failed.iter().filter(|&&f| f).count()
    }

    /// Whether sample `index` degraded to NaN.
    pub fn sample_failed(&self, index: usize) -> bool {
        self.failed.get(index).copied().unwrap_or(false)
    }
}

/// Saturation state of a pure fluid: both coexisting phases at one (T, P).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SaturationResult {
    /// Saturation temperature [K]
    pub temperature: f64,
    /// Saturation pressure [Pa]
    pub pressure: f64,
    /// Saturated liquid density [kg/m³]
    pub liquid_density: f64,
    /// Saturated vapor density [kg/m³]
    pub vapor_density: f64,
    /// Saturated liquid enthalpy [J/kg]
    pub liquid_enthalpy: f64,
    /// Saturated vapor enthalpy [J/kg]
    pub vapor_enthalpy: f64,
    /// Saturated liquid entropy [J/(kg·K)]
    pub liquid_entropy: f64,
    /// Saturated vapor entropy [J/(kg·K)]
    pub vapor_entropy: f64,
    /// Latent heat of vaporization, vapor minus liquid enthalpy [J/kg]
    pub latent_heat: f64,
}

impl SaturationResult {
    /// Named view in display order.
    pub fn to_property_result(&self) -> PropertyResult {
        let mut out = PropertyResult::new();
        out.push("Saturation Temperature", self.temperature, "K");
        out.push("Saturation Pressure", self.pressure, "Pa");
        out.push("Liquid Density", self.liquid_density, "kg/m³");
        out.push("Vapor Density", self.vapor_density, "kg/m³");
        out.push("Liquid Enthalpy", self.liquid_enthalpy, "J/kg");
        out.push("Vapor Enthalpy", self.vapor_enthalpy, "J/kg");
        out.push("Liquid Entropy", self.liquid_entropy, "J/kg/K");
        out.push("Vapor Entropy", self.vapor_entropy, "J/kg/K");
        out.push("Latent Heat", self.latent_heat, "J/kg");
        out
    }
}

/// Saturation line sampled around one saturation state.
///
/// Index-aligned like [`ProcessPathResult`]: the swept variable is always
/// finite, the resolved one is NaN where the backend gave no answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaturationCurve {
    /// Saturation temperature [K]
    #[serde(rename = "Temperature")]
    pub temperature: Vec<f64>,
    /// Saturation pressure [Pa]
    #[serde(rename = "Pressure")]
    pub pressure: Vec<f64>,
}

impl SaturationCurve {
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// Count of points that did not resolve.
    pub fn failed_points(&self) -> usize {
        self.temperature
            .iter()
            .zip(&self.pressure)
            .filter(|(t, p)| t.is_nan() || p.is_nan())
            .count()
    }
}
