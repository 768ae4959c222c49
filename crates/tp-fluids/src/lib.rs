//! tp-fluids: thermophysical property engine for thermoprop.
//!
//! Provides:
//! - Unit conversion for temperature and pressure inputs
//! - Fluid identifiers and a searchable catalog
//! - Mixture composition (mole/mass fractions) and mixing-rule calculators
//! - Saturation and single-point property calculators, saturation curves
//! - Process path simulation (isobaric, isothermal, ..., polytropic)
//!
//! # Architecture
//!
//! Every calculator talks to an equation-of-state backend through the
//! [`PropertyOracle`] trait. [`CoolPropOracle`] (CoolProp via `rfluids`) is the
//! production backend; tests swap in deterministic stubs.
//!
//! Calculators fall into two error policies. Saturation and single-point
//! queries are strict and abort on the first oracle failure. Mixture mixing,
//! saturation curves and process paths are tolerant: a failed component or
//! sample degrades to NaN (or an "Unknown" phase) and the call still succeeds.
//!
//! # Example
//!
//! ```no_run
//! use tp_fluids::{CoolPropOracle, PathRequest, ProcessType, process};
//! use tp_core::units::{k, pa};
//!
//! let oracle = CoolPropOracle::new();
//! let request = PathRequest::new("Water", ProcessType::Isobaric, k(298.15), pa(101325.0), 373.15)
//!     .with_points(10);
//! let path = process::simulate(&oracle, &request).unwrap();
//! println!("h(end) = {} J/kg", path.enthalpy[9]);
//! ```

pub mod catalog;
pub mod composition;
pub mod coolprop;
pub mod error;
pub mod mixture;
pub mod oracle;
pub mod point;
pub mod process;
pub mod results;
pub mod saturation;
pub mod species;
pub mod sweeps;
pub mod units;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for ergonomics
pub use catalog::{
    PREDEFINED_MIXTURES, PredefinedMixture, available_fluids, predefined_mixture,
    predefined_mixture_names, search_fluids,
};
pub use composition::{Component, DEFAULT_MOLECULAR_WEIGHT, Mixture};
pub use coolprop::{CoolPropOracle, PREDEFINED_BLENDS};
pub use error::{FluidError, FluidResult};
pub use mixture::{GAMMA_FALLBACK, MixtureModel, MixtureOutcome};
pub use oracle::{FluidConstant, HumidAirParam, Param, Phase, PropertyOracle, StateSpec};
pub use point::PointInput;
pub use process::{
    DEFAULT_NUM_POINTS, DEFAULT_POLYTROPIC_N, PathRequest, ProcessType, simulate, simulate_par,
};
pub use results::{
    ProcessPathResult, PropertyEntry, PropertyResult, PropertyValue, SaturationCurve,
    SaturationResult,
};
pub use saturation::{DEFAULT_CURVE_POINTS, SaturationType};
pub use species::Species;
pub use sweeps::SampleSpacing;
pub use units::{Quantity, from_si, parse_quantity, to_si};
