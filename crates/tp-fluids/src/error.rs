//! Fluid property errors.

use crate::units::Quantity;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors raised by the property engine.
///
/// Input validation variants are raised before any oracle query. Oracle
/// failures surface as [`FluidError::Oracle`] on their own, or wrapped by a
/// strict calculator into one of the `*Failed` variants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Unit string not recognized for the quantity.
    #[error("Invalid {quantity} unit: {unit}")]
    InvalidUnit { unit: String, quantity: Quantity },

    /// Quantity has no unit conversion table.
    #[error("Invalid property type for unit conversion: {quantity}")]
    InvalidQuantityKind { quantity: Quantity },

    /// Saturation type other than temperature or pressure.
    #[error("Invalid saturation type: {sat_type}")]
    InvalidSaturationType { sat_type: String },

    /// Process type outside the six supported paths.
    #[error("Process type '{process}' not implemented")]
    UnsupportedProcessType { process: String },

    /// Mixing model not known to the mixture calculator.
    #[error("Invalid model: {model}")]
    UnknownModel { model: String },

    /// Mixture calculation requested without components.
    #[error("No components provided")]
    EmptyMixture,

    /// Fraction sum is zero so normalization is undefined.
    #[error("Total mole fractions cannot be zero")]
    ZeroTotalFraction,

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Operation not supported by the backend (unknown fluid, input pair, ...).
    #[error("Not supported: {what}")]
    NotSupported { what: String },

    /// The property oracle could not resolve the requested state.
    #[error("Oracle error: {message}")]
    Oracle { message: String },

    /// Strict saturation calculation aborted.
    #[error("Failed to calculate saturation properties: {message}")]
    SaturationCalculationFailed { message: String },

    /// Strict single-point calculation aborted.
    #[error("Failed to calculate properties: {message}")]
    PointCalculationFailed { message: String },
}

impl FluidError {
    /// Shorthand for an oracle failure.
    pub fn oracle(message: impl Into<String>) -> Self {
        FluidError::Oracle {
            message: message.into(),
        }
    }

    /// True for errors raised before any oracle query.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FluidError::InvalidUnit { .. }
                | FluidError::InvalidQuantityKind { .. }
                | FluidError::InvalidSaturationType { .. }
                | FluidError::UnsupportedProcessType { .. }
                | FluidError::UnknownModel { .. }
                | FluidError::EmptyMixture
                | FluidError::InvalidArg { .. }
        )
    }
}
