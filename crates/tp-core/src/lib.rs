//! tp-core: numeric foundation for thermoprop.
//!
//! Contains:
//! - units (uom SI types, constructors, physical constants)
//! - numeric (linear and logarithmic sample spacing)
//! - error (shared error type)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
