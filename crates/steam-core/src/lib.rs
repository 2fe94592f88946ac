//! steam-core: shared foundation for steamlite.
//!
//! Contains:
//! - units (uom quantities + constructors in table units)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
