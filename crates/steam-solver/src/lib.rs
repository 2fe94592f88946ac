//! steam-solver: region classification and the multi-property state solver.

pub mod config;
pub mod error;
pub mod property;
pub mod region;
pub mod solver;

pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use property::{PropertyId, PropertyVector, StateQuery};
pub use region::{Region, classify_region, classify_region_by_pressure};
pub use solver::{ROUTES, Route, Solver, StateResult, needs};
