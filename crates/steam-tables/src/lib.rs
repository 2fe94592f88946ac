//! steam-tables: tabulated water/steam data and the interpolation engine.
//!
//! Contains:
//! - interp (bracketing, 1D interpolation, closed-form inverse)
//! - grid (rectangular pressure x temperature blocks)
//! - piecewise (pressure-ordered block stacks with continuous seams)
//! - saturation (dome boundary table and two-phase mixing)
//! - store / schema (the bundled store and its YAML/JSON file format)
//! - reference (built-in tables)

pub mod error;
pub mod grid;
pub mod interp;
pub mod piecewise;
pub mod reference;
pub mod saturation;
pub mod schema;
pub mod store;

pub use error::{TableError, TableResult};
pub use grid::{Axis, Column, GridTable, PropertyColumns};
pub use interp::{Bracket, bracket, interpolate_1d, invert_1d};
pub use piecewise::{PiecewiseBlock, PiecewiseTable, interpolate_2d_piecewise};
pub use reference::steam_tables;
pub use saturation::{SaturationRow, SaturationState, SaturationTable};
pub use schema::{BlockDef, PiecewiseDef, TABLE_FORMAT_VERSION, TableStoreDef};
pub use store::{TableStore, load, load_json, load_yaml, save_json, save_yaml};
