//! On-disk table file format.

use serde::{Deserialize, Serialize};

use crate::saturation::SaturationRow;

pub const TABLE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableStoreDef {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub saturation: Vec<SaturationRow>,
    pub superheated: PiecewiseDef,
    pub compressed: PiecewiseDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PiecewiseDef {
    pub blocks: Vec<BlockDef>,
}

/// One rectangular block. Every property matrix is indexed
/// `[pressure][temperature]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockDef {
    /// kPa
    pub pressures: Vec<f64>,
    /// °C
    pub temperatures: Vec<f64>,
    pub specific_volume: Vec<Vec<f64>>,
    pub internal_energy: Vec<Vec<f64>>,
    pub enthalpy: Vec<Vec<f64>>,
    pub entropy: Vec<Vec<f64>>,
}
