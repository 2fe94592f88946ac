//! The table store: saturation, superheated and compressed-liquid tables
//! bundled together, plus YAML/JSON persistence.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{TableError, TableResult};
use crate::grid::{Axis, Column, GridTable, PropertyColumns};
use crate::piecewise::PiecewiseTable;
use crate::saturation::SaturationTable;
use crate::schema::{BlockDef, PiecewiseDef, TableStoreDef, TABLE_FORMAT_VERSION};

pub const SUPERHEATED: &str = "superheated";
pub const COMPRESSED: &str = "compressed liquid";

/// Read-only tables consulted by the solver. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct TableStore {
    source: Option<String>,
    saturation: SaturationTable,
    superheated: PiecewiseTable,
    compressed: PiecewiseTable,
}

impl TableStore {
    pub fn new(
        saturation: SaturationTable,
        superheated: PiecewiseTable,
        compressed: PiecewiseTable,
    ) -> Self {
        Self {
            source: None,
            saturation,
            superheated,
            compressed,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn saturation(&self) -> &SaturationTable {
        &self.saturation
    }

    pub fn superheated(&self) -> &PiecewiseTable {
        &self.superheated
    }

    pub fn compressed(&self) -> &PiecewiseTable {
        &self.compressed
    }

    pub fn from_def(def: &TableStoreDef) -> TableResult<Self> {
        if def.version != TABLE_FORMAT_VERSION {
            return Err(TableError::malformed(format!(
                "unsupported table format version {} (expected {TABLE_FORMAT_VERSION})",
                def.version
            )));
        }
        let saturation = SaturationTable::new(def.saturation.clone())?;
        let superheated = piecewise_from_def(SUPERHEATED, &def.superheated)?;
        let compressed = piecewise_from_def(COMPRESSED, &def.compressed)?;
        debug!(
            saturation_rows = saturation.len(),
            superheated_blocks = superheated.blocks().len(),
            compressed_blocks = compressed.blocks().len(),
            "table store built"
        );
        let mut store = Self::new(saturation, superheated, compressed);
        store.source = def.source.clone();
        Ok(store)
    }

    pub fn to_def(&self) -> TableStoreDef {
        TableStoreDef {
            version: TABLE_FORMAT_VERSION,
            source: self.source.clone(),
            saturation: self.saturation.rows(),
            superheated: piecewise_to_def(&self.superheated),
            compressed: piecewise_to_def(&self.compressed),
        }
    }
}

fn piecewise_from_def(name: &str, def: &PiecewiseDef) -> TableResult<PiecewiseTable> {
    let blocks = def
        .blocks
        .iter()
        .enumerate()
        .map(|(k, block)| {
            block_from_def(block).map_err(|e| match e {
                TableError::Malformed { what } => {
                    TableError::malformed(format!("{name} block {k}: {what}"))
                }
                other => other,
            })
        })
        .collect::<TableResult<Vec<_>>>()?;
    PiecewiseTable::new(name, blocks)
}

fn block_from_def(def: &BlockDef) -> TableResult<GridTable> {
    let pressure = Axis::new("pressure", def.pressures.clone())?;
    let temperature = Axis::new("temperature", def.temperatures.clone())?;

    let matrices = [
        (Column::SpecificVolume, &def.specific_volume),
        (Column::InternalEnergy, &def.internal_energy),
        (Column::Enthalpy, &def.enthalpy),
        (Column::Entropy, &def.entropy),
    ];
    for (column, matrix) in matrices {
        let rectangular = matrix.len() == pressure.len()
            && matrix.iter().all(|row| row.len() == temperature.len());
        if !rectangular {
            return Err(TableError::malformed(format!(
                "{} matrix must be {} x {}",
                column.name(),
                pressure.len(),
                temperature.len()
            )));
        }
    }

    let nodes = (0..pressure.len())
        .map(|ip| {
            (0..temperature.len())
                .map(|it| {
                    PropertyColumns::new(
                        def.specific_volume[ip][it],
                        def.internal_energy[ip][it],
                        def.enthalpy[ip][it],
                        def.entropy[ip][it],
                    )
                })
                .collect()
        })
        .collect();
    GridTable::new(pressure, temperature, nodes)
}

fn piecewise_to_def(table: &PiecewiseTable) -> PiecewiseDef {
    PiecewiseDef {
        blocks: table.blocks().iter().map(block_to_def).collect(),
    }
}

fn block_to_def(grid: &GridTable) -> BlockDef {
    let matrix = |column: Column| -> Vec<Vec<f64>> {
        (0..grid.pressure().len())
            .map(|ip| grid.isobar(column, ip).to_vec())
            .collect()
    };
    BlockDef {
        pressures: grid.pressure().breakpoints().to_vec(),
        temperatures: grid.temperature().breakpoints().to_vec(),
        specific_volume: matrix(Column::SpecificVolume),
        internal_energy: matrix(Column::InternalEnergy),
        enthalpy: matrix(Column::Enthalpy),
        entropy: matrix(Column::Entropy),
    }
}

pub fn load_yaml(path: &Path) -> TableResult<TableStore> {
    let content = std::fs::read_to_string(path)?;
    let def: TableStoreDef = serde_yaml::from_str(&content)?;
    let store = TableStore::from_def(&def)?;
    info!(path = %path.display(), "loaded steam tables");
    Ok(store)
}

pub fn save_yaml(path: &Path, store: &TableStore) -> TableResult<()> {
    let content = serde_yaml::to_string(&store.to_def())?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> TableResult<TableStore> {
    let content = std::fs::read_to_string(path)?;
    let def: TableStoreDef = serde_json::from_str(&content)?;
    let store = TableStore::from_def(&def)?;
    info!(path = %path.display(), "loaded steam tables");
    Ok(store)
}

pub fn save_json(path: &Path, store: &TableStore) -> TableResult<()> {
    let content = serde_json::to_string_pretty(&store.to_def())?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by file extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &Path) -> TableResult<TableStore> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
