//! Property identifiers, queries and resolved property vectors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use steam_core::CoreError;
use steam_core::units::{
    Pressure, SpecEnergy, SpecEntropy, SpecVolume, Temperature, deg_c, kj_per_kg, kj_per_kg_k,
    kpa, m3_per_kg, to_deg_c, to_kj_per_kg, to_kj_per_kg_k, to_kpa, to_m3_per_kg,
};
use steam_tables::{Column, PropertyColumns};

/// Closed set of properties the solver understands.
///
/// Ordering follows declaration order and is the order used when reporting
/// missing properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyId {
    Pressure,
    Temperature,
    SpecificVolume,
    InternalEnergy,
    Enthalpy,
    Entropy,
    Quality,
}

impl PropertyId {
    pub const ALL: [PropertyId; 7] = [
        PropertyId::Pressure,
        PropertyId::Temperature,
        PropertyId::SpecificVolume,
        PropertyId::InternalEnergy,
        PropertyId::Enthalpy,
        PropertyId::Entropy,
        PropertyId::Quality,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PropertyId::Pressure => "pressure",
            PropertyId::Temperature => "temperature",
            PropertyId::SpecificVolume => "specific_volume",
            PropertyId::InternalEnergy => "internal_energy",
            PropertyId::Enthalpy => "enthalpy",
            PropertyId::Entropy => "entropy",
            PropertyId::Quality => "quality",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            PropertyId::Pressure => "P",
            PropertyId::Temperature => "T",
            PropertyId::SpecificVolume => "v",
            PropertyId::InternalEnergy => "u",
            PropertyId::Enthalpy => "h",
            PropertyId::Entropy => "s",
            PropertyId::Quality => "x",
        }
    }

    /// Tabulated column backing this property, if any.
    pub fn column(self) -> Option<Column> {
        match self {
            PropertyId::SpecificVolume => Some(Column::SpecificVolume),
            PropertyId::InternalEnergy => Some(Column::InternalEnergy),
            PropertyId::Enthalpy => Some(Column::Enthalpy),
            PropertyId::Entropy => Some(Column::Entropy),
            PropertyId::Pressure | PropertyId::Temperature | PropertyId::Quality => None,
        }
    }
}

impl From<Column> for PropertyId {
    fn from(column: Column) -> Self {
        match column {
            Column::SpecificVolume => PropertyId::SpecificVolume,
            Column::InternalEnergy => PropertyId::InternalEnergy,
            Column::Enthalpy => PropertyId::Enthalpy,
            Column::Entropy => PropertyId::Entropy,
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s {
            "P" | "P_kPa" | "pressure" => PropertyId::Pressure,
            "T" | "T_C" | "temperature" => PropertyId::Temperature,
            "v" | "specific_volume" => PropertyId::SpecificVolume,
            "u" | "internal_energy" => PropertyId::InternalEnergy,
            "h" | "enthalpy" => PropertyId::Enthalpy,
            "s" | "entropy" => PropertyId::Entropy,
            "x" | "quality" => PropertyId::Quality,
            other => {
                return Err(CoreError::UnknownProperty {
                    name: other.to_string(),
                });
            }
        };
        Ok(id)
    }
}

/// Known properties supplied by the caller, in table units.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateQuery {
    known: BTreeMap<PropertyId, f64>,
}

impl StateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: PropertyId, value: f64) -> Self {
        self.known.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: PropertyId, value: f64) -> Option<f64> {
        self.known.insert(id, value)
    }

    pub fn get(&self, id: PropertyId) -> Option<f64> {
        self.known.get(&id).copied()
    }

    pub fn contains(&self, id: PropertyId) -> bool {
        self.known.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, f64)> + '_ {
        self.known.iter().map(|(id, v)| (*id, *v))
    }

    /// Parse a `name=value` assignment such as `P=1000` or `enthalpy=2800`.
    pub fn parse_assignment(text: &str) -> Result<(PropertyId, f64), CoreError> {
        let (name, value) = text.split_once('=').ok_or(CoreError::InvalidArg {
            what: "expected name=value",
        })?;
        let id = name.trim().parse::<PropertyId>()?;
        let value = value.trim().parse::<f64>().map_err(|_| CoreError::InvalidArg {
            what: "property value is not a number",
        })?;
        Ok((id, value))
    }

    pub fn with_pressure(self, p: Pressure) -> Self {
        self.with(PropertyId::Pressure, to_kpa(p))
    }

    pub fn with_temperature(self, t: Temperature) -> Self {
        self.with(PropertyId::Temperature, to_deg_c(t))
    }

    pub fn with_specific_volume(self, v: SpecVolume) -> Self {
        self.with(PropertyId::SpecificVolume, to_m3_per_kg(v))
    }

    pub fn with_internal_energy(self, u: SpecEnergy) -> Self {
        self.with(PropertyId::InternalEnergy, to_kj_per_kg(u))
    }

    pub fn with_enthalpy(self, h: SpecEnergy) -> Self {
        self.with(PropertyId::Enthalpy, to_kj_per_kg(h))
    }

    pub fn with_entropy(self, s: SpecEntropy) -> Self {
        self.with(PropertyId::Entropy, to_kj_per_kg_k(s))
    }

    pub fn with_quality(self, x: f64) -> Self {
        self.with(PropertyId::Quality, x)
    }
}

impl FromIterator<(PropertyId, f64)> for StateQuery {
    fn from_iter<I: IntoIterator<Item = (PropertyId, f64)>>(iter: I) -> Self {
        Self {
            known: iter.into_iter().collect(),
        }
    }
}

/// Fully resolved state in table units: kPa, °C, m^3/kg, kJ/kg, kJ/(kg K).
///
/// `quality` is present only for two-phase states.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyVector {
    pub pressure: f64,
    pub temperature: f64,
    pub specific_volume: f64,
    pub internal_energy: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
}

impl PropertyVector {
    pub fn from_columns(pressure: f64, temperature: f64, cols: &PropertyColumns, quality: Option<f64>) -> Self {
        Self {
            pressure,
            temperature,
            specific_volume: cols.specific_volume,
            internal_energy: cols.internal_energy,
            enthalpy: cols.enthalpy,
            entropy: cols.entropy,
            quality,
        }
    }

    pub fn get(&self, id: PropertyId) -> Option<f64> {
        match id {
            PropertyId::Pressure => Some(self.pressure),
            PropertyId::Temperature => Some(self.temperature),
            PropertyId::SpecificVolume => Some(self.specific_volume),
            PropertyId::InternalEnergy => Some(self.internal_energy),
            PropertyId::Enthalpy => Some(self.enthalpy),
            PropertyId::Entropy => Some(self.entropy),
            PropertyId::Quality => self.quality,
        }
    }

    pub fn columns(&self) -> PropertyColumns {
        PropertyColumns::new(
            self.specific_volume,
            self.internal_energy,
            self.enthalpy,
            self.entropy,
        )
    }

    pub fn as_pressure(&self) -> Pressure {
        kpa(self.pressure)
    }

    pub fn as_temperature(&self) -> Temperature {
        deg_c(self.temperature)
    }

    pub fn as_specific_volume(&self) -> SpecVolume {
        m3_per_kg(self.specific_volume)
    }

    pub fn as_internal_energy(&self) -> SpecEnergy {
        kj_per_kg(self.internal_energy)
    }

    pub fn as_enthalpy(&self) -> SpecEnergy {
        kj_per_kg(self.enthalpy)
    }

    pub fn as_entropy(&self) -> SpecEntropy {
        kj_per_kg_k(self.entropy)
    }
}
