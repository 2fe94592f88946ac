// steam-core/src/units.rs
//
// Table units: kPa, degC, m^3/kg, kJ/kg, kJ/(kg K). Conversions happen here,
// at the boundary, never inside interpolation.

use uom::si::f64::{
    AvailableEnergy as UomAvailableEnergy, Pressure as UomPressure,
    SpecificHeatCapacity as UomSpecificHeatCapacity, SpecificVolume as UomSpecificVolume,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type SpecVolume = UomSpecificVolume;
pub type SpecEnergy = UomAvailableEnergy;
pub type SpecEntropy = UomSpecificHeatCapacity;

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn deg_c(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn m3_per_kg(v: f64) -> SpecVolume {
    use uom::si::specific_volume::cubic_meter_per_kilogram;
    SpecVolume::new::<cubic_meter_per_kilogram>(v)
}

#[inline]
pub fn kj_per_kg(v: f64) -> SpecEnergy {
    use uom::si::available_energy::kilojoule_per_kilogram;
    SpecEnergy::new::<kilojoule_per_kilogram>(v)
}

#[inline]
pub fn kj_per_kg_k(v: f64) -> SpecEntropy {
    use uom::si::specific_heat_capacity::kilojoule_per_kilogram_kelvin;
    SpecEntropy::new::<kilojoule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn to_kpa(p: Pressure) -> f64 {
    use uom::si::pressure::kilopascal;
    p.get::<kilopascal>()
}

#[inline]
pub fn to_deg_c(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn to_m3_per_kg(v: SpecVolume) -> f64 {
    use uom::si::specific_volume::cubic_meter_per_kilogram;
    v.get::<cubic_meter_per_kilogram>()
}

#[inline]
pub fn to_kj_per_kg(e: SpecEnergy) -> f64 {
    use uom::si::available_energy::kilojoule_per_kilogram;
    e.get::<kilojoule_per_kilogram>()
}

#[inline]
pub fn to_kj_per_kg_k(s: SpecEntropy) -> f64 {
    use uom::si::specific_heat_capacity::kilojoule_per_kilogram_kelvin;
    s.get::<kilojoule_per_kilogram_kelvin>()
}
