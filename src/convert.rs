use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::category::{Category, CategoryKind};
use crate::units::UnitTable;

const KELVIN_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 32.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("unsupported unit: {0}")]
    UnsupportedUnit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    fn parse(unit: &str) -> Result<Self, ConversionError> {
        TemperatureUnit::from_str(unit)
            .map_err(|_| ConversionError::UnsupportedUnit(unit.to_string()))
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - FAHRENHEIT_OFFSET) * (5.0 / 9.0),
            TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
        }
    }

    fn project(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * (9.0 / 5.0) + FAHRENHEIT_OFFSET,
            TemperatureUnit::Kelvin => celsius + KELVIN_OFFSET,
        }
    }
}

/// A value to convert between two units of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub value: f64,
    pub category: Category,
    pub source_unit: String,
    pub dest_unit: String,
}

impl ConversionRequest {
    pub fn new<S: Into<String>, D: Into<String>>(
        value: f64,
        category: Category,
        source_unit: S,
        dest_unit: D,
    ) -> Self {
        ConversionRequest {
            value,
            category,
            source_unit: source_unit.into(),
            dest_unit: dest_unit.into(),
        }
    }

    /// Same value, source and destination exchanged.
    pub fn swapped(&self) -> Self {
        ConversionRequest {
            value: self.value,
            category: self.category,
            source_unit: self.dest_unit.clone(),
            dest_unit: self.source_unit.clone(),
        }
    }
}

/// Converts through the table's base unit: `value * source / dest`.
///
/// Identical units return `value` untouched, even when the table does not know
/// them, so the identity never picks up floating-point drift.
pub fn convert_linear(
    value: f64,
    source_unit: &str,
    dest_unit: &str,
    table: &UnitTable,
) -> Result<f64, ConversionError> {
    if source_unit == dest_unit {
        return Ok(value);
    }
    let source_factor = table
        .factor(source_unit)
        .ok_or_else(|| ConversionError::UnsupportedUnit(source_unit.to_string()))?;
    let dest_factor = table
        .factor(dest_unit)
        .ok_or_else(|| ConversionError::UnsupportedUnit(dest_unit.to_string()))?;

    let base_value = value * source_factor;
    Ok(base_value / dest_factor)
}

/// Converts between Celsius, Fahrenheit and Kelvin, pivoting through Celsius.
pub fn convert_temperature(
    value: f64,
    source_unit: &str,
    dest_unit: &str,
) -> Result<f64, ConversionError> {
    if source_unit == dest_unit {
        return Ok(value);
    }
    let celsius = TemperatureUnit::parse(source_unit)?.to_celsius(value);
    Ok(TemperatureUnit::parse(dest_unit)?.project(celsius))
}

pub fn convert(request: &ConversionRequest) -> Result<f64, ConversionError> {
    match request.category.kind() {
        CategoryKind::Linear(table) => convert_linear(
            request.value,
            &request.source_unit,
            &request.dest_unit,
            table,
        ),
        CategoryKind::Temperature => {
            convert_temperature(request.value, &request.source_unit, &request.dest_unit)
        }
    }
}
