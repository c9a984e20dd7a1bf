use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::units::{UnitTable, LENGTH_UNITS, VOLUME_UNITS, WEIGHT_UNITS};

/// A selectable unit: the id used by the conversion tables and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInfo {
    pub id: &'static str,
    pub label: &'static str,
}

const fn unit(id: &'static str, label: &'static str) -> UnitInfo {
    UnitInfo { id, label }
}

const LENGTH: &[UnitInfo] = &[
    unit("Millimetre", "Millimètre (mm)"),
    unit("Centimetre", "Centimètre (cm)"),
    unit("Decimetre", "Décimètre (dm)"),
    unit("Metre", "Mètre (m)"),
    unit("Kilometre", "Kilomètre (km)"),
    unit("Pouce", "Pouce (in)"),
    unit("Pied", "Pied (ft)"),
    unit("Yard", "Yard (yd)"),
    unit("Mile", "Mile (mi)"),
];

const WEIGHT: &[UnitInfo] = &[
    unit("Milligramme", "Milligramme (mg)"),
    unit("Gramme", "Gramme (g)"),
    unit("Kilogramme", "Kilogramme (kg)"),
    unit("Tonne", "Tonne (t)"),
    unit("Once", "Once (oz)"),
    unit("Livre", "Livre (lb)"),
];

const VOLUME: &[UnitInfo] = &[
    unit("Millilitre", "Millilitre (ml)"),
    unit("Centilitre", "Centilitre (cl)"),
    unit("Decilitre", "Décilitre (dl)"),
    unit("Litre", "Litre (l)"),
    unit("MetreCube", "Mètre cube (m³)"),
    unit("GallonUS", "Gallon US (gal)"),
    unit("PinteUS", "Pinte US (pt)"),
    unit("OnceFluideUS", "Once fluide US (fl oz)"),
];

const TEMPERATURE: &[UnitInfo] = &[
    unit("Celsius", "Celsius (°C)"),
    unit("Fahrenheit", "Fahrenheit (°F)"),
    unit("Kelvin", "Kelvin (K)"),
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[strum(to_string = "length", serialize = "longueur")]
    Length,
    #[strum(to_string = "weight", serialize = "poids")]
    Weight,
    #[strum(to_string = "volume")]
    Volume,
    #[strum(to_string = "temperature", serialize = "température")]
    Temperature,
}

/// How values of a category are converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategoryKind {
    /// Multiplicative factors against a base unit.
    Linear(&'static UnitTable),
    /// Affine scales, pivoted through Celsius.
    Temperature,
}

impl Category {
    pub fn kind(self) -> CategoryKind {
        match self {
            Category::Length => CategoryKind::Linear(&LENGTH_UNITS),
            Category::Weight => CategoryKind::Linear(&WEIGHT_UNITS),
            Category::Volume => CategoryKind::Linear(&VOLUME_UNITS),
            Category::Temperature => CategoryKind::Temperature,
        }
    }

    pub fn table(self) -> Option<&'static UnitTable> {
        match self.kind() {
            CategoryKind::Linear(table) => Some(table),
            CategoryKind::Temperature => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Length => "Longueur",
            Category::Weight => "Poids",
            Category::Volume => "Volume",
            Category::Temperature => "Température",
        }
    }

    pub fn base_unit(self) -> &'static str {
        match self.kind() {
            CategoryKind::Linear(table) => table.base(),
            CategoryKind::Temperature => "Celsius",
        }
    }

    /// Units in display order.
    pub fn units(self) -> &'static [UnitInfo] {
        match self {
            Category::Length => LENGTH,
            Category::Weight => WEIGHT,
            Category::Volume => VOLUME,
            Category::Temperature => TEMPERATURE,
        }
    }

    pub fn label_for(self, unit_id: &str) -> Option<&'static str> {
        self.units()
            .iter()
            .find(|info| info.id == unit_id)
            .map(|info| info.label)
    }

    /// Source and destination preselected when the category is chosen:
    /// the first unit, and the second one when there is one.
    pub fn default_units(self) -> (&'static str, &'static str) {
        let units = self.units();
        let source = units[0].id;
        let dest = units.get(1).map(|info| info.id).unwrap_or(source);
        (source, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_english_and_french_names() {
        assert_eq!(Category::from_str("length").unwrap(), Category::Length);
        assert_eq!(Category::from_str("Longueur").unwrap(), Category::Length);
        assert_eq!(Category::from_str("POIDS").unwrap(), Category::Weight);
        assert_eq!(Category::from_str("volume").unwrap(), Category::Volume);
        assert_eq!(
            Category::from_str("Temperature").unwrap(),
            Category::Temperature
        );
        assert!(Category::from_str("speed").is_err());
    }

    #[test]
    fn displays_canonical_name() {
        assert_eq!(Category::Weight.to_string(), "weight");
        assert_eq!(Category::Temperature.to_string(), "temperature");
    }

    #[test]
    fn unit_lists_match_tables() {
        for category in Category::iter() {
            match category.kind() {
                CategoryKind::Linear(table) => {
                    assert_eq!(category.units().len(), table.len());
                    for info in category.units() {
                        assert!(table.contains(info.id), "{} missing", info.id);
                    }
                    assert_eq!(category.base_unit(), table.base());
                }
                CategoryKind::Temperature => {
                    assert!(category.table().is_none());
                    assert_eq!(category.units().len(), 3);
                }
            }
        }
    }

    #[test]
    fn labels_and_defaults() {
        assert_eq!(
            Category::Volume.label_for("MetreCube"),
            Some("Mètre cube (m³)")
        );
        assert_eq!(Category::Volume.label_for("Metre"), None);
        assert_eq!(
            Category::Length.default_units(),
            ("Millimetre", "Centimetre")
        );
        assert_eq!(
            Category::Temperature.default_units(),
            ("Celsius", "Fahrenheit")
        );
    }
}
