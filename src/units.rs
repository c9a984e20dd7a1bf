//! Conversion factor tables for the linear categories

/// Maps unit ids to the number of base units one unit is worth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTable {
    base: &'static str,
    entries: &'static [(&'static str, f64)],
}

impl UnitTable {
    pub const fn new(base: &'static str, entries: &'static [(&'static str, f64)]) -> Self {
        UnitTable { base, entries }
    }

    /// Id of the unit every factor is expressed in.
    pub fn base(&self) -> &'static str {
        self.base
    }

    /// Factor for `unit`, or `None` when the table has no usable entry for it.
    pub fn factor(&self, unit: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(id, _)| *id == unit)
            .map(|(_, factor)| *factor)
            .filter(|factor| *factor > 0.0)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.factor(unit).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lengths in metres.
pub static LENGTH_UNITS: UnitTable = UnitTable::new(
    "Metre",
    &[
        ("Millimetre", 0.001),
        ("Centimetre", 0.01),
        ("Decimetre", 0.1),
        ("Metre", 1.0),
        ("Kilometre", 1000.0),
        ("Pouce", 0.0254),
        ("Pied", 0.3048),
        ("Yard", 0.9144),
        ("Mile", 1609.344),
    ],
);

/// Weights in grams.
pub static WEIGHT_UNITS: UnitTable = UnitTable::new(
    "Gramme",
    &[
        ("Milligramme", 0.001),
        ("Gramme", 1.0),
        ("Kilogramme", 1000.0),
        ("Tonne", 1_000_000.0),
        ("Once", 28.3495),
        ("Livre", 453.592),
    ],
);

/// Volumes in litres.
pub static VOLUME_UNITS: UnitTable = UnitTable::new(
    "Litre",
    &[
        ("Millilitre", 0.001),
        ("Centilitre", 0.01),
        ("Decilitre", 0.1),
        ("Litre", 1.0),
        ("MetreCube", 1000.0),
        ("GallonUS", 3.78541),
        ("PinteUS", 0.473176),
        ("OnceFluideUS", 0.0295735),
    ],
);
