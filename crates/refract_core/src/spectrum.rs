//! Wavelength bands and their refractive indices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ConfigError, ConfigResult};

/// Refractive index of air at visible wavelengths.
pub const AIR_INDEX: f64 = 1.000293;

/// One of the six named visible wavelength bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
}

impl Band {
    /// All bands from longest to shortest wavelength.
    pub const ALL: [Band; 6] = [
        Band::Red,
        Band::Orange,
        Band::Yellow,
        Band::Green,
        Band::Blue,
        Band::Violet,
    ];

    /// Lowercase color label, as written to the path output.
    pub fn label(self) -> &'static str {
        match self {
            Band::Red => "red",
            Band::Orange => "orange",
            Band::Yellow => "yellow",
            Band::Green => "green",
            Band::Blue => "blue",
            Band::Violet => "violet",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Refractive index of the droplet for each traced band.
///
/// Entries keep their insertion order; the batch driver traces colors in
/// this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Band, f64)>", into = "Vec<(Band, f64)>")]
pub struct RefractiveIndexTable {
    entries: Vec<(Band, f64)>,
}

impl RefractiveIndexTable {
    /// Build a table, rejecting empty tables, repeated bands and
    /// non-positive indices.
    pub fn new(entries: Vec<(Band, f64)>) -> ConfigResult<Self> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        for (i, &(band, index)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|&(seen, _)| seen == band) {
                return Err(ConfigError::DuplicateBand(band));
            }
            ensure_finite("refractive index", index)?;
            if index <= 0.0 {
                return Err(ConfigError::NonPositiveIndex { band, index });
            }
        }
        Ok(Self { entries })
    }

    /// Fresh water at room temperature.
    pub fn water() -> Self {
        Self {
            entries: vec![
                (Band::Red, 1.331),
                (Band::Orange, 1.332),
                (Band::Yellow, 1.333),
                (Band::Green, 1.335),
                (Band::Blue, 1.338),
                (Band::Violet, 1.342),
            ],
        }
    }

    /// Index for `band`, if the table has it.
    pub fn get(&self, band: Band) -> Option<f64> {
        self.entries
            .iter()
            .find(|(b, _)| *b == band)
            .map(|&(_, index)| index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Band, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RefractiveIndexTable {
    fn default() -> Self {
        Self::water()
    }
}

impl TryFrom<Vec<(Band, f64)>> for RefractiveIndexTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<(Band, f64)>) -> ConfigResult<Self> {
        Self::new(entries)
    }
}

impl From<RefractiveIndexTable> for Vec<(Band, f64)> {
    fn from(table: RefractiveIndexTable) -> Self {
        table.entries
    }
}
