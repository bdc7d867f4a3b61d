//! Payout multipliers and the climb's multiplier table.
//!
//! Multipliers are fixed-point integers in basis points: `10_000` is 1.00x.
//! The table maps "rows cleared" to the payout multiplier reached.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::error::ConfigError;

/// Basis points in 1.00x.
pub const BASIS_POINTS: u32 = 10_000;

/// The reference progression, one entry per row, in basis points.
pub const DEFAULT_MULTIPLIERS: [u32; 12] = [
    12_300, 15_300, 19_200, 24_000, 29_900, 37_000, 46_800, 58_500, 73_100, 91_400, 114_200,
    142_800,
];

/// A payout multiplier in basis points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiplier(u32);

impl Multiplier {
    /// Break-even: the stake comes back unchanged.
    pub const ONE: Multiplier = Multiplier(BASIS_POINTS);

    #[must_use]
    pub const fn from_basis_points(bp: u32) -> Self {
        Self(bp)
    }

    /// Convert a decimal multiplier, rounding to the nearest basis point.
    ///
    /// Returns `None` for non-finite, non-positive or out-of-range values.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        let bp = (value * f64::from(BASIS_POINTS)).round();
        if bp < 1.0 || bp > f64::from(u32::MAX) {
            return None;
        }
        Some(Self(bp as u32))
    }

    #[must_use]
    pub const fn basis_points(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(BASIS_POINTS)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundredths = self.0.saturating_add(50) / 100;
        write!(f, "{}.{:02}x", hundredths / 100, hundredths % 100)
    }
}

impl Serialize for Multiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Multiplier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Multiplier::from_f64(value)
            .ok_or_else(|| de::Error::custom(format!("invalid multiplier {value}")))
    }
}

/// Strictly increasing multipliers, one per row.
///
/// Entry `n - 1` is the multiplier after `n` cleared rows. The table's length
/// is the number of rows on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Multiplier>", into = "Vec<Multiplier>")]
pub struct MultiplierTable {
    entries: Vec<Multiplier>,
}

impl MultiplierTable {
    /// Build a table, checking that it is non-empty, starts above 1.00x and
    /// strictly increases.
    pub fn new(entries: Vec<Multiplier>) -> Result<Self, ConfigError> {
        let first = entries.first().ok_or(ConfigError::EmptyTable)?;
        if *first <= Multiplier::ONE {
            return Err(ConfigError::FirstEntryTooLow { first: *first });
        }
        if let Some(index) = entries.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(ConfigError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { entries })
    }

    /// Build a table from basis-point values.
    pub fn from_basis_points(values: &[u32]) -> Result<Self, ConfigError> {
        Self::new(values.iter().copied().map(Multiplier::from_basis_points).collect())
    }

    /// Number of entries (and rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Multiplier reached after `cleared` safe rows.
    ///
    /// Zero cleared rows is break-even; counts past the end clamp to the top.
    #[must_use]
    pub fn after(&self, cleared: usize) -> Multiplier {
        match cleared {
            0 => Multiplier::ONE,
            n => self
                .entries
                .get(n - 1)
                .or_else(|| self.entries.last())
                .copied()
                .unwrap_or(Multiplier::ONE),
        }
    }

    /// Highest multiplier on the board.
    #[must_use]
    pub fn top(&self) -> Multiplier {
        self.after(self.entries.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = Multiplier> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_MULTIPLIERS
                .iter()
                .copied()
                .map(Multiplier::from_basis_points)
                .collect(),
        }
    }
}

impl TryFrom<Vec<Multiplier>> for MultiplierTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<Multiplier>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<MultiplierTable> for Vec<Multiplier> {
    fn from(table: MultiplierTable) -> Self {
        table.entries
    }
}
