//! Board configuration.
//!
//! A `BoardConfig` fixes the board's geometry and payouts for a session:
//! - `columns`: cells per row, one of which hides the row's hazard
//! - `multipliers`: one strictly increasing entry per row (so it also fixes
//!   the row count)
//! - `opening_balance`: the ledger's starting funds, as a decimal string
//!   (`"100.00"`) or whole units (`100`)
//!
//! Configs can be built in code or loaded from JSON:
//!
//! ```
//! use diamond_climb::core::BoardConfig;
//!
//! let config = BoardConfig::from_json(
//!     r#"{ "columns": 4, "multipliers": [1.2, 1.5, 2.0], "opening_balance": "50.00" }"#,
//! ).unwrap();
//! assert_eq!(config.rows(), 3);
//! assert_eq!(config.opening_balance.to_string(), "50.00");
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::money::Money;
use super::multiplier::{MultiplierTable, DEFAULT_MULTIPLIERS};

/// Cells per row on the reference board.
pub const COLS: usize = 5;

/// Rows on the reference board (one per default multiplier).
pub const ROWS: usize = DEFAULT_MULTIPLIERS.len();

/// Starting balance on the reference board, in whole units.
pub const DEFAULT_OPENING_BALANCE: u64 = 100;

/// Fewest columns that still leave a safe cell in every row.
pub const MIN_COLUMNS: usize = 2;

/// Hazard columns are stored as `u8`.
pub const MAX_COLUMNS: usize = u8::MAX as usize;

/// Complete board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Cells per row.
    pub columns: usize,

    /// Multiplier after each cleared row. Its length is the row count.
    pub multipliers: MultiplierTable,

    /// Ledger balance when the session opens.
    pub opening_balance: Money,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: COLS,
            multipliers: MultiplierTable::default(),
            opening_balance: Money::from_units(DEFAULT_OPENING_BALANCE),
        }
    }
}

impl BoardConfig {
    /// The reference board: 12 rows of 5 with the default multipliers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_multipliers(mut self, multipliers: MultiplierTable) -> Self {
        self.multipliers = multipliers;
        self
    }

    #[must_use]
    pub fn with_opening_balance(mut self, balance: Money) -> Self {
        self.opening_balance = balance;
        self
    }

    /// Number of rows on the board.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.multipliers.len()
    }

    /// Check the geometry. The multiplier table validates itself on construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&self.columns) {
            return Err(ConfigError::Columns {
                columns: self.columns,
                min: MIN_COLUMNS,
                max: MAX_COLUMNS,
            });
        }
        if self.multipliers.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Multiplier;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.columns, COLS);
        assert_eq!(config.rows(), ROWS);
        assert_eq!(config.rows(), 12);
        assert_eq!(config.opening_balance, Money::from_cents(10_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let table = MultiplierTable::from_basis_points(&[15_000, 30_000]).unwrap();
        let config = BoardConfig::new()
            .with_columns(3)
            .with_multipliers(table)
            .with_opening_balance(Money::from_units(20));

        assert_eq!(config.columns, 3);
        assert_eq!(config.rows(), 2);
        assert_eq!(config.multipliers.top(), Multiplier::from_basis_points(30_000));
        assert_eq!(config.opening_balance, Money::from_units(20));
    }

    #[test]
    fn test_column_bounds() {
        assert!(matches!(
            BoardConfig::new().with_columns(1).validate(),
            Err(ConfigError::Columns { columns: 1, .. })
        ));
        assert!(matches!(
            BoardConfig::new().with_columns(256).validate(),
            Err(ConfigError::Columns { columns: 256, .. })
        ));
        assert!(BoardConfig::new().with_columns(255).validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let config = BoardConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = BoardConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_from_json_opening_balance_units() {
        let whole = r#"{ "columns": 5, "multipliers": [1.5, 2.0], "opening_balance": 100 }"#;
        let config = BoardConfig::from_json(whole).unwrap();
        assert_eq!(config.opening_balance, Money::from_units(100));

        let decimal = r#"{ "columns": 5, "multipliers": [1.5, 2.0], "opening_balance": "12.34" }"#;
        let config = BoardConfig::from_json(decimal).unwrap();
        assert_eq!(config.opening_balance, Money::from_cents(1_234));

        let json = serde_json::to_string(&BoardConfig::default()).unwrap();
        assert!(json.contains(r#""opening_balance":"100.00""#));
    }

    #[test]
    fn test_from_json_rejects() {
        let bad_table = r#"{ "columns": 5, "multipliers": [2.0, 1.5], "opening_balance": 100 }"#;
        assert!(matches!(
            BoardConfig::from_json(bad_table),
            Err(ConfigError::Json(_))
        ));

        let bad_columns = r#"{ "columns": 0, "multipliers": [2.0], "opening_balance": 100 }"#;
        assert!(matches!(
            BoardConfig::from_json(bad_columns),
            Err(ConfigError::Columns { .. })
        ));

        assert!(matches!(
            BoardConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
