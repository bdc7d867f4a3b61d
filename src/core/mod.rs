//! Core types: money, multipliers, configuration, randomness, errors.
//!
//! These are shared by the ledger and the round engine and know nothing
//! about either.

pub mod config;
pub mod error;
pub mod money;
pub mod multiplier;
pub mod rng;

pub use config::{BoardConfig, COLS, DEFAULT_OPENING_BALANCE, MAX_COLUMNS, MIN_COLUMNS, ROWS};
pub use error::{ConfigError, GameError, IllegalMove, LedgerError};
pub use money::{Money, ParseMoneyError, CENTS_PER_UNIT};
pub use multiplier::{Multiplier, MultiplierTable, BASIS_POINTS, DEFAULT_MULTIPLIERS};
pub use rng::{FixedHazards, GameRng, GameRngState, HazardSource};
