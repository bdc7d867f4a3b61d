//! # diamond-climb
//!
//! Round engine and ledger for a row-by-row push-your-luck wagering game.
//!
//! The player stakes a bet and climbs a grid one row at a time. Each row
//! hides one hazard; every safe pick raises the payout multiplier, and the
//! player may cash out whenever the round is live. Clearing the top row pays
//! the table's highest multiplier.
//!
//! ## Design Principles
//!
//! 1. **Logic only**: no rendering or input handling. A presentation layer
//!    forwards intents (`start`, `pick`, `cash_out`) and re-renders from
//!    snapshots.
//!
//! 2. **Illegal states are unrepresentable**: a round is one tagged value keyed
//!    by status, the multiplier is derived from the cleared rows, and money is
//!    unsigned fixed-point cents.
//!
//! 3. **Injectable randomness**: hazard placement goes through `HazardSource`,
//!    so tests can script layouts.
//!
//! ## Modules
//!
//! - `core`: money, multipliers, board configuration, RNG, errors
//! - `ledger`: balance and bet reservation
//! - `round`: hazard layout, round state and the `RoundEngine`
//!
//! ## Example
//!
//! ```
//! use diamond_climb::{BoardConfig, FixedHazards, Money, RoundEngine, RoundStatus};
//!
//! // Every row's hazard sits in column 4.
//! let mut engine = RoundEngine::new(BoardConfig::default(), FixedHazards::repeat(4)).unwrap();
//!
//! engine.start(Money::from_units(10)).unwrap();
//! for row in 0..3 {
//!     engine.pick(row, 0).unwrap();
//! }
//! let outcome = engine.cash_out().unwrap();
//!
//! assert_eq!(outcome.settlement.to_string(), "19.20");
//! assert_eq!(engine.ledger().balance().to_string(), "109.20");
//! assert_eq!(engine.status(), RoundStatus::CashedOut);
//! ```

pub mod core;
pub mod ledger;
pub mod round;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, ConfigError, FixedHazards, GameError, GameRng, GameRngState, HazardSource,
    IllegalMove, LedgerError, Money, Multiplier, MultiplierTable, ParseMoneyError, COLS, ROWS,
};

pub use crate::ledger::{Ledger, LedgerSnapshot};

pub use crate::round::{
    CashOutOutcome, Cell, CellView, HazardLayout, PickOutcome, RevealedCells, RoundEngine,
    RoundSnapshot, RoundStatus,
};
