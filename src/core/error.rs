//! Error types.
//!
//! Every rejected intent leaves the round and ledger exactly as they were, so
//! callers can surface the error and carry on.

use thiserror::Error;

use super::money::Money;
use super::multiplier::Multiplier;

/// Errors returned by round intents (`start`, `pick`, `cash_out`).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Stake is zero or larger than the balance.
    #[error("invalid bet of {bet} against a balance of {balance}")]
    InvalidBet { bet: Money, balance: Money },

    /// `start` was called while a round is still active.
    #[error("a round is already in progress")]
    RoundInProgress,

    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Why a `pick` or `cash_out` was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("no round is active")]
    NoActiveRound,

    #[error("column {col} is outside the board's {columns} columns")]
    ColumnOutOfRange { col: usize, columns: usize },

    #[error("cell ({row}, {col}) is already revealed")]
    AlreadyRevealed { row: usize, col: usize },

    #[error("row {row} is not playable, the current row is {current_row}")]
    WrongRow { row: usize, current_row: usize },
}

/// Errors from reserving a bet on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("bet must be greater than zero")]
    InvalidBet,

    #[error("insufficient funds: bet {bet} exceeds balance {balance}")]
    InsufficientFunds { bet: Money, balance: Money },

    #[error("a bet of {pending} is already reserved")]
    BetPending { pending: Money },
}

/// Invalid board configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("multiplier table is empty")]
    EmptyTable,

    #[error("first multiplier {first} must be above 1.00x")]
    FirstEntryTooLow { first: Multiplier },

    #[error("multiplier at index {index} does not increase on the previous entry")]
    NotIncreasing { index: usize },

    #[error("board needs between {min} and {max} columns, got {columns}")]
    Columns { columns: usize, min: usize, max: usize },

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
