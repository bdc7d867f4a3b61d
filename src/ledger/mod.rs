//! Player balance and bet reservation.
//!
//! The ledger debits a bet when the round starts, so the balance shown during
//! an active round already excludes the money at risk. Settlement credits the
//! payout (zero on a loss) and clears the reservation.

mod account;

pub use account::{Ledger, LedgerSnapshot};
