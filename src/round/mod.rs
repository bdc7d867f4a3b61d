//! One round of the climb.
//!
//! - `hazards`: board cells and the per-round hazard layout
//! - `state`: the round value, its status and rendering snapshots
//! - `engine`: `RoundEngine`, which accepts `start`, `pick` and `cash_out`

pub mod engine;
pub mod hazards;
pub mod state;

pub use engine::{CashOutOutcome, PickOutcome, RoundEngine};
pub use hazards::{Cell, HazardLayout};
pub use state::{CellView, RevealedCells, RoundSnapshot, RoundStatus};
