//! Round state and snapshots.
//!
//! ## Round
//!
//! One tagged value per round, keyed by status. `Active` carries only the
//! in-progress fields; the terminal variants carry the settlement and the
//! hazard reveal. The current row and the multiplier are derived from the
//! revealed cells, so they can never disagree with them.
//!
//! ## RoundSnapshot
//!
//! What a presentation layer may see. Hazards are included only once the
//! round is over.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::hazards::{Cell, HazardLayout};
use crate::core::{BoardConfig, IllegalMove, Money, Multiplier};

/// Cleared cells in play order. Inline for boards up to 16 rows.
pub type RevealedCells = SmallVec<[Cell; 16]>;

/// Lifecycle status of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    /// No round has been started yet.
    #[default]
    Idle,
    Active,
    /// Cleared the top row.
    Won,
    /// Picked a hazard.
    Lost,
    CashedOut,
}

impl RoundStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::CashedOut)
    }
}

/// A round in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ActiveRound {
    pub(crate) bet: Money,
    pub(crate) hazards: HazardLayout,
    pub(crate) revealed: RevealedCells,
}

impl ActiveRound {
    pub(crate) fn new(bet: Money, hazards: HazardLayout) -> Self {
        Self {
            bet,
            hazards,
            revealed: RevealedCells::new(),
        }
    }

    /// Every safe pick clears exactly one row, bottom up.
    pub(crate) fn current_row(&self) -> usize {
        self.revealed.len()
    }

    pub(crate) fn is_revealed(&self, cell: Cell) -> bool {
        self.revealed.contains(&cell)
    }

    /// Legality of picking `cell`, without resolving it.
    pub(crate) fn check_pick(&self, cell: Cell, columns: usize) -> Result<(), IllegalMove> {
        if cell.col >= columns {
            return Err(IllegalMove::ColumnOutOfRange {
                col: cell.col,
                columns,
            });
        }
        if self.is_revealed(cell) {
            return Err(IllegalMove::AlreadyRevealed {
                row: cell.row,
                col: cell.col,
            });
        }
        let current_row = self.current_row();
        if cell.row != current_row {
            return Err(IllegalMove::WrongRow {
                row: cell.row,
                current_row,
            });
        }
        Ok(())
    }

    pub(crate) fn finish(self, multiplier: Multiplier, settlement: Money) -> FinishedRound {
        FinishedRound {
            bet: self.bet,
            hazards: self.hazards,
            revealed: self.revealed,
            multiplier,
            settlement,
        }
    }
}

/// A round that has reached a terminal status. Never mutated again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FinishedRound {
    pub(crate) bet: Money,
    pub(crate) hazards: HazardLayout,
    pub(crate) revealed: RevealedCells,
    pub(crate) multiplier: Multiplier,
    pub(crate) settlement: Money,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Round {
    #[default]
    Idle,
    Active(ActiveRound),
    Won(FinishedRound),
    Lost(FinishedRound),
    CashedOut(FinishedRound),
}

impl Round {
    pub(crate) fn status(&self) -> RoundStatus {
        match self {
            Round::Idle => RoundStatus::Idle,
            Round::Active(_) => RoundStatus::Active,
            Round::Won(_) => RoundStatus::Won,
            Round::Lost(_) => RoundStatus::Lost,
            Round::CashedOut(_) => RoundStatus::CashedOut,
        }
    }

    pub(crate) fn snapshot(&self, config: &BoardConfig) -> RoundSnapshot {
        let rows = config.rows();
        let columns = config.columns;
        let status = self.status();

        match self {
            Round::Idle => RoundSnapshot {
                status,
                rows,
                columns,
                bet: Money::ZERO,
                current_row: None,
                multiplier: Multiplier::ONE,
                next_multiplier: None,
                revealed: RevealedCells::new(),
                hazards: None,
                settlement: None,
            },
            Round::Active(active) => {
                let cleared = active.revealed.len();
                RoundSnapshot {
                    status,
                    rows,
                    columns,
                    bet: active.bet,
                    current_row: Some(active.current_row()),
                    multiplier: config.multipliers.after(cleared),
                    next_multiplier: Some(config.multipliers.after(cleared + 1)),
                    revealed: active.revealed.clone(),
                    hazards: None,
                    settlement: None,
                }
            }
            Round::Won(done) | Round::Lost(done) | Round::CashedOut(done) => RoundSnapshot {
                status,
                rows,
                columns,
                bet: done.bet,
                current_row: None,
                multiplier: done.multiplier,
                next_multiplier: None,
                revealed: done.revealed.clone(),
                hazards: Some(done.hazards.clone()),
                settlement: Some(done.settlement),
            },
        }
    }
}

/// What a single cell should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellView {
    /// Nothing known about the cell yet.
    Hidden,
    /// Picked and safe.
    Safe,
    /// The row's hazard, revealed once the round is over.
    Hazard,
}

/// Immutable view of a round for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub status: RoundStatus,
    pub rows: usize,
    pub columns: usize,
    /// Stake for this round (zero while idle).
    pub bet: Money,
    /// Row to play next, while active.
    pub current_row: Option<usize>,
    /// Multiplier reached so far.
    pub multiplier: Multiplier,
    /// Multiplier a safe pick on the current row would reach.
    pub next_multiplier: Option<Multiplier>,
    pub revealed: RevealedCells,
    /// Full layout, present only once the round is terminal.
    pub hazards: Option<HazardLayout>,
    /// Amount credited to the ledger, present only once terminal.
    pub settlement: Option<Money>,
}

impl RoundSnapshot {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> CellView {
        let cell = Cell::new(row, col);
        if self.revealed.contains(&cell) {
            CellView::Safe
        } else if self.hazards.as_ref().is_some_and(|h| h.is_hazard(cell)) {
            CellView::Hazard
        } else {
            CellView::Hidden
        }
    }

    /// Rows a renderer should show at full strength.
    ///
    /// While active: the current row and every row already cleared. Before the
    /// first round only the entry row is live; once a round is over every row
    /// is, so the hazard reveal is never dimmed.
    #[must_use]
    pub fn is_row_live(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        match self.status {
            RoundStatus::Idle => row == 0,
            RoundStatus::Active => {
                self.current_row == Some(row) || self.revealed.iter().any(|c| c.row == row)
            }
            RoundStatus::Won | RoundStatus::Lost | RoundStatus::CashedOut => true,
        }
    }

    /// Whether `pick(row, col)` would be accepted right now.
    #[must_use]
    pub fn is_pickable(&self, row: usize, col: usize) -> bool {
        self.current_row == Some(row)
            && col < self.columns
            && !self.revealed.contains(&Cell::new(row, col))
    }

    /// What cashing out now would pay. `None` unless active.
    #[must_use]
    pub fn potential_payout(&self) -> Option<Money> {
        (self.status == RoundStatus::Active).then(|| self.bet.times(self.multiplier))
    }
}
