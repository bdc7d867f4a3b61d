//! The round engine: intents in, snapshots and outcomes out.
//!
//! State machine:
//!
//! ```text
//! Idle/terminal --start--> Active
//! Active --pick(safe, not top row)--> Active (next row)
//! Active --pick(safe, top row)------> Won
//! Active --pick(hazard)-------------> Lost
//! Active --cash_out-----------------> CashedOut
//! ```
//!
//! The engine owns the player's [`Ledger`]: `start` reserves the bet and every
//! terminal transition settles it, so the balance is always current when an
//! intent returns. Rejected intents change nothing.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::hazards::{Cell, HazardLayout};
use super::state::{ActiveRound, Round, RoundSnapshot, RoundStatus};
use crate::core::{
    BoardConfig, ConfigError, GameError, GameRng, HazardSource, IllegalMove, Money, Multiplier,
};
use crate::ledger::Ledger;

/// Result of an accepted `pick`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickOutcome {
    /// Safe cell; the round continues on `next_row`.
    Safe {
        cell: Cell,
        multiplier: Multiplier,
        next_row: usize,
    },
    /// Safe cell on the top row; the round is won and settled.
    Won {
        cell: Cell,
        multiplier: Multiplier,
        settlement: Money,
        hazards: HazardLayout,
    },
    /// Hazard; the stake is lost.
    Lost { cell: Cell, hazards: HazardLayout },
}

impl PickOutcome {
    #[must_use]
    pub fn cell(&self) -> Cell {
        match self {
            PickOutcome::Safe { cell, .. }
            | PickOutcome::Won { cell, .. }
            | PickOutcome::Lost { cell, .. } => *cell,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PickOutcome::Safe { .. })
    }

    /// Amount credited to the ledger, if the pick ended the round.
    #[must_use]
    pub fn settlement(&self) -> Option<Money> {
        match self {
            PickOutcome::Safe { .. } => None,
            PickOutcome::Won { settlement, .. } => Some(*settlement),
            PickOutcome::Lost { .. } => Some(Money::ZERO),
        }
    }
}

/// Result of an accepted `cash_out`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOutOutcome {
    pub multiplier: Multiplier,
    pub settlement: Money,
    pub hazards: HazardLayout,
}

/// Runs rounds for one player session.
///
/// Generic over the hazard source so tests can script layouts; live play uses
/// [`GameRng`].
#[derive(Clone, Debug)]
pub struct RoundEngine<H: HazardSource = GameRng> {
    config: BoardConfig,
    source: H,
    ledger: Ledger,
    round: Round,
}

impl RoundEngine<GameRng> {
    /// Engine with an entropy-seeded RNG.
    pub fn with_entropy(config: BoardConfig) -> Result<Self, ConfigError> {
        Self::new(config, GameRng::from_entropy())
    }

    /// Engine with a reproducible RNG.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, GameRng::new(seed))
    }
}

impl<H: HazardSource> RoundEngine<H> {
    /// Create an idle engine with a ledger opened at `config.opening_balance`.
    pub fn new(config: BoardConfig, source: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let ledger = Ledger::new(config.opening_balance);
        Ok(Self {
            config,
            source,
            ledger,
            round: Round::Idle,
        })
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn hazard_source(&self) -> &H {
        &self.source
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.round.status()
    }

    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        self.round.snapshot(&self.config)
    }

    /// Cells `pick` would accept right now, left to right.
    #[must_use]
    pub fn legal_picks(&self) -> Vec<Cell> {
        match &self.round {
            Round::Active(active) => {
                let row = active.current_row();
                (0..self.config.columns)
                    .map(|col| Cell::new(row, col))
                    .filter(|&cell| !active.is_revealed(cell))
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_pickable(&self, row: usize, col: usize) -> bool {
        match &self.round {
            Round::Active(active) => active
                .check_pick(Cell::new(row, col), self.config.columns)
                .is_ok(),
            _ => false,
        }
    }

    /// Stake `bet` and begin a new round with a fresh hazard layout.
    pub fn start(&mut self, bet: Money) -> Result<RoundSnapshot, GameError> {
        if self.round.status() == RoundStatus::Active {
            debug!(%bet, "start rejected: round in progress");
            return Err(GameError::RoundInProgress);
        }
        let balance = self.ledger.balance();
        if bet.is_zero() || bet > balance {
            debug!(%bet, %balance, "start rejected: invalid bet");
            return Err(GameError::InvalidBet { bet, balance });
        }

        self.ledger.reserve(bet)?;
        let hazards = HazardLayout::generate(&mut self.source, self.config.rows(), self.config.columns);
        self.round = Round::Active(ActiveRound::new(bet, hazards));

        debug!(%bet, balance = %self.ledger.balance(), "round started");
        Ok(self.snapshot())
    }

    /// Reveal `(row, col)`. Only unrevealed cells of the current row are legal.
    pub fn pick(&mut self, row: usize, col: usize) -> Result<PickOutcome, GameError> {
        let cell = Cell::new(row, col);
        let mut active = self.take_active()?;
        if let Err(reason) = active.check_pick(cell, self.config.columns) {
            self.round = Round::Active(active);
            debug!(%cell, %reason, "pick rejected");
            return Err(reason.into());
        }

        if active.hazards.is_hazard(cell) {
            let multiplier = self.config.multipliers.after(active.revealed.len());
            let done = active.finish(multiplier, Money::ZERO);
            self.ledger.settle(Money::ZERO);
            info!(%cell, bet = %done.bet, "hazard hit, round lost");

            let hazards = done.hazards.clone();
            self.round = Round::Lost(done);
            return Ok(PickOutcome::Lost { cell, hazards });
        }

        active.revealed.push(cell);
        let multiplier = self.config.multipliers.after(active.revealed.len());

        if row + 1 >= self.config.rows() {
            let settlement = active.bet.times(multiplier);
            let done = active.finish(multiplier, settlement);
            self.ledger.settle(settlement);
            info!(%cell, %multiplier, %settlement, "top row cleared, round won");

            let hazards = done.hazards.clone();
            self.round = Round::Won(done);
            return Ok(PickOutcome::Won {
                cell,
                multiplier,
                settlement,
                hazards,
            });
        }

        let next_row = active.current_row();
        self.round = Round::Active(active);
        debug!(%cell, %multiplier, next_row, "safe pick");
        Ok(PickOutcome::Safe {
            cell,
            multiplier,
            next_row,
        })
    }

    /// Bank the current multiplier. Legal any time the round is active,
    /// including before the first pick (a break-even refund).
    pub fn cash_out(&mut self) -> Result<CashOutOutcome, GameError> {
        let active = self.take_active()?;
        let multiplier = self.config.multipliers.after(active.revealed.len());
        let settlement = active.bet.times(multiplier);
        let done = active.finish(multiplier, settlement);
        self.ledger.settle(settlement);
        info!(%multiplier, %settlement, cleared = done.revealed.len(), "cashed out");

        let hazards = done.hazards.clone();
        self.round = Round::CashedOut(done);
        Ok(CashOutOutcome {
            multiplier,
            settlement,
            hazards,
        })
    }

    /// Move the active round out of `self`, leaving any other state untouched.
    fn take_active(&mut self) -> Result<ActiveRound, GameError> {
        match std::mem::take(&mut self.round) {
            Round::Active(active) => Ok(active),
            other => {
                debug!(status = ?other.status(), "intent rejected: no active round");
                self.round = other;
                Err(IllegalMove::NoActiveRound.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedHazards, MultiplierTable};

    fn engine(hazards: Vec<usize>) -> RoundEngine<FixedHazards> {
        RoundEngine::new(BoardConfig::default(), FixedHazards::new(hazards)).unwrap()
    }

    fn small_engine() -> RoundEngine<FixedHazards> {
        let config = BoardConfig::new()
            .with_columns(3)
            .with_multipliers(MultiplierTable::from_basis_points(&[15_000, 25_000]).unwrap())
            .with_opening_balance(Money::from_units(10));
        RoundEngine::new(config, FixedHazards::repeat(0)).unwrap()
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = engine(vec![0]);
        assert_eq!(engine.status(), RoundStatus::Idle);
        assert_eq!(engine.ledger().balance(), Money::from_units(100));
        assert!(engine.legal_picks().is_empty());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = BoardConfig::new().with_columns(1);
        assert!(matches!(
            RoundEngine::new(config, FixedHazards::repeat(0)),
            Err(ConfigError::Columns { .. })
        ));
    }

    #[test]
    fn test_start() {
        let mut engine = engine(vec![0]);
        let snapshot = engine.start(Money::from_units(10)).unwrap();

        assert_eq!(snapshot.status, RoundStatus::Active);
        assert_eq!(snapshot.current_row, Some(0));
        assert_eq!(snapshot.multiplier, Multiplier::ONE);
        assert_eq!(snapshot.bet, Money::from_units(10));
        assert!(snapshot.hazards.is_none());
        assert_eq!(engine.ledger().balance(), Money::from_units(90));
        assert_eq!(engine.ledger().pending_bet(), Money::from_units(10));
    }

    #[test]
    fn test_start_rejects_bad_bets() {
        let mut engine = engine(vec![0]);
        assert_eq!(
            engine.start(Money::ZERO),
            Err(GameError::InvalidBet {
                bet: Money::ZERO,
                balance: Money::from_units(100)
            })
        );
        assert!(matches!(
            engine.start(Money::from_cents(10_001)),
            Err(GameError::InvalidBet { .. })
        ));
        assert_eq!(engine.status(), RoundStatus::Idle);
        assert_eq!(engine.ledger().balance(), Money::from_units(100));
    }

    #[test]
    fn test_start_while_active() {
        let mut engine = engine(vec![0]);
        engine.start(Money::from_units(10)).unwrap();
        assert_eq!(engine.start(Money::from_units(10)), Err(GameError::RoundInProgress));
        assert_eq!(engine.ledger().balance(), Money::from_units(90));
    }

    #[test]
    fn test_legal_picks_follow_current_row() {
        let mut engine = engine(vec![0]);
        engine.start(Money::from_units(1)).unwrap();

        let picks = engine.legal_picks();
        assert_eq!(picks.len(), 5);
        assert!(picks.iter().all(|c| c.row == 0));

        engine.pick(0, 3).unwrap();
        assert!(engine.legal_picks().iter().all(|c| c.row == 1));
        assert!(engine.is_pickable(1, 0));
        assert!(!engine.is_pickable(0, 1));
        assert!(!engine.is_pickable(1, 5));
    }

    #[test]
    fn test_safe_pick_advances() {
        let mut engine = engine(vec![0]);
        engine.start(Money::from_units(10)).unwrap();

        let outcome = engine.pick(0, 2).unwrap();
        assert_eq!(
            outcome,
            PickOutcome::Safe {
                cell: Cell::new(0, 2),
                multiplier: Multiplier::from_basis_points(12_300),
                next_row: 1,
            }
        );
        assert!(!outcome.is_terminal());
        assert_eq!(outcome.settlement(), None);
        assert_eq!(engine.snapshot().current_row, Some(1));
    }

    #[test]
    fn test_hazard_pick_loses() {
        let mut engine = engine(vec![4]);
        engine.start(Money::from_units(10)).unwrap();

        let outcome = engine.pick(0, 4).unwrap();
        match &outcome {
            PickOutcome::Lost { cell, hazards } => {
                assert_eq!(*cell, Cell::new(0, 4));
                assert_eq!(hazards.rows(), 12);
            }
            other => panic!("expected loss, got {other:?}"),
        }
        assert_eq!(outcome.settlement(), Some(Money::ZERO));
        assert_eq!(engine.status(), RoundStatus::Lost);
        assert_eq!(engine.ledger().balance(), Money::from_units(90));
        assert!(!engine.ledger().has_pending_bet());
    }

    #[test]
    fn test_top_row_wins() {
        let mut engine = small_engine();
        engine.start(Money::from_units(4)).unwrap();

        engine.pick(0, 1).unwrap();
        let outcome = engine.pick(1, 2).unwrap();

        assert_eq!(outcome.settlement(), Some(Money::from_units(10)));
        assert!(matches!(outcome, PickOutcome::Won { .. }));
        assert_eq!(engine.status(), RoundStatus::Won);
        assert_eq!(engine.ledger().balance(), Money::from_units(16));
    }

    #[test]
    fn test_cash_out_before_any_pick_refunds() {
        let mut engine = engine(vec![0]);
        engine.start(Money::from_cents(1_234)).unwrap();

        let outcome = engine.cash_out().unwrap();
        assert_eq!(outcome.multiplier, Multiplier::ONE);
        assert_eq!(outcome.settlement, Money::from_cents(1_234));
        assert_eq!(engine.ledger().balance(), Money::from_units(100));
        assert_eq!(engine.status(), RoundStatus::CashedOut);
    }

    #[test]
    fn test_intents_after_terminal() {
        let mut engine = engine(vec![0]);
        engine.start(Money::from_units(10)).unwrap();
        engine.cash_out().unwrap();

        let before = engine.snapshot();
        assert_eq!(
            engine.pick(0, 1),
            Err(GameError::IllegalMove(IllegalMove::NoActiveRound))
        );
        assert_eq!(
            engine.cash_out(),
            Err(GameError::IllegalMove(IllegalMove::NoActiveRound))
        );
        assert_eq!(engine.snapshot(), before);

        // A new round may start.
        assert!(engine.start(Money::from_units(10)).is_ok());
    }

    #[test]
    fn test_idle_rejects_moves() {
        let mut engine = engine(vec![0]);
        assert!(engine.pick(0, 0).is_err());
        assert!(engine.cash_out().is_err());
        assert_eq!(engine.status(), RoundStatus::Idle);
    }

    #[test]
    fn test_rejected_pick_keeps_state() {
        let mut engine = engine(vec![0]);
        engine.start(Money::from_units(10)).unwrap();
        engine.pick(0, 1).unwrap();
        let before = engine.snapshot();

        assert_eq!(
            engine.pick(0, 1),
            Err(GameError::IllegalMove(IllegalMove::AlreadyRevealed { row: 0, col: 1 }))
        );
        assert_eq!(
            engine.pick(3, 1),
            Err(GameError::IllegalMove(IllegalMove::WrongRow { row: 3, current_row: 1 }))
        );
        assert_eq!(
            engine.pick(1, 9),
            Err(GameError::IllegalMove(IllegalMove::ColumnOutOfRange { col: 9, columns: 5 }))
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_seeded_engines_match() {
        let mut a = RoundEngine::with_seed(BoardConfig::default(), 77).unwrap();
        let mut b = RoundEngine::with_seed(BoardConfig::default(), 77).unwrap();
        a.start(Money::from_units(1)).unwrap();
        b.start(Money::from_units(1)).unwrap();
        a.cash_out().unwrap();
        b.cash_out().unwrap();

        assert_eq!(a.snapshot().hazards, b.snapshot().hazards);
    }
}
