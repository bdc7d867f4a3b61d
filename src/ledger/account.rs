use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{LedgerError, Money, DEFAULT_OPENING_BALANCE};

/// Spendable balance plus the bet currently at risk.
///
/// `balance` never goes negative: `Money` is unsigned and `reserve` refuses
/// any bet larger than the balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: Money,
    pending_bet: Money,
}

/// Point-in-time view of a ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub balance: Money,
    /// Amount reserved for the active round, zero otherwise.
    pub pending_bet: Money,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Money::from_units(DEFAULT_OPENING_BALANCE))
    }
}

impl Ledger {
    #[must_use]
    pub fn new(opening_balance: Money) -> Self {
        Self {
            balance: opening_balance,
            pending_bet: Money::ZERO,
        }
    }

    #[must_use]
    pub fn balance(&self) -> Money {
        self.balance
    }

    #[must_use]
    pub fn pending_bet(&self) -> Money {
        self.pending_bet
    }

    #[must_use]
    pub fn has_pending_bet(&self) -> bool {
        !self.pending_bet.is_zero()
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            balance: self.balance,
            pending_bet: self.pending_bet,
        }
    }

    /// Debit `bet` and hold it as the pending stake.
    pub fn reserve(&mut self, bet: Money) -> Result<(), LedgerError> {
        if bet.is_zero() {
            return Err(LedgerError::InvalidBet);
        }
        if self.has_pending_bet() {
            return Err(LedgerError::BetPending {
                pending: self.pending_bet,
            });
        }
        let remaining = self
            .balance
            .checked_sub(bet)
            .ok_or(LedgerError::InsufficientFunds {
                bet,
                balance: self.balance,
            })?;

        self.balance = remaining;
        self.pending_bet = bet;
        debug!(%bet, balance = %self.balance, "bet reserved");
        Ok(())
    }

    /// Credit `amount` and release the pending stake.
    pub fn settle(&mut self, amount: Money) {
        self.balance = self.balance.saturating_add(amount);
        self.pending_bet = Money::ZERO;
        debug!(%amount, balance = %self.balance, "round settled");
    }
}
