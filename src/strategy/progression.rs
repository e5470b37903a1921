//! Paroli progression state machine.
//!
//! One `Progression` tracks a single even-money chance through the spin
//! history: wins are parlayed (stake doubled) up to three in a row, then
//! the profit is locked in by resetting to the base stake. A loss triggers
//! exactly one recovery attempt at twice the base stake; after that spin
//! the progression returns to base regardless of its outcome. Worst-case
//! consecutive-loss exposure per loss pair is `base + 2*base`.

use rust_decimal::Decimal;
use tracing::debug;

use crate::types::{Chance, ProgressionState, Spin};

/// Consecutive wins at which the parlay locks in and resets.
pub const PAROLI_CAP: u8 = 3;

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

/// Incremental progression fold for one chance.
///
/// The caller supplies a positive base stake (validated at the session,
/// config, and API boundaries); the fold itself is total. The stake only
/// ever takes the values `base`, `2*base`, or `4*base` — the cap at three
/// wins bounds parlay growth, so stake magnitude cannot run away.
#[derive(Debug, Clone)]
pub struct Progression {
    chance: Chance,
    base_stake: Decimal,
    stake: Decimal,
    win_streak: u8,
    in_recovery: bool,
    profit: Decimal,
}

impl Progression {
    /// Start a fresh progression at the base stake.
    pub fn new(chance: Chance, base_stake: Decimal) -> Self {
        Self {
            chance,
            base_stake,
            stake: base_stake,
            win_streak: 0,
            in_recovery: false,
            profit: Decimal::ZERO,
        }
    }

    /// Replay a full spin history from the initial state.
    pub fn replay(chance: Chance, base_stake: Decimal, spins: &[Spin]) -> Self {
        let mut progression = Self::new(chance, base_stake);
        for spin in spins {
            progression.record(*spin);
        }
        progression
    }

    /// The chance this progression is tracking.
    pub fn chance(&self) -> Chance {
        self.chance
    }

    /// The base stake the progression always returns to.
    pub fn base_stake(&self) -> Decimal {
        self.base_stake
    }

    /// Cumulative signed profit over all recorded spins.
    pub fn profit(&self) -> Decimal {
        self.profit
    }

    /// The derived state after everything recorded so far. `next_stake`
    /// is the wager for the next, not-yet-occurred spin.
    pub fn state(&self) -> ProgressionState {
        ProgressionState {
            next_stake: self.stake,
            win_streak: self.win_streak,
            in_recovery: self.in_recovery,
        }
    }

    /// Apply one spin outcome.
    ///
    /// Profit moves by the current stake (1:1 payout), then the state
    /// machine advances: parlay on a win, one doubled recovery attempt on
    /// a loss, unconditional reset after any recovery spin.
    pub fn record(&mut self, spin: Spin) {
        let won = self.chance.wins(spin);

        if self.in_recovery {
            // Stake here is always 2 * base; the attempt resolves either
            // way and the progression resets.
            if won {
                self.profit += self.stake;
            } else {
                self.profit -= self.stake;
            }
            self.reset();
        } else if won {
            self.profit += self.stake;
            self.win_streak += 1;
            if self.win_streak >= PAROLI_CAP {
                // Third win locks the parlay in.
                self.reset();
            } else {
                self.stake *= Decimal::TWO;
            }
        } else {
            self.profit -= self.stake;
            self.win_streak = 0;
            self.in_recovery = true;
            self.stake = self.base_stake * Decimal::TWO;
        }

        debug!(
            chance = %self.chance,
            spin = %spin,
            won,
            next_stake = %self.stake,
            streak = self.win_streak,
            recovery = self.in_recovery,
            profit = %self.profit,
            "Progression advanced"
        );
    }

    fn reset(&mut self) {
        self.stake = self.base_stake;
        self.win_streak = 0;
        self.in_recovery = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
