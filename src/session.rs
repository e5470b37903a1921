//! Session state — the externally-driven side of the tracker.
//!
//! Holds the append-only spin history, the base stake, the starting
//! capital, and the active-chance set. Every derived output (per-chance
//! reports, running balance) is recomputed from the full history on read,
//! so there is no cached progression state to go stale. Mutations are
//! immediately visible to the next read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::info;

use crate::strategy::{self, ChanceReport};
use crate::types::{validate_stake, Chance, ParoliError, Spin};

/// One tracking session: history plus the knobs the collaborator can turn.
///
/// Saved to disk as-is; the `Spin` entries revalidate on deserialization,
/// so a tampered state file cannot smuggle an out-of-range pocket in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    spins: Vec<Spin>,
    base_stake: Decimal,
    starting_capital: Decimal,
    active: BTreeSet<Chance>,
    started_at: DateTime<Utc>,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active: Vec<&str> = self.active_chances().iter().map(|c| c.label()).collect();
        write!(
            f,
            "spins={} | stake={} | capital={} | balance={} | active=[{}]",
            self.spins.len(),
            self.base_stake,
            self.starting_capital,
            self.balance(),
            active.join(", "),
        )
    }
}

impl Session {
    /// Create a new session. The base stake is validated here — the
    /// progression engine never sees a non-positive stake. Starting
    /// capital is not validated (any decimal).
    pub fn new(
        base_stake: Decimal,
        starting_capital: Decimal,
        active: impl IntoIterator<Item = Chance>,
    ) -> Result<Self, ParoliError> {
        Ok(Self {
            spins: Vec::new(),
            base_stake: validate_stake(base_stake)?,
            starting_capital,
            active: active.into_iter().collect(),
            started_at: Utc::now(),
        })
    }

    // -- Mutating operations ----------------------------------------------

    /// Append one spin outcome to the history.
    pub fn record(&mut self, spin: Spin) {
        self.spins.push(spin);
        info!(
            spin = %spin,
            color = %spin.color(),
            total = self.spins.len(),
            "Spin recorded"
        );
    }

    /// Remove and return the most recent spin, if any.
    pub fn undo(&mut self) -> Option<Spin> {
        let removed = self.spins.pop();
        match removed {
            Some(spin) => info!(spin = %spin, remaining = self.spins.len(), "Spin undone"),
            None => info!("Undo on empty history — nothing to do"),
        }
        removed
    }

    /// Clear the whole history. Stakes, capital, and the active set stay.
    pub fn clear(&mut self) {
        let cleared = self.spins.len();
        self.spins.clear();
        info!(cleared, "History cleared");
    }

    /// Toggle a chance's membership in the active set. Returns whether the
    /// chance is active afterwards. Past history is untouched — only
    /// aggregation membership changes.
    pub fn toggle(&mut self, chance: Chance) -> bool {
        let now_active = if self.active.remove(&chance) {
            false
        } else {
            self.active.insert(chance);
            true
        };
        info!(chance = %chance, active = now_active, "Chance toggled");
        now_active
    }

    /// Set the base stake. Rejects non-positive values; on error the
    /// previous stake is kept.
    pub fn set_base_stake(&mut self, stake: Decimal) -> Result<(), ParoliError> {
        self.base_stake = validate_stake(stake)?;
        info!(stake = %self.base_stake, "Base stake set");
        Ok(())
    }

    /// Set the starting capital the balance is computed against.
    pub fn set_starting_capital(&mut self, capital: Decimal) {
        self.starting_capital = capital;
        info!(capital = %capital, "Starting capital set");
    }

    // -- Accessors --------------------------------------------------------

    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    pub fn spin_count(&self) -> usize {
        self.spins.len()
    }

    pub fn base_stake(&self) -> Decimal {
        self.base_stake
    }

    pub fn starting_capital(&self) -> Decimal {
        self.starting_capital
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_active(&self, chance: Chance) -> bool {
        self.active.contains(&chance)
    }

    /// The active chances in display order.
    pub fn active_chances(&self) -> Vec<Chance> {
        Chance::ALL
            .iter()
            .copied()
            .filter(|c| self.active.contains(c))
            .collect()
    }

    // -- Derived output ---------------------------------------------------

    /// Per-chance progression reports for the active set, recomputed by
    /// full replay.
    pub fn reports(&self) -> Vec<ChanceReport> {
        strategy::survey(&self.spins, self.base_stake, &self.active_chances())
    }

    /// Net profit across the active chances.
    pub fn total_profit(&self) -> Decimal {
        strategy::table_profit(&self.spins, self.base_stake, &self.active_chances())
    }

    /// Running balance: starting capital plus total profit.
    pub fn balance(&self) -> Decimal {
        self.starting_capital + self.total_profit()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
