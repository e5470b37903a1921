//! Strategy engine — Paroli progression and per-chance aggregation.
//!
//! Each active chance runs its own independent progression over the same
//! spin history; nothing is shared between chances. The aggregator sums
//! the per-chance profits into the single running balance the collaborator
//! displays.

pub mod progression;

use rust_decimal::Decimal;
use std::fmt;
use tracing::debug;

use crate::types::{Chance, ProgressionState, Spin};
use progression::Progression;

// ---------------------------------------------------------------------------
// Chance report
// ---------------------------------------------------------------------------

/// Computed outcome for one active chance over the full history.
#[derive(Debug, Clone)]
pub struct ChanceReport {
    pub chance: Chance,
    pub state: ProgressionState,
    pub profit: Decimal,
}

impl ChanceReport {
    /// Table label for this chance.
    pub fn label(&self) -> &'static str {
        self.chance.label()
    }
}

impl fmt::Display for ChanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | next {} | profit {}",
            self.label(),
            self.state.phase(),
            self.state.next_stake,
            self.profit,
        )
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Replay the history independently for each active chance.
///
/// An empty active set yields an empty report list, not an error.
/// Recomputed from scratch on every call; callers that need streaming
/// updates can hold a `Progression` per chance instead — the two are
/// equivalent for every history prefix.
pub fn survey(spins: &[Spin], base_stake: Decimal, active: &[Chance]) -> Vec<ChanceReport> {
    let reports: Vec<ChanceReport> = active
        .iter()
        .map(|&chance| {
            let p = Progression::replay(chance, base_stake, spins);
            ChanceReport {
                chance,
                state: p.state(),
                profit: p.profit(),
            }
        })
        .collect();

    debug!(
        spins = spins.len(),
        chances = reports.len(),
        profit = %reports.iter().map(|r| r.profit).sum::<Decimal>(),
        "Survey complete"
    );

    reports
}

/// Net profit summed across the active chances.
pub fn table_profit(spins: &[Spin], base_stake: Decimal, active: &[Chance]) -> Decimal {
    survey(spins, base_stake, active)
        .iter()
        .map(|r| r.profit)
        .sum()
}

/// Running balance: starting capital plus the summed table profit.
pub fn balance(
    starting_capital: Decimal,
    spins: &[Spin],
    base_stake: Decimal,
    active: &[Chance],
) -> Decimal {
    starting_capital + table_profit(spins, base_stake, active)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
