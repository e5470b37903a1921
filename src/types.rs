//! Shared types for the PAROLI tracker.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that the wheel, strategy,
//! and session modules can depend on them without circular references.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spin
// ---------------------------------------------------------------------------

/// A single European-roulette spin outcome, validated to [0, 36].
///
/// Out-of-range input is rejected at construction, so every `Spin` held
/// anywhere in the system is a real pocket number. Serde goes through the
/// same check (`try_from`), which covers API payloads and persisted state
/// alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Spin(u8);

impl Spin {
    /// Highest pocket number on a European wheel.
    pub const MAX: u8 = 36;

    /// Validate and wrap a raw outcome.
    pub fn new(value: u8) -> Result<Self, ParoliError> {
        if value > Self::MAX {
            Err(ParoliError::InvalidOutcome { value })
        } else {
            Ok(Spin(value))
        }
    }

    /// The pocket number.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this is the house pocket. Zero loses every even-money chance.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Spin {
    type Error = ParoliError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Spin::new(value)
    }
}

impl From<Spin> for u8 {
    fn from(spin: Spin) -> u8 {
        spin.0
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Chance
// ---------------------------------------------------------------------------

/// One of the six even-money bet categories.
///
/// Each chance is a fixed, total predicate over spin outcomes (see
/// [`Chance::wins`]); zero satisfies none of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Chance {
    Low,
    High,
    Even,
    Odd,
    Red,
    Black,
}

impl Chance {
    /// All six chances (useful for iteration). The order here is the
    /// display order used for reports.
    pub const ALL: &'static [Chance] = &[
        Chance::Low,
        Chance::High,
        Chance::Even,
        Chance::Odd,
        Chance::Red,
        Chance::Black,
    ];

    /// Table label shown to the collaborator.
    pub fn label(self) -> &'static str {
        match self {
            Chance::Low => "1-18",
            Chance::High => "19-36",
            Chance::Even => "Even",
            Chance::Odd => "Odd",
            Chance::Red => "Red",
            Chance::Black => "Black",
        }
    }

    /// The lowercase tag used in config files, API paths, and persistence.
    pub fn tag(self) -> &'static str {
        match self {
            Chance::Low => "low",
            Chance::High => "high",
            Chance::Even => "even",
            Chance::Odd => "odd",
            Chance::Red => "red",
            Chance::Black => "black",
        }
    }
}

impl fmt::Display for Chance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Attempt to parse a string into a Chance (case-insensitive).
impl std::str::FromStr for Chance {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" | "1-18" => Ok(Chance::Low),
            "high" | "19-36" => Ok(Chance::High),
            "even" => Ok(Chance::Even),
            "odd" => Ok(Chance::Odd),
            "red" => Ok(Chance::Red),
            "black" => Ok(Chance::Black),
            _ => Err(anyhow::anyhow!("Unknown chance: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Progression state
// ---------------------------------------------------------------------------

/// Derived progression state for one chance after replaying the history.
///
/// `next_stake` is the wager for the next, not-yet-occurred spin.
/// Invariant: `in_recovery` and `win_streak > 0` are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressionState {
    pub next_stake: Decimal,
    pub win_streak: u8,
    pub in_recovery: bool,
}

impl ProgressionState {
    /// The display phase for this state.
    pub fn phase(&self) -> ProgressionPhase {
        if self.in_recovery {
            ProgressionPhase::Recovery
        } else if self.win_streak > 0 {
            ProgressionPhase::Paroli(self.win_streak)
        } else {
            ProgressionPhase::Base
        }
    }
}

/// Human-readable progression phase, as shown in the chance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionPhase {
    /// Flat base stake, no streak running.
    Base,
    /// N consecutive wins parlayed (N in 1..=2; the third win resets).
    Paroli(u8),
    /// The single doubled attempt after a loss.
    Recovery,
}

impl fmt::Display for ProgressionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressionPhase::Base => write!(f, "Base"),
            ProgressionPhase::Paroli(n) => write!(f, "Paroli {n}/3"),
            ProgressionPhase::Recovery => write!(f, "Recovery"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for PAROLI.
///
/// Both variants are boundary errors: once input passes validation, the
/// progression fold itself is total and never fails.
#[derive(Debug, thiserror::Error)]
pub enum ParoliError {
    #[error("Invalid spin outcome: {value} (must be 0-36)")]
    InvalidOutcome { value: u8 },

    #[error("Invalid base stake: {stake} (must be positive)")]
    InvalidStake { stake: Decimal },
}

/// Reject non-positive base stakes before they reach the engine.
///
/// `Decimal` cannot be NaN or infinite, so positivity is the only check.
pub fn validate_stake(stake: Decimal) -> Result<Decimal, ParoliError> {
    if stake <= Decimal::ZERO {
        Err(ParoliError::InvalidStake { stake })
    } else {
        Ok(stake)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
