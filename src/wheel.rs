//! Outcome classification for the European wheel.
//!
//! Pure, total mappings from a spin outcome to its color and its
//! membership in each of the six even-money chances. Zero is the house
//! pocket: it is green, neither even nor odd, and loses every chance.

use serde::Serialize;
use std::fmt;

use crate::types::{Chance, Spin};

/// Red numbers on a roulette wheel.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Pocket color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
            Color::Green => write!(f, "green"),
        }
    }
}

/// Check if a number is red.
fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

impl Spin {
    /// Pocket color: green for zero, else red or black per the fixed set.
    pub fn color(self) -> Color {
        if self.is_zero() {
            Color::Green
        } else if is_red(self.value()) {
            Color::Red
        } else {
            Color::Black
        }
    }
}

impl Chance {
    /// Whether this chance wins on the given spin.
    ///
    /// Zero loses all six chances; in particular it counts as neither
    /// even nor odd.
    pub fn wins(self, spin: Spin) -> bool {
        let n = spin.value();
        if n == 0 {
            return false;
        }

        match self {
            Chance::Low => (1..=18).contains(&n),
            Chance::High => (19..=36).contains(&n),
            Chance::Even => n % 2 == 0,
            Chance::Odd => n % 2 == 1,
            Chance::Red => is_red(n),
            Chance::Black => !is_red(n),
        }
    }
}

/// Full classification of one spin outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub color: Color,
    pub low: bool,
    pub high: bool,
    pub even: bool,
    pub odd: bool,
}

/// Classify a spin into its color and even-money memberships.
pub fn classify(spin: Spin) -> Classification {
    Classification {
        color: spin.color(),
        low: Chance::Low.wins(spin),
        high: Chance::High.wins(spin),
        even: Chance::Even.wins(spin),
        odd: Chance::Odd.wins(spin),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn spin(n: u8) -> Spin {
        Spin::new(n).unwrap()
    }

    #[test]
    fn test_red_set_size() {
        assert_eq!(RED_NUMBERS.len(), 18);
    }

    #[test]
    fn test_colors() {
        assert_eq!(spin(0).color(), Color::Green);
        assert_eq!(spin(1).color(), Color::Red);
        assert_eq!(spin(3).color(), Color::Red);
        assert_eq!(spin(32).color(), Color::Red);
        assert_eq!(spin(2).color(), Color::Black);
        assert_eq!(spin(4).color(), Color::Black);
        assert_eq!(spin(35).color(), Color::Black);
    }

    #[test]
    fn test_exactly_one_color_green_iff_zero() {
        for n in 0..=36u8 {
            let color = spin(n).color();
            if n == 0 {
                assert_eq!(color, Color::Green);
            } else {
                assert!(color == Color::Red || color == Color::Black);
            }
        }
    }

    #[test]
    fn test_red_black_partition_nonzero() {
        // 18 red + 18 black pockets, zero in neither camp.
        let reds = (1..=36u8).filter(|&n| spin(n).color() == Color::Red).count();
        let blacks = (1..=36u8).filter(|&n| spin(n).color() == Color::Black).count();
        assert_eq!(reds, 18);
        assert_eq!(blacks, 18);
    }

    #[test]
    fn test_wins_colors() {
        assert!(Chance::Red.wins(spin(1)));
        assert!(Chance::Red.wins(spin(36)));
        assert!(!Chance::Red.wins(spin(2)));
        assert!(!Chance::Red.wins(spin(0))); // Zero loses

        assert!(Chance::Black.wins(spin(2)));
        assert!(Chance::Black.wins(spin(35)));
        assert!(!Chance::Black.wins(spin(1)));
        assert!(!Chance::Black.wins(spin(0))); // Zero loses
    }

    #[test]
    fn test_wins_even_odd() {
        assert!(Chance::Even.wins(spin(2)));
        assert!(Chance::Even.wins(spin(36)));
        assert!(!Chance::Even.wins(spin(1)));
        assert!(!Chance::Even.wins(spin(0))); // Zero is not even here

        assert!(Chance::Odd.wins(spin(1)));
        assert!(Chance::Odd.wins(spin(35)));
        assert!(!Chance::Odd.wins(spin(2)));
        assert!(!Chance::Odd.wins(spin(0))); // Zero is not odd either
    }

    #[test]
    fn test_even_odd_never_both() {
        for n in 0..=36u8 {
            let s = spin(n);
            let even = Chance::Even.wins(s);
            let odd = Chance::Odd.wins(s);
            assert!(!(even && odd));
            if n == 0 {
                assert!(!even && !odd);
            } else {
                assert!(even != odd);
            }
        }
    }

    #[test]
    fn test_wins_low_high() {
        assert!(Chance::Low.wins(spin(1)));
        assert!(Chance::Low.wins(spin(18)));
        assert!(!Chance::Low.wins(spin(19)));
        assert!(!Chance::Low.wins(spin(0)));

        assert!(Chance::High.wins(spin(19)));
        assert!(Chance::High.wins(spin(36)));
        assert!(!Chance::High.wins(spin(18)));
        assert!(!Chance::High.wins(spin(0)));
    }

    #[test]
    fn test_zero_loses_every_chance() {
        for chance in Chance::ALL {
            assert!(!chance.wins(spin(0)));
        }
    }

    #[test]
    fn test_classify_nineteen() {
        let c = classify(spin(19));
        assert_eq!(c.color, Color::Red);
        assert!(!c.low);
        assert!(c.high);
        assert!(!c.even);
        assert!(c.odd);
    }

    #[test]
    fn test_classify_seventeen_is_black() {
        // 17 sits between red 16 and red 18 on the table layout.
        let c = classify(spin(17));
        assert_eq!(c.color, Color::Black);
        assert!(c.low && c.odd);
    }

    #[test]
    fn test_classify_zero() {
        let c = classify(spin(0));
        assert_eq!(c.color, Color::Green);
        assert!(!c.low && !c.high && !c.even && !c.odd);
    }
}
