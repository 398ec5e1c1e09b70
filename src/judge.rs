//! Round judging between a left and a right hand.
//!
//! Equal labels draw. Otherwise the left hand wins only for the three
//! beating pairs (rock>scissors, scissors>paper, paper>rock); every other
//! pair, including anything involving `unknown` or an unrecognized label
//! string, goes to the right hand.

use std::fmt;

use tracing::debug;

use crate::gesture::Gesture;
use crate::locale::Locale;

/// Left hand's winning pairs.
const LEFT_WINS: [(&str, &str); 3] = [
    ("rock", "scissors"),
    ("scissors", "paper"),
    ("paper", "rock"),
];

/// Which side won a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Left,
    Right,
    Draw,
}

impl Outcome {
    /// String representation for IPC.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Draw => "draw",
        }
    }

    /// Outcome with the hands swapped.
    pub fn mirrored(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Draw => Self::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one judged pair, with its display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub message: &'static str,
}

/// Configuration for the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JudgeConfig {
    /// Language of verdict messages.
    pub locale: Locale,
}

/// Stateless round judge.
#[derive(Debug, Clone, Default)]
pub struct Judge {
    config: JudgeConfig,
}

impl Judge {
    pub fn new(config: JudgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Judge two classified gestures.
    pub fn judge(&self, left: Gesture, right: Gesture) -> Verdict {
        self.judge_labels(left.as_str(), right.as_str())
    }

    /// Judge two raw label strings.
    ///
    /// Labels are compared as-is: identical strings draw, the win table is
    /// consulted otherwise, and any pair not in the table is a right-hand
    /// win. Strings are not validated against the gesture vocabulary.
    pub fn judge_labels(&self, left: &str, right: &str) -> Verdict {
        let outcome = if left == right {
            Outcome::Draw
        } else if LEFT_WINS.contains(&(left, right)) {
            Outcome::Left
        } else {
            Outcome::Right
        };

        debug!("Judged {} vs {}: {}", left, right, outcome);

        Verdict {
            outcome,
            message: self.config.locale.outcome_message(outcome),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────
