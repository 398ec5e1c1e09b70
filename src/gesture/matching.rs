//! Finger-state pattern matching.
//!
//! Maps a 5-finger state vector to rock, paper or scissors. Exact matching
//! requires one of the three canonical patterns; fuzzy matching falls back
//! to tolerant rules when the exact lookup misses.

use std::fmt;
use std::str::FromStr;

use super::landmarks::{Finger, FingerStates};
use crate::error::RefereeError;

// ── Gesture types ──────────────────────────────────────────

/// Recognized gesture labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// All fingers folded (fist).
    Rock,
    /// All fingers extended (open hand).
    Paper,
    /// Index and middle extended, others folded.
    Scissors,
    /// No pattern matched.
    Unknown,
}

impl Gesture {
    /// The three playable gestures.
    pub const KNOWN: [Gesture; 3] = [Self::Rock, Self::Paper, Self::Scissors];

    /// String representation for IPC.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Canonical finger pattern, if the gesture has one.
    pub fn canonical_pattern(&self) -> Option<FingerStates> {
        match self {
            Self::Rock => Some(ROCK),
            Self::Paper => Some(PAPER),
            Self::Scissors => Some(SCISSORS),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gesture {
    type Err = RefereeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Self::Rock),
            "paper" => Ok(Self::Paper),
            "scissors" => Ok(Self::Scissors),
            "unknown" => Ok(Self::Unknown),
            other => Err(RefereeError::UnknownGesture(other.to_string())),
        }
    }
}

// ── Patterns ───────────────────────────────────────────────

pub const ROCK: FingerStates = FingerStates::from_bits([0, 0, 0, 0, 0]);
pub const PAPER: FingerStates = FingerStates::from_bits([1, 1, 1, 1, 1]);
pub const SCISSORS: FingerStates = FingerStates::from_bits([0, 1, 1, 0, 0]);

/// Rock plus the two common tracking slips (thumb or pinky lifting).
const ROCK_VARIANTS: [FingerStates; 3] = [
    ROCK,
    FingerStates::from_bits([1, 0, 0, 0, 0]),
    FingerStates::from_bits([0, 0, 0, 0, 1]),
];

const EXACT_PATTERNS: [(Gesture, FingerStates); 3] = [
    (Gesture::Rock, ROCK),
    (Gesture::Paper, PAPER),
    (Gesture::Scissors, SCISSORS),
];

// ── Matching ───────────────────────────────────────────────

/// Pattern matching policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Canonical patterns only.
    #[default]
    Exact,
    /// Canonical patterns, then tolerant rules.
    Fuzzy,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// How a gesture was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Equal to a canonical pattern.
    Exact,
    /// Accepted by a tolerant rule only.
    Fuzzy,
    /// Nothing matched; gesture is `Unknown`.
    Unmatched,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Unmatched => "none",
        }
    }

    /// Confidence score attached to a match of this kind.
    pub fn confidence(&self) -> f32 {
        match self {
            Self::Exact => 1.0,
            Self::Fuzzy => 0.85,
            Self::Unmatched => 0.5,
        }
    }
}

/// Result of matching a finger state vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureMatch {
    pub gesture: Gesture,
    pub kind: MatchKind,
}

impl GestureMatch {
    pub fn confidence(&self) -> f32 {
        self.kind.confidence()
    }
}

/// Canonical-pattern lookup.
pub fn match_exact(states: &FingerStates) -> Option<Gesture> {
    EXACT_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern == states)
        .map(|(gesture, _)| *gesture)
}

/// Tolerant rules, evaluated rock, then paper, then scissors.
///
/// The first rule that accepts wins, so a vector accepted by several rules
/// takes the earliest label.
pub fn match_fuzzy(states: &FingerStates) -> Option<Gesture> {
    if ROCK_VARIANTS
        .iter()
        .any(|variant| states.hamming_distance(variant) <= 1)
    {
        return Some(Gesture::Rock);
    }

    if states.extended_count() >= 4 {
        return Some(Gesture::Paper);
    }

    if states.is_extended(Finger::Index) && states.is_extended(Finger::Middle) {
        let others = [Finger::Thumb, Finger::Ring, Finger::Pinky]
            .iter()
            .filter(|f| states.is_extended(**f))
            .count();
        if others <= 1 {
            return Some(Gesture::Scissors);
        }
    }

    None
}

/// Match a state vector under the given policy.
pub fn match_gesture(states: &FingerStates, policy: MatchPolicy) -> GestureMatch {
    if let Some(gesture) = match_exact(states) {
        return GestureMatch {
            gesture,
            kind: MatchKind::Exact,
        };
    }

    let fuzzy = match policy {
        MatchPolicy::Exact => None,
        MatchPolicy::Fuzzy => match_fuzzy(states),
    };

    match fuzzy {
        Some(gesture) => GestureMatch {
            gesture,
            kind: MatchKind::Fuzzy,
        },
        None => GestureMatch {
            gesture: Gesture::Unknown,
            kind: MatchKind::Unmatched,
        },
    }
}

// ── Tests ──────────────────────────────────────────────────
