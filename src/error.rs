//! Referee errors.
//!
//! Everything the library can reject lives here: joint sequences that break
//! the 21-point contract, label strings outside the gesture vocabulary, and
//! malformed s-expression payloads.

use crate::gesture::landmarks::LANDMARK_COUNT;

/// Errors produced while validating or parsing referee input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefereeError {
    /// The joint sequence does not hold exactly 21 positions.
    #[error("invalid joint sequence: expected {expected} landmarks, got {got}")]
    InvalidInput {
        /// Always `LANDMARK_COUNT`.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// A joint coordinate is NaN or infinite.
    #[error("invalid joint sequence: landmark {index} has a non-finite coordinate")]
    NonFiniteJoint {
        /// Landmark index (0 = wrist).
        index: usize,
    },

    /// A label string is not one of rock, paper, scissors, unknown.
    #[error("unknown gesture label: {0:?}")]
    UnknownGesture(String),

    /// An s-expression payload could not be interpreted.
    #[error("malformed payload: {0}")]
    Parse(String),
}

impl RefereeError {
    /// Wrong-length error for a sequence of `got` joints.
    pub fn wrong_length(got: usize) -> Self {
        Self::InvalidInput {
            expected: LANDMARK_COUNT,
            got,
        }
    }

    /// Whether the error came from the joint-sequence contract.
    pub fn is_input_contract(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::NonFiniteJoint { .. })
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RefereeError>;
