//! rps-referee - rock-paper-scissors referee for hand-landmark trackers.
//!
//! Classifies each tracked hand into rock, paper or scissors from its 21
//! joint positions and judges the left hand against the right. The library
//! is pure computation; the `ipc` module and the binary expose it over a
//! line-oriented s-expression protocol.

pub mod error;
pub mod gesture;
pub mod ipc;
pub mod judge;
pub mod locale;
pub mod referee;

pub use error::{RefereeError, Result};
pub use gesture::{
    AnglePolicy, Classification, ClassifierConfig, Finger, FingerStates, FingerThresholds,
    Gesture, GestureClassifier, HandLandmarks, JointPosition, MatchKind, MatchPolicy,
};
pub use judge::{Judge, JudgeConfig, Outcome, Verdict};
pub use locale::Locale;
pub use referee::{Referee, RoundResult};
