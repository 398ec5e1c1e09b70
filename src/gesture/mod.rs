//! Gesture subsystem: hand landmark types, joint angles, finger-state
//! pattern matching, and the classifier built on them.
//!
//! Provides:
//! - `landmarks`: 21-point hand layout, validated `HandLandmarks`, `FingerStates`
//! - `angle`: interior joint angles
//! - `matching`: exact and fuzzy rock/paper/scissors matching
//! - `classifier`: `GestureClassifier` and its configuration

pub mod angle;
pub mod classifier;
pub mod landmarks;
pub mod matching;

pub use classifier::{
    AnglePolicy, Classification, ClassifierConfig, FingerThresholds, GestureClassifier,
};
pub use landmarks::{Finger, FingerStates, HandLandmarks, JointPosition};
pub use matching::{Gesture, MatchKind, MatchPolicy};
