//! Rock-paper-scissors classification from hand landmarks.
//!
//! Measures one bending angle per finger, thresholds it into an
//! extended/folded state, and matches the resulting 5-finger vector to a
//! gesture. Both the angle policy (one global threshold vs per-finger
//! thresholds over two joint triples) and the matching policy (exact vs
//! fuzzy) are chosen through `ClassifierConfig`.

use std::str::FromStr;

use tracing::debug;

use super::angle::{mean_angle, triple_angle};
use super::landmarks::{Finger, FingerStates, HandLandmarks, JointPosition, FINGER_COUNT};
use super::matching::{match_gesture, Gesture, MatchKind, MatchPolicy};
use crate::error::Result;
use crate::locale::Locale;

// ── Config ─────────────────────────────────────────────────

/// Default global extension threshold (degrees).
pub const DEFAULT_ANGLE_THRESHOLD: f32 = 130.0;

/// Per-finger extension thresholds (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerThresholds {
    pub thumb: f32,
    pub index: f32,
    pub middle: f32,
    pub ring: f32,
    pub pinky: f32,
}

impl Default for FingerThresholds {
    fn default() -> Self {
        Self {
            thumb: 120.0,
            index: 140.0,
            middle: 140.0,
            ring: 135.0,
            pinky: 130.0,
        }
    }
}

impl FingerThresholds {
    /// Same threshold for every finger.
    pub fn uniform(threshold_deg: f32) -> Self {
        Self {
            thumb: threshold_deg,
            index: threshold_deg,
            middle: threshold_deg,
            ring: threshold_deg,
            pinky: threshold_deg,
        }
    }

    pub fn get(&self, finger: Finger) -> f32 {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }
}

/// Parses `thumb,index,middle,ring,pinky` in degrees, e.g. `120,140,140,135,130`.
impl FromStr for FingerThresholds {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                match part.parse::<f32>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(format!("invalid threshold: {part:?}")),
                }
            })
            .collect::<std::result::Result<Vec<f32>, String>>()?;

        match values.as_slice() {
            &[thumb, index, middle, ring, pinky] => Ok(Self {
                thumb,
                index,
                middle,
                ring,
                pinky,
            }),
            _ => Err(format!("expected 5 thresholds, got {}", values.len())),
        }
    }
}

/// How a finger's bending angle is measured and thresholded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnglePolicy {
    /// One threshold for all fingers, angle from the primary triple only.
    SingleThreshold { threshold_deg: f32 },
    /// Per-finger thresholds, angle averaged over two overlapping triples.
    PerFinger(FingerThresholds),
}

impl Default for AnglePolicy {
    fn default() -> Self {
        Self::SingleThreshold {
            threshold_deg: DEFAULT_ANGLE_THRESHOLD,
        }
    }
}

impl AnglePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleThreshold { .. } => "single",
            Self::PerFinger(_) => "per-finger",
        }
    }

    /// Extension threshold applied to a finger.
    pub fn threshold(&self, finger: Finger) -> f32 {
        match self {
            Self::SingleThreshold { threshold_deg } => *threshold_deg,
            Self::PerFinger(thresholds) => thresholds.get(finger),
        }
    }

    /// Measured bending angle of a finger (degrees).
    pub fn finger_angle(&self, hand: &HandLandmarks, finger: Finger) -> f32 {
        match self {
            Self::SingleThreshold { .. } => triple_angle(hand, finger.primary_triple()),
            Self::PerFinger(_) => mean_angle(hand, &finger.paired_triples()),
        }
    }
}

/// Configuration for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassifierConfig {
    /// Angle measurement and threshold policy.
    pub angle_policy: AnglePolicy,
    /// Exact or fuzzy pattern matching.
    pub matching: MatchPolicy,
    /// Enable the per-finger debug report.
    pub debug: bool,
    /// Language of the debug report.
    pub locale: Locale,
}

impl ClassifierConfig {
    /// Single global threshold with exact matching.
    pub fn single_threshold(threshold_deg: f32) -> Self {
        Self {
            angle_policy: AnglePolicy::SingleThreshold { threshold_deg },
            ..Self::default()
        }
    }

    /// Per-finger multi-joint thresholds with fuzzy matching, tuned for
    /// noisy laptop-webcam tracking.
    pub fn webcam() -> Self {
        Self {
            angle_policy: AnglePolicy::PerFinger(FingerThresholds::default()),
            matching: MatchPolicy::Fuzzy,
            ..Self::default()
        }
    }
}

// ── Result ─────────────────────────────────────────────────

/// Outcome of classifying one hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub gesture: Gesture,
    pub finger_states: FingerStates,
    /// 1.0 exact, 0.85 fuzzy, 0.5 unknown.
    pub confidence: f32,
    /// Measured angle per finger (degrees), thumb to pinky. Diagnostic only.
    pub angles: [f32; FINGER_COUNT],
    pub match_kind: MatchKind,
}

// ── Classifier ─────────────────────────────────────────────

/// Stateless gesture classifier.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a raw tracker sequence.
    ///
    /// Fails if the sequence is not exactly 21 finite joints.
    pub fn classify(&self, joints: &[JointPosition]) -> Result<Classification> {
        let hand = HandLandmarks::from_slice(joints)?;
        Ok(self.classify_landmarks(&hand))
    }

    /// Classify an already-validated hand.
    pub fn classify_landmarks(&self, hand: &HandLandmarks) -> Classification {
        let angles = self.finger_angles(hand);
        let finger_states = self.finger_states_from_angles(&angles);
        let matched = match_gesture(&finger_states, self.config.matching);

        debug!(
            "Classified {} ({}) states={} angles={:?}",
            matched.gesture,
            matched.kind.as_str(),
            finger_states,
            angles,
        );

        Classification {
            gesture: matched.gesture,
            finger_states,
            confidence: matched.confidence(),
            angles,
            match_kind: matched.kind,
        }
    }

    /// Bending angle of every finger under the configured policy.
    pub fn finger_angles(&self, hand: &HandLandmarks) -> [f32; FINGER_COUNT] {
        Finger::ALL.map(|finger| self.config.angle_policy.finger_angle(hand, finger))
    }

    /// Extended/folded state of every finger.
    pub fn finger_states(&self, hand: &HandLandmarks) -> FingerStates {
        self.finger_states_from_angles(&self.finger_angles(hand))
    }

    fn finger_states_from_angles(&self, angles: &[f32; FINGER_COUNT]) -> FingerStates {
        let policy = &self.config.angle_policy;
        FingerStates::new(
            Finger::ALL.map(|finger| angles[finger.index()] > policy.threshold(finger)),
        )
    }

    /// Per-finger debug text, or `None` when debug mode is off.
    pub fn debug_report(&self, result: &Classification) -> Option<String> {
        if !self.config.debug {
            return None;
        }

        let locale = self.config.locale;
        let mut lines = vec!["=== Debug Info ===".to_string()];
        for finger in Finger::ALL {
            lines.push(format!(
                "{}: {:.1}° ({}, {}{:.0}°)",
                locale.finger_name(finger),
                result.angles[finger.index()],
                locale.finger_state_word(result.finger_states.is_extended(finger)),
                locale.threshold_label(),
                self.config.angle_policy.threshold(finger),
            ));
        }
        lines.push(format!(
            "{}: {}",
            locale.gesture_label(),
            result.gesture.as_str().to_uppercase()
        ));
        lines.push(format!("{}: {:.2}", locale.confidence_label(), result.confidence));
        Some(lines.join("\n"))
    }

    /// Generate s-expression for IPC config.
    pub fn config_sexp(&self) -> String {
        let thresholds = Finger::ALL
            .map(|f| format!("{:.1}", self.config.angle_policy.threshold(f)))
            .join(" ");
        format!(
            "(:angle-policy :{} :thresholds ({}) :matching :{} :debug {} :locale :{})",
            self.config.angle_policy.as_str(),
            thresholds,
            self.config.matching.as_str(),
            if self.config.debug { "t" } else { "nil" },
            self.config.locale.as_str(),
        )
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefereeError;
    use crate::gesture::landmarks::{make_hand, INDEX_DIP, INDEX_PIP, INDEX_TIP};

    fn classify(config: ClassifierConfig, extended: [bool; 5]) -> Classification {
        GestureClassifier::new(config)
            .classify(&make_hand(extended))
            .unwrap()
    }

    fn policies() -> [ClassifierConfig; 4] {
        let per_finger = AnglePolicy::PerFinger(FingerThresholds::default());
        [
            ClassifierConfig::default(),
            ClassifierConfig {
                matching: MatchPolicy::Fuzzy,
                ..ClassifierConfig::default()
            },
            ClassifierConfig {
                angle_policy: per_finger,
                ..ClassifierConfig::default()
            },
            ClassifierConfig::webcam(),
        ]
    }

    #[test]
    fn test_default_config() {
        let classifier = GestureClassifier::default();
        assert_eq!(
            classifier.config().angle_policy,
            AnglePolicy::SingleThreshold { threshold_deg: 130.0 }
        );
        assert_eq!(classifier.config().matching, MatchPolicy::Exact);
        assert!(!classifier.config().debug);
    }

    #[test]
    fn test_webcam_preset() {
        let config = ClassifierConfig::webcam();
        assert_eq!(config.matching, MatchPolicy::Fuzzy);
        let policy = config.angle_policy;
        assert_eq!(policy.threshold(Finger::Thumb), 120.0);
        assert_eq!(policy.threshold(Finger::Index), 140.0);
        assert_eq!(policy.threshold(Finger::Middle), 140.0);
        assert_eq!(policy.threshold(Finger::Ring), 135.0);
        assert_eq!(policy.threshold(Finger::Pinky), 130.0);
    }

    #[test]
    fn test_parse_finger_thresholds() {
        assert_eq!(
            "120,140,140,135,130".parse::<FingerThresholds>(),
            Ok(FingerThresholds::default())
        );
        assert_eq!(
            " 90, 100 ,110,120,130 ".parse::<FingerThresholds>(),
            Ok(FingerThresholds {
                thumb: 90.0,
                index: 100.0,
                middle: 110.0,
                ring: 120.0,
                pinky: 130.0,
            })
        );
        assert_eq!(
            "120,140,140,135".parse::<FingerThresholds>(),
            Err("expected 5 thresholds, got 4".to_string())
        );
        assert!("120,140,abc,135,130".parse::<FingerThresholds>().is_err());
        assert!("120,140,NaN,135,130".parse::<FingerThresholds>().is_err());
    }

    #[test]
    fn test_classify_paper() {
        for config in policies() {
            let result = classify(config, [true; 5]);
            assert_eq!(result.gesture, Gesture::Paper, "{config:?}");
            assert_eq!(result.finger_states.bits(), [1, 1, 1, 1, 1]);
            assert_eq!(result.confidence, 1.0);
            assert_eq!(result.match_kind, MatchKind::Exact);
        }
    }

    #[test]
    fn test_classify_rock() {
        for config in policies() {
            let result = classify(config, [false; 5]);
            assert_eq!(result.gesture, Gesture::Rock, "{config:?}");
            assert_eq!(result.finger_states.bits(), [0, 0, 0, 0, 0]);
            assert_eq!(result.confidence, 1.0);
        }
    }

    #[test]
    fn test_classify_scissors() {
        for config in policies() {
            let result = classify(config, [false, true, true, false, false]);
            assert_eq!(result.gesture, Gesture::Scissors, "{config:?}");
            assert_eq!(result.finger_states.bits(), [0, 1, 1, 0, 0]);
        }
    }

    #[test]
    fn test_classify_unknown_exact() {
        let result = classify(ClassifierConfig::default(), [false, true, false, false, false]);
        assert_eq!(result.gesture, Gesture::Unknown);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.match_kind, MatchKind::Unmatched);
    }

    #[test]
    fn test_classify_fuzzy_rock_with_thumb() {
        let exact = classify(ClassifierConfig::default(), [true, false, false, false, false]);
        assert_eq!(exact.gesture, Gesture::Unknown);

        let fuzzy = classify(ClassifierConfig::webcam(), [true, false, false, false, false]);
        assert_eq!(fuzzy.gesture, Gesture::Rock);
        assert_eq!(fuzzy.match_kind, MatchKind::Fuzzy);
        assert_eq!(fuzzy.confidence, 0.85);
    }

    #[test]
    fn test_angles_reported_per_finger() {
        let result = classify(ClassifierConfig::webcam(), [true, false, true, false, true]);
        assert_eq!(result.angles.len(), 5);
        for (i, angle) in result.angles.iter().enumerate() {
            assert!(angle.is_finite());
            if i % 2 == 0 {
                assert!((angle - 180.0).abs() < 0.01, "finger {i}: {angle}");
            } else {
                assert!(*angle < 90.0, "finger {i}: {angle}");
            }
        }
    }

    #[test]
    fn test_threshold_changes_states() {
        let mut joints = make_hand([true; 5]);
        // Bend the index PIP to roughly 135°
        joints[INDEX_DIP] = JointPosition::new(
            joints[INDEX_PIP].x + 0.106,
            joints[INDEX_PIP].y - 0.106,
        );
        joints[INDEX_TIP] = JointPosition::new(
            joints[INDEX_DIP].x + 0.106,
            joints[INDEX_DIP].y - 0.106,
        );

        let loose = GestureClassifier::new(ClassifierConfig::single_threshold(100.0));
        let strict = GestureClassifier::new(ClassifierConfig::single_threshold(160.0));
        assert!(loose.classify(&joints).unwrap().finger_states.is_extended(Finger::Index));
        assert!(!strict.classify(&joints).unwrap().finger_states.is_extended(Finger::Index));
        // Untouched fingers stay straight under both
        assert!(strict.classify(&joints).unwrap().finger_states.is_extended(Finger::Middle));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let classifier = GestureClassifier::default();
        let mut joints = make_hand([true; 5]);
        joints.truncate(20);
        assert_eq!(
            classifier.classify(&joints),
            Err(RefereeError::InvalidInput { expected: 21, got: 20 })
        );
        assert!(classifier.classify(&[]).is_err());
    }

    #[test]
    fn test_degenerate_hand_is_rock() {
        let joints = vec![JointPosition::new(0.5, 0.5); 21];
        for config in policies() {
            let result = GestureClassifier::new(config).classify(&joints).unwrap();
            assert_eq!(result.finger_states.bits(), [0, 0, 0, 0, 0]);
            assert_eq!(result.gesture, Gesture::Rock);
            assert!(result.angles.iter().all(|a| *a == 0.0));
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let joints = make_hand([false, true, true, true, false]);
        for config in policies() {
            let classifier = GestureClassifier::new(config);
            let first = classifier.classify(&joints).unwrap();
            let second = classifier.classify(&joints).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_debug_report_disabled() {
        let classifier = GestureClassifier::default();
        let result = classifier.classify(&make_hand([false; 5])).unwrap();
        assert!(classifier.debug_report(&result).is_none());
    }

    #[test]
    fn test_debug_report_format() {
        let classifier = GestureClassifier::new(ClassifierConfig {
            debug: true,
            ..ClassifierConfig::webcam()
        });
        let result = Classification {
            gesture: Gesture::Rock,
            finger_states: FingerStates::from_bits([0, 0, 0, 0, 0]),
            confidence: 1.0,
            angles: [110.0, 115.0, 120.0, 125.0, 130.0],
            match_kind: MatchKind::Exact,
        };
        let report = classifier.debug_report(&result).unwrap();
        assert!(report.starts_with("=== Debug Info ==="));
        assert!(report.contains("Thumb: 110.0° (folded, threshold 120°)"));
        assert!(report.contains("Ring: 125.0° (folded, threshold 135°)"));
        assert!(report.contains("Gesture: ROCK"));
        assert!(report.contains("Confidence: 1.00"));
    }

    #[test]
    fn test_debug_report_zh_tw() {
        let classifier = GestureClassifier::new(ClassifierConfig {
            debug: true,
            locale: Locale::ZhTw,
            ..ClassifierConfig::webcam()
        });
        let result = classifier.classify(&make_hand([true; 5])).unwrap();
        let report = classifier.debug_report(&result).unwrap();
        assert!(report.contains("拇指"));
        assert!(report.contains("食指"));
        assert!(report.contains("伸直✓"));
        assert!(report.contains("手勢: PAPER"));
        assert!(report.contains("信心"));
    }

    #[test]
    fn test_config_sexp() {
        let sexp = GestureClassifier::default().config_sexp();
        assert!(sexp.contains(":angle-policy :single"));
        assert!(sexp.contains(":thresholds (130.0 130.0 130.0 130.0 130.0)"));
        assert!(sexp.contains(":matching :exact"));
        assert!(sexp.contains(":debug nil"));

        let sexp = GestureClassifier::new(ClassifierConfig::webcam()).config_sexp();
        assert!(sexp.contains(":angle-policy :per-finger"));
        assert!(sexp.contains(":thresholds (120.0 140.0 140.0 135.0 130.0)"));
        assert!(sexp.contains(":matching :fuzzy"));
    }
}
