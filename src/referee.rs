//! One round: classify both hands, then judge them.

use tracing::debug;

use crate::error::Result;
use crate::gesture::{Classification, ClassifierConfig, GestureClassifier, JointPosition};
use crate::judge::{Judge, JudgeConfig, Verdict};

/// Both classifications and the verdict for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub left: Classification,
    pub right: Classification,
    pub verdict: Verdict,
}

/// Classifier and judge bundled for per-frame use.
#[derive(Debug, Clone, Default)]
pub struct Referee {
    classifier: GestureClassifier,
    judge: Judge,
}

impl Referee {
    pub fn new(classifier: ClassifierConfig, judge: JudgeConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(classifier),
            judge: Judge::new(judge),
        }
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn judge(&self) -> &Judge {
        &self.judge
    }

    /// Classify the left and right hand and judge the pair.
    ///
    /// Fails if either joint sequence is invalid; the left hand is
    /// validated first.
    pub fn play(&self, left: &[JointPosition], right: &[JointPosition]) -> Result<RoundResult> {
        let left = self.classifier.classify(left)?;
        let right = self.classifier.classify(right)?;
        let verdict = self.judge.judge(left.gesture, right.gesture);

        debug!(
            "Round: {} vs {} -> {}",
            left.gesture, right.gesture, verdict.outcome
        );

        Ok(RoundResult {
            left,
            right,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefereeError;
    use crate::gesture::landmarks::make_hand;
    use crate::gesture::Gesture;
    use crate::judge::Outcome;
    use crate::locale::Locale;

    #[test]
    fn test_rock_beats_scissors() {
        let referee = Referee::default();
        let round = referee
            .play(&make_hand([false; 5]), &make_hand([false, true, true, false, false]))
            .unwrap();
        assert_eq!(round.left.gesture, Gesture::Rock);
        assert_eq!(round.right.gesture, Gesture::Scissors);
        assert_eq!(round.verdict.outcome, Outcome::Left);
        assert_eq!(round.verdict.message, "left wins");
    }

    #[test]
    fn test_paper_draw() {
        let referee = Referee::new(
            ClassifierConfig::webcam(),
            JudgeConfig { locale: Locale::ZhTw },
        );
        let round = referee
            .play(&make_hand([true; 5]), &make_hand([true; 5]))
            .unwrap();
        assert_eq!(round.verdict.outcome, Outcome::Draw);
        assert_eq!(round.verdict.message, "平手");
    }

    #[test]
    fn test_unknown_hand_loses() {
        let referee = Referee::default();
        let round = referee
            .play(&make_hand([true, false, true, false, true]), &make_hand([true; 5]))
            .unwrap();
        assert_eq!(round.left.gesture, Gesture::Unknown);
        assert_eq!(round.verdict.outcome, Outcome::Right);
    }

    #[test]
    fn test_invalid_hand_fails_round() {
        let referee = Referee::default();
        let mut short = make_hand([true; 5]);
        short.pop();
        assert_eq!(
            referee.play(&make_hand([true; 5]), &short),
            Err(RefereeError::InvalidInput { expected: 21, got: 20 })
        );
    }
}
