//! Display strings for verdict messages and debug reports.

use std::str::FromStr;

use crate::gesture::landmarks::Finger;
use crate::judge::Outcome;

/// Language for user-facing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Traditional Chinese (Taiwan).
    ZhTw,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhTw => "zh-tw",
        }
    }

    /// Verdict message for an outcome.
    pub fn outcome_message(&self, outcome: Outcome) -> &'static str {
        match (self, outcome) {
            (Self::En, Outcome::Left) => "left wins",
            (Self::En, Outcome::Right) => "right wins",
            (Self::En, Outcome::Draw) => "draw",
            (Self::ZhTw, Outcome::Left) => "左手獲勝",
            (Self::ZhTw, Outcome::Right) => "右手獲勝",
            (Self::ZhTw, Outcome::Draw) => "平手",
        }
    }

    pub fn finger_name(&self, finger: Finger) -> &'static str {
        match (self, finger) {
            (Self::En, Finger::Thumb) => "Thumb",
            (Self::En, Finger::Index) => "Index",
            (Self::En, Finger::Middle) => "Middle",
            (Self::En, Finger::Ring) => "Ring",
            (Self::En, Finger::Pinky) => "Pinky",
            (Self::ZhTw, Finger::Thumb) => "拇指",
            (Self::ZhTw, Finger::Index) => "食指",
            (Self::ZhTw, Finger::Middle) => "中指",
            (Self::ZhTw, Finger::Ring) => "無名指",
            (Self::ZhTw, Finger::Pinky) => "小指",
        }
    }

    pub(crate) fn finger_state_word(&self, extended: bool) -> &'static str {
        match (self, extended) {
            (Self::En, true) => "extended",
            (Self::En, false) => "folded",
            (Self::ZhTw, true) => "伸直✓",
            (Self::ZhTw, false) => "彎曲✗",
        }
    }

    pub(crate) fn threshold_label(&self) -> &'static str {
        match self {
            Self::En => "threshold ",
            Self::ZhTw => "閾值",
        }
    }

    pub(crate) fn gesture_label(&self) -> &'static str {
        match self {
            Self::En => "Gesture",
            Self::ZhTw => "手勢",
        }
    }

    pub(crate) fn confidence_label(&self) -> &'static str {
        match self {
            Self::En => "Confidence",
            Self::ZhTw => "信心",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "zh-tw" | "zh_tw" => Ok(Self::ZhTw),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}
