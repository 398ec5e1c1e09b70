//! S-expression helpers: plist access, landmark list parsing, and
//! response formatting for classifications and verdicts.

use lexpr::Value;

use crate::error::{RefereeError, Result};
use crate::gesture::{Classification, JointPosition};
use crate::judge::Verdict;
use crate::referee::RoundResult;

// ── Plist access ───────────────────────────────────────────

/// Find the value following `:key` in an s-expression plist.
///
/// Walks key/value pairs, so a value spelled like a key is never mistaken
/// for one. Handles both `Value::Keyword("key")` (elisp parser) and
/// `Value::Symbol(":key")` (default parser) forms.
pub fn plist_get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let prefixed = format!(":{}", key);
    let mut current = value;
    while let Value::Cons(pair) = current {
        let is_key = match pair.car() {
            Value::Keyword(k) => k.as_ref() == key,
            Value::Symbol(s) => s.as_ref() == prefixed,
            _ => false,
        };
        let Value::Cons(next) = pair.cdr() else {
            return None;
        };
        if is_key {
            return Some(next.car());
        }
        current = next.cdr();
    }
    None
}

/// Atom following `:key`, rendered as a string (keyword prefix stripped).
pub fn get_keyword(value: &Value, key: &str) -> Option<String> {
    atom_string(plist_get(value, key)?)
}

/// Integer following `:key`.
pub fn get_int(value: &Value, key: &str) -> Option<i64> {
    get_keyword(value, key).and_then(|s| s.parse().ok())
}

fn atom_string(value: &Value) -> Option<String> {
    match value {
        Value::Keyword(v) => Some(v.to_string()),
        Value::Symbol(v) => {
            let s = v.to_string();
            Some(s.strip_prefix(':').unwrap_or(&s).to_string())
        }
        Value::String(v) => Some(v.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "t" } else { "nil" }.to_string()),
        Value::Nil => Some("nil".to_string()),
        _ => None,
    }
}

/// Elements of a proper list, or `None` for anything else.
fn list_items(value: &Value) -> Option<Vec<&Value>> {
    let mut items = Vec::new();
    let mut current = value;
    loop {
        match current {
            Value::Cons(pair) => {
                items.push(pair.car());
                current = pair.cdr();
            }
            Value::Null | Value::Nil => return Some(items),
            _ => return None,
        }
    }
}

// ── Landmark parsing ───────────────────────────────────────

/// Parse a list of `(x y)` or `(x y z)` points.
///
/// Length is not checked here; `HandLandmarks` validation owns that.
pub fn parse_landmarks(value: &Value) -> Result<Vec<JointPosition>> {
    let points = list_items(value)
        .ok_or_else(|| RefereeError::Parse("landmarks must be a list of points".into()))?;

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            parse_point(point).ok_or_else(|| {
                RefereeError::Parse(format!("landmark {i} must be (x y) or (x y z)"))
            })
        })
        .collect()
}

fn parse_point(value: &Value) -> Option<JointPosition> {
    let coords = list_items(value)?
        .into_iter()
        .map(|v| match v {
            Value::Number(n) => n.as_f64().map(|f| f as f32),
            _ => None,
        })
        .collect::<Option<Vec<f32>>>()?;

    match coords.as_slice() {
        [x, y] => Some(JointPosition::new(*x, *y)),
        [x, y, z] => Some(JointPosition::with_depth(*x, *y, *z)),
        _ => None,
    }
}

/// Parse the landmark list stored under `:key`.
pub fn get_landmarks(value: &Value, key: &str) -> Result<Vec<JointPosition>> {
    let list = plist_get(value, key)
        .ok_or_else(|| RefereeError::Parse(format!("missing :{key}")))?;
    parse_landmarks(list)
}

// ── Formatting ─────────────────────────────────────────────

/// Escape a string for s-expression output.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Plist body describing one classification.
pub fn classification_sexp(result: &Classification) -> String {
    format!("({})", classification_fields(result))
}

/// Classification fields without the enclosing parens, for splicing into
/// a response plist.
pub fn classification_fields(result: &Classification) -> String {
    let states = result.finger_states.bits().map(|b| b.to_string()).join(" ");
    let angles = result.angles.map(|a| format!("{:.1}", a)).join(" ");
    format!(
        ":gesture :{} :finger-states ({}) :confidence {:.2} :match :{} :angles ({})",
        result.gesture.as_str(),
        states,
        result.confidence,
        result.match_kind.as_str(),
        angles,
    )
}

/// Plist body describing one verdict.
pub fn verdict_sexp(verdict: &Verdict) -> String {
    format!(
        "(:outcome :{} :message \"{}\")",
        verdict.outcome.as_str(),
        escape_string(verdict.message),
    )
}

/// Plist body describing a whole round.
pub fn round_sexp(round: &RoundResult) -> String {
    format!(
        "(:left {} :right {} :verdict {})",
        classification_sexp(&round.left),
        classification_sexp(&round.right),
        verdict_sexp(&round.verdict),
    )
}

// ── Tests ──────────────────────────────────────────────────
