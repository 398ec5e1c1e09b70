//! IPC message dispatch: parse s-expressions and route to handlers.

use std::fmt;

use lexpr::Value;
use tracing::{debug, warn};

use super::sexp::{
    classification_fields, escape_string, get_int, get_keyword, get_landmarks, round_sexp,
    verdict_sexp,
};
use crate::referee::Referee;

/// Outcome carried in a response's `:status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// One rendered response line and its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub body: String,
}

impl Response {
    fn ok(id: i64, fields: String) -> Self {
        Self {
            status: Status::Ok,
            body: format!("(:type :response :id {} :status :ok {})", id, fields),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

/// Parse an s-expression request and dispatch it.
///
/// Always returns a response; failures become `:status :error` responses.
pub fn handle_message(referee: &Referee, raw: &str) -> Response {
    let value = match lexpr::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("malformed s-expression: {}", e);
            return error_response(0, &format!("malformed s-expression: {e}"));
        }
    };

    let msg_type = get_keyword(&value, "type");
    let msg_id = get_int(&value, "id").unwrap_or(0);
    debug!(msg_id, "request type {:?}", msg_type);

    match msg_type.as_deref() {
        Some("judge") => handle_judge(referee, msg_id, &value),
        Some("classify") => handle_classify(referee, msg_id, &value),
        Some("round") => handle_round(referee, msg_id, &value),
        Some("status") => handle_status(referee, msg_id),
        Some(other) => {
            warn!(msg_id, "unknown message type: {}", other);
            error_response(msg_id, &format!("unknown message type: {other}"))
        }
        None => error_response(msg_id, "missing :type"),
    }
}

/// Error response for a request rejected before dispatch.
///
/// `raw` may be a lossy decoding of the request; its `:id` is echoed when
/// it still parses.
pub fn reject(raw: &str, reason: &str) -> Response {
    let id = lexpr::from_str(raw)
        .ok()
        .and_then(|value| get_int(&value, "id"))
        .unwrap_or(0);
    error_response(id, reason)
}

fn handle_judge(referee: &Referee, msg_id: i64, value: &Value) -> Response {
    let (Some(left), Some(right)) = (get_keyword(value, "left"), get_keyword(value, "right"))
    else {
        return error_response(msg_id, "judge requires :left and :right");
    };

    let verdict = referee.judge().judge_labels(&left, &right);
    Response::ok(
        msg_id,
        format!(
            ":outcome :{} :message \"{}\"",
            verdict.outcome.as_str(),
            escape_string(verdict.message),
        ),
    )
}

fn handle_classify(referee: &Referee, msg_id: i64, value: &Value) -> Response {
    let result = get_landmarks(value, "landmarks")
        .and_then(|joints| referee.classifier().classify(&joints));

    match result {
        Ok(classification) => Response::ok(msg_id, classification_fields(&classification)),
        Err(e) => {
            warn!(msg_id, "classify rejected: {}", e);
            error_response(msg_id, &e.to_string())
        }
    }
}

fn handle_round(referee: &Referee, msg_id: i64, value: &Value) -> Response {
    let result = get_landmarks(value, "left").and_then(|left| {
        let right = get_landmarks(value, "right")?;
        referee.play(&left, &right)
    });

    match result {
        Ok(round) => Response::ok(msg_id, format!(":round {}", round_sexp(&round))),
        Err(e) => {
            warn!(msg_id, "round rejected: {}", e);
            error_response(msg_id, &e.to_string())
        }
    }
}

fn handle_status(referee: &Referee, msg_id: i64) -> Response {
    Response::ok(
        msg_id,
        format!(
            ":classifier {} :judge (:locale :{})",
            referee.classifier().config_sexp(),
            referee.judge().config().locale.as_str(),
        ),
    )
}

fn error_response(id: i64, reason: &str) -> Response {
    Response {
        status: Status::Error,
        body: format!(
            "(:type :response :id {} :status :error :reason \"{}\")",
            id,
            escape_string(reason)
        ),
    }
}

/// One-shot verdict response, as printed by the `judge` subcommand.
pub fn format_verdict(referee: &Referee, left: &str, right: &str) -> String {
    verdict_sexp(&referee.judge().judge_labels(left, right))
}
