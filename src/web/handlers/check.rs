// POST /check-news — classify a block of news text.
//
// 400 for missing, empty or too-short text. Anything else that goes wrong,
// from an unparseable body to a classifier failure, is a 500
// "An error occurred: ...". 200 with the verdict otherwise.
// Every error body carries "status": "error" so the form can branch on it.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::classifier::traits::{round_confidence, Prediction, Verdict};
use crate::output::truncate_chars;
use crate::web::AppState;

/// Minimum text length in characters, counted after trimming.
pub const MIN_NEWS_CHARS: usize = 10;

/// Characters of input echoed into the request log.
const LOG_PREVIEW_CHARS: usize = 100;

/// Pull `news_text` out of the request body.
///
/// The body must be a JSON object. A missing key reads as empty text; a
/// present key must hold a string.
pub fn news_text_field(body: &Value) -> anyhow::Result<&str> {
    let object = match body {
        Value::Object(object) => object,
        other => anyhow::bail!("expected a JSON object body, got {}", json_type(other)),
    };
    match object.get("news_text") {
        None => Ok(""),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(other) => anyhow::bail!("news_text must be a string, got {}", json_type(other)),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Why submitted text was rejected before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    Empty,
    TooShort,
}

impl InputError {
    pub fn message(&self) -> &'static str {
        match self {
            InputError::Empty => "Please enter some news text",
            InputError::TooShort => "Please enter at least 10 characters of news text",
        }
    }
}

/// Trim the submitted text and check it is long enough to analyze.
pub fn validate_news_text(raw: &str) -> Result<&str, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    if text.chars().count() < MIN_NEWS_CHARS {
        return Err(InputError::TooShort);
    }
    Ok(text)
}

/// Successful analysis body.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub prediction: Prediction,
    pub confidence: f64,
    pub color: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<&'static str>,
}

impl AnalysisResponse {
    pub fn new(verdict: &Verdict, method: Option<&'static str>) -> Self {
        Self {
            prediction: verdict.prediction,
            confidence: round_confidence(verdict.confidence),
            color: verdict.prediction.color(),
            status: "success",
            method,
        }
    }
}

pub async fn check_news(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected request body");
            return check_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("An error occurred: {}", rejection.body_text()),
            );
        }
    };

    let raw = match news_text_field(&body) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "Unusable request body");
            return check_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("An error occurred: {e}"),
            );
        }
    };

    let news_text = match validate_news_text(raw) {
        Ok(text) => text,
        Err(e) => return check_error(StatusCode::BAD_REQUEST, e.message()),
    };

    info!(
        text_preview = %truncate_chars(news_text, LOG_PREVIEW_CHARS),
        "Analyzing news text"
    );

    match state.classifier.classify(news_text).await {
        Ok(verdict) => {
            let response = AnalysisResponse::new(&verdict, state.classifier.method());
            info!(
                prediction = %response.prediction,
                confidence = response.confidence,
                "Analysis complete"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Error during analysis");
            check_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("An error occurred: {e}"),
            )
        }
    }
}

/// Error body for this endpoint: the generic shape plus "status": "error".
fn check_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message, "status": "error" })),
    )
        .into_response()
}
