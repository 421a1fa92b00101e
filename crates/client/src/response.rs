//! Response decoding and error mapping.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tally_shared::AppError;

/// Longest raw body excerpt kept in an error message.
const MAX_MESSAGE_LEN: usize = 200;

/// Maps a transport-level `reqwest` failure.
pub(crate) fn transport_error(err: &reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Transport(format!("request timed out: {err}"))
    } else {
        AppError::Transport(err.to_string())
    }
}

/// Reads a response body, turning HTTP errors and `{"error": ...}`
/// envelopes into `AppError`s.
pub(crate) async fn read_body(response: Response) -> Result<Value, AppError> {
    let status = response.status();
    let text = response.text().await.map_err(|e| transport_error(&e))?;

    if !status.is_success() {
        let message = error_message(&text).unwrap_or_else(|| excerpt(&text, status));
        return Err(if status == StatusCode::NOT_FOUND {
            AppError::NotFound(message)
        } else {
            AppError::Backend {
                status: status.as_u16(),
                message,
            }
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value =
        serde_json::from_str(&text).map_err(|e| AppError::Decode(e.to_string()))?;

    // The backend reports some failures as 200 with an error envelope.
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(AppError::Backend {
            status: status.as_u16(),
            message: message.to_string(),
        });
    }

    Ok(value)
}

/// Decodes a list that is either bare or wrapped as `{"<key>": [...]}`.
pub(crate) fn decode_list<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, AppError> {
    let list = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| AppError::Decode(format!("missing `{key}` in response")))?,
        other => {
            return Err(AppError::Decode(format!(
                "expected a list of {key}, got {other}"
            )));
        }
    };
    decode(list)
}

/// Decodes a JSON value into `T`.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Decode(e.to_string()))
}

fn error_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    ["error", "detail", "message"]
        .iter()
        .find_map(|key| value.get(*key))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn excerpt(text: &str, status: StatusCode) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return status.canonical_reason().unwrap_or("no response body").to_string();
    }
    trimmed.chars().take(MAX_MESSAGE_LEN).collect()
}
