use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

const STATUS_OK: &str = "OK";
const STATUS_ERROR: &str = "Error";

/// Envelope shared by every JSON response: `{"status":"OK"}` or
/// `{"status":"Error","error":"..."}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Envelope {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.into(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.into(),
            error: Some(msg.into()),
        }
    }
}

/// Client-facing failure: a status code plus the message placed in the envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::error(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_omits_error() {
        let json = serde_json::to_string(&Envelope::ok()).unwrap();
        assert_eq!(json, r#"{"status":"OK"}"#);
    }

    #[test]
    fn error_envelope_carries_message() {
        let json = serde_json::to_value(Envelope::error("boom")).unwrap();
        assert_eq!(json["status"], "Error");
        assert_eq!(json["error"], "boom");
    }
}
