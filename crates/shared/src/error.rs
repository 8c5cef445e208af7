use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload carried by non-success responses. The backend uses `error`
/// on every endpoint; `message` is accepted as a fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error detail"))]
pub struct ApiRejection {
    pub status: u16,
    pub message: Option<String>,
}

impl ApiRejection {
    pub fn new(status: u16, body: Option<ErrorBody>) -> Self {
        Self {
            status,
            message: body.and_then(|body| body.text().map(str::to_string)),
        }
    }
}

impl From<ApiRejection> for ErrorBody {
    fn from(value: ApiRejection) -> Self {
        Self {
            error: value.message,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_field_over_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Person not found","message":"ignored"}"#)
                .expect("json");
        assert_eq!(body.text(), Some("Person not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"gone"}"#).expect("json");
        assert_eq!(body.text(), Some("gone"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"  "}"#).expect("json");
        assert_eq!(body.text(), None);
    }

    #[test]
    fn rejection_keeps_server_text() {
        let rejection = ApiRejection::new(404, Some(ErrorBody::new("Person not found")));
        assert_eq!(rejection.message.as_deref(), Some("Person not found"));
        assert_eq!(rejection.to_string(), "HTTP 404: Person not found");

        let bare = ApiRejection::new(500, None);
        assert_eq!(bare.to_string(), "HTTP 500: no error detail");
    }
}
