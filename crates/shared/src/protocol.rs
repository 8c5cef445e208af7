use serde::{Deserialize, Serialize};

use crate::domain::{AuthOutcome, LogEntry};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<AuthenticateResponse> for AuthOutcome {
    fn from(value: AuthenticateResponse) -> Self {
        Self {
            succeeded: value.authenticated,
            matched_name: value.name,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogsQuery {
    pub page: u32,
    pub page_size: u32,
}

/// Page-number paginated listing of authentication attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<LogEntry>,
}

impl LogPage {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LogEntryId;

    #[test]
    fn decodes_paginated_log_listing() {
        let raw = r#"{
            "count": 13,
            "next": "http://host/api/logs/?page=2&page_size=10",
            "previous": null,
            "results": [
                {"id": 42, "timestamp": "2024-05-01T10:00:00.123456Z", "authenticated": true},
                {"id": 41, "timestamp": "2024-05-01T09:00:00Z", "authenticated": false}
            ]
        }"#;
        let page: LogPage = serde_json::from_str(raw).expect("json");
        assert!(page.has_next());
        assert_eq!(page.count, Some(13));
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].id, LogEntryId(42));
        assert!(!page.results[1].authenticated);
    }

    #[test]
    fn last_page_has_null_next() {
        let raw = r#"{"count": 3, "next": null, "previous": "x", "results": []}"#;
        let page: LogPage = serde_json::from_str(raw).expect("json");
        assert!(!page.has_next());
        assert!(page.results.is_empty());
    }

    #[test]
    fn authenticate_response_without_name() {
        let response: AuthenticateResponse =
            serde_json::from_str(r#"{"authenticated": false, "name": null}"#).expect("json");
        let outcome = AuthOutcome::from(response);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.matched_name, None);
    }
}
