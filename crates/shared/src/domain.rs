use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(LogEntryId);

/// Number of log entries requested per page.
pub const LOG_PAGE_SIZE: u32 = 10;

/// One recorded authentication attempt, as returned by the logs endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub authenticated: bool,
}

impl LogEntry {
    pub fn display_line(&self) -> String {
        let local = self.timestamp.with_timezone(&Local);
        let outcome = if self.authenticated {
            "Success"
        } else {
            "Failure"
        };
        format!("{} - {outcome}", local.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Outcome of the most recent authenticate call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthOutcome {
    pub succeeded: bool,
    pub matched_name: Option<String>,
}

impl AuthOutcome {
    pub fn display_text(&self) -> String {
        if !self.succeeded {
            return "Authentication Failed".to_string();
        }
        match self.matched_name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => format!("Authentication Successful - Welcome, {name}!"),
            None => "Authentication Successful".to_string(),
        }
    }
}

/// Position in the paginated log listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub current_page: u32,
    pub has_more: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current_page: 1,
            has_more: true,
        }
    }
}

impl PageCursor {
    pub fn advanced(self, has_more: bool) -> Self {
        Self {
            current_page: self.current_page.saturating_add(1),
            has_more,
        }
    }

    pub fn exhausted(self) -> Self {
        Self {
            current_page: self.current_page,
            has_more: false,
        }
    }
}

/// Accepts RFC 3339 timestamps and, for backends running without time zone
/// support, naive ISO 8601 timestamps which are taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| format!("invalid timestamp '{raw}': {err}"))
}
