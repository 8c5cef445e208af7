//! User-facing notifications and controller events.

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Register,
    Authenticate,
    Delete,
    FetchLogs,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Authenticate => "authenticate",
            Self::Delete => "delete",
            Self::FetchLogs => "fetch_logs",
        }
    }

    fn error_title(self) -> &'static str {
        match self {
            Self::Register => "Registration Error",
            Self::Authenticate => "Authentication Error",
            Self::Delete => "Deletion Error",
            Self::FetchLogs => "Logs Error",
        }
    }

    fn rejection_fallback(self) -> &'static str {
        match self {
            Self::Register => "Registration failed",
            Self::Authenticate => "Authentication failed",
            Self::Delete => "Deletion failed",
            Self::FetchLogs => "Fetching logs failed",
        }
    }

    fn transport_message(self) -> &'static str {
        match self {
            Self::Register => "An error occurred while registering",
            Self::Authenticate => "An error occurred during authentication",
            Self::Delete => "An error occurred while deleting",
            Self::FetchLogs => "An error occurred while fetching logs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A blocking, user-visible message (an alert on a touch screen).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub operation: Operation,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn registered(server_text: Option<String>) -> Self {
        Self::success(
            Operation::Register,
            "Registration Result",
            "Registration successful",
            server_text,
        )
    }

    pub fn deleted(server_text: Option<String>) -> Self {
        Self::success(
            Operation::Delete,
            "Deletion Result",
            "Deletion successful",
            server_text,
        )
    }

    /// Uses the server text when present, else the fixed fallback.
    fn success(
        operation: Operation,
        title: &str,
        fallback: &str,
        server_text: Option<String>,
    ) -> Self {
        Self {
            kind: NotificationKind::Info,
            operation,
            title: title.to_string(),
            body: non_blank(server_text).unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Rejections are surfaced verbatim; transport and decode failures get a
    /// generic operation-named message.
    pub fn failure(operation: Operation, err: &ClientError) -> Self {
        let body = if err.is_rejection() {
            err.rejection_text()
                .map(str::to_string)
                .unwrap_or_else(|| operation.rejection_fallback().to_string())
        } else {
            operation.transport_message().to_string()
        };
        Self {
            kind: NotificationKind::Error,
            operation,
            title: operation.error_title().to_string(),
            body,
        }
    }

    pub fn missing_name(operation: Operation) -> Self {
        Self {
            kind: NotificationKind::Error,
            operation,
            title: operation.error_title().to_string(),
            body: "Name is required".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.trim().is_empty())
}

#[derive(Debug, Clone)]
pub enum ScreenEvent {
    Notification(Notification),
    StateChanged,
}
