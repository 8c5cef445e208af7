//! Screen state snapshot and the transitions applied to it.

use shared::{
    domain::{AuthOutcome, LogEntry, PageCursor},
    protocol::LogPage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogView {
    Hidden,
    Visible { has_more: bool },
}

/// Everything the screen renders. Transitions consume the snapshot and
/// return the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub name: String,
    pub auth: Option<AuthOutcome>,
    pub logs: Vec<LogEntry>,
    pub cursor: PageCursor,
    pub logs_visible: bool,
}

impl ScreenState {
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_auth(self, outcome: AuthOutcome) -> Self {
        Self {
            auth: Some(outcome),
            ..self
        }
    }

    /// Clears accumulated entries and rewinds the cursor. Visibility is left
    /// as-is so a visible view stays visible while its first page reloads.
    pub fn reset_logs(self) -> Self {
        Self {
            logs: Vec::new(),
            cursor: PageCursor::default(),
            ..self
        }
    }

    /// An empty page only marks the listing exhausted; the cursor and the
    /// view visibility are not touched.
    pub fn with_log_page(self, page: LogPage) -> Self {
        if page.results.is_empty() {
            return Self {
                cursor: self.cursor.exhausted(),
                ..self
            };
        }

        let has_next = page.has_next();
        let mut logs = self.logs;
        logs.extend(page.results);
        Self {
            logs,
            cursor: self.cursor.advanced(has_next),
            logs_visible: true,
            ..self
        }
    }

    pub fn log_view(&self) -> LogView {
        if self.logs_visible {
            LogView::Visible {
                has_more: self.cursor.has_more,
            }
        } else {
            LogView::Hidden
        }
    }

    pub fn can_load_more(&self) -> bool {
        matches!(self.log_view(), LogView::Visible { has_more: true })
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
