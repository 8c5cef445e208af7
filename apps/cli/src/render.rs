//! Plain-text rendering of the screen state and notifications.

use client_core::{LogView, Notification, ScreenState};

pub fn render_notification(notification: &Notification) -> String {
    format!("[{}] {}", notification.title, notification.body)
}

pub fn render_auth(state: &ScreenState) -> Option<String> {
    state.auth.as_ref().map(|auth| auth.display_text())
}

pub fn render_logs(state: &ScreenState) -> Vec<String> {
    let LogView::Visible { has_more } = state.log_view() else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(state.logs.len() + 2);
    lines.push("Authentication Logs:".to_string());
    lines.extend(
        state
            .logs
            .iter()
            .map(|entry| format!("  {}", entry.display_line())),
    );
    if has_more {
        lines.push("  (more available: type `more`)".to_string());
    }
    lines
}

pub fn render_screen(state: &ScreenState) -> String {
    let mut lines = Vec::new();
    if !state.name.is_empty() {
        lines.push(format!("Name: {}", state.name));
    }
    if let Some(auth) = render_auth(state) {
        lines.push(auth);
    }
    lines.extend(render_logs(state));
    lines.join("\n")
}
