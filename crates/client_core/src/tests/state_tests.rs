use super::*;
use shared::domain::LogEntryId;

fn entries(first_id: i64, count: usize) -> Vec<LogEntry> {
    (0..count)
        .map(|offset| LogEntry {
            id: LogEntryId(first_id - offset as i64),
            timestamp: "2024-05-01T10:00:00Z".parse().expect("timestamp"),
            authenticated: offset % 2 == 0,
        })
        .collect()
}

fn page(results: Vec<LogEntry>, has_next: bool) -> LogPage {
    LogPage {
        count: None,
        next: has_next.then(|| "http://host/api/logs/?page=next".to_string()),
        previous: None,
        results,
    }
}

#[test]
fn starts_hidden_with_fresh_cursor() {
    let state = ScreenState::default();
    assert_eq!(state.log_view(), LogView::Hidden);
    assert_eq!(state.cursor, PageCursor::default());
    assert!(!state.can_load_more());
    assert!(state.auth.is_none());
}

#[test]
fn accumulates_pages_until_next_is_null() {
    let state = ScreenState::default().with_log_page(page(entries(100, 10), true));
    assert_eq!(state.cursor.current_page, 2);
    assert!(state.cursor.has_more);
    assert_eq!(state.log_view(), LogView::Visible { has_more: true });
    assert!(state.can_load_more());

    let state = state.with_log_page(page(entries(90, 3), false));
    assert_eq!(state.logs.len(), 13);
    assert_eq!(state.cursor.current_page, 3);
    assert!(!state.cursor.has_more);
    assert_eq!(state.log_view(), LogView::Visible { has_more: false });
    assert!(!state.can_load_more());
}

#[test]
fn appends_in_server_order_without_dedup() {
    let first = entries(5, 2);
    let state = ScreenState::default()
        .with_log_page(page(first.clone(), true))
        .with_log_page(page(first.clone(), false));
    let ids: Vec<i64> = state.logs.iter().map(|entry| entry.id.0).collect();
    assert_eq!(ids, vec![5, 4, 5, 4]);
}

#[test]
fn empty_first_page_keeps_view_hidden() {
    let state = ScreenState::default().with_log_page(page(Vec::new(), false));
    assert_eq!(state.log_view(), LogView::Hidden);
    assert!(!state.cursor.has_more);
    assert_eq!(state.cursor.current_page, 1);
    assert!(state.logs.is_empty());
}

#[test]
fn empty_later_page_keeps_cursor_and_entries() {
    let state = ScreenState::default()
        .with_log_page(page(entries(20, 10), true))
        .with_log_page(page(Vec::new(), true));
    assert_eq!(state.logs.len(), 10);
    assert_eq!(state.cursor.current_page, 2);
    assert!(!state.cursor.has_more);
    assert_eq!(state.log_view(), LogView::Visible { has_more: false });
}

#[test]
fn reset_clears_entries_and_cursor_but_not_visibility() {
    let state = ScreenState::default()
        .with_log_page(page(entries(20, 10), true))
        .with_log_page(page(entries(10, 2), false))
        .reset_logs();
    assert!(state.logs.is_empty());
    assert_eq!(state.cursor, PageCursor::default());
    assert!(state.logs_visible);
}

#[test]
fn name_and_auth_updates_leave_logs_alone() {
    let state = ScreenState::default()
        .with_log_page(page(entries(3, 3), false))
        .with_name("Alice")
        .with_auth(AuthOutcome {
            succeeded: true,
            matched_name: Some("Alice".to_string()),
        });
    assert_eq!(state.name, "Alice");
    assert_eq!(state.logs.len(), 3);
    assert!(state.auth.as_ref().is_some_and(|auth| auth.succeeded));
}
