//! Request/result controller: turns user actions into backend calls and
//! backend results into screen state and notifications.

use std::{collections::HashMap, sync::Arc};

use shared::{
    domain::{AuthOutcome, LOG_PAGE_SIZE},
    protocol::LogsQuery,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::{
    error::ClientError,
    events::{Notification, Operation, ScreenEvent},
    state::ScreenState,
    FaceAuthApi,
};

/// Per-operation request counters. A response is applied only when its
/// ticket is still the newest one issued for that operation.
#[derive(Debug, Default)]
struct Generations {
    latest: HashMap<Operation, u64>,
}

impl Generations {
    fn begin(&mut self, operation: Operation) -> u64 {
        let next = self.latest.get(&operation).copied().unwrap_or(0) + 1;
        self.latest.insert(operation, next);
        next
    }

    fn is_current(&self, operation: Operation, ticket: u64) -> bool {
        self.latest.get(&operation).copied() == Some(ticket)
    }
}

struct ControllerInner {
    state: ScreenState,
    generations: Generations,
}

pub struct ScreenController {
    api: Arc<dyn FaceAuthApi>,
    inner: Mutex<ControllerInner>,
    events: broadcast::Sender<ScreenEvent>,
}

impl ScreenController {
    pub fn new(api: Arc<dyn FaceAuthApi>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            api,
            inner: Mutex::new(ControllerInner {
                state: ScreenState::default(),
                generations: Generations::default(),
            }),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ScreenEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> ScreenState {
        self.inner.lock().await.state.clone()
    }

    /// Updates the name input field.
    pub async fn set_name(&self, name: &str) {
        {
            let mut guard = self.inner.lock().await;
            let state = std::mem::take(&mut guard.state);
            guard.state = state.with_name(name);
        }
        let _ = self.events.send(ScreenEvent::StateChanged);
    }

    /// Returns the notification shown to the user, or `None` when the
    /// response was superseded by a newer register request.
    pub async fn register(&self, name: &str) -> Option<Notification> {
        let operation = Operation::Register;
        let name = name.trim();
        if name.is_empty() {
            return Some(self.publish(Notification::missing_name(operation)));
        }

        let ticket = self.begin(operation).await;
        info!(person = name, "registering person");
        let result = self.api.register(name).await;
        if !self.is_current(operation, ticket).await {
            debug!(ticket, "discarding stale register response");
            return None;
        }

        let notification = match result {
            Ok(response) => Notification::registered(response.success),
            Err(err) => failure_notification(operation, &err),
        };
        Some(self.publish(notification))
    }

    pub async fn delete(&self, name: &str) -> Option<Notification> {
        let operation = Operation::Delete;
        let name = name.trim();
        if name.is_empty() {
            return Some(self.publish(Notification::missing_name(operation)));
        }

        let ticket = self.begin(operation).await;
        info!(person = name, "deleting person");
        let result = self.api.delete(name).await;
        if !self.is_current(operation, ticket).await {
            debug!(ticket, "discarding stale delete response");
            return None;
        }

        let notification = match result {
            Ok(response) => Notification::deleted(response.message),
            Err(err) => failure_notification(operation, &err),
        };
        Some(self.publish(notification))
    }

    /// On success the authentication result is replaced and no notification
    /// is raised; on failure the previous result is kept.
    ///
    /// A non-2xx answer raises "Authentication Error" with the server's text
    /// rather than being shown as a failed match.
    pub async fn authenticate(&self) -> Option<Notification> {
        let operation = Operation::Authenticate;
        let ticket = self.begin(operation).await;
        info!("requesting authentication");
        let result = self.api.authenticate().await;

        let mut guard = self.inner.lock().await;
        if !guard.generations.is_current(operation, ticket) {
            debug!(ticket, "discarding stale authenticate response");
            return None;
        }

        match result {
            Ok(response) => {
                let outcome = AuthOutcome::from(response);
                info!(
                    authenticated = outcome.succeeded,
                    matched = outcome.matched_name.as_deref().unwrap_or(""),
                    "authentication result received"
                );
                let state = std::mem::take(&mut guard.state);
                guard.state = state.with_auth(outcome);
                drop(guard);
                let _ = self.events.send(ScreenEvent::StateChanged);
                None
            }
            Err(err) => {
                drop(guard);
                Some(self.publish(failure_notification(operation, &err)))
            }
        }
    }

    /// Fetches the log page at the cursor. With `reset`, the accumulated
    /// entries and the cursor are cleared before the request goes out.
    pub async fn fetch_logs(&self, reset: bool) -> Option<Notification> {
        let operation = Operation::FetchLogs;
        let (ticket, query) = {
            let mut guard = self.inner.lock().await;
            if reset {
                let state = std::mem::take(&mut guard.state);
                guard.state = state.reset_logs();
            }
            let ticket = guard.generations.begin(operation);
            let query = LogsQuery {
                page: guard.state.cursor.current_page,
                page_size: LOG_PAGE_SIZE,
            };
            (ticket, query)
        };
        if reset {
            let _ = self.events.send(ScreenEvent::StateChanged);
        }

        info!(page = query.page, page_size = query.page_size, "fetching logs");
        let result = self.api.fetch_logs(query).await;

        let mut guard = self.inner.lock().await;
        if !guard.generations.is_current(operation, ticket) {
            debug!(ticket, page = query.page, "discarding stale logs response");
            return None;
        }

        match result {
            Ok(page) => {
                if page.results.is_empty() {
                    debug!(page = query.page, "log listing exhausted");
                }
                let state = std::mem::take(&mut guard.state);
                guard.state = state.with_log_page(page);
                drop(guard);
                let _ = self.events.send(ScreenEvent::StateChanged);
                None
            }
            Err(err) => {
                drop(guard);
                Some(self.publish(failure_notification(operation, &err)))
            }
        }
    }

    /// "Load More": only issues a request while the log view is visible and
    /// the server reported a further page.
    pub async fn load_more(&self) -> Option<Notification> {
        if !self.inner.lock().await.state.can_load_more() {
            debug!("load more ignored; no further log pages");
            return None;
        }
        self.fetch_logs(false).await
    }

    async fn begin(&self, operation: Operation) -> u64 {
        self.inner.lock().await.generations.begin(operation)
    }

    async fn is_current(&self, operation: Operation, ticket: u64) -> bool {
        self.inner
            .lock()
            .await
            .generations
            .is_current(operation, ticket)
    }

    fn publish(&self, notification: Notification) -> Notification {
        let _ = self
            .events
            .send(ScreenEvent::Notification(notification.clone()));
        notification
    }
}

fn failure_notification(operation: Operation, err: &ClientError) -> Notification {
    if err.is_rejection() {
        warn!(operation = operation.as_str(), error = %err, "request rejected");
    } else {
        error!(operation = operation.as_str(), error = %err, "request failed");
    }
    Notification::failure(operation, err)
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
