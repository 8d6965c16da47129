//! Headless state transitions driven by the notification panel.

use leptos::logging;
use notify_host::{NotificationInterop, NotificationService, PermissionState};

/// Title shown by the panel's notification.
pub const PANEL_NOTIFICATION_TITLE: &str = "Hello from the browser";
/// Body shown by the panel's notification.
pub const PANEL_NOTIFICATION_BODY: &str = "Notifications are working on this page.";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of the most recent click.
pub enum DisplayOutcome {
    /// The notification was handed to the browser.
    Shown,
    /// Permission was not granted after asking.
    Blocked(PermissionState),
    /// The display call failed.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Per-panel UI flags.
pub struct NotificationPanelState {
    /// Whether the page may currently show notifications.
    pub permission_granted: bool,
    /// Last permission state reported by the service, if any.
    pub permission: Option<PermissionState>,
    /// Set once the first-render permission check completed.
    pub loaded: bool,
    /// Set while a click is being processed.
    pub busy: bool,
    /// Outcome of the latest click.
    pub last_display: Option<DisplayOutcome>,
}

impl NotificationPanelState {
    /// Folds a first-render [`NotificationController::load`] result into the live state.
    ///
    /// A click that completed before the load resolved keeps its permission answer.
    pub fn merge_loaded(&mut self, loaded: &NotificationPanelState) {
        self.loaded = true;
        if self.last_display.is_none() {
            self.permission_granted = loaded.permission_granted;
            self.permission = loaded.permission;
        }
    }

    /// Returns the status line rendered under the panel button.
    pub fn status_line(&self) -> String {
        if !self.loaded {
            return "Checking notification permission...".to_string();
        }
        match &self.last_display {
            Some(DisplayOutcome::Shown) => "Notification sent.".to_string(),
            Some(DisplayOutcome::Blocked(PermissionState::Unsupported)) => {
                "This browser does not support notifications.".to_string()
            }
            Some(DisplayOutcome::Blocked(state)) => {
                format!("Notifications are not allowed (permission: {state}).")
            }
            Some(DisplayOutcome::Failed(reason)) => format!("Notification failed: {reason}"),
            None if self.permission_granted => "Notifications are enabled.".to_string(),
            None => "Notifications are not enabled yet.".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
/// Drives [`NotificationService`] calls on behalf of the panel.
pub struct NotificationController<T> {
    service: NotificationService<T>,
    title: String,
    body: String,
}

impl<T: NotificationInterop> NotificationController<T> {
    /// Builds a controller that shows the panel's fixed title/body.
    pub fn new(service: NotificationService<T>) -> Self {
        Self::with_message(service, PANEL_NOTIFICATION_TITLE, PANEL_NOTIFICATION_BODY)
    }

    /// Builds a controller with a custom title/body.
    pub fn with_message(
        service: NotificationService<T>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            service,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Returns the wrapped service.
    pub fn service(&self) -> &NotificationService<T> {
        &self.service
    }

    /// Populates the permission flag on first render.
    pub async fn load(&self, mut state: NotificationPanelState) -> NotificationPanelState {
        state.permission_granted = self.service.check_permission_async().await;
        if state.permission_granted {
            state.permission = Some(PermissionState::Granted);
        }
        state.loaded = true;
        state
    }

    /// Requests permission if needed, then shows the notification when granted.
    pub async fn activate(&self, mut state: NotificationPanelState) -> NotificationPanelState {
        if !state.permission_granted {
            let answer = self.service.request_permission_async().await;
            state.permission = Some(answer);
            state.permission_granted = answer.is_granted();
            if !state.permission_granted {
                state.last_display = Some(DisplayOutcome::Blocked(answer));
                return state;
            }
        }

        state.last_display = Some(
            match self
                .service
                .show_notification_async(&self.title, &self.body)
                .await
            {
                Ok(()) => DisplayOutcome::Shown,
                Err(err) => {
                    logging::warn!("notification panel display failed: {err}");
                    DisplayOutcome::Failed(err.to_string())
                }
            },
        );
        state
    }
}
