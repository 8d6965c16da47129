//! Platform primitives the browser adapter is built on.
//!
//! [`NotificationPlatform`] is the narrow seam between adapter policy (permission short-circuits,
//! tagging, auto-dismiss, click handling) and the capability that actually draws notifications.

use std::{future::Future, pin::Pin};

use notify_host::{NotificationRequest, PermissionState};

pub mod simulated;
pub mod web;

/// Object-safe boxed future used by [`NotificationPlatform`].
pub type PlatformFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// One-shot callback scheduled on the platform event loop.
pub type PlatformCallback = Box<dyn FnOnce()>;

/// Notification capability of a page.
pub trait NotificationPlatform {
    /// Handle to a displayed notification.
    type Handle: Clone + 'static;

    /// Returns `true` when the page exposes a Notification API.
    fn is_supported(&self) -> bool;

    /// Returns the permission state currently recorded by the platform.
    fn permission(&self) -> PermissionState;

    /// Shows the platform permission prompt and resolves with the user's answer.
    fn prompt_permission<'a>(&'a self) -> PlatformFuture<'a, Result<PermissionState, String>>;

    /// Creates a visible notification carrying `tag`.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform refuses to construct the notification.
    fn create(&self, request: &NotificationRequest, tag: &str) -> Result<Self::Handle, String>;

    /// Closes a notification; closing twice is a no-op.
    fn close(&self, handle: &Self::Handle);

    /// Runs `callback` once after `delay_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error when no timer source is available.
    fn set_timeout(&self, delay_ms: u32, callback: PlatformCallback) -> Result<(), String>;

    /// Runs `callback` the first time the notification is clicked.
    fn on_click(&self, handle: &Self::Handle, callback: PlatformCallback);

    /// Brings the originating page to the foreground.
    fn focus_window(&self);
}
