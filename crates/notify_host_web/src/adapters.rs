use notify_host::{
    BridgeError, InteropFuture, NoopNotificationInterop, NotificationInterop, NotificationService,
    NotificationSettings,
};
use serde_json::Value;

use crate::{AdapterInterop, BrowserNotificationAdapter, WebNotificationPlatform};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `notify_host_web` adapters.
pub enum HostStrategy {
    /// Web Notifications API adapter.
    Browser,
    /// No-op transport used where the page must not touch notifications.
    Stub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "notify-host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "notify-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Stub => "stub",
    }
}

/// Adapter enum that erases the concrete transport behind [`NotificationInterop`].
#[derive(Debug, Clone)]
pub enum NotificationInteropAdapter {
    /// Browser-backed Web Notifications transport.
    Browser(AdapterInterop<WebNotificationPlatform>),
    /// No-op fallback transport.
    Stub(NoopNotificationInterop),
}

impl NotificationInterop for NotificationInteropAdapter {
    fn invoke<'a>(
        &'a self,
        identifier: &'a str,
        args: Vec<Value>,
    ) -> InteropFuture<'a, Result<Value, BridgeError>> {
        match self {
            Self::Browser(interop) => interop.invoke(identifier, args),
            Self::Stub(interop) => interop.invoke(identifier, args),
        }
    }
}

/// Builds the interop transport for the compile-time selected host strategy.
pub fn notification_interop(settings: NotificationSettings) -> NotificationInteropAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => NotificationInteropAdapter::Browser(AdapterInterop::new(
            BrowserNotificationAdapter::with_settings(WebNotificationPlatform, settings),
        )),
        HostStrategy::Stub => NotificationInteropAdapter::Stub(NoopNotificationInterop),
    }
}

/// Builds the notification service with default display settings.
pub fn notification_service() -> NotificationService<NotificationInteropAdapter> {
    notification_service_with_settings(NotificationSettings::default())
}

/// Builds the notification service with explicit display settings.
pub fn notification_service_with_settings(
    settings: NotificationSettings,
) -> NotificationService<NotificationInteropAdapter> {
    NotificationService::new(notification_interop(settings))
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use notify_host::PermissionState;

    use super::*;

    #[test]
    fn strategy_name_matches_selection() {
        let expected = match selected_host_strategy() {
            HostStrategy::Browser => "browser",
            HostStrategy::Stub => "stub",
        };
        assert_eq!(host_strategy_name(), expected);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_service_fails_closed_for_every_strategy() {
        let service = notification_service();
        assert!(!block_on(service.check_permission_async()));
        let requested = block_on(service.request_permission_async());
        assert!(matches!(
            requested,
            PermissionState::Unsupported | PermissionState::Error
        ));
    }

    #[test]
    fn settings_reach_browser_adapter() {
        let settings = NotificationSettings {
            tag: "custom".to_string(),
            ..NotificationSettings::default()
        };
        match notification_interop(settings) {
            NotificationInteropAdapter::Browser(interop) => {
                assert_eq!(selected_host_strategy(), HostStrategy::Browser);
                assert_eq!(interop.adapter().settings().tag, "custom");
            }
            NotificationInteropAdapter::Stub(_) => {
                assert_eq!(selected_host_strategy(), HostStrategy::Stub);
            }
        }
    }
}
