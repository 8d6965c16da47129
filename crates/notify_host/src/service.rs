//! Typed async facade over [`NotificationInterop`].
//!
//! Permission calls fail closed and never surface transport errors. Display calls return the
//! transport error to the caller.

use leptos::logging;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::interop::{BridgeError, InteropCall, NotificationInterop};
use crate::permission::{NotificationRequest, PermissionState};

#[derive(Debug, Clone, Default)]
/// Notification operations exposed to UI code.
pub struct NotificationService<T> {
    interop: T,
}

impl<T: NotificationInterop> NotificationService<T> {
    /// Wraps an interop transport.
    pub fn new(interop: T) -> Self {
        Self { interop }
    }

    /// Returns the wrapped transport.
    pub fn interop(&self) -> &T {
        &self.interop
    }

    /// Returns `true` iff permission is already granted; `false` on any call failure.
    pub async fn check_permission_async(&self) -> bool {
        match self.call::<bool>(InteropCall::CheckPermission).await {
            Ok(granted) => granted,
            Err(err) => {
                logging::warn!("notification permission check failed: {err}");
                false
            }
        }
    }

    /// Prompts for permission, answering [`PermissionState::Error`] on any call failure.
    pub async fn request_permission_async(&self) -> PermissionState {
        match self.call::<String>(InteropCall::RequestPermission).await {
            Ok(token) => PermissionState::from_token(&token),
            Err(err) => {
                logging::warn!("notification permission request failed: {err}");
                PermissionState::Error
            }
        }
    }

    /// Displays a notification.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the browser-side call fails.
    pub async fn show_notification_async(&self, title: &str, body: &str) -> Result<(), BridgeError> {
        let call = InteropCall::ShowNotification(NotificationRequest::new(title, body));
        let identifier = call.identifier();
        self.interop.invoke(identifier, call.args()).await?;
        Ok(())
    }

    async fn call<R: DeserializeOwned>(&self, call: InteropCall) -> Result<R, BridgeError> {
        let identifier = call.identifier();
        let value: Value = self.interop.invoke(identifier, call.args()).await?;
        serde_json::from_value(value).map_err(|err| BridgeError::Decode {
            identifier: identifier.to_string(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::interop::{call_ids, MemoryNotificationInterop, NoopNotificationInterop};

    fn service() -> NotificationService<MemoryNotificationInterop> {
        NotificationService::new(MemoryNotificationInterop::default())
    }

    #[test]
    fn check_permission_passes_through_platform_answer() {
        let service = service();
        service
            .interop()
            .respond(call_ids::CHECK_PERMISSION, Ok(json!(true)));
        assert!(block_on(service.check_permission_async()));

        service
            .interop()
            .respond(call_ids::CHECK_PERMISSION, Ok(json!(false)));
        assert!(!block_on(service.check_permission_async()));
    }

    #[test]
    fn check_permission_fails_closed_when_call_throws() {
        let service = service();
        service.interop().respond(
            call_ids::CHECK_PERMISSION,
            Err(BridgeError::Platform("boom".to_string())),
        );
        assert!(!block_on(service.check_permission_async()));
    }

    #[test]
    fn check_permission_fails_closed_on_undecodable_result() {
        let service = service();
        service
            .interop()
            .respond(call_ids::CHECK_PERMISSION, Ok(json!("granted")));
        assert!(!block_on(service.check_permission_async()));
    }

    #[test]
    fn request_permission_maps_tokens_and_absorbs_failures() {
        let service = service();
        service
            .interop()
            .respond(call_ids::REQUEST_PERMISSION, Ok(json!("denied")));
        assert_eq!(
            block_on(service.request_permission_async()),
            PermissionState::Denied
        );

        service
            .interop()
            .respond(call_ids::REQUEST_PERMISSION, Ok(json!("maybe")));
        assert_eq!(
            block_on(service.request_permission_async()),
            PermissionState::Error
        );

        service.interop().respond(
            call_ids::REQUEST_PERMISSION,
            Err(BridgeError::Platform("prompt rejected".to_string())),
        );
        assert_eq!(
            block_on(service.request_permission_async()),
            PermissionState::Error
        );
    }

    #[test]
    fn show_notification_sends_title_and_body() {
        let service = service();
        service
            .interop()
            .respond(call_ids::SHOW_NOTIFICATION, Ok(Value::Null));
        block_on(service.show_notification_async("T", "B")).expect("show");
        assert_eq!(
            service.interop().calls(),
            vec![(
                call_ids::SHOW_NOTIFICATION.to_string(),
                vec![json!("T"), json!("B")]
            )]
        );
    }

    #[test]
    fn show_notification_propagates_call_failure() {
        let service = service();
        let failure = BridgeError::Platform("dispatch failed".to_string());
        service
            .interop()
            .respond(call_ids::SHOW_NOTIFICATION, Err(failure.clone()));
        assert_eq!(
            block_on(service.show_notification_async("T", "B")),
            Err(failure)
        );
    }

    #[test]
    fn noop_transport_fails_closed_for_permissions_and_raises_for_display() {
        let service = NotificationService::new(NoopNotificationInterop);
        assert!(!block_on(service.check_permission_async()));
        assert_eq!(
            block_on(service.request_permission_async()),
            PermissionState::Error
        );
        assert_eq!(
            block_on(service.show_notification_async("T", "B")),
            Err(BridgeError::Unavailable)
        );
    }
}
