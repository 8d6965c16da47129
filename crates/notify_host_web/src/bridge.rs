//! In-process interop dispatcher routing call identifiers to [`BrowserNotificationAdapter`].

use notify_host::{BridgeError, InteropCall, InteropFuture, NotificationInterop};
use serde_json::Value;

use crate::adapter::BrowserNotificationAdapter;
use crate::platform::NotificationPlatform;

#[derive(Debug, Clone)]
/// [`NotificationInterop`] transport that calls the browser adapter directly.
pub struct AdapterInterop<P> {
    adapter: BrowserNotificationAdapter<P>,
}

impl<P: NotificationPlatform + 'static> AdapterInterop<P> {
    /// Wraps an adapter.
    pub fn new(adapter: BrowserNotificationAdapter<P>) -> Self {
        Self { adapter }
    }

    /// Returns the wrapped adapter.
    pub fn adapter(&self) -> &BrowserNotificationAdapter<P> {
        &self.adapter
    }

    async fn dispatch(&self, call: InteropCall) -> Value {
        match call {
            InteropCall::CheckPermission => Value::Bool(self.adapter.check_permission()),
            InteropCall::RequestPermission => {
                InteropCall::permission_value(self.adapter.request_permission().await)
            }
            InteropCall::ShowNotification(request) => {
                self.adapter.show_notification(&request.title, &request.body);
                Value::Null
            }
        }
    }
}

impl<P: NotificationPlatform + 'static> NotificationInterop for AdapterInterop<P> {
    fn invoke<'a>(
        &'a self,
        identifier: &'a str,
        args: Vec<Value>,
    ) -> InteropFuture<'a, Result<Value, BridgeError>> {
        Box::pin(async move {
            let call = InteropCall::parse(identifier, &args)?;
            Ok(self.dispatch(call).await)
        })
    }
}
