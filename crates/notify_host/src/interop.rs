//! Identifier-dispatched transport between UI-side services and browser-side functions.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde_json::Value;
use thiserror::Error;

use crate::permission::{NotificationRequest, PermissionState};

/// Object-safe boxed future used by [`NotificationInterop`].
pub type InteropFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Identifiers of the browser-side functions reachable through [`NotificationInterop`].
pub mod call_ids {
    /// Reports whether notification permission is already granted.
    pub const CHECK_PERMISSION: &str = "checkPermission";
    /// Prompts for notification permission and returns the resulting state token.
    pub const REQUEST_PERMISSION: &str = "requestNotificationPermission";
    /// Displays a notification built from `[title, body]`.
    pub const SHOW_NOTIFICATION: &str = "showNotification";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure crossing the interop boundary.
pub enum BridgeError {
    /// No browser-side function is registered under the identifier.
    #[error("no interop function registered as `{0}`")]
    UnknownIdentifier(String),
    /// Arguments did not match the function signature.
    #[error("invalid arguments for `{identifier}`: {reason}")]
    InvalidArguments {
        /// Function identifier.
        identifier: String,
        /// Mismatch description.
        reason: String,
    },
    /// The returned value could not be decoded into the expected type.
    #[error("failed to decode `{identifier}` result: {reason}")]
    Decode {
        /// Function identifier.
        identifier: String,
        /// Decoder message.
        reason: String,
    },
    /// The browser-side function raised.
    #[error("platform call failed: {0}")]
    Platform(String),
    /// The host strategy provides no transport.
    #[error("notification interop is unavailable for this host")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Typed view of one interop invocation.
pub enum InteropCall {
    /// `checkPermission()`.
    CheckPermission,
    /// `requestNotificationPermission()`.
    RequestPermission,
    /// `showNotification(title, body)`.
    ShowNotification(NotificationRequest),
}

impl InteropCall {
    /// Returns the identifier the call is dispatched under.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::CheckPermission => call_ids::CHECK_PERMISSION,
            Self::RequestPermission => call_ids::REQUEST_PERMISSION,
            Self::ShowNotification(_) => call_ids::SHOW_NOTIFICATION,
        }
    }

    /// Encodes the positional arguments for this call.
    pub fn args(&self) -> Vec<Value> {
        match self {
            Self::CheckPermission | Self::RequestPermission => Vec::new(),
            Self::ShowNotification(request) => vec![
                Value::String(request.title.clone()),
                Value::String(request.body.clone()),
            ],
        }
    }

    /// Rebuilds a typed call from an identifier and positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnknownIdentifier`] for unregistered identifiers and
    /// [`BridgeError::InvalidArguments`] when the argument list does not match.
    pub fn parse(identifier: &str, args: &[Value]) -> Result<Self, BridgeError> {
        let invalid = |reason: String| BridgeError::InvalidArguments {
            identifier: identifier.to_string(),
            reason,
        };
        match identifier {
            call_ids::CHECK_PERMISSION | call_ids::REQUEST_PERMISSION => {
                if !args.is_empty() {
                    return Err(invalid(format!("expected 0 arguments, got {}", args.len())));
                }
                Ok(if identifier == call_ids::CHECK_PERMISSION {
                    Self::CheckPermission
                } else {
                    Self::RequestPermission
                })
            }
            call_ids::SHOW_NOTIFICATION => match args {
                [Value::String(title), Value::String(body)] => Ok(Self::ShowNotification(
                    NotificationRequest::new(title.as_str(), body.as_str()),
                )),
                [_, _] => Err(invalid("title and body must be strings".to_string())),
                _ => Err(invalid(format!("expected 2 arguments, got {}", args.len()))),
            },
            other => Err(BridgeError::UnknownIdentifier(other.to_string())),
        }
    }

    /// Encodes the adapter answer for a permission request as its wire value.
    pub fn permission_value(state: PermissionState) -> Value {
        Value::String(state.as_str().to_string())
    }
}

/// Transport that invokes browser-side functions by identifier.
pub trait NotificationInterop {
    /// Invokes `identifier` with positional JSON arguments.
    fn invoke<'a>(
        &'a self,
        identifier: &'a str,
        args: Vec<Value>,
    ) -> InteropFuture<'a, Result<Value, BridgeError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Interop transport for hosts without a notification capability.
pub struct NoopNotificationInterop;

impl NotificationInterop for NoopNotificationInterop {
    fn invoke<'a>(
        &'a self,
        _identifier: &'a str,
        _args: Vec<Value>,
    ) -> InteropFuture<'a, Result<Value, BridgeError>> {
        Box::pin(async { Err(BridgeError::Unavailable) })
    }
}

#[derive(Debug, Default)]
struct MemoryInteropState {
    responses: HashMap<String, Result<Value, BridgeError>>,
    calls: Vec<(String, Vec<Value>)>,
}

#[derive(Debug, Clone, Default)]
/// Scripted in-memory transport that records every invocation.
///
/// Identifiers without a scripted response answer [`BridgeError::UnknownIdentifier`].
pub struct MemoryNotificationInterop {
    inner: Rc<RefCell<MemoryInteropState>>,
}

impl MemoryNotificationInterop {
    /// Scripts the response returned for `identifier`.
    pub fn respond(&self, identifier: &str, response: Result<Value, BridgeError>) {
        self.inner
            .borrow_mut()
            .responses
            .insert(identifier.to_string(), response);
    }

    /// Returns every recorded `(identifier, args)` pair in call order.
    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.inner.borrow().calls.clone()
    }

    /// Returns the recorded identifiers in call order.
    pub fn call_ids(&self) -> Vec<String> {
        self.inner
            .borrow()
            .calls
            .iter()
            .map(|(identifier, _)| identifier.clone())
            .collect()
    }
}

impl NotificationInterop for MemoryNotificationInterop {
    fn invoke<'a>(
        &'a self,
        identifier: &'a str,
        args: Vec<Value>,
    ) -> InteropFuture<'a, Result<Value, BridgeError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.calls.push((identifier.to_string(), args));
            state
                .responses
                .get(identifier)
                .cloned()
                .unwrap_or_else(|| Err(BridgeError::UnknownIdentifier(identifier.to_string())))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn show_call_round_trips_through_identifier_and_args() {
        let call = InteropCall::ShowNotification(NotificationRequest::new("T", "B"));
        assert_eq!(call.identifier(), "showNotification");
        assert_eq!(call.args(), vec![json!("T"), json!("B")]);
        assert_eq!(
            InteropCall::parse(call.identifier(), &call.args()).expect("parse"),
            call
        );
    }

    #[test]
    fn parse_rejects_unknown_identifiers_and_bad_arity() {
        assert_eq!(
            InteropCall::parse("showToast", &[]),
            Err(BridgeError::UnknownIdentifier("showToast".to_string()))
        );
        assert!(matches!(
            InteropCall::parse(call_ids::CHECK_PERMISSION, &[json!(1)]),
            Err(BridgeError::InvalidArguments { .. })
        ));
        assert!(matches!(
            InteropCall::parse(call_ids::SHOW_NOTIFICATION, &[json!("only title")]),
            Err(BridgeError::InvalidArguments { .. })
        ));
        assert!(matches!(
            InteropCall::parse(call_ids::SHOW_NOTIFICATION, &[json!("T"), json!(7)]),
            Err(BridgeError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn memory_interop_records_calls_and_replays_scripted_results() {
        let interop = MemoryNotificationInterop::default();
        interop.respond(call_ids::CHECK_PERMISSION, Ok(json!(true)));

        assert_eq!(
            block_on(interop.invoke(call_ids::CHECK_PERMISSION, Vec::new())),
            Ok(json!(true))
        );
        assert_eq!(
            block_on(interop.invoke(call_ids::REQUEST_PERMISSION, Vec::new())),
            Err(BridgeError::UnknownIdentifier(
                call_ids::REQUEST_PERMISSION.to_string()
            ))
        );
        assert_eq!(
            interop.call_ids(),
            vec![
                call_ids::CHECK_PERMISSION.to_string(),
                call_ids::REQUEST_PERMISSION.to_string()
            ]
        );
    }

    #[test]
    fn noop_interop_is_unavailable() {
        let interop = NoopNotificationInterop;
        assert_eq!(
            block_on(interop.invoke(call_ids::SHOW_NOTIFICATION, Vec::new())),
            Err(BridgeError::Unavailable)
        );
    }
}
