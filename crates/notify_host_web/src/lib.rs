//! Browser (`wasm32`) implementations of the [`notify_host`] interop contract.
//!
//! This crate holds the browser-side notification functions and the wiring that exposes them
//! through [`notify_host::NotificationInterop`]:
//! - `platform` (the [`NotificationPlatform`] seam, the web-sys platform, and a simulated one)
//! - `adapter` (permission short-circuits, tagging, auto-dismiss, click handling)
//! - `bridge` (identifier dispatch onto the adapter)

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapter;
/// Compile-time host-strategy selection and service factories for UI wiring.
pub mod adapters;
pub mod bridge;
pub mod platform;

pub use adapter::BrowserNotificationAdapter;
pub use adapters::{
    host_strategy_name, notification_interop, notification_service,
    notification_service_with_settings, selected_host_strategy, HostStrategy,
    NotificationInteropAdapter,
};
pub use bridge::AdapterInterop;
pub use platform::simulated::{SimulatedNotification, SimulatedNotificationPlatform};
pub use platform::web::WebNotificationPlatform;
pub use platform::{NotificationPlatform, PlatformCallback, PlatformFuture};
