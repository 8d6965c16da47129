//! Typed notification contracts and the service wrapper used by UI code.
//!
//! This crate is the API-first boundary for browser notifications. It exposes the shared
//! permission/request models, the identifier-dispatched [`NotificationInterop`] transport trait,
//! and the [`NotificationService`] facade, while concrete browser adapters live in
//! `notify_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod interop;
pub mod permission;
pub mod service;

pub use interop::{
    call_ids, BridgeError, InteropCall, InteropFuture, MemoryNotificationInterop,
    NoopNotificationInterop, NotificationInterop,
};
pub use permission::{NotificationRequest, NotificationSettings, PermissionState};
pub use service::NotificationService;
