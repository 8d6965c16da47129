//! Leptos UI surface for browser notifications.
//!
//! [`NotificationPanel`] checks permission on first render and, on click, asks for permission
//! when needed before showing a notification. The transitions live in [`controller`] so they can
//! be exercised without a DOM.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod controller;
mod panel;

pub use controller::{
    DisplayOutcome, NotificationController, NotificationPanelState, PANEL_NOTIFICATION_BODY,
    PANEL_NOTIFICATION_TITLE,
};
pub use panel::NotificationPanel;
