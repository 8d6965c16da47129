//! Browser-side notification functions invoked through the interop dispatcher.

use std::rc::Rc;

use leptos::logging;
use notify_host::{NotificationRequest, NotificationSettings, PermissionState};

use crate::platform::NotificationPlatform;

#[derive(Debug)]
/// Permission and display policy applied over a [`NotificationPlatform`].
pub struct BrowserNotificationAdapter<P> {
    platform: Rc<P>,
    settings: NotificationSettings,
}

impl<P> Clone for BrowserNotificationAdapter<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Rc::clone(&self.platform),
            settings: self.settings.clone(),
        }
    }
}

impl<P: NotificationPlatform + 'static> BrowserNotificationAdapter<P> {
    /// Builds an adapter with default settings.
    pub fn new(platform: P) -> Self {
        Self::with_settings(platform, NotificationSettings::default())
    }

    /// Builds an adapter with explicit display settings.
    pub fn with_settings(platform: P, settings: NotificationSettings) -> Self {
        Self {
            platform: Rc::new(platform),
            settings,
        }
    }

    /// Returns the active display settings.
    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Returns `true` iff the platform supports notifications and permission is granted.
    pub fn check_permission(&self) -> bool {
        self.platform.is_supported() && self.platform.permission().is_granted()
    }

    /// Prompts for permission unless already granted.
    pub async fn request_permission(&self) -> PermissionState {
        if !self.platform.is_supported() {
            return PermissionState::Unsupported;
        }
        if self.platform.permission().is_granted() {
            return PermissionState::Granted;
        }
        match self.platform.prompt_permission().await {
            Ok(state) => state,
            Err(err) => {
                logging::warn!("notification permission prompt failed: {err}");
                PermissionState::Error
            }
        }
    }

    /// Displays a tagged, self-dismissing notification when permission allows.
    ///
    /// Platform failures are logged, not returned.
    pub fn show_notification(&self, title: &str, body: &str) {
        if let Err(err) = self.try_show(&NotificationRequest::new(title, body)) {
            logging::warn!("notification display failed: {err}");
        }
    }

    fn try_show(&self, request: &NotificationRequest) -> Result<(), String> {
        if !self.check_permission() {
            return Ok(());
        }

        let handle = self.platform.create(request, &self.settings.tag)?;

        // A notification that cannot expire must not stay on screen.
        let platform = Rc::clone(&self.platform);
        let expiring = handle.clone();
        if let Err(err) = self.platform.set_timeout(
            self.settings.auto_close_ms,
            Box::new(move || platform.close(&expiring)),
        ) {
            self.platform.close(&handle);
            return Err(format!("auto-close scheduling failed: {err}"));
        }

        let platform = Rc::clone(&self.platform);
        let focus_on_click = self.settings.focus_on_click;
        let clicked = handle.clone();
        self.platform.on_click(
            &handle,
            Box::new(move || {
                if focus_on_click {
                    platform.focus_window();
                }
                platform.close(&clicked);
            }),
        );
        Ok(())
    }
}
