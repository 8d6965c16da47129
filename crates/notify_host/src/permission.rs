//! Permission and notification request models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Default tag applied to every notification so repeated calls replace rather than stack.
pub const DEFAULT_NOTIFICATION_TAG: &str = "notify-bridge";

/// Default auto-dismiss delay for displayed notifications.
pub const DEFAULT_AUTO_CLOSE_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Notification permission recorded for the current page.
pub enum PermissionState {
    /// The page may show notifications.
    Granted,
    /// The user refused notifications.
    Denied,
    /// The user has not been asked yet.
    Default,
    /// The browser context has no Notification API.
    Unsupported,
    /// The permission call itself failed.
    Error,
}

impl PermissionState {
    /// Returns the stable wire token for this state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Default => "default",
            Self::Unsupported => "unsupported",
            Self::Error => "error",
        }
    }

    /// Returns `true` when notifications may be displayed.
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Maps a raw platform/wire token, treating anything unrecognized as [`Self::Error`].
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or(Self::Error)
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionState {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            "default" => Ok(Self::Default),
            "unsupported" => Ok(Self::Unsupported),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown notification permission `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Title/body pair for a single display call.
pub struct NotificationRequest {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
}

impl NotificationRequest {
    /// Builds a request from borrowed title/body text.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Display behavior applied by browser adapters.
pub struct NotificationSettings {
    /// Tag shared by all notifications from this page.
    pub tag: String,
    /// Delay before a displayed notification closes itself.
    pub auto_close_ms: u32,
    /// Whether clicking a notification focuses the originating page.
    pub focus_on_click: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            tag: DEFAULT_NOTIFICATION_TAG.to_string(),
            auto_close_ms: DEFAULT_AUTO_CLOSE_MS,
            focus_on_click: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn permission_tokens_match_serde_encoding() {
        for state in [
            PermissionState::Granted,
            PermissionState::Denied,
            PermissionState::Default,
            PermissionState::Unsupported,
            PermissionState::Error,
        ] {
            let encoded = serde_json::to_value(state).expect("serialize");
            assert_eq!(encoded, serde_json::Value::String(state.as_str().to_string()));
            assert_eq!(PermissionState::from_token(state.as_str()), state);
        }
    }

    #[test]
    fn unknown_permission_token_fails_closed() {
        assert_eq!(PermissionState::from_token("prompt"), PermissionState::Error);
        assert_eq!(PermissionState::from_token(""), PermissionState::Error);
        assert!("Granted".parse::<PermissionState>().is_err());
    }
}
