//! Web Notifications API platform backed by `web-sys`.

use notify_host::{NotificationRequest, PermissionState};

use super::{NotificationPlatform, PlatformCallback, PlatformFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification platform for `wasm32` page contexts.
///
/// Outside `wasm32` every probe reports an unsupported platform.
pub struct WebNotificationPlatform;

#[cfg(not(target_arch = "wasm32"))]
fn unsupported() -> String {
    "Browser notification APIs are only available when compiled for wasm32".to_string()
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: wasm_bindgen::JsValue) -> String {
    format!("{err:?}")
}

impl NotificationPlatform for WebNotificationPlatform {
    type Handle = web_sys::Notification;

    fn is_supported(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsValue;
            web_sys::window()
                .map(|window| {
                    js_sys::Reflect::has(&window, &JsValue::from_str("Notification"))
                        .unwrap_or(false)
                })
                .unwrap_or(false)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    fn permission(&self) -> PermissionState {
        #[cfg(target_arch = "wasm32")]
        {
            use web_sys::NotificationPermission;
            match web_sys::Notification::permission() {
                NotificationPermission::Granted => PermissionState::Granted,
                NotificationPermission::Denied => PermissionState::Denied,
                NotificationPermission::Default => PermissionState::Default,
                _ => PermissionState::Error,
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            PermissionState::Unsupported
        }
    }

    fn prompt_permission<'a>(&'a self) -> PlatformFuture<'a, Result<PermissionState, String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let promise = web_sys::Notification::request_permission().map_err(js_error)?;
                let answer = wasm_bindgen_futures::JsFuture::from(promise)
                    .await
                    .map_err(js_error)?;
                return Ok(answer
                    .as_string()
                    .map(|token| PermissionState::from_token(&token))
                    .unwrap_or(PermissionState::Error));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                Err(unsupported())
            }
        })
    }

    fn create(&self, request: &NotificationRequest, tag: &str) -> Result<Self::Handle, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let options = web_sys::NotificationOptions::new();
            options.set_body(&request.body);
            options.set_tag(tag);
            web_sys::Notification::new_with_options(&request.title, &options).map_err(js_error)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (request, tag);
            Err(unsupported())
        }
    }

    fn close(&self, handle: &Self::Handle) {
        #[cfg(target_arch = "wasm32")]
        {
            handle.close();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = handle;
        }
    }

    fn set_timeout(&self, delay_ms: u32, callback: PlatformCallback) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};
            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            let handler = Closure::once_into_js(move || callback());
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    handler.unchecked_ref(),
                    timeout,
                )
                .map(|_| ())
                .map_err(js_error)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (delay_ms, callback);
            Err(unsupported())
        }
    }

    fn on_click(&self, handle: &Self::Handle, callback: PlatformCallback) {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};
            let handler = Closure::once_into_js(move || callback());
            handle.set_onclick(Some(handler.unchecked_ref()));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (handle, callback);
        }
    }

    fn focus_window(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.focus();
            }
        }
    }
}
