mod web_app;

pub use web_app::{NotificationEntry, SiteApp};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::logging::log!(
        "mounting notification panel (host strategy: {})",
        notify_host_web::host_strategy_name()
    );
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
