use std::rc::Rc;

use leptos::*;
use notify_host::NotificationSettings;

use crate::controller::{NotificationController, NotificationPanelState};

#[component]
/// Button plus status line that enables and shows browser notifications.
pub fn NotificationPanel(
    /// Display settings forwarded to the browser adapter.
    #[prop(optional)]
    settings: Option<NotificationSettings>,
) -> impl IntoView {
    let service =
        notify_host_web::notification_service_with_settings(settings.unwrap_or_default());
    let controller = Rc::new(NotificationController::new(service));
    let state = create_rw_signal(NotificationPanelState::default());

    let load_controller = Rc::clone(&controller);
    create_effect(move |_| {
        let controller = Rc::clone(&load_controller);
        spawn_local(async move {
            let loaded = controller.load(state.get_untracked()).await;
            state.update(|s| s.merge_loaded(&loaded));
        });
    });

    let on_click = move |_| {
        if state.with_untracked(|s| s.busy) {
            return;
        }
        state.update(|s| s.busy = true);
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            let next = controller.activate(state.get_untracked()).await;
            state.update(|s| {
                let loaded = s.loaded || next.loaded;
                *s = next;
                s.loaded = loaded;
                s.busy = false;
            });
        });
    };

    view! {
        <section class="notification-panel">
            <h2>"Browser notifications"</h2>
            <button
                type="button"
                class="notification-panel-trigger"
                disabled=move || state.with(|s| s.busy)
                on:click=on_click
            >
                {move || {
                    if state.with(|s| s.permission_granted) {
                        "Show notification"
                    } else {
                        "Enable notifications"
                    }
                }}
            </button>
            <p class="notification-panel-status" role="status">
                {move || state.with(NotificationPanelState::status_line)}
            </p>
        </section>
    }
}
