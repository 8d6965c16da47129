use leptos::*;
use leptos_meta::*;
use notify_host::NotificationSettings;
use notify_ui::NotificationPanel;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Browser Notifications" />
        <Meta name="description" content="Request permission for and show native browser notifications." />

        <main class="site-root">
            <NotificationEntry />
        </main>
    }
}

#[component]
pub fn NotificationEntry() -> impl IntoView {
    view! {
        <NotificationPanel settings=NotificationSettings::default() />
    }
}
