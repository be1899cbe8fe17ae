use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::AppState,
    infra::rule_source::load_rules,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CalculatorPage, DashboardPage, RulesPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/calculator")]
    Calculator {},
    #[route("/rules")]
    Rules {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let state = use_signal(AppState::default);
    let rule_warning = use_hook({
        let mut state = state;
        move || {
            let loaded = load_rules();
            let saved = load_persisted_state();
            state.with_mut(|st| {
                st.install_rules(loaded.rules, loaded.origin);
                if let Some(saved) = saved {
                    st.apply_persisted(saved);
                }
            });
            loaded.warning.map(|err| err.to_string())
        }
    });
    use_effect(move || {
        if let Some(err) = rule_warning.as_ref() {
            push_toast(toasts, ToastKind::Warning, format!("Using built-in rules: {err}"));
        }
    });
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    match save_persisted_state(&snapshot) {
        Ok(()) => tracing::debug!("persisted preferences"),
        Err(err) => tracing::error!(error = %err, "failed to persist preferences"),
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { Shell { DashboardPage {} } }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Rules() -> Element {
    rsx! { Shell { RulesPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
