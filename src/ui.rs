use crate::api::HttpBackend;
use crate::config::ClientConfig;
use crate::storage::PrefStore;
use crate::sync::{ChatState, SyncController};
use crate::theme::theme_definition;
use crate::types::ThemeMode;
use crate::views::{ChatView, Sidebar};
use dioxus::prelude::*;
use std::sync::Arc;

const APRIME_CSS: Asset = asset!("/assets/aprime.css");

#[component]
pub fn App() -> Element {
    let prefs = use_context_provider(PrefStore::default_location);
    let theme = use_signal(move || prefs.load_theme());
    let view = use_signal(ChatState::default);
    let controller = use_context_provider(move || {
        let backend = Arc::new(HttpBackend::new(ClientConfig::from_env()));
        SyncController::new(backend).with_observer(move |state| {
            let mut view = view;
            view.set(state.clone());
        })
    });

    use_initial_load(controller);

    rsx! {
        ThemeStyles { theme }
        div { class: "app-shell",
            Sidebar { state: view, theme }
            ChatView { state: view }
        }
    }
}

fn use_initial_load(controller: SyncController) {
    use_hook(move || {
        spawn(async move {
            controller.load_initial().await;
        });
    });
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: APRIME_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}
