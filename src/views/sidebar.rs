use crate::storage::PrefStore;
use crate::sync::{ChatState, SyncController};
use crate::theme::theme_definition;
use crate::types::ThemeMode;
use dioxus::prelude::*;
use tracing::warn;

#[component]
pub fn Sidebar(state: Signal<ChatState>, theme: Signal<ThemeMode>) -> Element {
    let controller = use_context::<SyncController>();
    let snapshot = state();

    let on_new_chat = move |_: MouseEvent| {
        let controller = controller.clone();
        spawn(async move {
            controller.new_chat().await;
        });
    };

    rsx! {
        aside { class: "sidebar",
            button { class: "btn btn-primary new-chat", r#type: "button", onclick: on_new_chat, "+ New chat" }
            nav { class: "session-list",
                for session in snapshot.sessions.as_slice().iter() {
                    SessionRow {
                        key: "{session.id}",
                        id: session.id.clone(),
                        title: session.title.clone(),
                        active: snapshot.is_active(&session.id),
                    }
                }
            }
            ThemeToggle { theme }
        }
    }
}

#[component]
fn SessionRow(id: String, title: String, active: bool) -> Element {
    let controller = use_context::<SyncController>();
    let class = if active { "session-row active" } else { "session-row" };

    let on_select = {
        let controller = controller.clone();
        let id = id.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            let id = id.clone();
            spawn(async move {
                controller.switch_session(&id).await;
            });
        }
    };
    let on_delete = move |ev: MouseEvent| {
        ev.stop_propagation();
        let controller = controller.clone();
        let id = id.clone();
        spawn(async move {
            controller.delete_session(&id).await;
        });
    };

    rsx! {
        div { class: class, onclick: on_select,
            span { class: "session-title", title: "{title}", "{title}" }
            button { class: "btn-ghost session-delete", r#type: "button", title: "Delete chat", onclick: on_delete, "×" }
        }
    }
}

#[component]
fn ThemeToggle(mut theme: Signal<ThemeMode>) -> Element {
    let prefs = use_context::<PrefStore>();
    let label = theme_definition(theme()).toggle_label;

    rsx! {
        button {
            class: "btn btn-ghost theme-toggle",
            r#type: "button",
            onclick: move |_| {
                let next = theme().toggled();
                theme.set(next);
                if let Err(err) = prefs.save_theme(next) {
                    warn!(%err, "failed to persist theme");
                }
            },
            "{label}"
        }
    }
}
