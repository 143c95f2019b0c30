use crate::classify::MessageKind;
use crate::sync::{ChatState, SyncController};
use crate::types::{ChatMessage, Role};
use crate::views::shared::{code_block_html, format_message_timestamp, markdown_to_html};
use dioxus::events::Key;
use dioxus::prelude::*;

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

// The optimistic half runs before the spawn so a second Enter sees `loading`.
fn submit(controller: &SyncController) {
    let input = controller.state().input;
    let Some(pending) = controller.begin_send(&input) else {
        return;
    };
    let controller = controller.clone();
    spawn(async move {
        controller.complete_send(pending).await;
    });
}

#[component]
pub fn ChatView(state: Signal<ChatState>) -> Element {
    let controller = use_context::<SyncController>();
    let snapshot = state();
    let title = snapshot
        .active_session()
        .map(|session| session.title.clone())
        .unwrap_or_default();
    let sending = snapshot.loading;
    let blank = snapshot.input.trim().is_empty();

    let on_input = {
        let controller = controller.clone();
        move |ev: FormEvent| controller.set_input(ev.value())
    };
    let on_keydown = {
        let controller = controller.clone();
        move |ev: KeyboardEvent| {
            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                ev.prevent_default();
                submit(&controller);
            }
        }
    };
    let on_send = move |_: MouseEvent| submit(&controller);

    rsx! {
        main { class: "main-container",
            div { class: "chat-header",
                h2 { class: "chat-title", "{title}" }
            }
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    if snapshot.messages.is_empty() && !sending {
                        div { class: "empty-state", "How can I help you today?" }
                    }
                    for message in snapshot.messages.as_slice().iter() {
                        MessageBubble { key: "{message.id}", message: message.clone() }
                    }
                    if sending {
                        div { class: "message-row assistant",
                            div { class: "avatar assistant", "A" }
                            div { class: "shimmer-line",
                                span { class: "shimmer-text", "Thinking…" }
                            }
                        }
                    }
                }
            }

            form { class: "composer no-divider",
                div { class: "composer-inner",
                    div { class: "hstack", style: "gap: 0.5rem; width: 100%; align-items: flex-end;",
                        textarea {
                            rows: "1",
                            placeholder: "Type your message…",
                            value: "{snapshot.input}",
                            oninput: on_input,
                            onkeydown: on_keydown,
                            disabled: sending,
                            autofocus: true,
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: sending || blank,
                            onclick: on_send,
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> Element {
    let role = role_class(message.role);
    let error = if message.is_error { "error" } else { "" };
    let body = match message.kind() {
        MessageKind::Image => rsx! {
            img { class: "generated-image", src: "{message.text}", alt: "Generated image" }
        },
        MessageKind::Code { language, body } => rsx! {
            CodeBlock { language, body }
        },
        MessageKind::Text if message.role == Role::Assistant && !message.is_error => {
            let html = markdown_to_html(&message.text);
            rsx! {
                div { class: "md", dangerous_inner_html: "{html}" }
            }
        }
        MessageKind::Text => rsx! { "{message.text}" },
    };

    rsx! {
        div { class: "message-row {role}",
            if message.role == Role::Assistant {
                div { class: "avatar assistant", "A" }
            }
            div { class: "message-stack",
                div { class: "bubble {role} {error}", {body} }
                if let Some(ts) = format_message_timestamp(message.timestamp.as_deref()) {
                    div { class: "message-meta",
                        span { class: "message-timestamp", "{ts}" }
                    }
                }
            }
        }
    }
}

#[component]
fn CodeBlock(language: String, body: String) -> Element {
    let html = code_block_html(&language, &body);
    let copy_payload = body.clone();
    let on_copy = move |_: MouseEvent| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                match arboard::Clipboard::new() {
                    Ok(mut cb) => {
                        if let Err(err) = cb.set_text(raw) {
                            tracing::warn!(%err, "failed to copy code");
                        }
                    }
                    Err(err) => tracing::warn!(%err, "clipboard unavailable"),
                }
            }
        });
    };

    rsx! {
        div { class: "code-block",
            div { class: "code-header",
                span { class: "code-language", "{language}" }
                button { class: "action-btn", r#type: "button", title: "Copy code", onclick: on_copy, "Copy" }
            }
            div { class: "md", dangerous_inner_html: "{html}" }
        }
    }
}
