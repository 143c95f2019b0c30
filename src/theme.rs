use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub toggle_label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            toggle_label: "Light mode",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            toggle_label: "Dark mode",
        },
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0d0d0f;
    --color-bg-sidebar: #161619;
    --color-bg-overlay: rgba(13, 13, 15, 0.9);
    --color-text-primary: #f2f2f2;
    --color-text-muted: #9a9aa2;
    --color-border: #2c2c31;
    --color-surface-muted: #1f1f24;
    --color-session-active: #2a2a31;
    --color-input-bg: #1a1a1e;
    --color-input-border: #34343a;
    --color-chat-user-bg: #3b5bdb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #1b1b20;
    --color-chat-assistant-text: #f2f2f2;
    --color-error-bg: #3a1618;
    --color-error-text: #ffb4b4;
    --color-code-bg: #2b303b;
    --color-timestamp: #77777f;
    --color-shimmer-base: rgba(120, 140, 255, 0.25);
    --color-shimmer-highlight: #8c9eff;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.sidebar { background: var(--color-bg-sidebar); border-right-color: var(--color-border); }
.session-row.active { background: var(--color-session-active); }
.btn:hover,
.btn-ghost:hover { background: var(--color-surface-muted); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-sidebar: #f4f4f6;
    --color-bg-overlay: rgba(255, 255, 255, 0.92);
    --color-text-primary: #16161a;
    --color-text-muted: #5c5c66;
    --color-border: #dcdce2;
    --color-surface-muted: #e8e8ee;
    --color-session-active: #dfe4ff;
    --color-input-bg: #ffffff;
    --color-input-border: #c6c6d0;
    --color-chat-user-bg: #3b5bdb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f1f1f5;
    --color-chat-assistant-text: #16161a;
    --color-error-bg: #fde8e8;
    --color-error-text: #9b1c1c;
    --color-code-bg: #2b303b;
    --color-timestamp: #8a8a94;
    --color-shimmer-base: rgba(59, 91, 219, 0.25);
    --color-shimmer-highlight: #3b5bdb;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.sidebar { background: var(--color-bg-sidebar); border-right-color: var(--color-border); }
.session-row.active { background: var(--color-session-active); }
.btn { color: var(--color-text-primary); }
.btn:hover,
.btn-ghost:hover { background: var(--color-surface-muted); }
.composer { background: var(--color-bg-overlay); border-top-color: var(--color-border); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
"#;
