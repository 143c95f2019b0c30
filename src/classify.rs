//! Classification of assistant responses into text, images and code.
//!
//! The backend answers with a single string. Generated images arrive as a
//! `data:image/...` URI, generated code as a markdown fence; everything else is
//! rendered as markdown text.

pub const IMAGE_PREFIX: &str = "data:image/";
pub const FENCE: &str = "```";
pub const FALLBACK_LANGUAGE: &str = "text";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Image,
    Code { language: String, body: String },
}

pub fn classify(text: &str) -> MessageKind {
    if text.starts_with(IMAGE_PREFIX) {
        MessageKind::Image
    } else if text.contains(FENCE) {
        parse_code_block(text)
    } else {
        MessageKind::Text
    }
}

/// Extract the first fenced block.
///
/// A response that mentions a fence but has no parseable block (no newline
/// after the opening fence, or no closing fence) still yields `Code`, with an
/// empty body and the `text` language.
pub fn parse_code_block(text: &str) -> MessageKind {
    fenced_block(text).unwrap_or_else(|| MessageKind::Code {
        language: FALLBACK_LANGUAGE.to_string(),
        body: String::new(),
    })
}

fn fenced_block(text: &str) -> Option<MessageKind> {
    let open = text.find(FENCE)?;
    let after_open = &text[open + FENCE.len()..];
    let newline = after_open.find('\n')?;
    let tag = after_open[..newline].split_whitespace().next().unwrap_or("");
    let rest = &after_open[newline + 1..];
    let close = rest.find(FENCE)?;

    let language = if tag.is_empty() {
        FALLBACK_LANGUAGE.to_string()
    } else {
        tag.to_string()
    };
    Some(MessageKind::Code {
        language,
        body: rest[..close].trim().to_string(),
    })
}
