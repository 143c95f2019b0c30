use std::env;

pub const API_BASE_VAR: &str = "APRIME_API_BASE";
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Where the client finds the chat backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        let trimmed = api_base.trim().trim_end_matches('/');
        let api_base = if trimmed.is_empty() {
            DEFAULT_API_BASE.to_string()
        } else {
            trimmed.to_string()
        };
        Self { api_base }
    }

    /// Read the backend location from `APRIME_API_BASE`, falling back to a
    /// local development server.
    pub fn from_env() -> Self {
        Self::new(env::var(API_BASE_VAR).unwrap_or_else(|_| DEFAULT_API_BASE.to_string()))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_lines(source: &str) -> Vec<(&str, &str)> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        let config = ClientConfig::new("http://example.com:9000//");
        assert_eq!(config.api_base, "http://example.com:9000");
        assert_eq!(
            config.endpoint("/api/sessions"),
            "http://example.com:9000/api/sessions"
        );
    }

    #[test]
    fn blank_base_uses_default() {
        assert_eq!(ClientConfig::new("  ").api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn parses_bundled_env() {
        let parsed = parse_env_lines("# comment\n\nAPRIME_API_BASE = http://x\n=orphan\nNOEQ\n");
        assert_eq!(parsed, vec![("APRIME_API_BASE", "http://x")]);
    }
}
