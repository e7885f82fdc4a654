use multiview_common::Rect;
use serde::{Deserialize, Serialize};

/// Options for creating a managed webview.
#[derive(Debug, Clone)]
pub struct WebviewOptions {
    /// Initial URL to load, validated before any surface is allocated.
    pub url: Option<String>,
    /// Frame within the host screen; the backend's default when absent.
    pub frame: Option<Rect>,
    /// Focus the new webview immediately, demoting all others.
    pub auto_focus: bool,
    /// Whether the surface is allocated with scripting enabled.
    pub enable_javascript: bool,
    /// Whether the surface may access local files.
    pub allow_file_access: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl Default for WebviewOptions {
    fn default() -> Self {
        Self {
            url: None,
            frame: None,
            auto_focus: true,
            enable_javascript: true,
            allow_file_access: false,
            user_agent: None,
        }
    }
}

impl WebviewOptions {
    /// Options that load a URL, with everything else defaulted.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// Snapshot of one instance's observable state. `is_focused` is computed
/// against the registry's focus pointer at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebviewInfo {
    pub id: String,
    pub url: Option<String>,
    pub is_hidden: bool,
    pub is_focused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_defaults() {
        let options = WebviewOptions::default();
        assert!(options.auto_focus);
        assert!(options.enable_javascript);
        assert!(!options.allow_file_access);
        assert!(options.url.is_none());
        assert!(options.frame.is_none());
        assert!(options.user_agent.is_none());
    }

    #[test]
    fn with_url_keeps_other_defaults() {
        let options = WebviewOptions::with_url("https://example.com");
        assert_eq!(options.url.as_deref(), Some("https://example.com"));
        assert!(options.auto_focus);
    }

    #[test]
    fn info_serializes_camel_case_with_null_url() {
        let info = WebviewInfo {
            id: "main".into(),
            url: None,
            is_hidden: false,
            is_focused: true,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["id"], "main");
        assert!(json["url"].is_null());
        assert_eq!(json["isHidden"], false);
        assert_eq!(json["isFocused"], true);
    }
}
