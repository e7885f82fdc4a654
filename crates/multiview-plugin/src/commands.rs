//! Typed operations and results of the command surface.

use multiview_common::Rect;
use multiview_core::WebviewInfo;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// One decoded external call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    CreateWebview {
        id: String,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        frame: Option<Rect>,
        #[serde(default = "default_true")]
        auto_focus: bool,
        #[serde(default = "default_true")]
        enable_java_script: bool,
        #[serde(default)]
        allow_file_access: bool,
        #[serde(default)]
        user_agent: Option<String>,
    },
    SetFocusedWebview {
        id: String,
    },
    GetFocusedWebview,
    HideWebview {
        id: String,
    },
    ShowWebview {
        id: String,
    },
    DestroyWebview {
        id: String,
    },
    LoadUrl {
        id: String,
        url: String,
    },
    ListWebviews,
    GetWebviewInfo {
        id: String,
    },
    GetAllWebviews,
    #[serde(rename_all = "camelCase")]
    GetWebviewsByUrl {
        url: String,
        #[serde(default)]
        exact_match: bool,
    },
    SetWebviewFrame {
        id: String,
        frame: Rect,
    },
    ExecuteJavaScript {
        id: String,
        code: String,
    },
    SendMessage {
        id: String,
        data: serde_json::Value,
    },
}

/// Success payload of a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandReply {
    /// Empty success payload.
    Empty {},
    /// `getFocusedWebview`: `id` is `null` when nothing is focused.
    Focused { id: Option<String> },
    /// `listWebviews` / `getWebviewsByUrl`.
    Ids { webviews: Vec<String> },
    /// `getWebviewInfo`.
    Info(WebviewInfo),
    /// `getAllWebviews`.
    All { webviews: Vec<WebviewInfo> },
    /// `executeJavaScript`: the JSON-stringified evaluation result, or
    /// absent when the script produced no value.
    Script {
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_decodes_camel_case_arguments() {
        let command: Command = serde_json::from_str(
            r#"{
                "method": "createWebview",
                "params": {
                    "id": "main",
                    "url": "https://example.com",
                    "frame": {"x": 0, "y": 0, "width": 375, "height": 812},
                    "autoFocus": false,
                    "enableJavaScript": false,
                    "allowFileAccess": true,
                    "userAgent": "Multiview/0.1"
                }
            }"#,
        )
        .unwrap();

        match command {
            Command::CreateWebview {
                id,
                url,
                frame,
                auto_focus,
                enable_java_script,
                allow_file_access,
                user_agent,
            } => {
                assert_eq!(id, "main");
                assert_eq!(url.as_deref(), Some("https://example.com"));
                assert!(frame.is_some());
                assert!(!auto_focus);
                assert!(!enable_java_script);
                assert!(allow_file_access);
                assert_eq!(user_agent.as_deref(), Some("Multiview/0.1"));
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn create_defaults_match_the_contract() {
        let command: Command =
            serde_json::from_str(r#"{"method": "createWebview", "params": {"id": "main"}}"#)
                .unwrap();

        match command {
            Command::CreateWebview {
                auto_focus,
                enable_java_script,
                allow_file_access,
                url,
                ..
            } => {
                assert!(auto_focus);
                assert!(enable_java_script);
                assert!(!allow_file_access);
                assert!(url.is_none());
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn parameterless_methods_decode_without_params() {
        let command: Command =
            serde_json::from_str(r#"{"method": "getFocusedWebview"}"#).unwrap();
        assert!(matches!(command, Command::GetFocusedWebview));

        let command: Command = serde_json::from_str(r#"{"method": "listWebviews"}"#).unwrap();
        assert!(matches!(command, Command::ListWebviews));
    }

    #[test]
    fn method_names_follow_the_wire_spelling() {
        let tagged = |command: &Command| {
            serde_json::to_value(command).unwrap()["method"]
                .as_str()
                .unwrap()
                .to_string()
        };

        assert_eq!(
            tagged(&Command::ExecuteJavaScript {
                id: "main".into(),
                code: "1".into()
            }),
            "executeJavaScript"
        );
        assert_eq!(
            tagged(&Command::GetWebviewsByUrl {
                url: "a".into(),
                exact_match: false
            }),
            "getWebviewsByUrl"
        );
        assert_eq!(tagged(&Command::LoadUrl { id: "main".into(), url: "u".into() }), "loadUrl");
        assert_eq!(
            tagged(&Command::SetWebviewFrame {
                id: "main".into(),
                frame: Rect::default()
            }),
            "setWebviewFrame"
        );
    }

    #[test]
    fn exact_match_defaults_to_substring_mode() {
        let command: Command = serde_json::from_str(
            r#"{"method": "getWebviewsByUrl", "params": {"url": "example.com"}}"#,
        )
        .unwrap();
        assert!(matches!(
            command,
            Command::GetWebviewsByUrl { exact_match: false, .. }
        ));
    }

    #[test]
    fn focused_reply_serializes_null_id() {
        let json = serde_json::to_value(CommandReply::Focused { id: None }).unwrap();
        assert_eq!(json, serde_json::json!({"id": null}));

        let json = serde_json::to_value(CommandReply::Focused {
            id: Some("main".into()),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"id": "main"}));
    }

    #[test]
    fn script_reply_omits_absent_result() {
        let json = serde_json::to_value(CommandReply::Script { result: None }).unwrap();
        assert_eq!(json, serde_json::json!({}));

        let json = serde_json::to_value(CommandReply::Script {
            result: Some("42".into()),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"result": "42"}));
    }

    #[test]
    fn ids_reply_uses_webviews_key() {
        let json = serde_json::to_value(CommandReply::Ids {
            webviews: vec!["main".into(), "ads".into()],
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"webviews": ["main", "ads"]}));
    }

    #[test]
    fn empty_reply_is_an_empty_object() {
        let json = serde_json::to_value(CommandReply::Empty {}).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
