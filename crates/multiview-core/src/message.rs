//! Host <-> page messaging scripts.
//!
//! Messages flow in both directions:
//! - **Page -> host**: an initialization script installed into every
//!   created webview exposes `window.multiview.postMessage(...)`, which
//!   forwards a JSON payload to the host message channel.
//! - **Host -> page**: [`message_script`] embeds a serialized payload
//!   into a snippet that re-parses it inside the page and dispatches a
//!   `multiview-message` CustomEvent on `window`.

/// DOM event name pages listen on for host-sent messages.
pub const MESSAGE_EVENT: &str = "multiview-message";

/// Injected into every created webview before the page loads.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    window.multiview = window.multiview || {};
    window.multiview.postMessage = function(data) {
        window.ipc.postMessage(JSON.stringify(data));
    };
})();
"#;

/// Escape serialized JSON for embedding inside a single-quoted JS string
/// literal. Backslash, single quote, newline, and carriage return are the
/// characters that can break the literal; everything else passes through.
pub(crate) fn escape_single_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build the script that delivers one serialized payload to the page.
pub fn message_script(json: &str) -> String {
    let escaped = escape_single_quoted(json);
    format!(
        "(function() {{\n    var event = new CustomEvent('{MESSAGE_EVENT}', {{\n        detail: JSON.parse('{escaped}')\n    }});\n    window.dispatchEvent(event);\n}})();"
    )
}
