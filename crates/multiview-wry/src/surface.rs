//! `RenderSurface` over one wry child webview.

use std::sync::{Arc, Mutex};

use multiview_common::{Rect, Result, WebviewError};
use multiview_core::{RenderSurface, ScriptCallback, SurfaceToken};
use tracing::warn;
use wry::WebView;

use crate::bounds::to_wry_rect;

/// A live wry child webview bound to its registry token.
///
/// Visibility and geometry calls are fire-and-forget; an engine failure
/// there is logged, not propagated, matching the capability contract.
pub struct WrySurface {
    pub(crate) webview: WebView,
    pub(crate) token: SurfaceToken,
}

impl WrySurface {
    pub fn token(&self) -> SurfaceToken {
        self.token
    }

    /// The underlying wry webview, for host-specific extras.
    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}

impl RenderSurface for WrySurface {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.webview
            .load_url(url)
            .map_err(|e| WebviewError::Navigation(e.to_string()))
    }

    fn evaluate(&mut self, script: &str, done: ScriptCallback) {
        // wry wants a `Fn` callback; the one-shot completion is parked
        // in a shared slot so the engine cannot double-fire it.
        let slot = Arc::new(Mutex::new(Some(done)));
        let callback_slot = Arc::clone(&slot);
        let outcome = self.webview.evaluate_script_with_callback(script, move |value| {
            if let Some(done) = callback_slot.lock().ok().and_then(|mut s| s.take()) {
                // An empty string means the script evaluated to
                // undefined; anything else is the JSON-serialized value.
                let result = if value.is_empty() { None } else { Some(value) };
                done(Ok(result));
            }
        });
        if let Err(e) = outcome {
            if let Some(done) = slot.lock().ok().and_then(|mut s| s.take()) {
                done(Err(WebviewError::ScriptExecution(e.to_string())));
            }
        }
    }

    fn set_frame(&mut self, frame: Rect) {
        if let Err(e) = self.webview.set_bounds(to_wry_rect(frame)) {
            warn!(token = self.token.0, error = %e, "failed to set webview bounds");
        }
    }

    fn set_hidden(&mut self, hidden: bool) {
        if let Err(e) = self.webview.set_visible(!hidden) {
            warn!(token = self.token.0, error = %e, "failed to set webview visibility");
        }
    }

    fn raise(&mut self) {
        // wry exposes no z-order primitive for child webviews; focusing
        // brings the surface to the foreground on every platform wry
        // supports.
        if let Err(e) = self.webview.focus() {
            warn!(token = self.token.0, error = %e, "failed to focus webview");
        }
    }

    fn lower(&mut self) {
        if let Err(e) = self.webview.focus_parent() {
            warn!(token = self.token.0, error = %e, "failed to return focus to parent");
        }
    }

    fn detach(&mut self) {
        // Dropping the wry webview tears down the native view; the
        // registry drops the box right after this call.
    }
}
