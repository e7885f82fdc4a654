//! Host-screen implementation attaching wry child webviews to a parent
//! window.

use std::sync::Arc;

use multiview_common::{Result, WebviewError};
use multiview_core::message::BRIDGE_INIT_SCRIPT;
use multiview_core::{EngineSignal, EngineSink, HostScreen, RenderSurface, SurfaceOptions, SurfaceToken};
use tracing::{debug, warn};
use wry::raw_window_handle::HasWindowHandle;
use wry::WebViewBuilder;

use crate::bounds::to_wry_rect;
use crate::surface::WrySurface;

/// Attaches render surfaces as child webviews of one parent window.
///
/// The window may be absent (not yet created, or already torn down),
/// in which case surface creation fails with `NoHostSurface`.
pub struct WryHost<W: HasWindowHandle> {
    window: Option<Arc<W>>,
}

impl<W: HasWindowHandle> WryHost<W> {
    pub fn new(window: Arc<W>) -> Self {
        Self {
            window: Some(window),
        }
    }

    /// A host with no window yet.
    pub fn detached() -> Self {
        Self { window: None }
    }

    /// Swap the parent window, e.g. across suspend/resume.
    pub fn set_window(&mut self, window: Option<Arc<W>>) {
        self.window = window;
    }
}

impl<W: HasWindowHandle + 'static> HostScreen for WryHost<W> {
    fn create_surface(
        &mut self,
        options: &SurfaceOptions,
        sink: EngineSink,
        token: SurfaceToken,
    ) -> Result<Box<dyn RenderSurface>> {
        let window = self.window.as_ref().ok_or(WebviewError::NoHostSurface)?;

        // wry has no per-webview JavaScript or file-access toggle;
        // `enable_javascript` and `allow_file_access` are not applied
        // by this backend.
        let mut builder = WebViewBuilder::new()
            .with_devtools(cfg!(debug_assertions))
            .with_focused(false)
            .with_initialization_script(BRIDGE_INIT_SCRIPT);

        if let Some(frame) = options.frame {
            builder = builder.with_bounds(to_wry_rect(frame));
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.with_user_agent(user_agent);
        }

        // Page -> host message channel
        let message_sink = sink.clone();
        builder = builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            match serde_json::from_str::<serde_json::Value>(&body) {
                Ok(data) => {
                    message_sink.push(token, EngineSignal::MessageReceived { data });
                }
                Err(_) => {
                    warn!(
                        token = token.0,
                        body_len = body.len(),
                        "page message rejected: invalid JSON"
                    );
                }
            }
        });

        // Navigation lifecycle. wry reports start and finish; it has no
        // failure callback, so NavigationFailed never originates here.
        let load_sink = sink.clone();
        builder = builder.with_on_page_load_handler(move |event, url| {
            let signal = match event {
                wry::PageLoadEvent::Started => EngineSignal::NavigationStarted { url },
                wry::PageLoadEvent::Finished => EngineSignal::NavigationFinished { url },
            };
            load_sink.push(token, signal);
        });

        let webview = builder.build_as_child(window.as_ref()).map_err(|e| {
            warn!(token = token.0, error = %e, "failed to build child webview");
            WebviewError::NoHostSurface
        })?;

        debug!(token = token.0, "child webview attached");
        Ok(Box::new(WrySurface { webview, token }))
    }
}
