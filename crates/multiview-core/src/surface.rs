//! Capability traits for host-owned rendering surfaces.
//!
//! The registry never talks to a rendering engine directly. It allocates
//! surfaces through a [`HostScreen`] and drives them through
//! [`RenderSurface`]; engine callbacks flow back through an [`EngineSink`]
//! tagged with the surface's [`SurfaceToken`].

use std::sync::{Arc, Mutex};

use multiview_common::{Rect, Result};

pub mod headless;

/// Identity token for a render surface, assigned by the registry at
/// attach time.
///
/// Engine callbacks carry the token instead of the surface handle, so the
/// router can resolve which instance fired them even when the callback
/// races with destruction of the surface itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceToken(pub u64);

/// Asynchronous callbacks a rendering engine delivers for one surface.
#[derive(Debug, Clone)]
pub enum EngineSignal {
    NavigationStarted { url: String },
    NavigationFinished { url: String },
    NavigationFailed { url: String, error: String },
    /// A page-originated message, already decoded as JSON.
    MessageReceived { data: serde_json::Value },
}

/// Shared queue that engine callbacks are pushed into from whatever
/// thread the engine fires them on. Drained on the registry's owning
/// context by [`crate::WebviewRegistry::pump_engine_events`].
#[derive(Clone, Default)]
pub struct EngineSink {
    queue: Arc<Mutex<Vec<(SurfaceToken, EngineSignal)>>>,
}

impl EngineSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, token: SurfaceToken, signal: EngineSignal) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push((token, signal));
        }
    }

    pub fn drain(&self) -> Vec<(SurfaceToken, EngineSignal)> {
        match self.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}

/// Completion callback for script evaluation. Invoked exactly once;
/// `Ok(None)` means the engine reported no value (undefined).
pub type ScriptCallback = Box<dyn FnOnce(Result<Option<String>>) + Send + 'static>;

/// Engine-facing options for allocating a surface.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    pub frame: Option<Rect>,
    pub enable_javascript: bool,
    pub allow_file_access: bool,
    pub user_agent: Option<String>,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            frame: None,
            enable_javascript: true,
            allow_file_access: false,
            user_agent: None,
        }
    }
}

/// One embeddable web-rendering surface, owned exclusively by its
/// registry entry once attached.
///
/// Surfaces are not `Send`: they live on the context that owns the host
/// screen, like the registry itself. Visibility and geometry mutations
/// are fire-and-forget from the registry's point of view; an
/// implementation that can observe engine failures logs them rather
/// than propagating.
pub trait RenderSurface {
    /// Dispatch a navigation. The URL has already been validated.
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Evaluate script in the page context; `done` fires exactly once
    /// with the engine's result or error.
    fn evaluate(&mut self, script: &str, done: ScriptCallback);

    fn set_frame(&mut self, frame: Rect);

    fn set_hidden(&mut self, hidden: bool);

    /// Bring the surface visually to the front of the host screen.
    fn raise(&mut self);

    /// Push the surface visually behind its siblings.
    fn lower(&mut self);

    /// Detach from the host screen. Called once, during destruction.
    fn detach(&mut self);
}

/// The host screen that can allocate render surfaces and attach them to
/// the visible view hierarchy.
pub trait HostScreen {
    /// Allocate a surface wired to push engine callbacks tagged with
    /// `token` into `sink`.
    ///
    /// Fails with [`multiview_common::WebviewError::NoHostSurface`] when
    /// the host screen is not available (window not yet created, or
    /// already torn down).
    fn create_surface(
        &mut self,
        options: &SurfaceOptions,
        sink: EngineSink,
        token: SurfaceToken,
    ) -> Result<Box<dyn RenderSurface>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_drains_in_push_order() {
        let sink = EngineSink::new();
        sink.push(
            SurfaceToken(1),
            EngineSignal::NavigationStarted {
                url: "https://example.com".into(),
            },
        );
        sink.push(
            SurfaceToken(1),
            EngineSignal::NavigationFinished {
                url: "https://example.com".into(),
            },
        );

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0].1, EngineSignal::NavigationStarted { .. }));
        assert!(matches!(drained[1].1, EngineSignal::NavigationFinished { .. }));
    }

    #[test]
    fn drain_empties_the_queue() {
        let sink = EngineSink::new();
        sink.push(
            SurfaceToken(7),
            EngineSignal::MessageReceived {
                data: serde_json::json!({"kind": "ready"}),
            },
        );
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn clones_share_the_same_queue() {
        let sink = EngineSink::new();
        let clone = sink.clone();
        clone.push(
            SurfaceToken(3),
            EngineSignal::NavigationFailed {
                url: "https://example.com".into(),
                error: "timed out".into(),
            },
        );
        assert_eq!(sink.drain().len(), 1);
    }

    #[test]
    fn surface_options_defaults() {
        let options = SurfaceOptions::default();
        assert!(options.enable_javascript);
        assert!(!options.allow_file_access);
        assert!(options.frame.is_none());
        assert!(options.user_agent.is_none());
    }
}
