//! Engine-free surface implementation.
//!
//! Records every operation it receives and can replay scripted
//! evaluation results and synthetic navigation callbacks. Used by the
//! registry's own tests and by host environments that need the state
//! machine without a rendering engine (CI, server-side tooling).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use multiview_common::{Rect, Result, WebviewError};

use super::{
    EngineSignal, EngineSink, HostScreen, RenderSurface, ScriptCallback, SurfaceOptions,
    SurfaceToken,
};

/// Operations observed by a headless surface, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Navigate(String),
    Evaluate(String),
    SetFrame(Rect),
    SetHidden(bool),
    Raise,
    Lower,
    Detach,
}

/// Shared inspection handle for one headless surface.
#[derive(Clone, Default)]
pub struct SurfaceProbe {
    ops: Arc<Mutex<Vec<SurfaceOp>>>,
    script_results: Arc<Mutex<VecDeque<Result<Option<String>>>>>,
}

impl SurfaceProbe {
    fn record(&self, op: SurfaceOp) {
        if let Ok(mut ops) = self.ops.lock() {
            ops.push(op);
        }
    }

    /// Every operation the surface has received so far.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().map(|ops| ops.clone()).unwrap_or_default()
    }

    /// URLs passed to `navigate`, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Navigate(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Scripts passed to `evaluate`, in order.
    pub fn evaluations(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Evaluate(script) => Some(script),
                _ => None,
            })
            .collect()
    }

    /// The most recent `set_hidden` value, if any.
    pub fn last_hidden(&self) -> Option<bool> {
        self.ops().into_iter().rev().find_map(|op| match op {
            SurfaceOp::SetHidden(hidden) => Some(hidden),
            _ => None,
        })
    }

    pub fn detached(&self) -> bool {
        self.ops().contains(&SurfaceOp::Detach)
    }

    /// Queue the result the next `evaluate` call completes with.
    pub fn push_script_result(&self, result: Result<Option<String>>) {
        if let Ok(mut results) = self.script_results.lock() {
            results.push_back(result);
        }
    }

    fn pop_script_result(&self) -> Option<Result<Option<String>>> {
        self.script_results
            .lock()
            .ok()
            .and_then(|mut results| results.pop_front())
    }
}

/// Creation log of a [`HeadlessScreen`], cloneable before the screen is
/// handed to the registry.
#[derive(Clone, Default)]
pub struct SurfaceLog {
    entries: Arc<Mutex<Vec<(SurfaceToken, SurfaceOptions, SurfaceProbe)>>>,
}

impl SurfaceLog {
    pub fn probe(&self, token: SurfaceToken) -> Option<SurfaceProbe> {
        self.entries.lock().ok().and_then(|entries| {
            entries
                .iter()
                .find(|(t, _, _)| *t == token)
                .map(|(_, _, probe)| probe.clone())
        })
    }

    /// The options the surface was allocated with.
    pub fn options(&self, token: SurfaceToken) -> Option<SurfaceOptions> {
        self.entries.lock().ok().and_then(|entries| {
            entries
                .iter()
                .find(|(t, _, _)| *t == token)
                .map(|(_, options, _)| options.clone())
        })
    }

    /// Tokens in creation order.
    pub fn tokens(&self) -> Vec<SurfaceToken> {
        self.entries
            .lock()
            .map(|entries| entries.iter().map(|(t, _, _)| *t).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, token: SurfaceToken, options: SurfaceOptions, probe: SurfaceProbe) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((token, options, probe));
        }
    }
}

/// A [`RenderSurface`] with no engine behind it.
pub struct HeadlessSurface {
    probe: SurfaceProbe,
    wiring: Option<(EngineSink, SurfaceToken)>,
    auto_finish: bool,
}

impl HeadlessSurface {
    /// A surface with no engine wiring, standing in for one constructed
    /// by a third-party SDK. Its callbacks are the owner's business, so
    /// navigations are recorded but produce no engine signals.
    pub fn external() -> (Box<dyn RenderSurface>, SurfaceProbe) {
        let probe = SurfaceProbe::default();
        let surface = Self {
            probe: probe.clone(),
            wiring: None,
            auto_finish: false,
        };
        (Box::new(surface), probe)
    }
}

impl RenderSurface for HeadlessSurface {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.probe.record(SurfaceOp::Navigate(url.to_string()));
        if let Some((sink, token)) = &self.wiring {
            sink.push(
                *token,
                EngineSignal::NavigationStarted {
                    url: url.to_string(),
                },
            );
            if self.auto_finish {
                sink.push(
                    *token,
                    EngineSignal::NavigationFinished {
                        url: url.to_string(),
                    },
                );
            }
        }
        Ok(())
    }

    fn evaluate(&mut self, script: &str, done: ScriptCallback) {
        self.probe.record(SurfaceOp::Evaluate(script.to_string()));
        let result = self.probe.pop_script_result().unwrap_or(Ok(None));
        done(result);
    }

    fn set_frame(&mut self, frame: Rect) {
        self.probe.record(SurfaceOp::SetFrame(frame));
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.probe.record(SurfaceOp::SetHidden(hidden));
    }

    fn raise(&mut self) {
        self.probe.record(SurfaceOp::Raise);
    }

    fn lower(&mut self) {
        self.probe.record(SurfaceOp::Lower);
    }

    fn detach(&mut self) {
        self.probe.record(SurfaceOp::Detach);
    }
}

/// A [`HostScreen`] that allocates headless surfaces.
pub struct HeadlessScreen {
    available: bool,
    auto_finish: bool,
    log: SurfaceLog,
}

impl HeadlessScreen {
    /// An available screen whose surfaces auto-complete navigations
    /// (every `navigate` produces a started + finished signal pair).
    pub fn new() -> Self {
        Self {
            available: true,
            auto_finish: true,
            log: SurfaceLog::default(),
        }
    }

    /// A screen whose surfaces only signal navigation start; finish and
    /// failure are injected by the test through the engine sink.
    pub fn without_auto_finish() -> Self {
        Self {
            auto_finish: false,
            ..Self::new()
        }
    }

    /// A screen that cannot allocate surfaces.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Inspection handle, valid after the screen moves into a registry.
    pub fn log(&self) -> SurfaceLog {
        self.log.clone()
    }
}

impl Default for HeadlessScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HostScreen for HeadlessScreen {
    fn create_surface(
        &mut self,
        options: &SurfaceOptions,
        sink: EngineSink,
        token: SurfaceToken,
    ) -> Result<Box<dyn RenderSurface>> {
        if !self.available {
            return Err(WebviewError::NoHostSurface);
        }
        let probe = SurfaceProbe::default();
        self.log.push(token, options.clone(), probe.clone());
        Ok(Box::new(HeadlessSurface {
            probe,
            wiring: Some((sink, token)),
            auto_finish: self.auto_finish,
        }))
    }
}
