//! Multi-webview management core.
//!
//! Tracks a set of named webview instances behind a single registry
//! authority:
//! - Identifier uniqueness and instance lifecycle
//! - Focus/visibility transitions (at most one instance on top)
//! - Navigation, script injection, and host <-> page messaging
//! - Routing of engine callbacks back to the owning instance
//!
//! Rendering engines plug in behind the [`RenderSurface`] / [`HostScreen`]
//! capability traits; [`surface::headless`] provides an engine-free
//! implementation so the registry is exercisable without a compositor.

pub mod integration;
pub mod manager;
pub mod message;
pub mod router;
pub mod surface;

pub use integration::TagManagerIntegration;
pub use manager::{SharedRegistry, WebviewInfo, WebviewOptions, WebviewRegistry};
pub use router::EventRouter;
pub use surface::{
    EngineSignal, EngineSink, HostScreen, RenderSurface, ScriptCallback, SurfaceOptions,
    SurfaceToken,
};
