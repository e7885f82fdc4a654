//! Production backend: render surfaces as `wry` child webviews.
//!
//! [`WryHost`] implements the core's `HostScreen` over any parent window
//! exposing `raw_window_handle::HasWindowHandle`; [`WrySurface`] drives
//! one child webview and forwards its engine callbacks into the
//! registry's engine sink.

mod bounds;
mod screen;
mod surface;

pub use bounds::to_wry_rect;
pub use screen::WryHost;
pub use surface::WrySurface;
