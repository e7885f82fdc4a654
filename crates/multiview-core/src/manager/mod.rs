//! Webview lifecycle management.
//!
//! [`WebviewRegistry`] is the single authority over every live webview:
//! it owns the instance map and the focus pointer, allocates surfaces
//! through the host screen, and publishes lifecycle events. All mutation
//! goes through `&mut self`; when shared across a command layer, the
//! registry lives behind one mutex ([`SharedRegistry`]) so focus and
//! visibility transitions stay observably atomic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use multiview_common::{EventBus, WebviewEvent};
use tokio::sync::broadcast;

use crate::router::EventRouter;
use crate::surface::{EngineSink, HostScreen, SurfaceToken};

mod external;
mod instance;
mod registry;
mod types;

pub use instance::WebviewInstance;
pub use types::{WebviewInfo, WebviewOptions};

/// Registry shared between the command layer and integrations. The mutex
/// is the single mutation authority.
pub type SharedRegistry = Arc<Mutex<WebviewRegistry>>;

/// Owns every live webview instance and the focus/visibility state.
pub struct WebviewRegistry {
    pub(crate) instances: HashMap<String, WebviewInstance>,
    pub(crate) focused_id: Option<String>,
    pub(crate) router: EventRouter,
    pub(crate) screen: Box<dyn HostScreen>,
    pub(crate) sink: EngineSink,
    pub(crate) bus: EventBus,
    next_token: u64,
}

impl WebviewRegistry {
    pub fn new(screen: Box<dyn HostScreen>) -> Self {
        Self::with_event_capacity(screen, 64)
    }

    pub fn with_event_capacity(screen: Box<dyn HostScreen>, capacity: usize) -> Self {
        Self {
            instances: HashMap::new(),
            focused_id: None,
            router: EventRouter::new(),
            screen,
            sink: EngineSink::new(),
            bus: EventBus::new(capacity),
            next_token: 1,
        }
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// Subscribe to lifecycle and navigation events.
    pub fn subscribe(&self) -> broadcast::Receiver<WebviewEvent> {
        self.bus.subscribe()
    }

    /// The sink engine callbacks are pushed into. Handed to surface
    /// constructors; also useful for wiring externally registered
    /// surfaces into the router.
    pub fn engine_sink(&self) -> EngineSink {
        self.sink.clone()
    }

    /// How many webviews are live.
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    pub(crate) fn allocate_token(&mut self) -> SurfaceToken {
        let token = SurfaceToken(self.next_token);
        self.next_token += 1;
        token
    }
}
