//! Third-party webview adoption.
//!
//! A tag-management SDK (or any collaborator that builds its own
//! webview) can hand its surface to an existing registry for unified
//! focus and lifecycle control. The integration holds an explicit handle
//! to the registry it was set up with, never process-wide state, and
//! owns one reserved id for the adopted webview.

use tracing::warn;

use multiview_common::{Result, WebviewError};

use crate::manager::SharedRegistry;
use crate::surface::RenderSurface;

/// Default reserved id for an adopted tag-manager webview.
pub const TAG_MANAGER_ID: &str = "tag-manager";

pub struct TagManagerIntegration {
    registry: SharedRegistry,
    id: String,
}

impl TagManagerIntegration {
    pub fn new(registry: SharedRegistry) -> Self {
        Self::with_id(registry, TAG_MANAGER_ID)
    }

    pub fn with_id(registry: SharedRegistry, id: impl Into<String>) -> Self {
        Self {
            registry,
            id: id.into(),
        }
    }

    /// The id the adopted webview is registered under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Register the SDK's surface on first call; on subsequent calls
    /// only push the URL update. `surface` is invoked only when a new
    /// registration actually happens. Returns `true` when it did.
    pub fn register_or_update<F>(&self, surface: F, url: Option<&str>) -> Result<bool>
    where
        F: FnOnce() -> Box<dyn RenderSurface>,
    {
        let mut registry = self.registry.lock().unwrap();
        if registry.exists(&self.id) {
            registry.update_url(&self.id, url.map(str::to_string))?;
            Ok(false)
        } else {
            registry.register_external(&self.id, surface(), url.map(str::to_string))?;
            Ok(true)
        }
    }

    /// Remove the adopted webview from management. Already-gone is fine:
    /// integrations tear down in whatever order the SDK dictates.
    pub fn unregister(&self) {
        let mut registry = self.registry.lock().unwrap();
        match registry.destroy(&self.id) {
            Ok(()) | Err(WebviewError::NotFound(_)) => {}
            Err(e) => warn!(id = %self.id, error = %e, "failed to unregister webview"),
        }
    }

    pub fn is_integrated(&self) -> bool {
        self.registry.lock().unwrap().exists(&self.id)
    }
}
