//! External webview registration.
//!
//! Lets a collaborator that constructed its own render surface (a
//! third-party SDK, typically) put it under registry management without
//! going through `create`, and push URL updates for it outside the
//! normal `load_url` path.

use multiview_common::{Result, WebviewError, WebviewEvent};
use tracing::debug;

use crate::surface::{RenderSurface, SurfaceToken};

use super::instance::WebviewInstance;
use super::WebviewRegistry;

impl WebviewRegistry {
    /// Whether an instance with this id is currently registered.
    pub fn exists(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    /// Adopt a surface constructed elsewhere. The registry takes
    /// exclusive ownership from here on; destruction goes through
    /// `destroy` like any other instance.
    ///
    /// Registration wires no engine callbacks; the surface keeps
    /// whatever delegates its creator installed. The returned token lets
    /// the creator route callbacks through [`Self::engine_sink`] if it
    /// wants load events and page messages to flow.
    pub fn register_external(
        &mut self,
        id: &str,
        surface: Box<dyn RenderSurface>,
        url: Option<String>,
    ) -> Result<SurfaceToken> {
        if self.instances.contains_key(id) {
            return Err(WebviewError::AlreadyExists(id.to_string()));
        }
        let token = self.allocate_token();
        self.instances
            .insert(id.to_string(), WebviewInstance::new(id, surface, token, url));
        self.router.attach(token, id);
        debug!(id, token = token.0, "external webview registered");
        self.bus.publish(WebviewEvent::WebviewCreated { id: id.to_string() });
        Ok(token)
    }

    /// Update the tracked URL for an instance whose page moves outside
    /// this registry's control. Nothing is navigated.
    pub fn update_url(&mut self, id: &str, url: Option<String>) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or_else(|| WebviewError::NotFound(id.to_string()))?;
        instance.current_url = url;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use multiview_common::WebviewError;

    use crate::surface::headless::{HeadlessScreen, HeadlessSurface};
    use crate::manager::types::WebviewOptions;
    use crate::manager::WebviewRegistry;

    fn registry() -> WebviewRegistry {
        WebviewRegistry::new(Box::new(HeadlessScreen::new()))
    }

    #[test]
    fn registered_external_webview_is_tracked() {
        let mut registry = registry();
        let (surface, _probe) = HeadlessSurface::external();

        registry
            .register_external("tag-manager", surface, Some("https://tags.example.com".into()))
            .unwrap();

        assert!(registry.exists("tag-manager"));
        let info = registry.describe("tag-manager").unwrap();
        assert_eq!(info.url.as_deref(), Some("https://tags.example.com"));
        assert!(!info.is_focused);
        assert!(!info.is_hidden);
    }

    #[test]
    fn registration_does_not_steal_focus() {
        let mut registry = registry();
        registry.create("main", WebviewOptions::default()).unwrap();

        let (surface, _probe) = HeadlessSurface::external();
        registry.register_external("tag-manager", surface, None).unwrap();

        assert_eq!(registry.focused(), Some("main"));
    }

    #[test]
    fn duplicate_external_id_is_rejected() {
        let mut registry = registry();
        registry.create("main", WebviewOptions::default()).unwrap();

        let (surface, _probe) = HeadlessSurface::external();
        let result = registry.register_external("main", surface, None);
        assert!(matches!(result, Err(WebviewError::AlreadyExists(_))));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn update_url_changes_only_the_tracked_url() {
        let mut registry = registry();
        let (surface, probe) = HeadlessSurface::external();
        registry.register_external("tag-manager", surface, None).unwrap();

        registry
            .update_url("tag-manager", Some("https://tags.example.com/v2".into()))
            .unwrap();

        let info = registry.describe("tag-manager").unwrap();
        assert_eq!(info.url.as_deref(), Some("https://tags.example.com/v2"));
        // The surface itself was never navigated.
        assert!(probe.navigations().is_empty());
    }

    #[test]
    fn update_url_unknown_id_fails() {
        let mut registry = registry();
        let result = registry.update_url("ghost", Some("https://example.com".into()));
        assert!(matches!(result, Err(WebviewError::NotFound(_))));
    }

    #[test]
    fn external_webview_participates_in_focus_and_search() {
        let mut registry = registry();
        registry.create("main", WebviewOptions::default()).unwrap();
        let (surface, _probe) = HeadlessSurface::external();
        registry
            .register_external("tag-manager", surface, Some("https://tags.example.com".into()))
            .unwrap();

        assert_eq!(
            registry.find_by_url("tags.example.com", false),
            vec!["tag-manager".to_string()]
        );

        registry.set_focused("tag-manager").unwrap();
        assert_eq!(registry.focused(), Some("tag-manager"));
        assert!(registry.describe("main").unwrap().is_hidden);
    }

    #[test]
    fn external_registration_emits_created_event() {
        let mut registry = registry();
        let mut rx = registry.subscribe();

        let (surface, _probe) = HeadlessSurface::external();
        registry.register_external("tag-manager", surface, None).unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            multiview_common::WebviewEvent::WebviewCreated { ref id } if id == "tag-manager"
        ));
    }
}
