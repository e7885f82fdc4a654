//! Reverse lookup from render-surface tokens to owning webview ids.
//!
//! Engine callbacks identify themselves by [`SurfaceToken`]; the router
//! resolves the owning id so the registry can update instance state and
//! emit the matching event. The mapping is maintained alongside the
//! instance map: attached on create/register, detached on destroy.

use std::collections::HashMap;

use crate::surface::SurfaceToken;

#[derive(Default)]
pub struct EventRouter {
    owners: HashMap<SurfaceToken, String>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&mut self, token: SurfaceToken, id: &str) {
        self.owners.insert(token, id.to_string());
    }

    pub(crate) fn detach(&mut self, token: SurfaceToken) {
        self.owners.remove(&token);
    }

    /// The id owning `token`, or `None` when the surface is already gone
    /// (a callback racing with destruction).
    pub fn owner_of(&self, token: SurfaceToken) -> Option<&str> {
        self.owners.get(&token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_attached_tokens() {
        let mut router = EventRouter::new();
        router.attach(SurfaceToken(1), "main");
        router.attach(SurfaceToken(2), "ads");

        assert_eq!(router.owner_of(SurfaceToken(1)), Some("main"));
        assert_eq!(router.owner_of(SurfaceToken(2)), Some("ads"));
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn detached_tokens_resolve_to_none() {
        let mut router = EventRouter::new();
        router.attach(SurfaceToken(1), "main");
        router.detach(SurfaceToken(1));

        assert_eq!(router.owner_of(SurfaceToken(1)), None);
        assert!(router.is_empty());
    }

    #[test]
    fn unknown_tokens_resolve_to_none() {
        let router = EventRouter::new();
        assert_eq!(router.owner_of(SurfaceToken(99)), None);
    }
}
