use crate::surface::{RenderSurface, SurfaceToken};

/// One managed webview: the exclusively owned render surface plus its
/// tracked metadata. Focus is not stored here; it is derived from the
/// registry's single focus pointer.
pub struct WebviewInstance {
    pub(crate) id: String,
    pub(crate) surface: Box<dyn RenderSurface>,
    pub(crate) token: SurfaceToken,
    pub(crate) current_url: Option<String>,
    pub(crate) is_hidden: bool,
}

impl WebviewInstance {
    pub(crate) fn new(
        id: &str,
        surface: Box<dyn RenderSurface>,
        token: SurfaceToken,
        current_url: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            surface,
            token,
            current_url,
            is_hidden: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Last-known loaded URL; `None` until a navigation finishes or an
    /// external registration supplies one.
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn token(&self) -> SurfaceToken {
        self.token
    }
}
