use multiview_common::{Rect, Result, WebviewError, WebviewEvent};
use serde::Serialize;
use tracing::{debug, warn};

use crate::message;
use crate::surface::{EngineSignal, ScriptCallback, SurfaceOptions};

use super::instance::WebviewInstance;
use super::types::{WebviewInfo, WebviewOptions};
use super::WebviewRegistry;

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url)
        .map(|_| ())
        .map_err(|_| WebviewError::InvalidUrl(url.to_string()))
}

impl WebviewRegistry {
    /// Create a webview and attach it to the host screen.
    ///
    /// Everything that can be rejected (duplicate id, malformed initial
    /// URL, unavailable host screen) is checked before the instance map
    /// is touched, so a failed create leaves no partial state.
    ///
    /// Focus resolution: `auto_focus` promotes the new webview. Without
    /// it, the very first webview is still focused (the sole instance
    /// must never be invisible by accident); otherwise the new webview
    /// is hidden and sent to the back.
    pub fn create(&mut self, id: &str, options: WebviewOptions) -> Result<()> {
        if self.instances.contains_key(id) {
            return Err(WebviewError::AlreadyExists(id.to_string()));
        }
        if let Some(url) = &options.url {
            validate_url(url)?;
        }

        let surface_options = SurfaceOptions {
            frame: options.frame,
            enable_javascript: options.enable_javascript,
            allow_file_access: options.allow_file_access,
            user_agent: options.user_agent.clone(),
        };
        let token = self.allocate_token();
        let mut surface = self
            .screen
            .create_surface(&surface_options, self.sink.clone(), token)?;

        if let Some(url) = &options.url {
            surface.navigate(url)?;
        }

        self.instances
            .insert(id.to_string(), WebviewInstance::new(id, surface, token, None));
        self.router.attach(token, id);
        debug!(id, token = token.0, "webview created");
        self.bus.publish(WebviewEvent::WebviewCreated { id: id.to_string() });

        if options.auto_focus {
            self.set_focused(id)?;
        } else if self.focused_id.is_none() && self.instances.len() == 1 {
            // The first webview is focused even without auto_focus.
            self.set_focused(id)?;
        } else if let Some(instance) = self.instances.get_mut(id) {
            instance.surface.set_hidden(true);
            instance.surface.lower();
            instance.is_hidden = true;
        }

        Ok(())
    }

    /// Promote one webview to focus: every other instance is hidden, the
    /// target is shown and raised. The focus pointer moves once, at the
    /// end, so no intermediate state with two focused instances is
    /// observable.
    pub fn set_focused(&mut self, id: &str) -> Result<()> {
        if !self.instances.contains_key(id) {
            return Err(WebviewError::NotFound(id.to_string()));
        }

        for (other_id, other) in self.instances.iter_mut() {
            if other_id != id {
                other.surface.set_hidden(true);
                other.is_hidden = true;
            }
        }
        if let Some(instance) = self.instances.get_mut(id) {
            instance.surface.set_hidden(false);
            instance.surface.raise();
            instance.is_hidden = false;
        }
        self.focused_id = Some(id.to_string());
        debug!(id, "webview focused");
        self.bus.publish(WebviewEvent::WebviewFocused { id: id.to_string() });
        Ok(())
    }

    /// The currently focused id, if any.
    pub fn focused(&self) -> Option<&str> {
        self.focused_id.as_deref()
    }

    /// Hide a webview. Hidden implies unfocused, so hiding the focused
    /// instance clears the focus pointer; `show` does not reverse this.
    pub fn hide(&mut self, id: &str) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or_else(|| WebviewError::NotFound(id.to_string()))?;
        instance.surface.set_hidden(true);
        instance.is_hidden = true;
        if self.focused_id.as_deref() == Some(id) {
            self.focused_id = None;
        }
        Ok(())
    }

    /// Make a webview visible again. Focus is left untouched.
    pub fn show(&mut self, id: &str) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or_else(|| WebviewError::NotFound(id.to_string()))?;
        instance.surface.set_hidden(false);
        instance.is_hidden = false;
        Ok(())
    }

    /// Destroy a webview: detach the surface, drop the entry, clear the
    /// focus pointer if it referenced this id. In-flight engine
    /// callbacks for the surface are dropped by the router afterwards.
    pub fn destroy(&mut self, id: &str) -> Result<()> {
        let mut instance = self
            .instances
            .remove(id)
            .ok_or_else(|| WebviewError::NotFound(id.to_string()))?;
        instance.surface.detach();
        self.router.detach(instance.token);
        if self.focused_id.as_deref() == Some(id) {
            self.focused_id = None;
        }
        debug!(id, "webview destroyed");
        self.bus
            .publish(WebviewEvent::WebviewDestroyed { id: id.to_string() });
        Ok(())
    }

    /// Navigate a webview. The URL is validated first; a malformed URL
    /// never reaches the render surface. `current_url` is only updated
    /// when the engine reports the navigation finished.
    pub fn load_url(&mut self, id: &str, url: &str) -> Result<()> {
        if !self.instances.contains_key(id) {
            return Err(WebviewError::NotFound(id.to_string()));
        }
        validate_url(url)?;
        if let Some(instance) = self.instances.get_mut(id) {
            instance.surface.navigate(url)?;
        }
        Ok(())
    }

    /// Snapshot of all live ids, in arbitrary order.
    pub fn list_ids(&self) -> Vec<String> {
        self.instances.keys().cloned().collect()
    }

    pub fn describe(&self, id: &str) -> Result<WebviewInfo> {
        let instance = self
            .instances
            .get(id)
            .ok_or_else(|| WebviewError::NotFound(id.to_string()))?;
        Ok(self.info_for(instance))
    }

    pub fn describe_all(&self) -> Vec<WebviewInfo> {
        self.instances
            .values()
            .map(|instance| self.info_for(instance))
            .collect()
    }

    /// Ids whose `current_url` matches `url`: string equality when
    /// `exact_match`, substring containment otherwise. Instances that
    /// have never finished a load match neither mode.
    pub fn find_by_url(&self, url: &str, exact_match: bool) -> Vec<String> {
        self.instances
            .values()
            .filter_map(|instance| {
                let current = instance.current_url.as_deref()?;
                let matches = if exact_match {
                    current == url
                } else {
                    current.contains(url)
                };
                matches.then(|| instance.id.clone())
            })
            .collect()
    }

    /// Move/resize a webview. Pure geometry: focus and visibility are
    /// untouched.
    pub fn set_frame(&mut self, id: &str, frame: Rect) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or_else(|| WebviewError::NotFound(id.to_string()))?;
        instance.surface.set_frame(frame);
        Ok(())
    }

    /// Evaluate script in a webview's page context. `done` fires once
    /// with the engine's result; an engine-reported failure is passed
    /// through as-is, never retried. On `Err` the callback is not
    /// invoked.
    pub fn execute_script(&mut self, id: &str, code: &str, done: ScriptCallback) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or_else(|| WebviewError::NotFound(id.to_string()))?;
        instance.surface.evaluate(code, done);
        Ok(())
    }

    /// Serialize `data` and deliver it to the page as a
    /// `multiview-message` CustomEvent. Serialization failure surfaces
    /// before the render surface is touched.
    pub fn send_message<T: Serialize>(&mut self, id: &str, data: &T) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or_else(|| WebviewError::NotFound(id.to_string()))?;
        let json = serde_json::to_string(data)
            .map_err(|e| WebviewError::Serialization(e.to_string()))?;
        let script = message::message_script(&json);
        instance.surface.evaluate(
            &script,
            Box::new(|result| {
                if let Err(e) = result {
                    warn!(error = %e, "message delivery script failed");
                }
            }),
        );
        Ok(())
    }

    /// Drain the engine sink and route each signal to its owning
    /// instance. Runs on the registry's owning context. Signals whose
    /// token no longer resolves (the usual destroy race) are dropped.
    pub fn pump_engine_events(&mut self) {
        for (token, signal) in self.sink.drain() {
            let id = match self.router.owner_of(token) {
                Some(id) => id.to_string(),
                None => {
                    debug!(token = token.0, "engine signal dropped: no owning webview");
                    continue;
                }
            };
            match signal {
                EngineSignal::NavigationStarted { url } => {
                    self.bus.publish(WebviewEvent::LoadStart { id, url });
                }
                EngineSignal::NavigationFinished { url } => {
                    if let Some(instance) = self.instances.get_mut(&id) {
                        instance.current_url = Some(url.clone());
                    }
                    self.bus.publish(WebviewEvent::LoadFinish { id, url });
                }
                EngineSignal::NavigationFailed { url, error } => {
                    // State is left as-is; the page never got there.
                    self.bus.publish(WebviewEvent::LoadError { id, url, error });
                }
                EngineSignal::MessageReceived { data } => {
                    self.bus.publish(WebviewEvent::Message { id, data });
                }
            }
        }
    }

    fn info_for(&self, instance: &WebviewInstance) -> WebviewInfo {
        WebviewInfo {
            id: instance.id.clone(),
            url: instance.current_url.clone(),
            is_hidden: instance.is_hidden,
            is_focused: self.focused_id.as_deref() == Some(instance.id.as_str()),
        }
    }
}
