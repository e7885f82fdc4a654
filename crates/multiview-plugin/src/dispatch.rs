//! Command dispatch over a shared registry.

use multiview_common::{Result, WebviewError, WebviewEvent};
use multiview_core::{HostScreen, SharedRegistry, WebviewOptions, WebviewRegistry};
use tokio::sync::{broadcast, oneshot};
use tracing::debug;

use crate::commands::{Command, CommandReply};
use crate::config::PluginConfig;

/// The plugin facade: decodes typed commands into registry operations
/// and encodes results back. Holds the same shared registry handle the
/// host and integrations use.
pub struct MultiviewPlugin {
    registry: SharedRegistry,
    config: PluginConfig,
}

impl MultiviewPlugin {
    pub fn new(registry: SharedRegistry) -> Self {
        Self::with_config(registry, PluginConfig::default())
    }

    pub fn with_config(registry: SharedRegistry, config: PluginConfig) -> Self {
        Self { registry, config }
    }

    /// Build a plugin owning a fresh registry on the given host screen.
    pub fn from_screen(screen: Box<dyn HostScreen>, config: PluginConfig) -> Self {
        let registry =
            WebviewRegistry::with_event_capacity(screen, config.event_capacity).into_shared();
        Self::with_config(registry, config)
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Subscribe to the registry's lifecycle and navigation events.
    pub fn subscribe(&self) -> broadcast::Receiver<WebviewEvent> {
        self.registry.lock().unwrap().subscribe()
    }

    /// Drain pending engine callbacks. The host loop calls this on the
    /// context that owns the registry.
    pub fn pump_engine_events(&self) {
        self.registry.lock().unwrap().pump_engine_events();
    }

    /// Execute one command. Resolves with a single success payload or a
    /// single error; never a partial result.
    pub async fn handle(&self, command: Command) -> Result<CommandReply> {
        match command {
            Command::CreateWebview {
                id,
                url,
                frame,
                auto_focus,
                enable_java_script,
                allow_file_access,
                user_agent,
            } => {
                let options = WebviewOptions {
                    url,
                    frame,
                    auto_focus,
                    enable_javascript: enable_java_script,
                    allow_file_access,
                    user_agent: user_agent.or_else(|| self.config.default_user_agent.clone()),
                };
                self.registry.lock().unwrap().create(&id, options)?;
                debug!(id = %id, "createWebview handled");
                Ok(CommandReply::Empty {})
            }
            Command::SetFocusedWebview { id } => {
                self.registry.lock().unwrap().set_focused(&id)?;
                Ok(CommandReply::Empty {})
            }
            Command::GetFocusedWebview => {
                let id = self.registry.lock().unwrap().focused().map(str::to_string);
                Ok(CommandReply::Focused { id })
            }
            Command::HideWebview { id } => {
                self.registry.lock().unwrap().hide(&id)?;
                Ok(CommandReply::Empty {})
            }
            Command::ShowWebview { id } => {
                self.registry.lock().unwrap().show(&id)?;
                Ok(CommandReply::Empty {})
            }
            Command::DestroyWebview { id } => {
                self.registry.lock().unwrap().destroy(&id)?;
                Ok(CommandReply::Empty {})
            }
            Command::LoadUrl { id, url } => {
                self.registry.lock().unwrap().load_url(&id, &url)?;
                Ok(CommandReply::Empty {})
            }
            Command::ListWebviews => {
                let webviews = self.registry.lock().unwrap().list_ids();
                Ok(CommandReply::Ids { webviews })
            }
            Command::GetWebviewInfo { id } => {
                let info = self.registry.lock().unwrap().describe(&id)?;
                Ok(CommandReply::Info(info))
            }
            Command::GetAllWebviews => {
                let webviews = self.registry.lock().unwrap().describe_all();
                Ok(CommandReply::All { webviews })
            }
            Command::GetWebviewsByUrl { url, exact_match } => {
                let webviews = self.registry.lock().unwrap().find_by_url(&url, exact_match);
                Ok(CommandReply::Ids { webviews })
            }
            Command::SetWebviewFrame { id, frame } => {
                self.registry.lock().unwrap().set_frame(&id, frame)?;
                Ok(CommandReply::Empty {})
            }
            Command::ExecuteJavaScript { id, code } => {
                let (tx, rx) = oneshot::channel();
                {
                    // The lock is released before awaiting the engine.
                    let mut registry = self.registry.lock().unwrap();
                    registry.execute_script(
                        &id,
                        &code,
                        Box::new(move |result| {
                            let _ = tx.send(result);
                        }),
                    )?;
                }
                match rx.await {
                    Ok(result) => result.map(|value| CommandReply::Script { result: value }),
                    Err(_) => Err(WebviewError::ScriptExecution(
                        "engine dropped the completion callback".into(),
                    )),
                }
            }
            Command::SendMessage { id, data } => {
                self.registry.lock().unwrap().send_message(&id, &data)?;
                Ok(CommandReply::Empty {})
            }
        }
    }
}
