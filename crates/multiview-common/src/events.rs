use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events published by the webview registry.
///
/// One broadcast channel carries every kind; listeners filter on the
/// variants they care about. Emission is fire-and-forget: a failed
/// operation publishes nothing, and zero subscribers is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum WebviewEvent {
    WebviewCreated { id: String },
    WebviewDestroyed { id: String },
    WebviewFocused { id: String },
    LoadStart { id: String, url: String },
    LoadFinish { id: String, url: String },
    LoadError { id: String, url: String, error: String },
    Message { id: String, data: serde_json::Value },
}

pub struct EventBus {
    sender: broadcast::Sender<WebviewEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WebviewEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: WebviewEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
