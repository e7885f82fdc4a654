pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, WebviewError};
pub use events::{EventBus, WebviewEvent};
pub use types::Rect;

pub type Result<T> = std::result::Result<T, WebviewError>;
