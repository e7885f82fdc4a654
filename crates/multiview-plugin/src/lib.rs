//! Command surface for embedding hosts.
//!
//! Decodes external calls into typed [`Command`]s, dispatches them to a
//! shared [`multiview_core::WebviewRegistry`], and encodes results back
//! as typed [`CommandReply`]s. Method and argument spellings are the
//! wire contract.

pub mod commands;
pub mod config;
pub mod dispatch;

pub use commands::{Command, CommandReply};
pub use config::PluginConfig;
pub use dispatch::MultiviewPlugin;
