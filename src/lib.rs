//! A lightweight command-line assistant that chats with an OpenAI compatible
//! completion endpoint, keeping the conversation in memory between turns.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod session;
pub mod transcript;

pub use api::{ApiClient, CompletionBackend, CompletionRequest};
pub use config::Config;
pub use error::{ChatError, Result};
pub use session::{CompletionSettings, Outcome, Session};
pub use transcript::{Message, Role, Transcript};
