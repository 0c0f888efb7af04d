//! Conversation state plus the per-line turn logic.
//!
//! `Session` owns the transcript and the diagnostics flag; the terminal loop
//! in the binary only reads lines and renders whatever `handle_line` returns.

use tracing::{debug, info};

use crate::api::{CompletionBackend, CompletionRequest};
use crate::commands::{parse_directive, Directive};
use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::transcript::{Role, Transcript};

/// Model parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<&Config> for CompletionSettings {
    fn from(config: &Config) -> Self {
        CompletionSettings {
            model: config.model_id.clone(),
            temperature: config.temp,
            max_tokens: config.max_tokens,
        }
    }
}

/// What a line of input turned into.
#[derive(Debug)]
pub enum Outcome {
    /// Blank line, nothing to do.
    Empty,
    Reply(String),
    Failed(ChatError),
    Cleared,
    Help,
    DiagnosticsToggled(bool),
    Exit,
}

pub struct Session<B> {
    backend: B,
    transcript: Transcript,
    settings: CompletionSettings,
    diagnostics: bool,
}

impl<B: CompletionBackend> Session<B> {
    pub fn new(backend: B, system_prompt: &str, settings: CompletionSettings) -> Self {
        Session {
            backend,
            transcript: Transcript::new(system_prompt),
            settings,
            diagnostics: false,
        }
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Handles one line of input: directives change local state, anything
    /// else non-empty is a user turn.
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Empty;
        }

        match parse_directive(line) {
            Some(Directive::Exit) => Outcome::Exit,
            Some(Directive::Help) => Outcome::Help,
            Some(Directive::Clear) => {
                self.clear();
                Outcome::Cleared
            }
            Some(Directive::ToggleDiagnostics) => {
                self.diagnostics = !self.diagnostics;
                info!(enabled = self.diagnostics, "diagnostics toggled");
                Outcome::DiagnosticsToggled(self.diagnostics)
            }
            None => match self.ask(line).await {
                Ok(reply) => Outcome::Reply(reply),
                Err(err) => Outcome::Failed(err),
            },
        }
    }

    /// Runs one turn against the backend.
    ///
    /// The user message is appended before the request and stays in the
    /// transcript even if the request fails; the assistant message is only
    /// appended on success.
    pub async fn ask(&mut self, text: &str) -> Result<String> {
        self.transcript.append(Role::User, text);

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: self.transcript.snapshot(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        match self.backend.complete(request).await {
            Ok(reply) => {
                self.transcript.append(Role::Assistant, reply.as_str());
                debug!(messages = self.transcript.len(), "turn completed");
                Ok(reply)
            }
            Err(err) => {
                debug!(error = %err, messages = self.transcript.len(), "turn failed");
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.transcript.reset();
        debug!("conversation history cleared");
    }
}
