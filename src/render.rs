//! Terminal output for the chat loop.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::commands::help_text;
use crate::config::API_KEY_ENV;
use crate::error::ChatError;

pub struct Renderer;

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        if !use_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        Renderer
    }

    pub fn banner(&self) {
        println!(
            "{}",
            style(
                "
╔═══════════════════════════════════════╗
║                                       ║
║             DUSZEK v0.1               ║
║   Lightweight CLI AI Assistant        ║
║                                       ║
╚═══════════════════════════════════════╝"
            )
            .cyan()
        );
    }

    /// Only printed once the API key has been resolved.
    pub fn config_loaded(&self, model: &str) {
        println!("{} Configuration loaded", style("✓").green());
        println!("{}", style(format!("Model: {}", model)).dim());
    }

    pub fn interactive_intro(&self) {
        println!(
            "\n{}",
            style("Interactive mode started. Type your questions or requests.").cyan()
        );
        println!(
            "{}\n",
            style("Commands: /help - show help, /clear - clear history, /exit - quit").dim()
        );
    }

    /// Kept free of escape codes so the line editor measures it correctly.
    pub fn prompt(&self) -> &'static str {
        "You: "
    }

    pub fn reply(&self, text: &str) {
        println!("\n{} {}", style("DUSZEK:").blue().bold(), text);
    }

    pub fn error(&self, err: &ChatError) {
        println!("\n{} {}", style("Error:").red().bold(), style(err).red());
        if let Some(hint) = hint_for(err) {
            println!("{}", style(hint).yellow());
        }
    }

    pub fn info(&self, text: &str) {
        println!("\n{} {}", style("✓").yellow(), style(text).yellow());
    }

    pub fn help(&self) {
        println!("\n{}", style("DUSZEK Help:").cyan());
        for line in help_text().lines() {
            println!("  {}", line);
        }
    }

    pub fn goodbye(&self) {
        println!("\n{}\n", style("Goodbye! DUSZEK signing off.").cyan());
    }

    /// Printed to stderr when the API key is missing, before exiting.
    pub fn missing_credential(&self, err: &ChatError) {
        eprintln!("\n{} {}", style("Error:").red().bold(), err);
        eprintln!("{}", style("\nTo use DUSZEK, you need to:").yellow());
        eprintln!("1. Get a free API key from https://console.groq.com");
        eprintln!("2. Create a .env file in the project directory");
        eprintln!("3. Add your key: {}=your_key_here", API_KEY_ENV);
        eprintln!("\nOptionally, you can also set MODEL (default: llama-3.1-70b-versatile)\n");
    }

    /// A spinner on stderr while waiting for the endpoint. Hidden when
    /// stderr isn't a terminal.
    pub fn thinking(&self) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("DUSZEK is thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

/// Suggested next step for failures the user can usually act on.
pub fn hint_for(err: &ChatError) -> Option<&'static str> {
    match err {
        ChatError::Network(_) => {
            Some("Unable to connect to the API. Please check your internet connection.")
        }
        ChatError::Parse(_) => {
            Some("The model may not be available or the response format changed.")
        }
        ChatError::Configuration(_) | ChatError::Api { .. } => None,
    }
}
