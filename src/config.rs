use clap::Parser;
use std::env;
use std::time::Duration;

use crate::error::{ChatError, Result};

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are DUSZEK, a lightweight CLI AI assistant designed to help with coding and automation tasks.
You provide concise, practical answers. You focus on:
- Writing and debugging code
- Explaining programming concepts
- Suggesting automation solutions
- Helping with command-line tasks
- Providing quick technical guidance

Keep responses clear and to the point. When writing code, use markdown code blocks with language specification.";

#[derive(Debug, Clone, Parser)]
#[clap(
    name = "duszek",
    version = "0.1.0",
    about = "A lightweight CLI AI assistant. Starts an interactive chat unless a query is given as arguments."
)]
pub struct Config {
    #[clap(
        long("api"),
        value_name = "URL",
        help = "The API endpoint base URL to use.",
        default_value = "https://api.groq.com/openai"
    )]
    pub api: String,

    #[clap(
        long("key"),
        value_name = "API_KEY",
        help = "Sets the API key for remote endpoint; if absent, the envvar 'GROQ_API_KEY' is checked",
        default_value = ""
    )]
    pub api_key: String,

    #[clap(
        long("model"),
        env = "MODEL",
        value_name = "MODEL_ID",
        help = "Sets the model to use for generating completions with the API",
        default_value = "llama-3.1-70b-versatile"
    )]
    pub model_id: String,

    #[clap(
        short('n'),
        long,
        value_name = "INT",
        help = "Sets the maximum number of tokens to generate in each reply",
        default_value_t = 2048,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_tokens: u32,

    #[clap(
        long("temperature"),
        alias = "temp",
        value_name = "F32",
        help = "Sets the temperature for sampling, between 0 and 2",
        default_value_t = 0.7,
        value_parser = parse_temperature
    )]
    pub temp: f32,

    #[clap(
        long("system"),
        value_name = "PROMPT",
        help = "Replaces the built-in system prompt"
    )]
    pub system_prompt: Option<String>,

    #[clap(
        long,
        value_name = "SECS",
        help = "Abort a request that takes longer than this many seconds; no limit if absent"
    )]
    pub timeout: Option<u64>,

    #[clap(
        short('v'),
        long,
        help = "Start with diagnostic output enabled (toggle later with /debug)",
        default_value_t = false
    )]
    pub verbose: bool,

    #[clap(long, help = "Disable colored output", default_value_t = false)]
    pub no_color: bool,

    #[clap(
        value_name = "QUERY",
        help = "Ask a single question and exit instead of starting a chat"
    )]
    pub query: Vec<String>,
}

impl Config {
    /// Parses the command line after loading a `.env` file, if one exists,
    /// so its values are visible as environment variables.
    pub fn from_cli() -> Self {
        dotenvy::dotenv().ok();
        Config::parse()
    }

    /// Resolves the API key from `--key` or the environment. Must succeed
    /// before any request is attempted.
    pub fn resolve_api_key(self) -> Result<Self> {
        let env_key = env::var(API_KEY_ENV).ok();
        self.with_api_key_from(env_key)
    }

    /// Fallback to the environment value if `--key` was not supplied.
    /// A blank key counts as missing.
    pub fn with_api_key_from(mut self, env_key: Option<String>) -> Result<Self> {
        if self.api_key.trim().is_empty() {
            match env_key {
                Some(key) if !key.trim().is_empty() => self.api_key = key.trim().to_string(),
                _ => {
                    return Err(ChatError::configuration(format!(
                        "{} not configured",
                        API_KEY_ENV
                    )))
                }
            }
        }
        Ok(self)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.api.trim_end_matches('/'))
    }

    pub fn system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// The positional words joined into one query, or `None` for interactive mode.
    pub fn single_query(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }
}

fn parse_temperature(s: &str) -> std::result::Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is outside 0..=2", value))
    }
}
