//! In-session directives.
//!
//! A directive is a reserved slash word that changes local state without
//! contacting the endpoint. Anything that isn't one is sent as a user turn,
//! including unrecognised slash words.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Drop the conversation back to the system prompt.
    Clear,
    Help,
    /// Flip diagnostic output on or off.
    ToggleDiagnostics,
    Exit,
}

pub fn parse_directive(input: &str) -> Option<Directive> {
    let command = input.trim().strip_prefix('/')?.to_lowercase();

    match command.as_str() {
        "clear" => Some(Directive::Clear),
        "help" | "?" => Some(Directive::Help),
        "debug" | "verbose" => Some(Directive::ToggleDiagnostics),
        "exit" | "quit" => Some(Directive::Exit),
        _ => None,
    }
}

pub fn help_text() -> &'static str {
    "Ask any coding or automation question
Request code examples or explanations
Get help with command-line tasks

Commands:
  /help   - Show this help message
  /clear  - Clear conversation history
  /debug  - Toggle diagnostic output
  /exit   - Exit DUSZEK (also /quit)"
}
