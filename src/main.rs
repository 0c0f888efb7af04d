use std::process::exit;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use duszek::commands::parse_directive;
use duszek::logging;
use duszek::render::Renderer;
use duszek::{ApiClient, CompletionSettings, Config, Outcome, Session};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_cli();
    let renderer = Renderer::new(!config.no_color);
    let logs = logging::init(config.verbose)?;

    renderer.banner();

    // nothing touches the network until the key is known
    let config = match config.resolve_api_key() {
        Ok(config) => config,
        Err(e) => {
            renderer.missing_credential(&e);
            exit(1);
        }
    };
    renderer.config_loaded(&config.model_id);

    let api_client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            renderer.error(&e);
            exit(1);
        }
    };
    debug!(endpoint = api_client.endpoint(), "api client ready");

    let mut session = Session::new(
        api_client,
        config.system_prompt(),
        CompletionSettings::from(&config),
    )
    .with_diagnostics(config.verbose);

    if let Some(query) = config.single_query() {
        let spinner = renderer.thinking();
        let result = session.ask(&query).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => {
                renderer.reply(&reply);
                println!();
            }
            Err(e) => {
                renderer.error(&e);
                println!();
                exit(1);
            }
        }
        return Ok(());
    }

    renderer.interactive_intro();
    let mut rl = DefaultEditor::new()?;

    loop {
        println!();
        let line = match rl.readline(renderer.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if let Err(e) = rl.add_history_entry(trimmed) {
                debug!(error = %e, "unable to record line history");
            }
        }

        let spinner = (!trimmed.is_empty() && parse_directive(trimmed).is_none())
            .then(|| renderer.thinking());
        let outcome = session.handle_line(trimmed).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match outcome {
            Outcome::Empty => {}
            Outcome::Reply(reply) => renderer.reply(&reply),
            Outcome::Failed(e) => renderer.error(&e),
            Outcome::Cleared => renderer.info("Conversation history cleared."),
            Outcome::Help => renderer.help(),
            Outcome::DiagnosticsToggled(enabled) => {
                logs.set_diagnostics(enabled);
                renderer.info(if enabled {
                    "Diagnostic output enabled."
                } else {
                    "Diagnostic output disabled."
                });
            }
            Outcome::Exit => break,
        }
    }

    renderer.goodbye();
    Ok(())
}
