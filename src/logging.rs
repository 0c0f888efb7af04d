use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, Registry};

/// Switches diagnostic output on and off after the subscriber is installed.
pub struct LogHandle {
    handle: reload::Handle<LevelFilter, Registry>,
}

impl LogHandle {
    pub fn set_diagnostics(&self, enabled: bool) {
        if let Err(e) = self.handle.modify(|filter| *filter = level_for(enabled)) {
            eprintln!("unable to change log level: {}", e);
        }
    }
}

/// Installs the global subscriber. Output goes to stderr so replies on
/// stdout stay clean when piped.
pub fn init(diagnostics: bool) -> anyhow::Result<LogHandle> {
    let (filter, handle) = reload::Layer::new(level_for(diagnostics));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(LogHandle { handle })
}

fn level_for(diagnostics: bool) -> LevelFilter {
    if diagnostics {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}
