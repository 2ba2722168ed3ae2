use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(level: Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "mvn_ivy_bridge={},warn",
            level.as_str().to_lowercase()
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Parse a named log level, ignoring case.
pub fn parse_level(name: &str) -> std::result::Result<Level, String> {
    name.trim()
        .parse::<Level>()
        .map_err(|_| format!("unknown log level '{name}' (expected trace, debug, info, warn or error)"))
}
