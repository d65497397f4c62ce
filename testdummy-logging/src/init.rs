use anyhow::Result;
use testdummy_config::domains::logging::{LogFormat, LogLevel};
use testdummy_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is not set.
///
/// Keeps the HTTP stack at `warn` so request handling does not drown the
/// service's own events.
pub fn filter_directive(level: LogLevel) -> String {
    format!("{level},hyper=warn,h2=warn,tower_http=warn")
}

fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from configuration
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config.level);

    // Use try_init to avoid panic if global subscriber already set
    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_current_span(false)
            .with_env_filter(env_filter)
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_env_filter(env_filter)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_target(false)
            .with_env_filter(env_filter)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_quiets_http_stack() {
        let directive = filter_directive(LogLevel::Debug);
        assert!(directive.starts_with("debug,"));
        assert!(directive.contains("hyper=warn"));
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
