//! Shared components for CLI commands
//!
//! Logging setup and configuration resolution used across the update,
//! export and search commands.

use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::Result;

/// Set up structured logging at the given level
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so console
/// output and redirected artifacts stay separable.
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("municipio_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Resolve the run configuration from an optional base directory
pub fn resolve_config(base_dir: &Option<PathBuf>) -> Config {
    let base = base_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    Config::from_base_dir(&base)
}

/// Format an elapsed duration as `MM:SS.mmm` for the run summary
pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    let total_ms = elapsed.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_resolve_config_defaults_to_current_dir() {
        let config = resolve_config(&None);
        assert_eq!(config.data_dir, PathBuf::from("./dados_receita"));
    }

    #[test]
    fn test_resolve_config_uses_base_dir() {
        let config = resolve_config(&Some(PathBuf::from("/work")));
        assert_eq!(config.output_dir, PathBuf::from("/work/mun_por_uf"));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(0)), "00:00.000");
        assert_eq!(format_elapsed(Duration::from_millis(1_234)), "00:01.234");
        assert_eq!(format_elapsed(Duration::from_millis(83_456)), "01:23.456");
    }
}
