//! Log subscriber setup for the binary.

use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::error::{FlockError, Result};

/// How log lines are formatted on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line events with source locations.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
}

/// Build the event filter: `RUST_LOG` wins, otherwise `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// A formatting subscriber writing to `writer`.
pub fn subscriber<W>(filter: EnvFilter, format: LogFormat, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer);

    match format {
        LogFormat::Pretty => Box::new(builder.pretty().with_target(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().with_target(false).finish()),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for JSON output.
pub fn init(level: &str, format: LogFormat) -> Result<()> {
    let subscriber = subscriber(env_filter(level), format, std::io::stderr);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| FlockError::config(format!("Failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(format: LogFormat) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = subscriber(EnvFilter::new("info"), format, move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(seed = 42, "generated sheep");
        });

        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_format_serde() {
        assert_eq!(serde_yaml::from_str::<LogFormat>("compact").unwrap(), LogFormat::Compact);
        assert_eq!(serde_yaml::from_str::<LogFormat>("pretty").unwrap(), LogFormat::Pretty);
        assert!(serde_yaml::from_str::<LogFormat>("json").is_err());
    }

    #[test]
    fn test_compact_is_one_line() {
        let out = capture(LogFormat::Compact);
        assert!(out.contains("generated sheep"));
        assert_eq!(out.trim_end().lines().count(), 1, "{}", out);
    }

    #[test]
    fn test_pretty_spans_lines() {
        let out = capture(LogFormat::Pretty);
        assert!(out.contains("generated sheep"));
        assert!(out.trim_end().lines().count() > 1, "{}", out);
    }

    #[test]
    fn test_filter_drops_quiet_events() {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = subscriber(EnvFilter::new("warn"), LogFormat::Compact, move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("not shown");
        });

        assert!(out.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_init_twice_fails_cleanly() {
        // The first call may or may not win depending on test order; the
        // second always finds a subscriber already installed.
        let _ = init("warn", LogFormat::Compact);
        assert!(init("warn", LogFormat::Pretty).is_err());
    }
}
