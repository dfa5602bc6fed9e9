//! Tracing bootstrap for binaries and tests embedding the handler.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

const DEFAULT_LOG_LEVEL: &str = "info";

/// Where formatted log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Standard output, for binaries.
    Stdout,
    /// The libtest capture writer, so output only shows for failing tests.
    TestCapture,
}

/// Install a stdout fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call repeatedly; does nothing if a global subscriber already exists.
pub fn init_logging() {
    init_logging_with(LogOutput::Stdout);
}

/// Same as [`init_logging`] with log lines routed through the test harness.
pub fn init_test_logging() {
    init_logging_with(LogOutput::TestCapture);
}

/// Install the subscriber once, writing to `output`.
pub fn init_logging_with(output: LogOutput) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        let layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true);
        let layer = match output {
            LogOutput::Stdout => layer.with_filter(filter).boxed(),
            LogOutput::TestCapture => layer.with_test_writer().with_filter(filter).boxed(),
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("global tracing subscriber already set, keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_test_logging();
        init_logging();
        init_logging_with(LogOutput::TestCapture);
        tracing::info!("logging initialised");
        assert!(LOGGER_INITIALIZED.get().is_some());
    }
}
