//! Structured logging
//!
//! Every record is a single JSON object on its own line. The subscriber is
//! installed once by [`init`], which hands back the [`LogContext`] that the
//! server and tool handlers log through.

use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Handle to the process-wide logging setup
#[derive(Debug, Clone)]
pub struct LogContext {
    name: Arc<str>,
}

impl LogContext {
    /// Create a context whose records carry `name` as their logger
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
        }
    }

    /// Logger name stamped on every record
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Build the JSON subscriber without installing it.
///
/// Events are flattened so `message` and any extra fields sit at the top
/// level next to `timestamp`, `level` and `target`.
pub fn subscriber<W>(
    config: &Config,
    writer: W,
) -> Result<impl tracing::Subscriber + Send + Sync + 'static>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|e| {
        ConfigError::InvalidLogFilter {
            filter: config.log_filter.clone(),
            message: e.to_string(),
        }
    })?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .finish())
}

/// Install the JSON subscriber on stderr (stdout carries the protocol)
pub fn init(config: &Config) -> Result<LogContext> {
    let subscriber = subscriber(config, std::io::stderr)?;
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(LogContext::new(config.logger_name.clone()))
}
