//! src/logging.rs
//! ============================================================================
//! # Logger: tracing subscriber setup
//!
//! One daily-rolling file layer (compact or JSON lines) plus an optional
//! stderr mirror, both filtered by `RUST_LOG` or the configured level.

use crate::config::{LogFormat, LoggingConfig};
use std::{
    fs, io,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};
use tracing::Metadata;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    prelude::*,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] io::Error),

    #[error("Failed to create file appender: {0}")]
    Appender(#[from] InitError),

    #[error("Invalid log level directive {directive:?}: {reason}")]
    InvalidLevel { directive: String, reason: String },
}

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`; keep the guard alive until exit
    /// so buffered lines are flushed.
    pub fn init_tracing(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
        let log_dir: PathBuf = config.resolved_dir();
        fs::create_dir_all(&log_dir)?;

        // <dir>/<prefix>.YYYY-MM-DD.log
        let file: RollingFileAppender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(config.file_prefix.as_str())
            .filename_suffix("log")
            .build(&log_dir)?;

        let (writer, guard) = tracing_appender::non_blocking(file);

        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

        let file_layer: BoxedLayer = match config.format {
            LogFormat::Compact => fmt::layer()
                .event_format(SeqFileMod)
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter(&config.level)?)
                .boxed(),

            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter(&config.level)?)
                .boxed(),
        };
        layers.push(file_layer);

        if config.stderr {
            layers.push(
                fmt::layer()
                    .event_format(SeqFileMod)
                    .with_writer(io::stderr)
                    .with_filter(env_filter(&config.level)?)
                    .boxed(),
            );
        }

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)?;

        tracing::info!(
            log_dir = %log_dir.display(),
            format = ?config.format,
            "Logging initialized"
        );

        Ok(guard)
    }
}

/// `RUST_LOG` when set, otherwise the configured default directive.
fn env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(default_level).map_err(|e| LoggingError::InvalidLevel {
        directive: default_level.to_string(),
        reason: e.to_string(),
    })
}

static SEQ: AtomicUsize = AtomicUsize::new(1);

/// Custom formatter: `[SEQ] LEVEL [file:line mod::path] message`
struct SeqFileMod;

impl<S, N> FormatEvent<S, N> for SeqFileMod
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let seq: usize = SEQ.fetch_add(1, Ordering::Relaxed);

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {:5} [{}:{} {}] ",
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}
