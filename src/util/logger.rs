use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};

use crate::config::LogConfig;


pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new(config: &LogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging(config)?;
        Ok(Logger { guards })
    }

    /// Installs the global subscriber. The returned guards flush the file writers on drop,
    /// so they have to live as long as the process logs.
    pub fn setup_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let console_filter = EnvFilter::try_new(&config.console_filter)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let console = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(true)
            .with_filter(console_filter);

        if !config.to_files {
            tracing_subscriber::registry().with(console).try_init()?;
            return Ok(Vec::new());
        }

        std::fs::create_dir_all(&config.dir)?;
        let error_dir = format!("{}/error", config.dir);

        let (general, general_guard) = non_blocking(rolling::daily(&config.dir, "agent-registry.log"));
        let (errors, error_guard) = non_blocking(rolling::daily(&error_dir, "agent-registry-error.log"));
        let (general_json, json_guard) = non_blocking(rolling::daily(&config.dir, "agent-registry.json"));
        let (errors_json, error_json_guard) = non_blocking(rolling::daily(&error_dir, "agent-registry-error.json"));

        tracing_subscriber::registry()
            .with(console)
            .with(
                fmt::layer()
                    .with_writer(general)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&config.file_level))
            )
            .with(
                fmt::layer()
                    .with_writer(errors)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&config.error_file_level))
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(general_json)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_filter(EnvFilter::new(&config.file_level))
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(errors_json)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(EnvFilter::new(&config.error_file_level))
            )
            .try_init()?;

        Ok(vec![general_guard, error_guard, json_guard, error_json_guard])
    }
}
