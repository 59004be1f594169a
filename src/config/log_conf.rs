use std::env;

/// Where and how verbosely the service writes its logs
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub to_files: bool,
    pub dir: String,
    pub console_filter: String,
    pub file_level: String,
    pub error_file_level: String,
}

impl LogConfig {
    /// Reads LOG_TO_FILES, LOG_DIR, RUST_LOG, FILE_LOG_LEVEL and ERROR_FILE_LOG_LEVEL.
    pub fn from_env() -> Self {
        let defaults = LogConfig::default();
        let to_files = env::var("LOG_TO_FILES")
            .ok()
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(defaults.to_files);
        LogConfig {
            to_files,
            dir: env::var("LOG_DIR").unwrap_or(defaults.dir),
            console_filter: env::var("RUST_LOG").unwrap_or(defaults.console_filter),
            file_level: env::var("FILE_LOG_LEVEL").unwrap_or(defaults.file_level),
            error_file_level: env::var("ERROR_FILE_LOG_LEVEL").unwrap_or(defaults.error_file_level),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            to_files: true,
            dir: "logs".to_string(),
            console_filter: "info,agent_registry=debug".to_string(),
            file_level: "debug".to_string(),
            error_file_level: "error".to_string(),
        }
    }
}
