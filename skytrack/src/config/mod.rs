//! User configuration stored in `~/.skytrack/config.ini`.
//!
//! # Example
//!
//! ```no_run
//! use skytrack::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let receiver_config = config.telemetry.to_receiver_config();
//! assert_eq!(receiver_config.port, config.telemetry.port);
//! # Ok::<(), skytrack::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_LOG_FILE_NAME, DEFAULT_POLL_TIMEOUT_MS, DEFAULT_RECEIVE_TIMEOUT_SECS,
    DEFAULT_UPDATE_INTERVAL_MS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    ConfigFile, DisplaySettings, LoggingSettings, StatisticsSettings, TelemetrySettings,
};
