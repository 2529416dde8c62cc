//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use skytrack::config::ConfigFileError;
use skytrack::telemetry::TelemetryError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to load or save the config file
    ConfigFile(ConfigFileError),
    /// Failed to start the telemetry receiver
    Telemetry(TelemetryError),
    /// Failed to build the async runtime
    Runtime(std::io::Error),
    /// Terminal drawing or input failed
    Terminal(std::io::Error),
    /// A datagram line did not match any known record
    NoMatch(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Telemetry(TelemetryError::SocketBind { port, .. }) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. Another program is already listening on UDP port {}", port);
                eprintln!("  2. Choose a different port with --port or telemetry.port");
            }
            CliError::NoMatch(_) => {
                eprintln!();
                eprintln!("Expected one of:");
                eprintln!("  XGPS<client>,<lon>,<lat>,<alt_m>,<track>,<gs_m/s>");
                eprintln!("  XATT<client>,<heading>,<pitch>,<roll>");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Telemetry(e) => write!(f, "Failed to start telemetry receiver: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Terminal(e) => write!(f, "Terminal error: {}", e),
            CliError::NoMatch(line) => write!(f, "Not a recognized datagram: '{}'", line),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Telemetry(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<TelemetryError> for CliError {
    fn from(e: TelemetryError) -> Self {
        CliError::Telemetry(e)
    }
}
