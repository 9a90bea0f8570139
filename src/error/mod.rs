//! Error handling for the traffic generator

use thiserror::Error;

/// Errors that can stop a traffic run
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection could not be established or was dropped
    #[error("Network error: {0}")]
    Network(String),

    /// Request was sent but the exchange failed (e.g. body read)
    #[error("HTTP request error: {0}")]
    HttpRequest(String),

    /// Request did not complete within the configured bound
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (stdout, .env file, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (event count, URLs, JSON)
    #[error("Parsing error: {0}")]
    Parse(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new HTTP request error
    pub fn http_request<S: Into<String>>(message: S) -> Self {
        Self::HttpRequest(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::HttpRequest(_) => "HTTP",
            Self::Timeout(_) => "TIMEOUT",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,  // Invalid configuration/usage
            Self::Network(_) | Self::HttpRequest(_) => 2,  // Gateway unreachable
            Self::Timeout(_) => 3,
            Self::Io(_) => 5,
        }
    }

    /// Short hint printed under the error in the terminal
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) | Self::Validation(_) => {
                Some("Check your .env file, environment variables or command line arguments.")
            }
            Self::Parse(_) => Some("EventCount must be a non-negative integer."),
            Self::Network(_) | Self::HttpRequest(_) => {
                Some("Make sure the gateway is running and reachable (see --gateway).")
            }
            Self::Timeout(_) => Some("Increase the request timeout with --timeout."),
            Self::Io(_) => None,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) | Self::HttpRequest(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(error.to_string())
        } else if error.is_connect() || error.is_request() {
            Self::network(error.to_string())
        } else {
            Self::http_request(error.to_string())
        }
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = AppError::config("Invalid configuration");
        assert_eq!(config_error.category(), "CONFIG");
        assert_eq!(config_error.exit_code(), 1);

        let network_error = AppError::network("Connection refused");
        assert_eq!(network_error.category(), "NETWORK");
        assert_eq!(network_error.exit_code(), 2);
    }

    #[test]
    fn test_error_display() {
        let error = AppError::parse("invalid digit found in string");
        let display = error.to_string();
        assert!(display.contains("Parsing error"));
        assert!(display.contains("invalid digit"));
    }

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(AppError::validation("v").exit_code(), 1);
        assert_eq!(AppError::parse("p").exit_code(), 1);
        assert_eq!(AppError::http_request("h").exit_code(), 2);
        assert_eq!(AppError::timeout("t").exit_code(), 3);
        assert_eq!(AppError::io("i").exit_code(), 5);
    }

    #[test]
    fn test_io_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let app_error: AppError = io_error.into();
        assert_eq!(app_error.category(), "IO");
    }

    #[test]
    fn test_plain_console_format() {
        let error = AppError::timeout("GET http://localhost:8099/ exceeded 10s");
        let formatted = error.format_for_console(false);
        assert!(formatted.starts_with("[TIMEOUT] Timeout error:"));
    }

    #[test]
    fn test_suggestions() {
        assert!(AppError::timeout("t").suggestion().unwrap().contains("--timeout"));
        assert!(AppError::network("n").suggestion().unwrap().contains("--gateway"));
        assert!(AppError::io("x").suggestion().is_none());
    }
}
