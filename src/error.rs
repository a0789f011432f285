//! Error types for the Ranger MCP Server
//!
//! Tool calls never fail, so everything here concerns startup and the
//! transport loop.

use thiserror::Error;

/// Main error type for the Ranger MCP Server
#[derive(Error, Debug)]
pub enum RangerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// Logging could not be installed
    #[error("Logging error: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidLogFilter { filter: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid tool arguments: {message}")]
    InvalidArguments { message: String },
}

/// Result type alias for Ranger MCP operations
pub type Result<T> = std::result::Result<T, RangerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidLogFilter {
            filter: "=[".to_string(),
            message: "bad directive".to_string(),
        };
        assert!(err.to_string().contains("=["));
        assert!(err.to_string().contains("bad directive"));
    }

    #[test]
    fn test_error_conversion() {
        let mcp_err = McpError::UnknownTool {
            name: "nope".to_string(),
        };
        let err: RangerError = mcp_err.into();
        assert!(matches!(err, RangerError::Mcp(_)));
        assert_eq!(err.to_string(), "MCP protocol error: Unknown tool: nope");
    }
}
