use std::fmt;

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Main error type for the decision engine
#[derive(Debug, Clone)]
pub enum AgentError {
    /// Encoder output length or action count disagrees with the approximator
    ConfigMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid configuration or constructor parameter
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// Inbound snapshot does not have the shape the encoder was built for
    MalformedState(String),

    /// IO errors (checkpoint files)
    IoError(String),

    /// Serialization/deserialization errors
    SerializationError(String),

    /// Numerical computation errors
    NumericalError(String),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::ConfigMismatch { expected, actual } => {
                write!(f, "Configuration mismatch: expected {}, got {}", expected, actual)
            }
            AgentError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            AgentError::MalformedState(msg) => write!(f, "Malformed game state: {}", msg),
            AgentError::IoError(msg) => write!(f, "IO error: {}", msg),
            AgentError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AgentError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for AgentError {}

// Conversion from std::io::Error
impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        AgentError::IoError(err.to_string())
    }
}

// Conversion from bincode::Error
impl From<bincode::Error> for AgentError {
    fn from(err: bincode::Error) -> Self {
        AgentError::SerializationError(err.to_string())
    }
}

// Helper functions for common error patterns
impl AgentError {
    pub fn config_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        AgentError::ConfigMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        AgentError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
