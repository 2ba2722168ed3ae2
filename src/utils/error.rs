use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed descriptor {}: {reason}", .path.display())]
    MalformedDescriptor { path: PathBuf, reason: String },

    #[error("Resolution incomplete for {coordinate}: {field} is unknown")]
    ResolutionIncomplete { coordinate: String, field: String },

    #[error("Binary not found for '{query}': {reason}")]
    BinaryNotFound { query: String, reason: String },

    #[error("Usage error: {message}")]
    UsageError { message: String },

    #[error("External tool `{command}` failed: {reason}")]
    ExternalTool { command: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Placement failed at {}: {source}", .path.display())]
    PlacementError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Descriptor,
    Resolution,
    Filesystem,
}

impl BridgeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BridgeError::UsageError { .. } | BridgeError::ConfigError { .. } => {
                ErrorCategory::Usage
            }
            BridgeError::MalformedDescriptor { .. } | BridgeError::XmlError(_) => {
                ErrorCategory::Descriptor
            }
            BridgeError::ResolutionIncomplete { .. }
            | BridgeError::BinaryNotFound { .. }
            | BridgeError::ExternalTool { .. } => ErrorCategory::Resolution,
            BridgeError::PlacementError { .. } | BridgeError::IoError(_) => {
                ErrorCategory::Filesystem
            }
        }
    }

    /// Process exit code for this failure. Usage errors use 2 like most CLIs.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Usage => 2,
            ErrorCategory::Descriptor => 3,
            ErrorCategory::Resolution => 4,
            ErrorCategory::Filesystem => 5,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BridgeError::MalformedDescriptor { .. } | BridgeError::XmlError(_) => {
                "Check the POM is well-formed and declares groupId, artifactId and version (directly or via <parent>)"
            }
            BridgeError::ResolutionIncomplete { .. } => {
                "Pass --version (and --jarfile) for artifacts without an installed POM"
            }
            BridgeError::BinaryNotFound { .. } => {
                "Pass --jarfile to point at the binary directly"
            }
            BridgeError::ExternalTool { .. } => {
                "Make sure the resolver tools are installed and on PATH, or set them under [tools]"
            }
            BridgeError::UsageError { .. } => "Run with --help to see the expected arguments",
            BridgeError::ConfigError { .. } => "Check the settings file passed with --config",
            BridgeError::PlacementError { .. } | BridgeError::IoError(_) => {
                "Check permissions on the destination repository"
            }
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        BridgeError::UsageError {
            message: message.into(),
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BridgeError::MalformedDescriptor {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
