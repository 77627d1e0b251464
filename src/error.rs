use thiserror::Error;

/// Errors that can arise while building a routing tree, running the Van
/// Ginneken engine, or parsing the external JSON envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The edge list does not describe a single tree rooted at the driver.
    #[error("malformed routing tree: {reason}")]
    MalformedTree { reason: String },

    /// The technology or net JSON file is structurally or semantically
    /// invalid (missing driver, non-numeric field, unknown node type, ...).
    #[error("invalid input in {file}: {reason}")]
    InvalidInput { file: String, reason: String },

    /// Wraps an I/O failure, annotated with the path being read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::sync::Arc<std::io::Error>,
    },

    /// Wraps a JSON (de)serialization failure, annotated with the path.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: std::sync::Arc<serde_json::Error>,
    },
}

impl Error {
    pub fn malformed_tree(reason: impl Into<String>) -> Self {
        Error::MalformedTree {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            file: file.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source: std::sync::Arc::new(source),
        }
    }

    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source: std::sync::Arc::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
