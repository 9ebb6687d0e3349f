use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the documentation pipeline
#[derive(Debug)]
pub enum Error {
    /// Invalid or missing configuration, detected before any I/O
    Configuration(String),
    /// The main API file was not found under any search root
    Resolution { attempted: PathBuf },
    /// A model could not be marshaled to JSON
    Serialization { context: String, source: serde_json::Error },
    /// A file or directory could not be read, created or written
    Io { path: PathBuf, source: std::io::Error },
    /// A source file could not be understood
    Parse { file: PathBuf, message: String },
}

impl Error {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps a JSON error together with a description of what was serialized.
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Serialization {
            context: context.into(),
            source,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "configuration error: {}", msg),
            Error::Resolution { attempted } => {
                write!(f, "could not find apifile {} to parse", attempted.display())
            }
            Error::Serialization { context, source } => {
                write!(f, "can not serialise {} to JSON: {}", context, source)
            }
            Error::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Error::Parse { file, message } => {
                write!(f, "parse error in {}: {}", file.display(), message)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Serialization { source, .. } => Some(source),
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization("document", err)
    }
}
