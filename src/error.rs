use thiserror::Error;

/// Main error type for listeval
#[derive(Error, Debug)]
pub enum ListEvalError {
    /// Invalid evaluation configuration (unknown method, bad k or batch_size)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Batch shape violations (row/label mismatch, divisibility, column bounds)
    #[error("Shape error: {0}")]
    Shape(String),

    /// A label failed binarization to 0/1 on a binary metric path
    #[error("Label error: {0}")]
    Label(String),

    /// An internal consistency check failed
    #[error("Invariant error: {0}")]
    Invariant(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse errors (batch JSON, config TOML)
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenient Result type using ListEvalError
pub type Result<T> = std::result::Result<T, ListEvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ListEvalError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ListEvalError = io_err.into();
        assert!(matches!(err, ListEvalError::Io(_)));
    }
}
