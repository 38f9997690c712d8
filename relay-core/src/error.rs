#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Tool error: {0}")]
    Tool(String),

    /// Catalog method invoked before `connect` or after `close`.
    #[error("tool catalog is not active")]
    CatalogInactive,

    /// Tool name absent from the catalog snapshot. Raised without any
    /// network attempt.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RelayError::Model("throttled".to_string());
        assert_eq!(err.to_string(), "Model error: throttled");

        let err = RelayError::UnknownTool("fetch_file_id".to_string());
        assert_eq!(err.to_string(), "unknown tool: fetch_file_id");

        let err = RelayError::CatalogInactive;
        assert_eq!(err.to_string(), "tool catalog is not active");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let relay_err: RelayError = io_err.into();
        assert!(matches!(relay_err, RelayError::Io(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert_eq!(ok_result.unwrap(), 42);

        let err_result: Result<i32> = Err(RelayError::Config("invalid".to_string()));
        assert!(err_result.is_err());
    }
}
