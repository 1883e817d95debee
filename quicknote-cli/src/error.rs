//! Error handling for the QuickNote CLI
//!
//! Errors keep their source chain and carry the exit code the process should
//! end with.

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use quicknote::mcp::ToolError;
use quicknote::{ConfigError, QuickNoteError};
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error with the exit code it should produce
#[derive(Debug)]
pub struct CliError {
    /// Message printed after `Error:`
    pub message: String,
    /// Process exit code to finish with
    pub exit_code: i32,
    /// Underlying error, if any
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Wrap `error`, keeping it as the source
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// An error with exit code 1
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, EXIT_WARNING)
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        // the first source usually repeats the message
        let mut current_source = self.source().and_then(|s| s.source());
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<QuickNoteError> for CliError {
    fn from(error: QuickNoteError) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }
}

impl From<ToolError> for CliError {
    fn from(error: ToolError) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }
}

/// Extension trait for converting results to CLI results
pub trait IntoCliResult<T> {
    /// Wrap the error, keeping it as the source, with `exit_code`
    fn cli_error(self, exit_code: i32) -> CliResult<T>;
}

impl<T, E: Error + Send + Sync + 'static> IntoCliResult<T> for Result<T, E> {
    fn cli_error(self, exit_code: i32) -> CliResult<T> {
        self.map_err(|e| CliError::from_error(e, exit_code))
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_origin() {
        let err: CliError = QuickNoteError::storage("disk full").into();
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert_eq!(err.to_string(), "Storage error: disk full");

        let err: CliError = ToolError::UnknownTool("x".into()).into();
        assert_eq!(err.exit_code, EXIT_ERROR);

        assert_eq!(CliError::warning("Note abc not found").exit_code, EXIT_WARNING);
    }

    #[test]
    fn test_full_chain_includes_nested_causes() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CliError = QuickNoteError::from(io).into();

        assert_eq!(err.full_chain(), "IO error: denied\n  Caused by: denied");
    }

    #[test]
    fn test_handle_cli_result() {
        assert_eq!(handle_cli_result::<()>(Ok(())), EXIT_SUCCESS);
        assert_eq!(
            handle_cli_result::<()>(Err(CliError::new("bad", EXIT_ERROR))),
            EXIT_ERROR
        );
    }

    #[test]
    fn test_into_cli_result() {
        let result: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = result.cli_error(EXIT_WARNING).unwrap_err();
        assert_eq!(err.exit_code, EXIT_WARNING);
        assert_eq!(err.message, std::fmt::Error.to_string());
        assert!(err.source.is_some());

        let ok: Result<u8, std::fmt::Error> = Ok(7);
        assert_eq!(ok.cli_error(EXIT_ERROR).unwrap(), 7);
    }
}
