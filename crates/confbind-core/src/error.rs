//! Error types for confbind
//!
//! Errors are structured: a kind, the entry or file they concern, the
//! underlying cause and an actionable help line. Only two conditions are
//! fatal to a bind call (a missing explicit file and a failed coercion);
//! everything else is recovered inside the pipeline.

use std::fmt;

/// Result type alias for confbind operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for confbind operations
#[derive(Debug, Clone)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Entry name or file path the error concerns
    pub path: Option<String>,
    /// Actionable help message
    pub help: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed document text
    Parse,
    /// An explicitly requested configuration file does not exist
    ConfigNotFound,
    /// The configuration format cannot be derived from the file name
    UnsupportedFormat,
    /// A value could not be converted to the target variable's type
    TypeCoercion,
    /// I/O error other than a missing file
    Io,
}

impl Error {
    /// Create a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            path: None,
            help: None,
            cause: Some(message.into()),
        }
    }

    /// Create a config-not-found error for an explicitly specified file
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ConfigNotFound,
            path: Some(path.into()),
            help: Some("Check the path passed as the configuration file".into()),
            cause: None,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UnsupportedFormat,
            path: Some(path.into()),
            help: Some("Use a file ending in .json or .ini".into()),
            cause: None,
        }
    }

    /// Create a type coercion error
    pub fn type_coercion(
        name: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self {
            kind: ErrorKind::TypeCoercion,
            path: Some(name.into()),
            help: Some(format!(
                "Ensure the value can be converted to {}",
                expected.into()
            )),
            cause: Some(format!("Got: \"{}\"", got.into())),
        }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io,
            path: Some(path.into()),
            help: None,
            cause: Some(err.to_string()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Parse => write!(f, "Parse error")?,
            ErrorKind::ConfigNotFound => write!(f, "Configuration file not found")?,
            ErrorKind::UnsupportedFormat => write!(f, "Unsupported configuration format")?,
            ErrorKind::TypeCoercion => write!(f, "Type coercion failed")?,
            ErrorKind::Io => write!(f, "I/O error")?,
        }

        if let Some(path) = &self.path {
            write!(f, "\n  Path: {}", path)?;
        }

        if let Some(cause) = &self.cause {
            write!(f, "\n  {}", cause)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_display() {
        let err = Error::config_not_found("/etc/app/settings.json");
        let display = format!("{}", err);

        assert_eq!(err.kind, ErrorKind::ConfigNotFound);
        assert!(display.contains("Configuration file not found"));
        assert!(display.contains("Path: /etc/app/settings.json"));
        assert!(display.contains("Help:"));
    }

    #[test]
    fn test_type_coercion_error() {
        let err = Error::type_coercion("Port", "integer", "eighty");
        let display = format!("{}", err);

        assert!(display.contains("Type coercion failed"));
        assert!(display.contains("Path: Port"));
        assert!(display.contains("Got: \"eighty\""));
        assert!(display.contains("converted to integer"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = Error::unsupported_format("settings.toml");
        assert_eq!(err.kind, ErrorKind::UnsupportedFormat);
        assert!(err.to_string().contains(".json or .ini"));
    }

    #[test]
    fn test_parse_error_has_no_path() {
        let err = Error::parse("unexpected end of input");
        assert!(err.path.is_none());
        assert!(err.to_string().contains("unexpected end of input"));
    }

    #[test]
    fn test_io_error_names_file() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::io("/etc/app/settings.ini", &io);
        let display = format!("{}", err);

        assert_eq!(err.kind, ErrorKind::Io);
        assert!(display.contains("I/O error"));
        assert!(display.contains("Path: /etc/app/settings.ini"));
        assert!(display.contains("access denied"));
    }
}
