//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: generation error (selection, renderer, path)
//! - 11: I/O error (reading tiles or recipes, writing SVG/PNG)
//! - 12: input error (bad request fields, tile type, tile SVG, recipe)
//! - 13: serialization error

use std::fmt;

use jali::JaliError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// The engine rejected or failed the request.
    Generation(JaliError),
    /// A file could not be read or written.
    Io(String),
    /// User input that does not make sense.
    Input(String),
    /// JSON/YAML encoding or decoding failed.
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Generation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Generation(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<JaliError> for CliError {
    fn from(e: JaliError) -> Self {
        match e {
            JaliError::InvalidRequest(_) | JaliError::Svg(_) => CliError::Input(e.to_string()),
            other => CliError::Generation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jali::{RenderError, SelectionError, SvgError};

    #[test]
    fn generation_error_exit_code_is_10() {
        let err = CliError::from(JaliError::from(SelectionError::NotAFrame));
        assert_eq!(err.exit_code(), 10);
        assert_eq!(err.to_string(), "error: select a frame");
    }

    #[test]
    fn render_error_exit_code_is_10() {
        let err = CliError::from(JaliError::from(RenderError::new("gone")));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn invalid_request_routes_to_input() {
        let err = CliError::from(JaliError::invalid("resolution must be at least 1"));
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("resolution"));
    }

    #[test]
    fn tile_svg_errors_route_to_input() {
        let err = CliError::from(JaliError::from(SvgError::NoPaths));
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serde_errors_route_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        assert_eq!(CliError::from(bad_json.unwrap_err()).exit_code(), 13);

        let bad_yaml = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2");
        assert_eq!(CliError::from(bad_yaml.unwrap_err()).exit_code(), 13);
    }
}
