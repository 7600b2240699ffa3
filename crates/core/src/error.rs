use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not open the controlling terminal: {}", _0)]
    NoTty(std::io::Error),

    #[error("Could not query the terminal size: {}", _0)]
    IoctlFailed(std::io::Error),

    #[error("Could not switch the terminal into raw mode: {}", _0)]
    RawMode(std::io::Error),

    #[error("There is nothing to select from.")]
    EmptyCandidateList,

    #[error("Selection cancelled.")]
    Cancelled,

    #[error("The terminal closed while waiting for input.")]
    TerminalClosed,

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error parsing group header template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering group header template: {}", .0)]
    Render(#[from] RenderError),

    #[error("For a color, only one of `rgb`, `ansi` or `name` should be defined.")]
    MultipleColorTypes,

    #[error("Unknown color name: \"{}\"", _0)]
    UnknownColorName(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    /// The user backed out of the selection. Callers usually skip their
    /// downstream action instead of reporting this.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cancelled() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::EmptyCandidateList.is_cancelled());
        assert!(!Error::TerminalClosed.is_cancelled());
    }

    #[test]
    fn test_io_error_message() {
        let error = Error::io_error(
            "selector config".to_string(),
            "/tmp/selector.yml".to_string(),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = error.to_string();
        assert!(message.contains("selector config"));
        assert!(message.contains("/tmp/selector.yml"));
    }
}
