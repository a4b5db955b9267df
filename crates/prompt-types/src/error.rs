//! Error types for the Prompt console.

use std::io;

/// Errors produced by the Prompt dispatch engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("command error: {0}")]
    Command(String),

    #[error("duplicate command: {0}")]
    DuplicateCommand(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("instantiation error: {0}")]
    Instantiation(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_display() {
        let e = PromptError::Command("unknown cmd".into());
        assert_eq!(format!("{e}"), "command error: unknown cmd");
    }

    #[test]
    fn duplicate_command_display() {
        let e = PromptError::DuplicateCommand("USERS.LIST-USERS".into());
        assert_eq!(format!("{e}"), "duplicate command: USERS.LIST-USERS");
    }

    #[test]
    fn validation_error_display() {
        let e = PromptError::Validation("only one filter allowed".into());
        assert_eq!(format!("{e}"), "validation error: only one filter allowed");
    }

    #[test]
    fn store_error_display() {
        let e = PromptError::Store("role not found".into());
        assert_eq!(format!("{e}"), "store error: role not found");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: PromptError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: PromptError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: PromptError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }
}
