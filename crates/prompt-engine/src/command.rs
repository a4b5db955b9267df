//! The handler contract consumed by the dispatcher.

use prompt_types::{ConsoleResult, RequestContext, Result};

/// A single executable console command.
///
/// Implementations live outside the core; the dispatcher only relies on this
/// contract. `init` binds and validates arguments (setting validation state
/// rather than returning an error); `run` executes the business logic.
/// `run` is only invoked while `is_valid` reports `true`.
pub trait ConsoleCommand {
    /// Bind arguments and validate. `args[0]` is the command name as typed.
    fn init(&mut self, args: &[String], ctx: &RequestContext);

    /// Execute and produce a result. May perform blocking I/O.
    fn run(&mut self) -> Result<ConsoleResult>;

    /// Whether `init` accepted the input.
    fn is_valid(&self) -> bool;

    /// Explanation when `is_valid` is `false`; empty otherwise.
    fn validation_message(&self) -> &str;

    /// Resource file for resolving this command's localized strings.
    fn local_resource_file(&self) -> &str;
}

/// Validation state a handler accumulates during `init`.
///
/// Valid means no messages were added. Embed one of these and delegate the
/// trait's `is_valid`/`validation_message` to it.
#[derive(Debug, Clone, Default)]
pub struct ValidationState {
    message: String,
}

impl ValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validation failure message.
    pub fn add_message(&mut self, message: impl AsRef<str>) {
        if !self.message.is_empty() {
            self.message.push(' ');
        }
        self.message.push_str(message.as_ref());
    }

    pub fn is_valid(&self) -> bool {
        self.message.is_empty()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_valid() {
        let state = ValidationState::new();
        assert!(state.is_valid());
        assert_eq!(state.message(), "");
    }

    #[test]
    fn messages_invalidate_and_accumulate() {
        let mut state = ValidationState::new();
        state.add_message("first problem.");
        assert!(!state.is_valid());
        state.add_message("second problem.");
        assert_eq!(state.message(), "first problem. second problem.");
    }
}
