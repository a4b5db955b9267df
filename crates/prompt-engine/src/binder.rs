//! Tokenization and flag binding.
//!
//! Invocation grammar: `tokens[0]` is the command name, remaining tokens are
//! `-flagname value` pairs and/or positional values. Tokenization is simple
//! whitespace splitting with single/double quote and backslash support --
//! no pipes, chaining, or redirection.

use std::collections::HashMap;

use prompt_types::{PromptError, Result};

use crate::flag::FlagDescriptor;

/// Tokenize a command line respecting quotes and backslash escapes.
///
/// - Single-quoted strings preserve all characters literally.
/// - Double-quoted strings allow `\"`, `\\` escapes.
/// - Backslash escapes the next character outside of quotes.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            if ch == '"' {
                in_double = false;
            } else if ch == '\\'
                && let Some(&next) = chars.peek()
            {
                match next {
                    '"' | '\\' => {
                        current.push(chars.next().unwrap());
                    },
                    _ => {
                        current.push('\\');
                    },
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '\'' => in_single = true,
                '"' => in_double = true,
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                },
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                },
                _ => current.push(ch),
            }
        }
    }

    if in_single {
        return Err(PromptError::Command("unterminated single quote".to_string()));
    }
    if in_double {
        return Err(PromptError::Command("unterminated double quote".to_string()));
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Whether a token addresses a flag (`-name`).
///
/// A leading `-` followed by a digit is a negative number, not a flag, so
/// numeric positional values survive binding.
pub fn is_flag(token: &str) -> bool {
    token
        .strip_prefix('-')
        .is_some_and(|rest| !rest.is_empty() && !rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Typed flag values bound from a raw token list.
///
/// Owned by one dispatch call; built by a handler's `init` from its flag
/// schema and the full argument list (`args[0]` = command name). Duplicate
/// occurrences of a flag are resolved last-wins. Unset flags read their
/// declared default.
#[derive(Debug)]
pub struct BoundArguments {
    /// User-supplied values keyed by lowercase flag name. A flag followed by
    /// another flag (or end of input) binds the empty string.
    supplied: HashMap<String, String>,
    /// Declared defaults keyed by lowercase flag name.
    defaults: HashMap<String, String>,
    /// `args[1]` when it is not a flag -- the single positional value a
    /// command may map onto a named flag via its own heuristic.
    positional: Option<String>,
    token_count: usize,
}

impl BoundArguments {
    /// Bind the token list against a flag schema.
    pub fn bind(flags: &[FlagDescriptor], args: &[String]) -> Self {
        let mut supplied = HashMap::new();
        let mut i = 1;
        while i < args.len() {
            let token = &args[i];
            if is_flag(token) {
                let name = token.trim_start_matches('-').to_ascii_lowercase();
                let value = match args.get(i + 1) {
                    Some(next) if !is_flag(next) => {
                        i += 1;
                        next.clone()
                    },
                    _ => String::new(),
                };
                // Last occurrence wins.
                supplied.insert(name, value);
            }
            i += 1;
        }

        let defaults = flags
            .iter()
            .filter_map(|f| f.default.as_ref().map(|d| (f.name.clone(), d.clone())))
            .collect();

        let positional = args.get(1).filter(|t| !is_flag(t.as_str())).cloned();

        Self {
            supplied,
            defaults,
            positional,
            token_count: args.len(),
        }
    }

    /// Whether the user explicitly supplied this flag.
    pub fn has_flag(&self, name: &str) -> bool {
        self.supplied.contains_key(&name.to_ascii_lowercase())
    }

    /// Text value: user-supplied, else declared default, else empty.
    pub fn string(&self, name: &str) -> String {
        let name = name.to_ascii_lowercase();
        self.supplied
            .get(&name)
            .or_else(|| self.defaults.get(&name))
            .cloned()
            .unwrap_or_default()
    }

    /// Integer value; malformed user input falls back to the declared
    /// default (leniency policy, not an error), and an absent default to 0.
    pub fn integer(&self, name: &str) -> i32 {
        let name = name.to_ascii_lowercase();
        let default = self
            .defaults
            .get(&name)
            .and_then(|d| d.parse().ok())
            .unwrap_or(0);
        match self.supplied.get(&name) {
            Some(value) => value.parse().unwrap_or(default),
            None => default,
        }
    }

    /// Switch value: supplying the flag means `true` unless the value is
    /// literally `false`.
    pub fn switch(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        match self.supplied.get(&name) {
            Some(value) => value != "false",
            None => self
                .defaults
                .get(&name)
                .is_some_and(|d| d.parse().unwrap_or(false)),
        }
    }

    /// The positional value (`args[1]` when unflagged), if any.
    pub fn positional(&self) -> Option<&str> {
        self.positional.as_deref()
    }

    /// Total token count including the command name.
    pub fn token_count(&self) -> usize {
        self.token_count
    }
}
