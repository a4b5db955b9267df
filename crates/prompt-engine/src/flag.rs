//! Declarative flag schema.
//!
//! Each command declares the flags it accepts as an ordered sequence of
//! [`FlagDescriptor`]s. Descriptors are built once at registration time and
//! are immutable afterwards; the binder and help renderer both read them.

/// Value type of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Free text.
    Text,
    /// Parsed as `i32`; malformed values fall back to the declared default.
    Integer,
    /// Boolean switch; present-without-value means `true`.
    Switch,
}

/// One accepted flag: name, description key, type, and optional default.
#[derive(Debug, Clone)]
pub struct FlagDescriptor {
    /// Flag name as typed by the user (without the leading `-`), lowercase.
    pub name: String,
    /// Resource key for the flag's description, resolved against the
    /// owning command's resource file.
    pub description_key: String,
    pub kind: FlagKind,
    /// Default applied when the flag is not supplied (stored as text,
    /// parsed per `kind`).
    pub default: Option<String>,
}

impl FlagDescriptor {
    fn new(name: &str, description_key: &str, kind: FlagKind) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            description_key: description_key.to_string(),
            kind,
            default: None,
        }
    }

    /// A text flag.
    pub fn text(name: &str, description_key: &str) -> Self {
        Self::new(name, description_key, FlagKind::Text)
    }

    /// An integer flag.
    pub fn integer(name: &str, description_key: &str) -> Self {
        Self::new(name, description_key, FlagKind::Integer)
    }

    /// A boolean switch flag.
    pub fn switch(name: &str, description_key: &str) -> Self {
        Self::new(name, description_key, FlagKind::Switch)
    }

    /// Attach a default value.
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lowercased() {
        let f = FlagDescriptor::text("Email", "Prompt_ListUsers_FlagEmail");
        assert_eq!(f.name, "email");
        assert_eq!(f.kind, FlagKind::Text);
        assert!(f.default.is_none());
    }

    #[test]
    fn with_default_stores_text() {
        let f = FlagDescriptor::integer("max", "Prompt_ListUsers_FlagMax").with_default("10");
        assert_eq!(f.default.as_deref(), Some("10"));
        assert_eq!(f.kind, FlagKind::Integer);
    }
}
