//! Command descriptors and the registry that owns them.
//!
//! The registry is built once at startup and read-only afterwards, so
//! concurrent dispatches share it without locking (hosts wrap it in an
//! `Arc` and hot-reload by swapping in a freshly built instance).

use std::collections::HashMap;

use serde::Serialize;

use prompt_types::{PromptError, Result, StringResources, localize};

use crate::command::ConsoleCommand;
use crate::flag::FlagDescriptor;

/// Factory producing a fresh handler instance per dispatch.
pub type HandlerFactory = Box<dyn Fn() -> Result<Box<dyn ConsoleCommand>> + Send + Sync>;

/// Registered metadata for one invocable command.
pub struct CommandDescriptor {
    /// Bare invocation name (e.g. `list-users`), lowercase.
    pub name: String,
    /// Namespace grouping (e.g. `users`), lowercase.
    pub namespace: String,
    /// Resource key for the command description.
    pub description_key: String,
    /// Resource file the description key resolves against.
    pub resource_file: String,
    /// Accepted flags, in declaration order.
    pub flags: Vec<FlagDescriptor>,
    factory: HandlerFactory,
}

impl CommandDescriptor {
    /// A new descriptor with no flags.
    pub fn new(
        namespace: &str,
        name: &str,
        description_key: &str,
        resource_file: &str,
        factory: HandlerFactory,
    ) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            namespace: namespace.to_ascii_lowercase(),
            description_key: description_key.to_string(),
            resource_file: resource_file.to_string(),
            flags: Vec::new(),
            factory,
        }
    }

    /// Append a flag. Flag names are unique per command; a duplicate keeps
    /// the first declaration and logs a warning.
    pub fn flag(mut self, flag: FlagDescriptor) -> Self {
        if self.flags.iter().any(|f| f.name == flag.name) {
            log::warn!(
                "command {}: duplicate flag declaration '{}' ignored",
                self.full_key(),
                flag.name,
            );
        } else {
            self.flags.push(flag);
        }
        self
    }

    /// The registry key: `NAMESPACE.NAME`, uppercased.
    pub fn full_key(&self) -> String {
        format!("{}.{}", self.namespace, self.name).to_ascii_uppercase()
    }

    /// Construct a fresh handler instance.
    pub fn instantiate(&self) -> Result<Box<dyn ConsoleCommand>> {
        (self.factory)()
    }

    /// The declared flag with the given name, if any.
    pub fn find_flag(&self, name: &str) -> Option<&FlagDescriptor> {
        let name = name.to_ascii_lowercase();
        self.flags.iter().find(|f| f.name == name)
    }
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("flags", &self.flags.len())
            .finish()
    }
}

/// One row of the transport `List()` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSummary {
    pub name: String,
    pub namespace: String,
    pub key: String,
    pub description: String,
}

/// Mapping from full key to command descriptor.
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Fails when the full key is already present.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<()> {
        let key = descriptor.full_key();
        if self.commands.contains_key(&key) {
            return Err(PromptError::DuplicateCommand(key));
        }
        self.commands.insert(key, descriptor);
        Ok(())
    }

    /// Exact lookup by full key (case-insensitive).
    pub fn lookup(&self, full_key: &str) -> Option<&CommandDescriptor> {
        self.commands.get(&full_key.to_ascii_uppercase())
    }

    /// All descriptors whose bare name matches, ignoring namespace.
    pub fn all_by_bare_name(&self, name: &str) -> Vec<&CommandDescriptor> {
        let name = name.to_ascii_lowercase();
        let mut matches: Vec<&CommandDescriptor> = self
            .commands
            .values()
            .filter(|c| c.name == name)
            .collect();
        matches.sort_by_key(|c| c.full_key());
        matches
    }

    /// All descriptors, sorted by full key for stable listing.
    pub fn all(&self) -> Vec<&CommandDescriptor> {
        let mut all: Vec<&CommandDescriptor> = self.commands.values().collect();
        all.sort_by_key(|c| c.full_key());
        all
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Transport `List()` payload with descriptions resolved.
    pub fn summaries(&self, strings: &dyn StringResources) -> Vec<CommandSummary> {
        self.all()
            .into_iter()
            .map(|c| CommandSummary {
                name: c.name.clone(),
                namespace: c.namespace.clone(),
                key: c.full_key(),
                description: localize(strings, &c.description_key, &c.resource_file),
            })
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_types::{ConsoleResult, RequestContext, StringCatalog};

    struct NoopCmd;
    impl ConsoleCommand for NoopCmd {
        fn init(&mut self, _args: &[String], _ctx: &RequestContext) {}
        fn run(&mut self) -> Result<ConsoleResult> {
            Ok(ConsoleResult::message("ok"))
        }
        fn is_valid(&self) -> bool {
            true
        }
        fn validation_message(&self) -> &str {
            ""
        }
        fn local_resource_file(&self) -> &str {
            "Test"
        }
    }

    fn descriptor(namespace: &str, name: &str) -> CommandDescriptor {
        CommandDescriptor::new(
            namespace,
            name,
            "Test_Description",
            "Test",
            Box::new(|| Ok(Box::new(NoopCmd))),
        )
    }

    #[test]
    fn full_key_is_uppercased() {
        let d = descriptor("Users", "List-Users");
        assert_eq!(d.full_key(), "USERS.LIST-USERS");
    }

    #[test]
    fn register_and_lookup_case_insensitive() {
        let mut reg = CommandRegistry::new();
        reg.register(descriptor("users", "list-users")).unwrap();
        assert!(reg.lookup("users.list-users").is_some());
        assert!(reg.lookup("USERS.LIST-USERS").is_some());
        assert!(reg.lookup("USERS.NOPE").is_none());
    }

    #[test]
    fn register_rejects_duplicate_key() {
        let mut reg = CommandRegistry::new();
        reg.register(descriptor("users", "list-users")).unwrap();
        let err = reg.register(descriptor("USERS", "LIST-USERS")).unwrap_err();
        match err {
            PromptError::DuplicateCommand(key) => assert_eq!(key, "USERS.LIST-USERS"),
            other => panic!("expected DuplicateCommand, got {other}"),
        }
    }

    #[test]
    fn all_by_bare_name_ignores_namespace() {
        let mut reg = CommandRegistry::new();
        reg.register(descriptor("users", "list")).unwrap();
        reg.register(descriptor("roles", "list")).unwrap();
        reg.register(descriptor("users", "get-user")).unwrap();
        let matches = reg.all_by_bare_name("LIST");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].full_key(), "ROLES.LIST");
    }

    #[test]
    fn all_is_sorted_by_key() {
        let mut reg = CommandRegistry::new();
        reg.register(descriptor("users", "purge-user")).unwrap();
        reg.register(descriptor("roles", "list-roles")).unwrap();
        let keys: Vec<String> = reg.all().iter().map(|c| c.full_key()).collect();
        assert_eq!(keys, vec!["ROLES.LIST-ROLES", "USERS.PURGE-USER"]);
    }

    #[test]
    fn duplicate_flag_keeps_first_declaration() {
        let d = descriptor("users", "list-users")
            .flag(FlagDescriptor::integer("max", "first").with_default("10"))
            .flag(FlagDescriptor::integer("max", "second").with_default("99"));
        assert_eq!(d.flags.len(), 1);
        assert_eq!(d.flags[0].description_key, "first");
    }

    #[test]
    fn summaries_resolve_descriptions() {
        let mut reg = CommandRegistry::new();
        reg.register(descriptor("users", "list-users")).unwrap();
        let mut cat = StringCatalog::new();
        cat.insert("Test", "Test_Description", "Lists things.");
        let summaries = reg.summaries(&cat);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].key, "USERS.LIST-USERS");
        assert_eq!(summaries[0].description, "Lists things.");
    }
}
