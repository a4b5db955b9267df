//! Help rendering for `HELP` requests.
//!
//! `HELP <command>` documents one command's flags; `HELP SYNTAX` and
//! `HELP LEARN` are static pages resolved from the engine resource file.
//! All rendering reads the registry and string catalog only.

use serde::Serialize;

use prompt_types::{StringResources, localize};

use crate::registry::CommandDescriptor;

/// Resource file holding the engine's own strings.
pub(crate) const ENGINE_RESOURCE_FILE: &str = "Prompt";

/// One documented flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpOption {
    pub flag: String,
    pub description: String,
    pub default: Option<String>,
}

/// Help payload returned instead of a result envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandHelp {
    pub name: String,
    pub description: String,
    pub options: Vec<HelpOption>,
}

/// Document one command: description plus its flag schema.
///
/// `resource_file` comes from the instantiated handler so a command's own
/// string table wins over the descriptor registration.
pub fn render_command_help(
    descriptor: &CommandDescriptor,
    resource_file: &str,
    strings: &dyn StringResources,
) -> CommandHelp {
    CommandHelp {
        name: descriptor.full_key().to_ascii_lowercase(),
        description: localize(strings, &descriptor.description_key, resource_file),
        options: descriptor
            .flags
            .iter()
            .map(|f| HelpOption {
                flag: f.name.clone(),
                description: localize(strings, &f.description_key, resource_file),
                default: f.default.clone(),
            })
            .collect(),
    }
}

/// The static invocation-grammar page (`HELP SYNTAX`).
pub fn render_syntax_help(strings: &dyn StringResources) -> CommandHelp {
    CommandHelp {
        name: "help syntax".to_string(),
        description: localize(strings, "HelpSyntax", ENGINE_RESOURCE_FILE),
        options: Vec::new(),
    }
}

/// The static getting-started page (`HELP LEARN`).
pub fn render_learn_help(strings: &dyn StringResources) -> CommandHelp {
    CommandHelp {
        name: "help learn".to_string(),
        description: localize(strings, "HelpLearn", ENGINE_RESOURCE_FILE),
        options: Vec::new(),
    }
}
