//! Console configuration loaded from `prompt.toml`.

use std::path::Path;

use serde::Deserialize;

use prompt_types::Result;

/// Top-level console configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Prompt string shown before each input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Portal commands run against.
    #[serde(default)]
    pub portal_id: i32,
    #[serde(default = "default_portal_name")]
    pub portal_name: String,
    /// Operator name attached to the request context.
    #[serde(default = "default_operator")]
    pub operator: String,
}

fn default_prompt() -> String {
    "prompt> ".to_string()
}
fn default_portal_name() -> String {
    "Default Portal".to_string()
}
fn default_operator() -> String {
    "host".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            portal_id: 0,
            portal_name: default_portal_name(),
            operator: default_operator(),
        }
    }
}

impl ConsoleConfig {
    /// Load from a TOML file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::info!("No {} -- using default configuration", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
