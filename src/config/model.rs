//! LauncherConfig struct definition and default implementation.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "launcher.yaml";

/// Contents of `launcher.yaml`.
///
/// ```yaml
/// command: "python -m src.main"
/// timeout_seconds: 3600
/// access_token_vars: [APIFY_API_TOKEN, APIFY_TOKEN]
/// api_key_vars: [OPENAI_API_KEY]
/// environment:
///   PYTHONUNBUFFERED: "1"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Agent command line, split with shell-words.
    #[serde(default = "default_command")]
    pub command: String,

    /// Kill the agent after this many seconds. Absent means wait indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Lookup order for the platform access token. The first name is the one
    /// the agent is guaranteed to see.
    #[serde(default = "default_access_token_vars")]
    pub access_token_vars: Vec<String>,

    /// Lookup order for the LLM API key.
    #[serde(default = "default_api_key_vars")]
    pub api_key_vars: Vec<String>,

    /// Static variables set for the agent, overriding inherited values.
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            timeout_seconds: None,
            access_token_vars: default_access_token_vars(),
            api_key_vars: default_api_key_vars(),
            environment: BTreeMap::new(),
        }
    }
}

fn default_command() -> String {
    "python -m src.main".to_string()
}

fn default_access_token_vars() -> Vec<String> {
    vec!["APIFY_API_TOKEN".to_string(), "APIFY_TOKEN".to_string()]
}

fn default_api_key_vars() -> Vec<String> {
    vec!["OPENAI_API_KEY".to_string()]
}
