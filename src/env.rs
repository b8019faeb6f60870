//! Environment capture for the agent process.
//!
//! The parent environment is read exactly once, at startup, into an
//! [`EnvSnapshot`]. Everything downstream (credential lookup, `.env` merging,
//! building the child environment) works on the snapshot, never on the live
//! process environment.

use crate::error::{LauncherError, Result};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Immutable-after-startup copy of the parent's environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    /// Build a snapshot from explicit key/value pairs.
    #[cfg(test)]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value of a variable.
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Value of a variable, if present and valid UTF-8.
    pub fn get_str(&self, key: impl AsRef<OsStr>) -> Option<&str> {
        self.get(key).and_then(OsStr::to_str)
    }

    /// Insert a variable unless the key is already set.
    ///
    /// Returns `true` if the value was inserted.
    pub fn insert_if_absent(
        &mut self,
        key: impl Into<OsString>,
        value: impl Into<OsString>,
    ) -> bool {
        let key = key.into();
        if self.vars.contains_key(&key) {
            return false;
        }
        self.vars.insert(key, value.into());
        true
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Merge variables from a dotenv file.
    ///
    /// Keys already present in the snapshot win. When `required` is false a
    /// missing file is skipped and unparseable lines are logged and skipped,
    /// like python-dotenv does; otherwise both are errors.
    /// Returns the number of variables added.
    pub fn merge_dotenv(&mut self, path: &Path, required: bool) -> Result<usize> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() && !required => return Ok(0),
            Err(e) => {
                return Err(LauncherError::Config(format!(
                    "failed to read env file '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let mut added = 0;
        for item in iter {
            let (key, value) = match item {
                Ok(pair) => pair,
                Err(e) if !required => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Skipping invalid env file line"
                    );
                    continue;
                }
                Err(e) => {
                    return Err(LauncherError::Config(format!(
                        "failed to parse env file '{}': {}",
                        path.display(),
                        e
                    )));
                }
            };
            if self.insert_if_absent(key, value) {
                added += 1;
            }
        }
        Ok(added)
    }
}

/// A credential found in the snapshot.
#[derive(Clone, PartialEq, Eq)]
pub struct ForwardedVar {
    /// Variable the value was read from.
    pub source: String,
    /// Name the child is guaranteed to see the value under.
    pub canonical: String,
    pub value: OsString,
}

impl fmt::Debug for ForwardedVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardedVar")
            .field("source", &self.source)
            .field("canonical", &self.canonical)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Credentials explicitly forwarded to the agent.
///
/// Either may be absent; the agent validates what it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<ForwardedVar>,
    pub api_key: Option<ForwardedVar>,
}

impl Credentials {
    /// Resolve credentials from a snapshot.
    ///
    /// Each lookup list is tried in order; the first present, non-empty
    /// variable wins and is forwarded under the list's first name.
    pub fn lookup(
        snapshot: &EnvSnapshot,
        access_token_vars: &[String],
        api_key_vars: &[String],
    ) -> Self {
        Self {
            access_token: find_first(snapshot, access_token_vars),
            api_key: find_first(snapshot, api_key_vars),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForwardedVar> {
        self.access_token.iter().chain(self.api_key.iter())
    }
}

fn find_first(snapshot: &EnvSnapshot, names: &[String]) -> Option<ForwardedVar> {
    let canonical = names.first()?;
    names.iter().find_map(|name| {
        snapshot
            .get(name)
            .filter(|value| !value.is_empty())
            .map(|value| ForwardedVar {
                source: name.clone(),
                canonical: canonical.clone(),
                value: value.to_os_string(),
            })
    })
}

/// Build the full environment handed to the agent process.
///
/// Layering, later wins: the inherited snapshot, then forwarded credentials
/// under their canonical names, then static overrides from configuration.
/// The result always contains every key of `snapshot`.
pub fn child_environment(
    snapshot: &EnvSnapshot,
    credentials: &Credentials,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<OsString, OsString> {
    let mut env: BTreeMap<OsString, OsString> = snapshot
        .iter()
        .map(|(k, v)| (k.to_os_string(), v.to_os_string()))
        .collect();
    for var in credentials.iter() {
        env.insert(OsString::from(&var.canonical), var.value.clone());
    }
    for (key, value) in overrides {
        env.insert(OsString::from(key), OsString::from(value));
    }
    env
}

/// Check that a name is usable as an environment variable key.
pub fn is_valid_var_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
