//! Link configuration shared by every routing and resolution cycle.
//!
//! The configuration is a single JSON document edited through the settings
//! popup. Its field names (`githubToken`, `projectMap`, `organizationMap`,
//! `linkRegexes`) are part of that document format and must not change.
//!
//! [`ConfigStore`] materialises the default document on first access and
//! replaces the stored document wholesale on update.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::persistence::{KeyValueStore, PersistenceError, write_json};

/// Storage key holding the configuration document.
pub const CONFIG_KEY: &str = "config";

/// Pattern matching Atlassian-hosted issue links, used when none are configured.
pub const DEFAULT_LINK_PATTERN: &str = r"(https?:\/\/[\w.]+atlassian\.net\/[\/\w-]+)";

/// Errors raised while loading, storing, or parsing configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Text supplied by the settings editor is not valid JSON.
    #[error("Hmm looks like the config you entered isn't valid JSON.")]
    InvalidJson {
        /// Parser detail, kept for logs.
        detail: String,
    },

    /// The storage layer failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Routing and link-extraction configuration.
///
/// Fields absent from a stored or submitted document take their default
/// values, so a decoded configuration is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Token presented to GitHub. Cycles abort while this is unset.
    #[serde(rename = "githubToken")]
    pub credential_token: Option<String>,

    /// Transifex project slug to GitHub repository name.
    #[serde(rename = "projectMap")]
    pub project_aliases: BTreeMap<String, String>,

    /// Transifex organization to GitHub organization.
    #[serde(rename = "organizationMap")]
    pub organization_aliases: BTreeMap<String, String>,

    /// Regular expressions locating links in pull request bodies.
    #[serde(rename = "linkRegexes")]
    pub link_patterns: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            credential_token: None,
            project_aliases: BTreeMap::new(),
            organization_aliases: BTreeMap::new(),
            link_patterns: vec![DEFAULT_LINK_PATTERN.to_owned()],
        }
    }
}

impl Configuration {
    /// Parses a configuration document typed into the settings editor.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidJson`] when the text is not a JSON
    /// configuration object. Its message is meant for the user.
    pub fn from_json_text(text: &str) -> Result<Self, SettingsError> {
        let value = serde_json::from_str(text).map_err(invalid_json)?;
        Self::from_json_value(value)
    }

    /// Decodes a configuration document the editor has already parsed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidJson`] when `value` is not a
    /// configuration object. Arrays are refused outright; serde would
    /// otherwise fill a short one with defaults.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SettingsError> {
        if !value.is_object() {
            return Err(SettingsError::InvalidJson {
                detail: String::from("configuration must be a JSON object"),
            });
        }
        serde_json::from_value(value).map_err(invalid_json)
    }

    /// Returns the credential token when one is set and not blank.
    #[must_use]
    pub fn credential_token(&self) -> Option<&str> {
        self.credential_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// GitHub repository for a Transifex project, falling back to the slug.
    #[must_use]
    pub fn repository_for(&self, project_slug: &str) -> String {
        alias_or_original(&self.project_aliases, project_slug)
    }

    /// GitHub organization for a Transifex organization, falling back to the
    /// name itself.
    #[must_use]
    pub fn organization_for(&self, organization: &str) -> String {
        alias_or_original(&self.organization_aliases, organization)
    }
}

fn invalid_json(error: serde_json::Error) -> SettingsError {
    SettingsError::InvalidJson {
        detail: error.to_string(),
    }
}

fn alias_or_original(aliases: &BTreeMap<String, String>, key: &str) -> String {
    aliases
        .get(key)
        .map_or_else(|| key.to_owned(), Clone::clone)
}

/// Persistent configuration store.
///
/// Reads never observe a missing configuration: the first read of an empty
/// store writes the default document and returns it.
pub struct ConfigStore {
    store: Arc<dyn KeyValueStore>,
    access: Mutex<()>,
}

impl ConfigStore {
    /// Creates a configuration store over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            access: Mutex::new(()),
        }
    }

    /// Returns the current configuration, writing the default first if none
    /// has ever been stored.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Persistence`] when the store fails or holds a
    /// document that does not decode.
    pub async fn get(&self) -> Result<Configuration, SettingsError> {
        let _guard = self.access.lock().await;

        let stored = self.store.get(CONFIG_KEY).await?;
        match stored.as_deref().map(decode_stored).transpose()? {
            Some(Some(config)) => Ok(config),
            Some(None) | None => {
                let config = Configuration::default();
                write_json(self.store.as_ref(), CONFIG_KEY, &config).await?;
                tracing::debug!("stored default configuration");
                Ok(config)
            }
        }
    }

    /// Replaces the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Persistence`] when the write fails.
    pub async fn set(&self, config: &Configuration) -> Result<(), SettingsError> {
        let _guard = self.access.lock().await;
        write_json(self.store.as_ref(), CONFIG_KEY, config).await?;
        Ok(())
    }
}

/// Decodes a stored document. `null` and `{}` count as "never stored".
fn decode_stored(raw: &str) -> Result<Option<Configuration>, PersistenceError> {
    let invalid = |error: serde_json::Error| PersistenceError::InvalidDocument {
        key: CONFIG_KEY.to_owned(),
        message: error.to_string(),
    };

    let value: serde_json::Value = serde_json::from_str(raw).map_err(invalid)?;
    let is_empty = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(fields) => fields.is_empty(),
        _ => false,
    };
    if is_empty {
        return Ok(None);
    }

    serde_json::from_value(value).map(Some).map_err(invalid)
}
