// SPDX-License-Identifier: PMPL-1.0-or-later

//! Layered configuration
//!
//! Built-in defaults, then an optional YAML file, then environment
//! variables, then command-line flags (applied by the caller through
//! [`Config::apply_cli`]). The API token only ever comes from the
//! environment so it never ends up in a committed file.

use crate::mapping::{property_file_name, LanguageMap};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const TOKEN_ENV: &str = "POEDITOR_API_TOKEN";
pub const PROJECT_ENV: &str = "POEDITOR_PROJECT_ID";
pub const API_URL_ENV: &str = "POEDITOR_API_URL";

pub const DEFAULT_CONFIG_FILE: &str = "poeditor-sync.yaml";
pub const DEFAULT_API_URL: &str = "https://api.poeditor.com/v2";
pub const DEFAULT_RESOURCES_DIR: &str = "ugs-core/src/resources";
pub const DEFAULT_BUNDLE: &str = "MessagesBundle";
pub const DEFAULT_REFERENCE: &str = "en";
pub const DEFAULT_EXPORT_FILTER: &str = "translated";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of the optional YAML configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default, deserialize_with = "string_or_number")]
    pub project_id: Option<String>,
    pub api_url: Option<String>,
    pub resources_dir: Option<PathBuf>,
    pub bundle_name: Option<String>,
    pub reference_language: Option<String>,
    /// Empty string disables filtering (untranslated terms are exported
    /// with empty values).
    pub export_filter: Option<String>,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
}

/// Project ids are numeric, so accept `project_id: 12345` as well as the
/// quoted form.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parsing configuration")
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: Option<String>,
    pub project_id: Option<String>,
    pub api_url: String,
    pub resources_dir: PathBuf,
    pub bundle_name: String,
    pub reference_language: String,
    pub export_filter: Option<String>,
    pub timeout_secs: u64,
    pub mapping_overrides: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            project_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            resources_dir: PathBuf::from(DEFAULT_RESOURCES_DIR),
            bundle_name: DEFAULT_BUNDLE.to_string(),
            reference_language: DEFAULT_REFERENCE.to_string(),
            export_filter: Some(DEFAULT_EXPORT_FILTER.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            mapping_overrides: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration from `path` (which must exist) or from
    /// `poeditor-sync.yaml` in the working directory when present, then
    /// applies the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(FileConfig::read(path)?),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Some(FileConfig::read(default_path)?)
                } else {
                    None
                }
            }
        };
        Ok(Self::from_sources(file, |key| env::var(key).ok()))
    }

    /// Combines defaults, an optional file and an environment lookup.
    /// Blank environment values are treated as unset.
    pub fn from_sources(file: Option<FileConfig>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(file) = file {
            config.project_id = file.project_id.or(config.project_id);
            config.api_url = file.api_url.unwrap_or(config.api_url);
            config.resources_dir = file.resources_dir.unwrap_or(config.resources_dir);
            config.bundle_name = file.bundle_name.unwrap_or(config.bundle_name);
            config.reference_language = file
                .reference_language
                .unwrap_or(config.reference_language);
            if let Some(filter) = file.export_filter {
                config.export_filter = (!filter.trim().is_empty()).then_some(filter);
            }
            config.timeout_secs = file.timeout_secs.unwrap_or(config.timeout_secs);
            config.mapping_overrides = file.mapping;
        }

        let lookup = |key: &str| {
            env(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        config.api_token = lookup(TOKEN_ENV);
        if let Some(project) = lookup(PROJECT_ENV) {
            config.project_id = Some(project);
        }
        if let Some(url) = lookup(API_URL_ENV) {
            config.api_url = url;
        }

        config
    }

    pub fn apply_cli(&mut self, project_id: Option<String>, resources_dir: Option<PathBuf>) {
        if let Some(project_id) = project_id {
            self.project_id = Some(project_id);
        }
        if let Some(dir) = resources_dir {
            self.resources_dir = dir;
        }
    }

    pub fn require_token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .ok_or_else(|| anyhow!("{} is not set", TOKEN_ENV))
    }

    pub fn require_project_id(&self) -> Result<&str> {
        self.project_id.as_deref().ok_or_else(|| {
            anyhow!(
                "no POEditor project id (set {} or project_id in {})",
                PROJECT_ENV,
                DEFAULT_CONFIG_FILE
            )
        })
    }

    pub fn language_map(&self) -> LanguageMap {
        LanguageMap::default().with_overrides(&self.mapping_overrides)
    }

    pub fn reference_locale(&self) -> Result<String> {
        self.language_map()
            .locale_for(&self.reference_language)
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow!(
                    "reference language '{}' has no locale mapping",
                    self.reference_language
                )
            })
    }

    pub fn property_file(&self, locale: &str) -> PathBuf {
        self.resources_dir
            .join(property_file_name(&self.bundle_name, locale))
    }

    pub fn reference_file(&self) -> Result<PathBuf> {
        Ok(self.property_file(&self.reference_locale()?))
    }
}
