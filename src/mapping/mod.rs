// SPDX-License-Identifier: PMPL-1.0-or-later

//! Mapping between POEditor language codes and local bundle locales.
//!
//! POEditor names languages `fr`, `pt-br`, `zh-CN`; the application loads
//! `MessagesBundle_fr_FR.properties`, `MessagesBundle_pt_BR.properties`
//! and so on. The static [`DEFAULT_MAPPING`] bridges the two, and the
//! configuration file may add or replace rows.
//!
//! ## Lookup
//!
//! Remote codes are matched exactly first, then ignoring ASCII case,
//! because the service is not consistent about region casing.

mod iso639;
mod table;

pub use iso639::{is_valid_iso639_1, language_name};
pub use table::{LanguageMapping, DEFAULT_MAPPING};

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Builds the property file name for a locale suffix.
///
/// ```
/// use poeditor_sync::mapping::property_file_name;
/// assert_eq!(property_file_name("MessagesBundle", "fr_FR"), "MessagesBundle_fr_FR.properties");
/// ```
pub fn property_file_name(bundle: &str, locale: &str) -> String {
    format!("{}_{}.properties", bundle, locale)
}

/// Owned, ordered language mapping used at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageMap {
    entries: Vec<MapEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    pub remote: String,
    pub locale: String,
}

impl Default for LanguageMap {
    fn default() -> Self {
        Self::from_rows(DEFAULT_MAPPING)
    }
}

impl LanguageMap {
    pub fn from_rows(rows: &[LanguageMapping]) -> Self {
        Self {
            entries: rows
                .iter()
                .map(|row| MapEntry {
                    remote: row.remote.to_string(),
                    locale: row.locale.to_string(),
                })
                .collect(),
        }
    }

    /// Adds or replaces rows. An override for an existing remote code
    /// (matched ignoring case) replaces that row's locale in place.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (remote, locale) in overrides {
            match self
                .entries
                .iter_mut()
                .find(|entry| entry.remote.eq_ignore_ascii_case(remote))
            {
                Some(entry) => entry.locale = locale.clone(),
                None => self.entries.push(MapEntry {
                    remote: remote.clone(),
                    locale: locale.clone(),
                }),
            }
        }
        self
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn locale_for(&self, remote: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.remote == remote)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| entry.remote.eq_ignore_ascii_case(remote))
            })
            .map(|entry| entry.locale.as_str())
    }

    /// Checks that the mapping is complete and well-formed.
    ///
    /// Returns every problem found; an empty vector means the mapping is
    /// usable. `reference` is the remote code of the reference language,
    /// which must be mapped so its bundle can be located for upload.
    pub fn validate(&self, reference: &str) -> Vec<MappingIssue> {
        let mut issues = Vec::new();
        let mut remotes = HashSet::new();
        let mut locales = HashSet::new();

        for entry in &self.entries {
            let base = entry.remote.split('-').next().unwrap_or_default();
            if !is_valid_iso639_1(base) {
                issues.push(MappingIssue::UnknownLanguage(entry.remote.clone()));
            }
            if !is_locale_suffix(&entry.locale) {
                issues.push(MappingIssue::MalformedLocale {
                    remote: entry.remote.clone(),
                    locale: entry.locale.clone(),
                });
            }
            if !remotes.insert(entry.remote.to_ascii_lowercase()) {
                issues.push(MappingIssue::DuplicateRemote(entry.remote.clone()));
            }
            if !locales.insert(entry.locale.as_str()) {
                issues.push(MappingIssue::DuplicateLocale(entry.locale.clone()));
            }
        }

        if self.locale_for(reference).is_none() {
            issues.push(MappingIssue::MissingReference(reference.to_string()));
        }

        issues
    }
}

/// `ll_RR`: a lowercase ISO 639-1 code and an uppercase region.
fn is_locale_suffix(locale: &str) -> bool {
    match locale.split_once('_') {
        Some((lang, region)) => {
            is_valid_iso639_1(lang)
                && region.len() == 2
                && region.chars().all(|c| c.is_ascii_uppercase())
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingIssue {
    UnknownLanguage(String),
    MalformedLocale { remote: String, locale: String },
    DuplicateRemote(String),
    DuplicateLocale(String),
    MissingReference(String),
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLanguage(remote) => {
                write!(f, "'{}' is not an ISO 639-1 language", remote)
            }
            Self::MalformedLocale { remote, locale } => {
                write!(f, "'{}' maps to '{}', expected ll_RR", remote, locale)
            }
            Self::DuplicateRemote(remote) => write!(f, "'{}' is mapped twice", remote),
            Self::DuplicateLocale(locale) => {
                write!(f, "locale '{}' is used by more than one language", locale)
            }
            Self::MissingReference(remote) => {
                write!(f, "reference language '{}' has no mapping", remote)
            }
        }
    }
}
