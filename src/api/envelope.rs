// SPDX-License-Identifier: PMPL-1.0-or-later

//! POEditor v2 response shapes
//!
//! Every JSON reply is wrapped as
//! `{"response": {"status", "code", "message"}, "result": {...}}`.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub response: ResponseStatus,
    pub result: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseStatus {
    pub status: String,
    #[serde(deserialize_with = "code_string")]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ResponseStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// The service sends `"code": "200"`, older endpoints a bare number.
fn code_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// A language enabled in the remote project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteLanguage {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub translations: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguageList {
    #[serde(default)]
    pub languages: Vec<RemoteLanguage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportResult {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCounts {
    #[serde(default)]
    pub parsed: u64,
    #[serde(default)]
    pub added: u64,
    #[serde(default)]
    pub deleted: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationCounts {
    #[serde(default)]
    pub parsed: u64,
    #[serde(default)]
    pub added: u64,
    #[serde(default)]
    pub updated: u64,
}

/// Counts reported by `projects/upload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    #[serde(default)]
    pub terms: TermCounts,
    #[serde(default)]
    pub translations: TranslationCounts,
}
