// SPDX-License-Identifier: PMPL-1.0-or-later

//! Blocking client for the POEditor v2 API
//!
//! Every call is a `POST` carrying `api_token` and `id` (the project id).
//! Anything other than HTTP 200 with a `"success"` envelope is an error;
//! there are no retries.

mod envelope;

pub use envelope::{RemoteLanguage, TermCounts, TranslationCounts, UploadSummary};

use crate::config::Config;
use envelope::{Envelope, ExportResult, LanguageList};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("{endpoint} failed ({code}): {message}")]
    Service {
        endpoint: String,
        code: String,
        message: String,
    },
    #[error("{endpoint} returned an unreadable response: {reason}")]
    Decode { endpoint: String, reason: String },
    #[error("reading {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`] failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// What `projects/upload` should do with the reference file.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Remote code of the language the file's values belong to.
    pub language: String,
    /// Replace existing remote translations for that language.
    pub overwrite: bool,
    /// Delete remote terms that are absent from the file.
    pub sync_terms: bool,
}

/// The remote operations a sync run needs. [`PoEditorClient`] is the real
/// implementation; tests substitute an in-memory one.
pub trait TranslationService {
    fn list_languages(&self) -> Result<Vec<RemoteLanguage>, ApiError>;
    fn export_url(&self, language: &str, filter: Option<&str>) -> Result<String, ApiError>;
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError>;
    fn upload_terms(&self, path: &Path, options: &UploadOptions)
        -> Result<UploadSummary, ApiError>;
}

pub struct PoEditorClient {
    http: Client,
    base_url: String,
    token: String,
    project_id: String,
}

impl PoEditorClient {
    pub fn new(
        base_url: &str,
        token: &str,
        project_id: &str,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("poeditor-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            project_id: project_id.to_string(),
        })
    }

    /// Builds a client from configuration, failing early when the token
    /// or project id is missing.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let token = config.require_token()?;
        let project_id = config.require_project_id()?;
        Ok(Self::new(
            &config.api_url,
            token,
            project_id,
            Duration::from_secs(config.timeout_secs),
        )?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let endpoint = self.endpoint(path);
        let mut params: Vec<(&str, &str)> =
            vec![("api_token", self.token.as_str()), ("id", self.project_id.as_str())];
        params.extend_from_slice(extra);

        debug!(endpoint = %endpoint, ?extra, "POST");
        let response = self
            .http
            .post(&endpoint)
            .form(&params)
            .send()
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        decode(&endpoint, response)
    }
}

impl TranslationService for PoEditorClient {
    fn list_languages(&self) -> Result<Vec<RemoteLanguage>, ApiError> {
        let list: LanguageList = self.post_form("languages/list", &[])?;
        Ok(list.languages)
    }

    /// Asks the service to render a `.properties` export of `language` and
    /// returns the (short-lived) download URL.
    fn export_url(&self, language: &str, filter: Option<&str>) -> Result<String, ApiError> {
        let mut params = vec![("language", language), ("type", "properties")];
        if let Some(filter) = filter {
            params.push(("filters", filter));
        }
        let export: ExportResult = self.post_form("projects/export", &params)?;
        Ok(export.url)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|source| ApiError::Transport {
                endpoint: url.to_string(),
                source,
            })?;
        let response = expect_ok(url, response)?;
        let bytes = response.bytes().map_err(|source| ApiError::Transport {
            endpoint: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    fn upload_terms(
        &self,
        path: &Path,
        options: &UploadOptions,
    ) -> Result<UploadSummary, ApiError> {
        let contents = fs::read(path).map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "terms.properties".to_string());

        let form = multipart::Form::new()
            .text("api_token", self.token.clone())
            .text("id", self.project_id.clone())
            .text("updating", "terms_translations")
            .text("language", options.language.clone())
            .text("overwrite", flag(options.overwrite))
            .text("sync_terms", flag(options.sync_terms))
            .part("file", multipart::Part::bytes(contents).file_name(file_name));

        let endpoint = self.endpoint("projects/upload");
        debug!(endpoint = %endpoint, file = %path.display(), "POST multipart");
        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        decode(&endpoint, response)
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn expect_ok(endpoint: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
    })
}

fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let response = expect_ok(endpoint, response)?;
    let body = response.text().map_err(|source| ApiError::Transport {
        endpoint: endpoint.to_string(),
        source,
    })?;
    parse_envelope(endpoint, &body)
}

pub(crate) fn parse_envelope<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|err| ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        })?;

    if !envelope.response.is_success() {
        return Err(ApiError::Service {
            endpoint: endpoint.to_string(),
            code: envelope.response.code,
            message: envelope.response.message,
        });
    }

    envelope.result.ok_or_else(|| ApiError::Decode {
        endpoint: endpoint.to_string(),
        reason: "missing result".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_failure_is_reported() {
        let body = r#"{"response": {"status": "fail", "code": "4012", "message": "Invalid API Token"}}"#;
        let err = parse_envelope::<ExportResult>("projects/export", body).unwrap_err();
        match err {
            ApiError::Service { code, message, .. } => {
                assert_eq!(code, "4012");
                assert_eq!(message, "Invalid API Token");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn success_without_result_is_malformed() {
        let body = r#"{"response": {"status": "success", "code": "200", "message": "OK"}}"#;
        let err = parse_envelope::<ExportResult>("projects/export", body).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_envelope::<LanguageList>("languages/list", "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn export_url_extracted() {
        let body = r#"{"response": {"status": "success", "code": "200", "message": "OK"},
                      "result": {"url": "https://api.poeditor.com/v2/download/file/abc"}}"#;
        let export: ExportResult = parse_envelope("projects/export", body).unwrap();
        assert_eq!(export.url, "https://api.poeditor.com/v2/download/file/abc");
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client =
            PoEditorClient::new("http://localhost:1/v2/", "t", "1", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.endpoint("languages/list"), "http://localhost:1/v2/languages/list");
    }
}
