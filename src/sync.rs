// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sync: upload the reference bundle, download translated bundles
//!
//! A run is strictly sequential. Upload happens first so that a combined
//! run downloads exports that already know about new terms. The first
//! failure aborts the run; files written before it stay on disk.

use crate::api::{RemoteLanguage, TranslationService, UploadOptions, UploadSummary};
use crate::config::Config;
use crate::mapping::LanguageMap;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a run should do, as chosen on the command line.
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    pub upload: bool,
    pub download: bool,
    /// Restrict downloads to these remote codes (all when empty).
    pub languages: Vec<String>,
    pub dry_run: bool,
    pub overwrite: bool,
    pub sync_terms: bool,
}

impl SyncPlan {
    /// Neither flag given means download only.
    pub fn normalized(mut self) -> Self {
        if !self.upload && !self.download {
            self.download = true;
        }
        self
    }
}

/// A remote language joined with its local mapping.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageStatus {
    #[serde(flatten)]
    pub language: RemoteLanguage,
    pub locale: Option<String>,
    pub reference: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Reference,
    Unmapped,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedLanguage {
    pub code: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadedFile {
    pub code: String,
    pub locale: String,
    pub path: PathBuf,
    /// `None` on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DownloadReport {
    pub files: Vec<DownloadedFile>,
    pub skipped: Vec<SkippedLanguage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub file: PathBuf,
    pub language: String,
    /// `None` on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<UploadSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub created_at: String,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadReport>,
}

/// Lists the remote languages with their local locale, if mapped.
pub fn list(service: &impl TranslationService, config: &Config) -> Result<Vec<LanguageStatus>> {
    let map = config.language_map();
    let languages = service
        .list_languages()
        .context("listing remote languages")?;

    Ok(languages
        .into_iter()
        .map(|language| LanguageStatus {
            locale: map.locale_for(&language.code).map(str::to_string),
            reference: language
                .code
                .eq_ignore_ascii_case(&config.reference_language),
            language,
        })
        .collect())
}

/// The effective mapping, rejected when `validate` reports anything: a
/// duplicated locale lets one export overwrite another bundle.
fn checked_map(config: &Config) -> Result<LanguageMap> {
    let map = config.language_map();
    let issues = map.validate(&config.reference_language);
    if !issues.is_empty() {
        let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
        bail!("invalid language mapping: {}", issues.join("; "));
    }
    Ok(map)
}

/// Uploads the reference bundle as terms plus reference translations.
///
/// A missing reference file aborts before anything is sent.
pub fn upload(
    service: &impl TranslationService,
    config: &Config,
    plan: &SyncPlan,
) -> Result<UploadOutcome> {
    checked_map(config)?;
    let file = config.reference_file()?;
    if !file.is_file() {
        bail!("reference file not found: {}", file.display());
    }

    let mut outcome = UploadOutcome {
        file,
        language: config.reference_language.clone(),
        summary: None,
    };
    if plan.dry_run {
        info!(file = %outcome.file.display(), "dry run: upload skipped");
        return Ok(outcome);
    }

    let options = UploadOptions {
        language: config.reference_language.clone(),
        overwrite: plan.overwrite,
        sync_terms: plan.sync_terms,
    };
    info!(file = %outcome.file.display(), sync_terms = plan.sync_terms, "uploading reference terms");
    let summary = service
        .upload_terms(&outcome.file, &options)
        .with_context(|| format!("uploading {}", outcome.file.display()))?;
    outcome.summary = Some(summary);
    Ok(outcome)
}

/// Downloads every mapped, non-reference remote language into the
/// resources directory.
pub fn download(
    service: &impl TranslationService,
    config: &Config,
    plan: &SyncPlan,
) -> Result<DownloadReport> {
    if !config.resources_dir.is_dir() {
        bail!(
            "resources directory not found: {}",
            config.resources_dir.display()
        );
    }

    let map = checked_map(config)?;
    let languages = service
        .list_languages()
        .context("listing remote languages")?;

    for requested in &plan.languages {
        if !languages
            .iter()
            .any(|language| language.code.eq_ignore_ascii_case(requested))
        {
            bail!("language '{}' is not enabled in the POEditor project", requested);
        }
    }

    let mut report = DownloadReport::default();
    for language in selected(&languages, &plan.languages) {
        let code = language.code.clone();

        if code.eq_ignore_ascii_case(&config.reference_language) {
            report.skipped.push(SkippedLanguage {
                code,
                reason: SkipReason::Reference,
            });
            continue;
        }

        let Some(locale) = map.locale_for(&code) else {
            warn!(code = %code, name = %language.name, "no locale mapping, skipping");
            report.skipped.push(SkippedLanguage {
                code,
                reason: SkipReason::Unmapped,
            });
            continue;
        };

        let path = config.property_file(locale);
        let bytes = if plan.dry_run {
            None
        } else {
            let url = service
                .export_url(&code, config.export_filter.as_deref())
                .with_context(|| format!("exporting '{}'", code))?;
            let contents = service
                .fetch(&url)
                .with_context(|| format!("downloading '{}'", code))?;
            fs::write(&path, &contents)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(code = %code, path = %path.display(), bytes = contents.len(), "saved");
            Some(contents.len())
        };

        report.files.push(DownloadedFile {
            code,
            locale: locale.to_string(),
            path,
            bytes,
        });
    }

    Ok(report)
}

fn selected<'a>(
    languages: &'a [RemoteLanguage],
    requested: &'a [String],
) -> impl Iterator<Item = &'a RemoteLanguage> + 'a {
    languages.iter().filter(move |language| {
        requested.is_empty()
            || requested
                .iter()
                .any(|code| code.eq_ignore_ascii_case(&language.code))
    })
}

/// Runs the plan: upload (if asked) and then download (if asked).
pub fn run(
    service: &impl TranslationService,
    config: &Config,
    plan: &SyncPlan,
) -> Result<RunSummary> {
    let upload = if plan.upload {
        Some(upload(service, config, plan)?)
    } else {
        None
    };
    let download = if plan.download {
        Some(download(service, config, plan)?)
    } else {
        None
    };

    Ok(RunSummary {
        created_at: Utc::now().to_rfc3339(),
        dry_run: plan.dry_run,
        upload,
        download,
    })
}
