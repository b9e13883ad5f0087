// SPDX-License-Identifier: PMPL-1.0-or-later

//! Human-readable console output

use crate::mapping::{language_name, LanguageMap};
use crate::sync::{DownloadReport, LanguageStatus, RunSummary, SkipReason, UploadOutcome};
use colored::*;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_languages(&self, languages: &[LanguageStatus]) {
        println!("{}", "REMOTE LANGUAGES".bold().cyan());
        if languages.is_empty() {
            println!("  (none enabled in the project)");
            return;
        }

        for status in languages {
            let locale = match (&status.locale, status.reference) {
                (Some(locale), true) => format!("{} (reference)", locale).bold().to_string(),
                (Some(locale), false) => locale.normal().to_string(),
                (None, _) => "unmapped".red().to_string(),
            };
            println!(
                "  {:8} {:24} {:>6}%  {}",
                status.language.code,
                status.language.name,
                format!("{:.1}", status.language.percentage).color(percentage_color(
                    status.language.percentage
                )),
                locale
            );
        }
    }

    pub fn print_mapping(&self, map: &LanguageMap, reference: &str) {
        println!("{}", "LANGUAGE MAPPING".bold().cyan());
        for entry in map.entries() {
            let base = entry.remote.split('-').next().unwrap_or_default();
            let name = language_name(base).unwrap_or("");
            let marker = if entry.remote.eq_ignore_ascii_case(reference) {
                " (reference)".bold().to_string()
            } else {
                String::new()
            };
            println!("  {:8} -> {:6} {}{}", entry.remote, entry.locale, name.dimmed(), marker);
        }
    }

    pub fn print_run(&self, summary: &RunSummary) {
        if summary.dry_run {
            println!("{}", "DRY RUN: nothing sent, nothing written".yellow());
            println!();
        }
        if let Some(upload) = &summary.upload {
            self.print_upload(upload);
            println!();
        }
        if let Some(download) = &summary.download {
            self.print_download(download);
        }
    }

    fn print_upload(&self, outcome: &UploadOutcome) {
        println!("{}", "UPLOAD".bold().yellow());
        println!("  File: {}", outcome.file.display());
        println!("  Language: {}", outcome.language);

        if let Some(summary) = &outcome.summary {
            println!(
                "  Terms: {} parsed, {} added, {} deleted",
                summary.terms.parsed,
                summary.terms.added.to_string().green(),
                summary.terms.deleted.to_string().red()
            );
            println!(
                "  Translations: {} parsed, {} added, {} updated",
                summary.translations.parsed,
                summary.translations.added.to_string().green(),
                summary.translations.updated
            );
        }
    }

    fn print_download(&self, report: &DownloadReport) {
        println!("{}", "DOWNLOAD".bold().yellow());
        for file in &report.files {
            match file.bytes {
                Some(bytes) => println!(
                    "  {:8} -> {} ({} bytes)",
                    file.code,
                    file.path.display(),
                    bytes
                ),
                None => println!("  {:8} -> {}", file.code, file.path.display().to_string().dimmed()),
            }
        }

        for skipped in &report.skipped {
            let reason = match skipped.reason {
                SkipReason::Reference => "reference language".dimmed(),
                SkipReason::Unmapped => "no locale mapping".red(),
            };
            println!("  {:8} skipped: {}", skipped.code, reason);
        }

        println!(
            "  {} file(s), {} skipped",
            report.files.len().to_string().green().bold(),
            report.skipped.len()
        );
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn percentage_color(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "green"
    } else if percentage >= 50.0 {
        "yellow"
    } else {
        "red"
    }
}
