// SPDX-License-Identifier: PMPL-1.0-or-later

//! Pre-flight checks for `poeditor-sync check`
//!
//! Nothing here touches the network.

use crate::config::{Config, DEFAULT_CONFIG_FILE, PROJECT_ENV, TOKEN_ENV};
use anyhow::{anyhow, Result};
use std::path::Path;

pub fn run_self_diagnostics(config: &Config, config_path: Option<&Path>) -> Result<()> {
    println!("poeditor-sync self-diagnostics");

    let checks = collect(config, config_path);

    println!();
    for entry in &checks {
        entry.print();
    }

    if checks.iter().any(Diagnostic::is_error) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

/// Runs every check and returns the results in display order.
pub fn collect(config: &Config, config_path: Option<&Path>) -> Vec<Diagnostic> {
    let mut checks = Vec::new();
    checks.push(Diagnostic::ok(
        "version",
        format!("poeditor-sync {}", env!("CARGO_PKG_VERSION")),
    ));
    checks.push(check_config_file(config_path));

    checks.push(match config.api_token {
        Some(_) => Diagnostic::ok("API token", format!("configured ({})", TOKEN_ENV)),
        None => Diagnostic::error("API token", format!("not set (export {})", TOKEN_ENV)),
    });
    checks.push(match &config.project_id {
        Some(id) => Diagnostic::ok("project id", id.clone()),
        None => Diagnostic::error(
            "project id",
            format!("not set ({} or project_id in {})", PROJECT_ENV, DEFAULT_CONFIG_FILE),
        ),
    });

    let resources = &config.resources_dir;
    let resources_ok = resources.is_dir();
    checks.push(if resources_ok {
        Diagnostic::ok("resources directory", format!("{} exists", resources.display()))
    } else if resources.exists() {
        Diagnostic::error(
            "resources directory",
            format!("{} exists but is not a directory", resources.display()),
        )
    } else {
        Diagnostic::error("resources directory", format!("{} missing", resources.display()))
    });

    checks.push(match config.reference_file() {
        Ok(path) if path.is_file() => {
            Diagnostic::ok("reference file", format!("{} exists", path.display()))
        }
        Ok(path) => Diagnostic::error("reference file", format!("{} missing", path.display())),
        Err(err) => Diagnostic::error("reference file", err.to_string()),
    });

    let map = config.language_map();
    let issues = map.validate(&config.reference_language);
    if issues.is_empty() {
        checks.push(Diagnostic::ok(
            "language mapping",
            format!("{} languages, well-formed", map.entries().len()),
        ));
    } else {
        for issue in issues {
            checks.push(Diagnostic::error("language mapping", issue.to_string()));
        }
    }

    if resources_ok {
        let missing: Vec<&str> = map
            .entries()
            .iter()
            .filter(|entry| !config.property_file(&entry.locale).is_file())
            .map(|entry| entry.locale.as_str())
            .collect();
        checks.push(if missing.is_empty() {
            Diagnostic::ok("property files", "every mapped locale has a bundle".to_string())
        } else {
            Diagnostic::warning(
                "property files",
                format!("not yet downloaded: {}", missing.join(", ")),
            )
        });
    }

    checks
}

fn check_config_file(path: Option<&Path>) -> Diagnostic {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if path.is_file() {
        Diagnostic::ok("config file", format!("{} loaded", path.display()))
    } else {
        Diagnostic::warning(
            "config file",
            format!("{} not found, using defaults", path.display()),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warn,
    Error,
}

impl Level {
    fn tag(&self) -> &'static str {
        match self {
            Level::Ok => "OK",
            Level::Warn => "WARN",
            Level::Error => "ERR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub label: &'static str,
    pub level: Level,
    pub detail: String,
}

impl Diagnostic {
    fn new(label: &'static str, level: Level, detail: String) -> Self {
        Self {
            label,
            level,
            detail,
        }
    }

    fn ok(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    fn warning(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    fn error(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Error, detail)
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    fn print(&self) {
        println!("  [{}] {:22} {}", self.level.tag(), self.label, self.detail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn level_of<'a>(checks: &'a [Diagnostic], label: &str) -> Vec<&'a Level> {
        checks
            .iter()
            .filter(|check| check.label == label)
            .map(|check| &check.level)
            .collect()
    }

    #[test]
    fn missing_everything_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.resources_dir = dir.path().join("missing");

        let checks = collect(&config, Some(&dir.path().join("none.yaml")));
        assert_eq!(level_of(&checks, "API token"), vec![&Level::Error]);
        assert_eq!(level_of(&checks, "project id"), vec![&Level::Error]);
        assert_eq!(level_of(&checks, "resources directory"), vec![&Level::Error]);
        assert_eq!(level_of(&checks, "reference file"), vec![&Level::Error]);
        assert_eq!(level_of(&checks, "config file"), vec![&Level::Warn]);
        assert_eq!(level_of(&checks, "language mapping"), vec![&Level::Ok]);
        assert!(level_of(&checks, "property files").is_empty());
    }

    #[test]
    fn complete_setup_passes() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.resources_dir = dir.path().to_path_buf();
        config.api_token = Some("token".into());
        config.project_id = Some("1".into());
        for entry in config.language_map().entries() {
            fs::write(config.property_file(&entry.locale), "k=v\n").unwrap();
        }
        let config_file = dir.path().join("poeditor-sync.yaml");
        fs::write(&config_file, "project_id: 1\n").unwrap();

        let checks = collect(&config, Some(&config_file));
        assert!(checks.iter().all(|check| check.level == Level::Ok), "{checks:?}");
    }

    #[test]
    fn missing_bundles_only_warn() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.resources_dir = dir.path().to_path_buf();
        fs::write(config.reference_file().unwrap(), "k=v\n").unwrap();

        let checks = collect(&config, None);
        assert_eq!(level_of(&checks, "reference file"), vec![&Level::Ok]);
        let bundles = checks
            .iter()
            .find(|check| check.label == "property files")
            .unwrap();
        assert_eq!(bundles.level, Level::Warn);
        assert!(bundles.detail.contains("fr_FR"));
        assert!(!bundles.detail.contains("en_US"));
    }
}
