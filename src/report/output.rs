// SPDX-License-Identifier: PMPL-1.0-or-later

//! Machine-readable renderings of command results

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured, human-readable text
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Serializes `value` for the structured formats. `Text` has no
    /// generic rendering and returns `None`; the caller prints it.
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<Option<String>> {
        match self {
            OutputFormat::Text => Ok(None),
            OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
            OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_has_no_serialized_form() {
        assert!(OutputFormat::Text.serialize(&json!({"a": 1})).unwrap().is_none());
    }

    #[test]
    fn json_and_yaml_render() {
        let value = json!({"code": "fr", "locale": "fr_FR"});
        let json = OutputFormat::Json.serialize(&value).unwrap().unwrap();
        assert!(json.contains("\"locale\": \"fr_FR\""));
        let yaml = OutputFormat::Yaml.serialize(&value).unwrap().unwrap();
        assert!(yaml.contains("locale: fr_FR"));
    }
}
