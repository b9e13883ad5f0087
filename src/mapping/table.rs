// SPDX-License-Identifier: PMPL-1.0-or-later

//! The hand-maintained language table.
//!
//! ## Adding a new language
//!
//! 1. Add the language to the POEditor project
//! 2. Add a `row("<poeditor code>", "<ll_RR>")` entry below
//! 3. Run `poeditor-sync check` and then `poeditor-sync --download`

/// One row of the mapping: a POEditor language code and the locale suffix
/// used in the local property file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageMapping {
    pub remote: &'static str,
    pub locale: &'static str,
}

const fn row(remote: &'static str, locale: &'static str) -> LanguageMapping {
    LanguageMapping { remote, locale }
}

/// Every language the project ships a bundle for, reference language
/// included. Kept sorted by remote code.
pub const DEFAULT_MAPPING: &[LanguageMapping] = &[
    row("af", "af_ZA"),
    row("bg", "bg_BG"),
    row("ca", "ca_ES"),
    row("cs", "cs_CZ"),
    row("de", "de_DE"),
    row("el", "el_GR"),
    row("en", "en_US"),
    row("es", "es_ES"),
    row("fa", "fa_IR"),
    row("fr", "fr_FR"),
    row("hu", "hu_HU"),
    row("it", "it_IT"),
    row("ja", "ja_JP"),
    row("ko", "ko_KR"),
    row("lt", "lt_LT"),
    row("nb", "nb_NO"),
    row("nl", "nl_NL"),
    row("pl", "pl_PL"),
    row("pt", "pt_PT"),
    row("pt-br", "pt_BR"),
    row("ro", "ro_RO"),
    row("ru", "ru_RU"),
    row("sv", "sv_SE"),
    row("tr", "tr_TR"),
    row("uk", "uk_UA"),
    row("zh-CN", "zh_CN"),
    row("zh-TW", "zh_TW"),
];
