// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report output module

pub mod formatter;
pub mod output;

use anyhow::Result;
use serde::Serialize;

pub use formatter::ReportFormatter;
pub use output::OutputFormat;

/// Prints `value` in a structured format, or calls `text` for the
/// human-readable rendering.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&ReportFormatter),
) -> Result<()> {
    match format.serialize(value)? {
        Some(rendered) => println!("{}", rendered),
        None => text(&ReportFormatter::new()),
    }
    Ok(())
}
