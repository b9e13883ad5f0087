// SPDX-License-Identifier: PMPL-1.0-or-later

//! poeditor-sync: keep translated property bundles in step with POEditor.
//!
//! Uploads the reference-language bundle as the project's term list and
//! downloads one `.properties` export per remote language, naming each
//! file after the locale suffix the application expects.
//!
//! MODULES:
//! 1. **mapping**: the static POEditor code → locale suffix table.
//! 2. **config**: defaults, YAML file, environment and CLI layering.
//! 3. **api**: the blocking POEditor v2 client.
//! 4. **sync**: upload/download/list built on the client.

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod mapping;
pub mod report;
pub mod sync;
