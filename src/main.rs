// SPDX-License-Identifier: PMPL-1.0-or-later

//! poeditor-sync: upload reference terms to POEditor and download the
//! translated property bundles.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use poeditor_sync::api::PoEditorClient;
use poeditor_sync::config::Config;
use poeditor_sync::diagnostics;
use poeditor_sync::report::{self, OutputFormat};
use poeditor_sync::sync::{self, SyncPlan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poeditor-sync")]
#[command(version)]
#[command(about = "Synchronize translated property bundles with POEditor")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    sync: SyncArgs,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(clap::Args)]
struct SyncArgs {
    /// Upload the reference bundle as terms
    #[arg(short, long)]
    upload: bool,

    /// Download translated bundles (default when no flag is given)
    #[arg(short, long)]
    download: bool,

    /// Only download these POEditor language codes
    #[arg(short, long, value_delimiter = ',')]
    language: Vec<String>,

    /// Show what would be sent and written without doing it
    #[arg(long)]
    dry_run: bool,

    /// Delete remote terms missing from the reference bundle
    #[arg(long)]
    sync_terms: bool,

    /// Keep existing remote reference translations on upload
    #[arg(long)]
    no_overwrite: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl SyncArgs {
    fn is_set(&self) -> bool {
        self.upload
            || self.download
            || !self.language.is_empty()
            || self.dry_run
            || self.sync_terms
            || self.no_overwrite
            || self.format != OutputFormat::Text
    }
}

#[derive(clap::Args)]
struct GlobalArgs {
    /// Configuration file (default: ./poeditor-sync.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// POEditor project id
    #[arg(long, global = true)]
    project_id: Option<String>,

    /// Directory holding the property bundles
    #[arg(long, global = true)]
    resources_dir: Option<PathBuf>,

    /// Debug logging (repeat for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the languages enabled in the POEditor project
    Languages {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the language mapping
    Mapping {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check configuration, mapping and local files without network access
    Check,
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("poeditor_sync={}", default_level(verbose)))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.command.is_some() && cli.sync.is_set() {
        bail!("sync flags (--upload, --download, --language, ...) cannot be combined with a subcommand");
    }
    init_logging(cli.global.verbose);

    let mut config = Config::load(cli.global.config.as_deref())?;
    config.apply_cli(cli.global.project_id, cli.global.resources_dir);

    match cli.command {
        Some(Commands::Languages { format }) => {
            let client = PoEditorClient::from_config(&config)?;
            let languages = sync::list(&client, &config)?;
            report::emit(format, &languages, |formatter| {
                formatter.print_languages(&languages)
            })?;
        }

        Some(Commands::Mapping { format }) => {
            let map = config.language_map();
            report::emit(format, &map, |formatter| {
                formatter.print_mapping(&map, &config.reference_language)
            })?;
        }

        Some(Commands::Check) => {
            diagnostics::run_self_diagnostics(&config, cli.global.config.as_deref())?;
        }

        None => {
            let args = cli.sync;
            let plan = SyncPlan {
                upload: args.upload,
                download: args.download,
                languages: args.language,
                dry_run: args.dry_run,
                overwrite: !args.no_overwrite,
                sync_terms: args.sync_terms,
            }
            .normalized();

            let client = PoEditorClient::from_config(&config)?;
            let summary = sync::run(&client, &config, &plan)?;
            report::emit(args.format, &summary, |formatter| formatter.print_run(&summary))?;
        }
    }

    Ok(())
}
