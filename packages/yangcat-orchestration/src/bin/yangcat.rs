//! yangcat - build a YANG module catalog
//!
//! # Usage
//!
//! ```bash
//! # Standards directory plus one vendor tree
//! yangcat --sdo-dir yang/standard --vendor-dir yang/vendor --output-dir out
//!
//! # Reprocess everything, ignoring the hash cache
//! yangcat --config yangcat.yaml --sdo-dir yang/standard --force-parsing
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yangcat_core::features::compilation::PreviousCatalogStatus;
use yangcat_core::features::scm::{GitProvider, GitRepos};
use yangcat_core::CatalogConfig;
use yangcat_orchestration::{CatalogOrchestrator, PassContext, PassInputs};

#[derive(Parser)]
#[command(name = "yangcat")]
#[command(about = "Build a YANG module catalog from standards, IANA and vendor sources", long_about = None)]
struct Cli {
    /// Plain directory of schema files (repeatable)
    #[arg(long = "sdo-dir")]
    sdo_dirs: Vec<PathBuf>,

    /// Directory of vendor capability / yang-library documents (repeatable)
    #[arg(long = "vendor-dir")]
    vendor_dirs: Vec<PathBuf>,

    /// Directory holding yang-parameters.xml (repeatable)
    #[arg(long = "iana-dir")]
    iana_dirs: Vec<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reprocess every file, bypassing the hash cache and unparsable registry
    #[arg(long)]
    force_parsing: bool,

    /// Output directory (overrides configuration)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Local git checkout used for schema URLs (repeatable)
    #[arg(long = "repo")]
    repos: Vec<PathBuf>,

    /// Previous modules.json to carry compilation status from
    #[arg(long)]
    previous_catalog: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let inputs = PassInputs {
        sdo_dirs: cli.sdo_dirs,
        iana_dirs: cli.iana_dirs,
        vendor_dirs: cli.vendor_dirs,
    };
    if inputs.is_empty() {
        bail!("nothing to do: pass at least one of --sdo-dir, --iana-dir, --vendor-dir");
    }

    let mut config = match &cli.config {
        Some(path) => CatalogConfig::from_yaml(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    config.apply_env_overrides();
    if cli.force_parsing {
        config.set_force_parsing(true);
    }
    if let Some(dir) = cli.output_dir {
        config.paths.output_dir = dir;
    }

    let mut ctx = PassContext::new(config)?;
    if !cli.repos.is_empty() {
        let repos = cli
            .repos
            .iter()
            .map(|root| GitProvider::load_or_clone(root, None))
            .collect::<Result<Vec<_>, _>>()
            .context("opening source repositories")?;
        ctx = ctx.with_source_control(Box::new(GitRepos(repos)));
    }
    if let Some(path) = &cli.previous_catalog {
        let lookup = PreviousCatalogStatus::load(path)
            .with_context(|| format!("loading previous catalog {}", path.display()))?;
        ctx = ctx.with_compilation_status(Box::new(lookup));
    }

    let report = CatalogOrchestrator::new(ctx).run(&inputs)?;
    info!(
        modules = report.modules,
        parsed = report.parsed(),
        skipped = report.skipped(),
        failed = report.failed(),
        abandoned = report.abandoned_sources().len(),
        "Done"
    );
    Ok(())
}
