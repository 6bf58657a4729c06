//! Generate command implementation

use anyhow::{Context, Result};
use h2gen_core::{GenConfig, HttpFetcher, Orchestrator, TaskContext, registry, select};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct GenerateArgs<'a> {
    pub root: Option<&'a str>,
    pub templates: Option<&'a str>,
    pub only: &'a [String],
    pub force: bool,
}

/// Templates shipped next to this crate.
fn default_template_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn list_tasks() {
    for task in registry() {
        println!("{}", task.name());
    }
}

/// Run the selected generators concurrently and report every failure.
pub async fn run_generate_command(args: GenerateArgs<'_>) -> Result<()> {
    let out_root = match args.root {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let mut config = GenConfig::load(&out_root, default_template_root())
        .with_context(|| format!("Failed to load configuration from {}", out_root.display()))?
        .with_force(args.force);
    if let Some(templates) = args.templates {
        config = config.with_template_root(templates);
    }

    tracing::debug!(
        out_root = %config.out_root.display(),
        templates = %config.template_root.display(),
        "Resolved configuration"
    );

    let tasks = select(registry(), args.only)?;
    let fetcher = HttpFetcher::new(config.fetch_timeout)?;
    let ctx = TaskContext::new(config, Arc::new(fetcher));

    let summary = Orchestrator::new(ctx).run(tasks).await;

    for report in &summary.reports {
        match &report.result {
            Ok(status) => println!("✓ {}: {}", report.name, status),
            Err(failure) => eprintln!("✗ {}: {}", report.name, failure),
        }
    }

    let failed: Vec<_> = summary.failures().map(|r| r.name).collect();
    if !failed.is_empty() {
        anyhow::bail!("{} task(s) failed: {}", failed.len(), failed.join(", "));
    }

    Ok(())
}
