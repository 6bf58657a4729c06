//! h2gen - table generators for the h2tp HTTP library
//!
//! Running `h2gen` with no arguments regenerates every artifact under the current
//! directory:
//! - `src/h2tp/status_code.rs` - `StatusCode` enum scraped from MDN
//! - `src/h2tp/utils/uricoding_excepts.rs` - URI byte classification tables

mod generate;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// h2tp table generator
#[derive(Parser)]
#[command(name = "h2gen")]
#[command(
    author,
    version,
    about = "Generate static tables and enums for the h2tp HTTP library"
)]
struct Cli {
    /// Project root that generated files are written under (default: current directory)
    #[arg(short, long)]
    root: Option<String>,

    /// Template directory (default: templates shipped with h2gen)
    #[arg(short, long)]
    templates: Option<String>,

    /// Run only the named task (repeatable)
    #[arg(long)]
    only: Vec<String>,

    /// Regenerate even if the existing artifact is fresh
    #[arg(long)]
    force: bool,

    /// List registered tasks and exit
    #[arg(long)]
    list: bool,
}

/// Initialize stdout tracing; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        generate::list_tasks();
        return Ok(());
    }

    init_tracing();

    generate::run_generate_command(generate::GenerateArgs {
        root: cli.root.as_deref(),
        templates: cli.templates.as_deref(),
        only: &cli.only,
        force: cli.force,
    })
    .await
}
