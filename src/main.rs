//! # tootpack CLI
//!
//! Command-line interface for the tootpack library.

use std::io::{self, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use tootpack::ArchiveError;
use tootpack::archive::Archive;
use tootpack::cli::Args;
use tootpack::core::{summarize_archive, write_html};
use tootpack::format::{ReportFormat, write_report};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so the report on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<(), ArchiveError> {
    let args = <Args as ClapParser>::parse();

    if args.summary {
        run_summary(&args)
    } else {
        run_render(&args)
    }
}

fn run_summary(args: &Args) -> Result<(), ArchiveError> {
    let mut archive = Archive::open(&args.path)?;
    let summary = summarize_archive(&mut archive, &args.summary_config())?;

    let format: ReportFormat = args.format.into();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&summary, format, &mut out)?;
    out.flush()?;

    Ok(())
}

fn run_render(args: &Args) -> Result<(), ArchiveError> {
    let total_start = Instant::now();
    let config = args.render_config();

    // Print header
    println!("📦 tootpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Archive: {}", args.path);
    if config.link_original {
        println!("🔗 Links:   original posts");
    }
    if !config.show_boosts {
        println!("⏭️  Boosts:  hidden (--no-boosts)");
    }
    println!();

    println!("⏳ Reading outbox...");
    let archive = Archive::open(&args.path)?;
    println!("   Found {} records", archive.outbox().len());

    println!("🖨️  Rendering HTML...");
    let (path, stats) = write_html(&archive, &config)?;
    println!(
        "   {} entries written, {} skipped ({:.2}s)",
        stats.rendered,
        stats.skipped,
        total_start.elapsed().as_secs_f64()
    );

    println!();
    println!("✅ Done! Output saved to {}", path.display());

    Ok(())
}
