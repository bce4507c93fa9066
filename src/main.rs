use anyhow::Result;
use clap::Parser;
use plop_renumber::config::CategoryBases;
use plop_renumber::document;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "plop-renumber")]
#[command(about = "Renumber Tableplop property IDs into per-tab ranges")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Character export to read (JSON)
    input: PathBuf,

    /// Where to write the renumbered document (overwritten if present)
    output: PathBuf,
}

fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();
    let stats = document::run(&cli.input, &cli.output, CategoryBases::default())?;
    let duration = start.elapsed();
    info!(duration_secs = duration.as_secs_f64(), "Renumbering complete");

    println!("=== Summary ===");
    println!("Properties:         {}", stats.properties);
    println!("Renumbered:         {}", stats.renumbered);
    println!("Untouched:          {}", stats.untouched());
    for (tab, count) in &stats.per_tab {
        println!("  {:<18}{}", format!("{}:", tab), count);
    }
    if !stats.skipped_tabs.is_empty() {
        println!("Skipped tabs:       {}", stats.skipped_tabs.join(", "));
    }
    println!("Written to:         {}", cli.output.display());

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    match run(cli) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
