//! Headless stepstar driver: builds a board from flags and prints every
//! search step as ASCII.
//!
//! Run: cargo run --bin stepstar -- --preset wall

use clap::Parser;
use stepstar_demo::{Args, Runner, build_engine};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = build_engine(args)?;
    let stdout = std::io::stdout();
    let mut runner = Runner::new(stdout.lock(), args.cadence(), args.quiet, args.max_steps);
    runner.run(&mut engine)?;
    Ok(())
}
