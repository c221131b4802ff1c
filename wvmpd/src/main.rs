use clap::Parser;
use colored::Colorize;
use std::process;
use wvmpd::{Args, Commands, logger};

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.log_level())?;

    match args.command {
        Commands::Manifest(args) => args.execute().await?,
        Commands::Serve(args) => args.execute().await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".bold().red(), e);
        process::exit(1);
    }
}
