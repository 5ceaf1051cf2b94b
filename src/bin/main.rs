#[path = "modules/app.rs"]
mod app;
#[path = "modules/cli.rs"]
mod cli;
#[path = "modules/error.rs"]
mod error;
#[path = "modules/io.rs"]
mod io;

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    let filter = match args.verbose {
        0 => "virial=warn",
        1 => "virial=debug",
        _ => "virial=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = app::run(args) {
        eprintln!("Error: {}", e);

        let mut source = e.source();
        while let Some(s) = source {
            eprintln!("Caused by: {}", s);
            source = s.source();
        }

        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
