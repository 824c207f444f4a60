use clap::Parser;
use std::process::ExitCode;
use vulncount_cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    if let Err(err) = dotenvy::dotenv() {
        // a missing .env file is fine, logging isn't set up yet
        if !err.not_found() {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    Cli::parse().run()
}
