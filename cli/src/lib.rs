pub mod filter;
pub mod logging;
pub mod render;
pub mod source;

use anyhow::Context;
use filter::FilterArgs;
use render::{OutputFormat, render};
use source::Source;
use std::{
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::instrument;
use vulncount_module_aggregator::aggregate;

/// Count the vulnerabilities of a scan report
#[derive(clap::Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// The JSON report to read, `-` for standard input [default: standard input]
    #[arg(short, long, env = "VULNCOUNT_INPUT", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(
        short = 'o',
        long,
        env = "VULNCOUNT_OUTPUT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Text
    )]
    pub output_format: OutputFormat,

    /// Increase log verbosity, may be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    // flattened arguments must go last
    //
    /// Filters
    #[command(flatten)]
    pub filter: FilterArgs,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        logging::init_logging(self.verbose);

        let mut out = io::stdout().lock();
        self.execute(&mut out, io::stdin().is_terminal())?;
        out.flush().context("failed to flush output")?;

        Ok(ExitCode::SUCCESS)
    }

    /// Load the report, count, and render the result.
    ///
    /// All input is validated before anything gets counted.
    #[instrument(skip_all, err)]
    pub fn execute(&self, out: &mut impl Write, stdin_is_terminal: bool) -> anyhow::Result<()> {
        let filter = self.filter.config()?;
        let source = Source::resolve(self.input.as_deref(), stdin_is_terminal)?;
        let report = source.load()?;

        let result = aggregate(&report, &filter);

        render(out, self.output_format, &filter, &result).context("failed to write output")?;

        Ok(())
    }
}
