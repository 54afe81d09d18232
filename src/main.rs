mod cli;
mod settings;
mod workflow;

use std::io;

use anyhow::{Context, Result};
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use seek::logging::{self, LogTarget};
use settings::ResolvedConfig;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved
			.write_summary(&mut io::stderr().lock())
			.context("failed to print configuration")?;
	}

	match cli.query.as_deref() {
		Some(query) => run_headless(query, cli.output, &resolved),
		None => run_interactive(&resolved),
	}
}

/// Run one search and print its matches in the chosen format.
fn run_headless(query: &str, format: OutputFormat, settings: &ResolvedConfig) -> Result<()> {
	logging::initialize(LogTarget::Stderr).context("failed to initialise logging")?;

	let workflow = SearchWorkflow::from_config(settings)?;
	let outcome = workflow.run(query)?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}

fn run_interactive(settings: &ResolvedConfig) -> Result<()> {
	let target = LogTarget::cache_file().context("failed to locate log file")?;
	logging::initialize(target).context("failed to initialise logging")?;

	seek::ui::run(settings.ui_config()).context("interactive session failed")
}
