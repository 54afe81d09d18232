use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, Parser, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use seek::app_dirs;

/// Produce the full version banner including the config and cache directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let cache_dir = match app_dirs::get_cache_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("seek {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "cache directory: {cache_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

/// Output format for headless searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	#[default]
	Plain,
	Json,
}

#[derive(Parser, Debug)]
#[command(
	name = "seek",
	version,
	long_version = long_version(),
	about = "Incremental fuzzy file-name finder",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `seek` binary.
pub(crate) struct CliArgs {
	#[arg(
		value_name = "ROOT",
		help = "Directory to search (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Run a single search without the interactive UI and print the matches"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short = 'o',
		long,
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Output format for --query"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short = 'i',
		long = "initial-query",
		value_name = "QUERY",
		help = "Pre-fill the interactive query (default: empty)"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "SEEK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "result-cap",
		value_name = "N",
		help = "Maximum matches reported per search (default: 150)"
	)]
	pub(crate) result_cap: Option<usize>,
	#[arg(
		long = "concurrency-cap",
		value_name = "N",
		help = "Maximum simultaneous directory listings (default: 50)"
	)]
	pub(crate) concurrency_cap: Option<usize>,
	#[arg(
		short = 'j',
		long,
		value_name = "N",
		help = "Traversal worker threads (default: derived from available parallelism)"
	)]
	pub(crate) threads: Option<usize>,
	#[arg(
		long = "debounce-ms",
		value_name = "MILLIS",
		help = "Quiet period after typing before a search starts (default: 150)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "ignore-dir",
		value_name = "NAME",
		value_delimiter = ',',
		help = "Replace the pruned directory names (default: .git, node_modules, target, ...)"
	)]
	pub(crate) ignored_dirs: Option<Vec<String>>,
	#[arg(long = "print-config", help = "Print the effective configuration before running")]
	pub(crate) print_config: bool,
}
