use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Fill `{{%-Name-%}}` placeholders in a file, one confirmed answer at a time.",
	long_about = "hydrate scans a template file for `{{%-Name-%}}` placeholders, asks you for a \
	              value for each unique placeholder and writes a fully substituted copy of the \
	              file.\n\nEvery answer is previewed in place and must be confirmed with `y` \
	              before hydrate moves on. The destination is written once, after the last \
	              placeholder is confirmed.\n\nQuick start:\n  hydrate config.template.json \
	              config.json\n  hydrate list config.template.json",
	args_conflicts_with_subcommands = true,
	subcommand_negates_reqs = true
)]
pub struct HydrateCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Template file to read placeholders from.
	#[arg(required = true)]
	pub source: Option<PathBuf>,

	/// File to write the hydrated content to. Placeholders in the file name
	/// are hydrated first.
	#[arg(required = true)]
	pub destination: Option<PathBuf>,

	/// Print the hydrated content instead of writing the destination.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Write the destination even when the source has no placeholders.
	#[arg(long, default_value_t = false)]
	pub write_unchanged: bool,

	/// Path to a config file. Defaults to `hydrate.toml`, `.hydrate.toml` or
	/// `.config/hydrate.toml` in the current directory.
	#[arg(long, short, global = true)]
	pub config: Option<PathBuf>,

	/// Increase log verbosity (`-v` info, `-vv` debug, `-vvv` trace).
	#[arg(long, short, global = true, action = ArgAction::Count)]
	pub verbose: u8,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// List the unique placeholders of a template without asking for values.
	///
	/// Placeholders are printed in the order they would be asked for, each
	/// with its literal pattern and the number of times it occurs.
	List {
		/// Template file to scan.
		source: PathBuf,

		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
