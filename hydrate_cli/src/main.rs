use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use hydrate_cli::Commands;
use hydrate_cli::HydrateCli;
use hydrate_cli::OutputFormat;
use hydrate_core::AnyEmptyResult;
use hydrate_core::AnyError;
use hydrate_core::AnyResult;
use hydrate_core::FileStore;
use hydrate_core::HydrateConfig;
use hydrate_core::HydrateOptions;
use hydrate_core::Hydration;
use hydrate_core::Hydrator;
use hydrate_core::StdioOperator;
use hydrate_core::Store;
use hydrate_core::dedup;
use hydrate_core::discover;
use hydrate_core::highlighter;
use hydrate_core::matcher::extract;
use owo_colors::OwoColorize;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = HydrateCli::parse();

	init_tracing(args.verbose);

	let config = match load_config(&args) {
		Ok(config) => config,
		Err(e) => exit_with(e),
	};

	// Respect NO_COLOR, --no-color, the config file and whether stdout is a
	// terminal at all.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& config.color
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match (&args.command, &args.source, &args.destination) {
		(Some(Commands::List { source, format }), ..) => run_list(source, *format),
		(None, Some(source), Some(destination)) => run_hydrate(&args, &config, source, destination),
		_ => {
			eprintln!("No source or destination specified. Run `hydrate --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		exit_with(e);
	}
}

/// Render an error through miette when it is a hydrate error and exit.
fn exit_with(e: AnyError) -> ! {
	match e.downcast::<hydrate_core::HydrateError>() {
		Ok(hydrate_err) => {
			let report: miette::Report = (*hydrate_err).into();
			eprintln!("{report:?}");
		}
		Err(e) => {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
	process::exit(2);
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v` flags.
fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_target(verbose >= 3)
				.with_level(true)
				.with_writer(std::io::stderr)
				.compact(),
		)
		.init();
}

fn load_config(args: &HydrateCli) -> AnyResult<HydrateConfig> {
	if let Some(path) = &args.config {
		return Ok(HydrateConfig::load_file(path)?);
	}

	let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
	Ok(HydrateConfig::load(&root)?.unwrap_or_default())
}

fn run_hydrate(
	args: &HydrateCli,
	config: &HydrateConfig,
	source: &Path,
	destination: &Path,
) -> AnyEmptyResult {
	let options = HydrateOptions {
		write_unchanged: args.write_unchanged || config.write_unchanged,
		dry_run: args.dry_run,
		..HydrateOptions::from(config)
	};

	let mut hydrator = Hydrator::new(
		FileStore,
		StdioOperator::stdio(),
		highlighter(color_enabled()),
	)
	.with_options(options);

	tracing::debug!(
		source = %source.display(),
		destination = %destination.display(),
		"starting hydration"
	);

	match hydrator.hydrate(source, destination)? {
		Hydration::Empty { source } => {
			eprintln!(
				"{} no placeholders found in {}; nothing to hydrate",
				colored!("warning:", yellow),
				source.display()
			);
		}
		Hydration::Preview { content, .. } => {
			println!("{}", colored!("Dry run: hydrated content", bold));
			println!("{}", String::from_utf8_lossy(&content));
		}
		Hydration::Written {
			destination,
			placeholders,
		} => {
			println!(
				"{} {} placeholder(s) into {}.",
				colored!("Hydrated", green),
				placeholders.len(),
				destination.display()
			);

			if args.verbose > 0 {
				for placeholder in &placeholders {
					let value = placeholder.resolved.as_deref().unwrap_or_default();
					println!("  {} = {value}", placeholder.key);
				}
			}
		}
	}

	Ok(())
}

fn run_list(source: &Path, format: OutputFormat) -> AnyEmptyResult {
	let buffer = FileStore.load(source)?;
	let occurrences = extract(&buffer);
	let placeholders = dedup(discover(&buffer));
	let count_of = |key: &str| occurrences.iter().filter(|found| found.key == key).count();

	match format {
		OutputFormat::Json => {
			let entries: Vec<serde_json::Value> = placeholders
				.iter()
				.map(|placeholder| {
					serde_json::json!({
						"key": placeholder.key,
						"pattern": placeholder.pattern,
						"variants": placeholder.variants,
						"occurrences": count_of(&placeholder.key),
					})
				})
				.collect();
			let output = serde_json::json!({
				"source": source.display().to_string(),
				"placeholders": entries,
			});
			println!("{output}");
		}
		OutputFormat::Text => {
			if placeholders.is_empty() {
				println!("No placeholders found in {}.", source.display());
				return Ok(());
			}

			println!("{}", colored!("Placeholders:", bold));
			for placeholder in &placeholders {
				println!(
					"  {} {} ({} occurrence(s))",
					placeholder.key,
					placeholder.pattern,
					count_of(&placeholder.key)
				);
			}
			println!("\n{} placeholder(s)", placeholders.len());
		}
	}

	Ok(())
}
