use std::path::Path;
use std::path::PathBuf;

use crate::HydrateResult;
use crate::config::DEFAULT_CONFIRM_PROMPT;
use crate::config::HydrateConfig;
use crate::highlight;
use crate::highlight::AnsiHighlighter;
use crate::highlight::Highlighter;
use crate::matcher::contains_placeholder;
use crate::operator::Operator;
use crate::operator::StdioOperator;
use crate::placeholder::Placeholder;
use crate::session::Session;
use crate::session::replace_literal;
use crate::store::FileStore;
use crate::store::Store;

/// Heading of the preview shown before asking for a value.
pub const INPUT_HEADING: &str = "Template, Input";
/// Heading of the preview shown before asking for confirmation.
pub const OUTPUT_HEADING: &str = "Template, Output";
/// The only confirmation answer that accepts a preview.
pub const ACCEPT_ANSWER: &str = "y";

/// Knobs that change how a session ends, not how placeholders are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrateOptions {
	/// Write the destination even when no placeholders were found.
	pub write_unchanged: bool,
	/// Return the hydrated content instead of writing it.
	pub dry_run: bool,
	/// Question asked after each output preview.
	pub confirm_prompt: String,
}

impl Default for HydrateOptions {
	fn default() -> Self {
		Self {
			write_unchanged: false,
			dry_run: false,
			confirm_prompt: DEFAULT_CONFIRM_PROMPT.to_string(),
		}
	}
}

impl From<&HydrateConfig> for HydrateOptions {
	fn from(config: &HydrateConfig) -> Self {
		Self {
			write_unchanged: config.write_unchanged,
			dry_run: false,
			confirm_prompt: config.prompt.confirm.clone(),
		}
	}
}

/// How a hydration run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(variant_size_differences)]
pub enum Hydration {
	/// The hydrated buffer was written to `destination`.
	Written {
		destination: PathBuf,
		placeholders: Vec<Placeholder>,
	},
	/// Dry run: the hydrated buffer that would have been written.
	Preview {
		destination: PathBuf,
		content: Vec<u8>,
		placeholders: Vec<Placeholder>,
	},
	/// The source holds no placeholders. Nothing was written.
	Empty { source: PathBuf },
}

impl Hydration {
	/// The resolved placeholders, empty when nothing was hydrated.
	pub fn placeholders(&self) -> &[Placeholder] {
		match self {
			Self::Written { placeholders, .. } | Self::Preview { placeholders, .. } => placeholders,
			Self::Empty { .. } => &[],
		}
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty { .. })
	}
}

/// Result of running the resolve protocol over a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
	/// The session had no placeholders.
	Empty,
	/// This many placeholders were resolved.
	Resolved(usize),
}

/// Where the resolve protocol currently stands for one placeholder.
#[allow(variant_size_differences)]
enum Step {
	Display,
	AwaitInput,
	AwaitConfirmation { answer: String, candidate: Vec<u8> },
}

/// Drives hydration sessions: loads documents, asks the operator for every
/// placeholder and writes the result.
#[derive(Debug)]
pub struct Hydrator<S, O, H> {
	store: S,
	operator: O,
	highlighter: H,
	options: HydrateOptions,
}

impl<S: Store, O: Operator, H: Highlighter> Hydrator<S, O, H> {
	pub fn new(store: S, operator: O, highlighter: H) -> Self {
		Self {
			store,
			operator,
			highlighter,
			options: HydrateOptions::default(),
		}
	}

	#[must_use]
	pub fn with_options(mut self, options: HydrateOptions) -> Self {
		self.options = options;
		self
	}

	pub fn operator(&self) -> &O {
		&self.operator
	}

	/// Run a complete session: load `source`, resolve every placeholder with
	/// the operator and write the result to `destination`.
	///
	/// The source is loaded before anything is asked, so read failures surface
	/// first. Placeholders in the destination's file name are resolved next,
	/// but only when there is something to write. The destination is written
	/// once, after the last placeholder is confirmed. When the source holds no
	/// placeholders the run stops early with [`Hydration::Empty`] unless
	/// `write_unchanged` is set.
	pub fn hydrate(&mut self, source: &Path, destination: &Path) -> HydrateResult<Hydration> {
		let mut session = Session::initialize(&self.store, source, destination)?;

		if !session.is_empty() || self.options.write_unchanged {
			let destination = self.hydrate_file_name(destination)?;
			session.retarget(destination);
		}

		if self.populate(&mut session)? == Population::Empty && !self.options.write_unchanged {
			return Ok(Hydration::Empty {
				source: source.to_path_buf(),
			});
		}

		if self.options.dry_run {
			let (destination, content, placeholders) = session.into_parts();
			return Ok(Hydration::Preview {
				destination,
				content,
				placeholders,
			});
		}

		self.write(session)
	}

	/// Resolve each placeholder of `session`, in discovery order, one at a
	/// time. Each placeholder sees the buffer left by the previous answers.
	pub fn populate(&mut self, session: &mut Session) -> HydrateResult<Population> {
		if session.is_empty() {
			tracing::warn!(
				source = %session.source().display(),
				"no placeholders found; nothing to hydrate"
			);
			return Ok(Population::Empty);
		}

		let total = session.placeholders().len();
		for index in 0..total {
			self.resolve(session, index)?;
		}

		Ok(Population::Resolved(total))
	}

	/// Run the interactive protocol for the placeholder at `index` until the
	/// operator accepts a value.
	///
	/// Every round shows the current buffer, asks for a non-blank value, shows
	/// the buffer with that value applied and asks for confirmation. Anything
	/// other than an exact `y` starts a fresh round; the rejected value is
	/// dropped.
	pub fn resolve(&mut self, session: &mut Session, index: usize) -> HydrateResult<()> {
		let Some(placeholder) = session.placeholders().get(index) else {
			return Ok(());
		};

		let key = placeholder.key.clone();
		let patterns: Vec<String> = placeholder.patterns().map(str::to_string).collect();
		let needles: Vec<&[u8]> = patterns.iter().map(String::as_bytes).collect();
		let label = format!("{key}:");

		let mut step = Step::Display;
		loop {
			step = match step {
				Step::Display => {
					let preview = highlight::mark(&self.highlighter, session.buffer(), &needles);
					self.operator.show(INPUT_HEADING, &preview)?;
					Step::AwaitInput
				}
				Step::AwaitInput => {
					let answer = self.ask_value(&label, session.is_file_name())?;
					let (candidate, count) =
						replace_literal(session.buffer(), &needles, answer.as_bytes());
					tracing::debug!(key = %key, occurrences = count, "built candidate");

					let preview =
						highlight::render_with(&self.highlighter, session.buffer(), &needles, &answer);
					self.operator.show(OUTPUT_HEADING, &preview)?;
					Step::AwaitConfirmation { answer, candidate }
				}
				Step::AwaitConfirmation { answer, candidate } => {
					if self.confirm()? {
						tracing::info!(key = %key, "placeholder resolved");
						session.commit(index, candidate, answer);
						return Ok(());
					}

					tracing::debug!(key = %key, "preview rejected");
					Step::Display
				}
			};
		}
	}

	/// Persist the session's buffer to its destination, consuming the
	/// session.
	pub fn write(&mut self, session: Session) -> HydrateResult<Hydration> {
		let (destination, buffer, placeholders) = session.into_parts();
		self.store.save(&destination, &buffer)?;
		tracing::info!(
			destination = %destination.display(),
			bytes = buffer.len(),
			"wrote hydrated document"
		);

		Ok(Hydration::Written {
			destination,
			placeholders,
		})
	}

	/// Resolve placeholders in the file name of `path`, leaving directories
	/// untouched. Paths without placeholders are returned unchanged. Answers
	/// holding a path separator, `.` or `..` are asked again.
	pub fn hydrate_file_name(&mut self, path: &Path) -> HydrateResult<PathBuf> {
		let Some(name) = path.file_name().map(|name| name.to_string_lossy().into_owned()) else {
			return Ok(path.to_path_buf());
		};

		if !contains_placeholder(&name) {
			return Ok(path.to_path_buf());
		}

		let mut session = Session::for_file_name(path, &name);
		self.populate(&mut session)?;

		let (_, buffer, _) = session.into_parts();
		let hydrated = path.with_file_name(String::from_utf8_lossy(&buffer).as_ref());
		tracing::debug!(path = %hydrated.display(), "hydrated file name");

		Ok(hydrated)
	}

	fn ask_value(&mut self, label: &str, file_name: bool) -> HydrateResult<String> {
		loop {
			let answer = self.operator.ask(label)?;
			let trimmed = answer.trim();
			if trimmed.is_empty() {
				tracing::debug!(label, "blank value; asking again");
				continue;
			}
			if file_name && !is_file_name_segment(trimmed) {
				tracing::warn!(label, value = trimmed, "file name values can't change directories");
				continue;
			}
			return Ok(trimmed.to_string());
		}
	}

	fn confirm(&mut self) -> HydrateResult<bool> {
		loop {
			let answer = self.operator.ask(&self.options.confirm_prompt)?;
			if !answer.trim().is_empty() {
				return Ok(answer == ACCEPT_ANSWER);
			}
			tracing::debug!("blank confirmation; asking again");
		}
	}
}

/// A value that stays inside a single path component.
fn is_file_name_segment(value: &str) -> bool {
	value != "." && value != ".." && !value.chars().any(std::path::is_separator)
}

/// Hydrate `source` into `destination` on disk, asking on the terminal.
pub fn hydrate(source: &Path, destination: &Path) -> HydrateResult<Hydration> {
	Hydrator::new(FileStore, StdioOperator::stdio(), AnsiHighlighter).hydrate(source, destination)
}
