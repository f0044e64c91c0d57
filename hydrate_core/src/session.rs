use std::path::Path;
use std::path::PathBuf;

use crate::HydrateResult;
use crate::placeholder::Placeholder;
use crate::placeholder::dedup;
use crate::placeholder::discover;
use crate::store::Store;

/// The state of a single hydration run.
///
/// A session is created for one source/destination pair, mutated once per
/// resolved placeholder, and consumed when the result is written. Nothing
/// outlives it, so consecutive runs never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
	source: PathBuf,
	destination: PathBuf,
	buffer: Vec<u8>,
	placeholders: Vec<Placeholder>,
	file_name: bool,
}

impl Session {
	/// Assemble a session from an already loaded buffer and its discovered
	/// placeholders.
	pub fn new(
		source: impl Into<PathBuf>,
		destination: impl Into<PathBuf>,
		buffer: Vec<u8>,
		placeholders: Vec<Placeholder>,
	) -> Self {
		Self {
			source: source.into(),
			destination: destination.into(),
			buffer,
			placeholders,
			file_name: false,
		}
	}

	/// A session over the file name of `path`. Answers may not contain path
	/// separators.
	pub fn for_file_name(path: &Path, name: &str) -> Self {
		let buffer = name.as_bytes().to_vec();
		let placeholders = dedup(discover(&buffer));

		Self {
			file_name: true,
			..Self::new(path, path, buffer, placeholders)
		}
	}

	/// Load `source` and discover its unique placeholders.
	///
	/// Discovery always runs against the bytes exactly as loaded.
	pub fn initialize<S: Store + ?Sized>(
		store: &S,
		source: &Path,
		destination: &Path,
	) -> HydrateResult<Self> {
		let buffer = store.load(source)?;
		tracing::debug!(source = %source.display(), bytes = buffer.len(), "loaded source");
		let placeholders = dedup(discover(&buffer));

		Ok(Self::new(source, destination, buffer, placeholders))
	}

	pub fn source(&self) -> &Path {
		&self.source
	}

	pub fn destination(&self) -> &Path {
		&self.destination
	}

	/// The working buffer, including every answer committed so far.
	pub fn buffer(&self) -> &[u8] {
		&self.buffer
	}

	/// The unique placeholders in discovery order.
	pub fn placeholders(&self) -> &[Placeholder] {
		&self.placeholders
	}

	/// Returns true when the buffer is a file name rather than a document.
	pub fn is_file_name(&self) -> bool {
		self.file_name
	}

	/// Returns true when there is nothing to hydrate.
	pub fn is_empty(&self) -> bool {
		self.placeholders.is_empty()
	}

	/// Number of placeholders still waiting for an answer.
	pub fn pending(&self) -> usize {
		self.placeholders
			.iter()
			.filter(|placeholder| !placeholder.is_resolved())
			.count()
	}

	/// Replace the working buffer with an accepted candidate and record the
	/// answer on the placeholder at `index`.
	pub(crate) fn commit(&mut self, index: usize, buffer: Vec<u8>, value: String) {
		self.buffer = buffer;
		if let Some(placeholder) = self.placeholders.get_mut(index) {
			placeholder.resolved = Some(value);
		}
	}

	pub(crate) fn retarget(&mut self, destination: PathBuf) {
		self.destination = destination;
	}

	/// Consume the session, returning the destination, the final buffer and
	/// the placeholders with their answers.
	pub fn into_parts(self) -> (PathBuf, Vec<u8>, Vec<Placeholder>) {
		(self.destination, self.buffer, self.placeholders)
	}
}

/// Replace every occurrence of any of `needles` in `haystack` with
/// `replacement`, scanning left to right in a single pass. Replacement text is
/// never rescanned. Returns the new buffer and the number of replacements.
pub(crate) fn replace_literal(
	haystack: &[u8],
	needles: &[&[u8]],
	replacement: &[u8],
) -> (Vec<u8>, usize) {
	splice_literal(haystack, needles, |_| replacement)
}

/// Single-pass splice shared by candidates and previews. `replace` maps the
/// matched needle to the bytes written in its place.
pub(crate) fn splice_literal<F, R>(
	haystack: &[u8],
	needles: &[&[u8]],
	mut replace: F,
) -> (Vec<u8>, usize)
where
	F: FnMut(&[u8]) -> R,
	R: AsRef<[u8]>,
{
	let mut output = Vec::with_capacity(haystack.len());
	let mut count = 0;
	let mut index = 0;

	while index < haystack.len() {
		let rest = &haystack[index..];
		let found = needles
			.iter()
			.find(|needle| !needle.is_empty() && rest.starts_with(needle));

		if let Some(needle) = found {
			output.extend_from_slice(replace(*needle).as_ref());
			index += needle.len();
			count += 1;
		} else {
			output.push(haystack[index]);
			index += 1;
		}
	}

	(output, count)
}
