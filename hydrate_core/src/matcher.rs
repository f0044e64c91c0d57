use std::sync::LazyLock;

use regex::bytes::Regex;

/// Opening delimiter of a placeholder.
pub const OPEN_DELIMITER: &str = "{{%";
/// Closing delimiter of a placeholder.
pub const CLOSE_DELIMITER: &str = "%}}";

/// Delimiters wrapping a single-line capture. The lazy inner quantifier stops
/// at the first closing delimiter, so a capture never holds `%}}`.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{\{%([^\n]*?)%\}\}")
		.unwrap_or_else(|e| panic!("invalid placeholder pattern: {e}"))
});

/// A single placeholder occurrence found in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
	/// The full literal text of the occurrence, delimiters included.
	pub pattern: String,
	/// The captured identifier with surrounding whitespace removed.
	pub key: String,
	/// Byte offset of the occurrence in the scanned buffer.
	pub offset: usize,
}

/// Find every placeholder occurrence in `buffer`, in document order.
///
/// The buffer is treated as UTF-8 text. Spans that don't form a complete
/// placeholder (an unterminated `{{%`, a key without any ASCII letter, digit
/// or hyphen) produce no match and leave the text after them scannable. A
/// stray `{{%` earlier on the line is left as plain text.
pub fn extract(buffer: &[u8]) -> Vec<RawMatch> {
	let mut matches = Vec::new();

	for captures in PLACEHOLDER_REGEX.captures_iter(buffer) {
		let (Some(whole), Some(group)) = (captures.get(0), captures.get(1)) else {
			continue;
		};

		// Re-anchor on the last opening delimiter inside the capture.
		let (start, inner) = match last_open_delimiter(group.as_bytes()) {
			Some(index) => {
				let inner = &group.as_bytes()[index + OPEN_DELIMITER.len()..];
				(group.start() + index, inner)
			}
			None => (whole.start(), group.as_bytes()),
		};

		if !inner
			.iter()
			.any(|byte| byte.is_ascii_alphanumeric() || *byte == b'-')
		{
			continue;
		}

		let key = String::from_utf8_lossy(inner).trim().to_string();
		tracing::trace!(offset = start, key = %key, "matched placeholder");

		matches.push(RawMatch {
			pattern: String::from_utf8_lossy(&buffer[start..whole.end()]).into_owned(),
			key,
			offset: start,
		});
	}

	matches
}

/// Returns true when `text` holds at least one placeholder.
pub fn contains_placeholder(text: &str) -> bool {
	!extract(text.as_bytes()).is_empty()
}

fn last_open_delimiter(bytes: &[u8]) -> Option<usize> {
	bytes
		.windows(OPEN_DELIMITER.len())
		.rposition(|window| window == OPEN_DELIMITER.as_bytes())
}
