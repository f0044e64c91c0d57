use std::collections::HashMap;

use crate::matcher::RawMatch;
use crate::matcher::extract;

/// One unique placeholder of a document and the value it was resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
	/// Trimmed identifier shown to the operator as the prompt label.
	pub key: String,
	/// Literal text replaced in the working buffer, e.g.
	/// `{{%-Environment-Variables-%}}`.
	pub pattern: String,
	/// Other spellings of the same key found later in the document, such as
	/// `{{% Name %}}` next to `{{%Name%}}`. Replaced together with `pattern`.
	pub variants: Vec<String>,
	/// The confirmed replacement. `None` until the placeholder is resolved.
	pub resolved: Option<String>,
}

impl Placeholder {
	pub fn new(key: impl Into<String>, pattern: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			pattern: pattern.into(),
			variants: Vec::new(),
			resolved: None,
		}
	}

	pub fn is_resolved(&self) -> bool {
		self.resolved.is_some()
	}

	/// Every literal spelling of this placeholder, `pattern` first.
	pub fn patterns(&self) -> impl Iterator<Item = &str> {
		std::iter::once(self.pattern.as_str()).chain(self.variants.iter().map(String::as_str))
	}
}

impl From<RawMatch> for Placeholder {
	fn from(value: RawMatch) -> Self {
		Self::new(value.key, value.pattern)
	}
}

/// Build one placeholder per occurrence in `buffer`, in discovery order.
///
/// Pure: the buffer is only read.
pub fn discover(buffer: &[u8]) -> Vec<Placeholder> {
	let placeholders: Vec<Placeholder> = extract(buffer)
		.into_iter()
		.map(Placeholder::from)
		.collect();
	tracing::debug!(count = placeholders.len(), "discovered placeholder occurrences");
	placeholders
}

/// Collapse placeholders sharing a key, keeping the first occurrence and the
/// original order. Differently spelled patterns of a collapsed key are kept
/// as variants of the surviving placeholder.
pub fn dedup(placeholders: Vec<Placeholder>) -> Vec<Placeholder> {
	let mut index_by_key: HashMap<String, usize> = HashMap::new();
	let mut unique: Vec<Placeholder> = Vec::new();

	for placeholder in placeholders {
		let Some(&index) = index_by_key.get(&placeholder.key) else {
			index_by_key.insert(placeholder.key.clone(), unique.len());
			unique.push(placeholder);
			continue;
		};

		let first = &mut unique[index];
		if first.patterns().all(|pattern| pattern != placeholder.pattern) {
			first.variants.push(placeholder.pattern);
		}
	}

	tracing::debug!(count = unique.len(), "unique placeholders");
	unique
}
