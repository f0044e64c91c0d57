use std::collections::VecDeque;

use crate::HydrateError;
use crate::HydrateResult;
use crate::Highlighter;
use crate::Hydrator;
use crate::MemoryStore;
use crate::Operator;
use crate::PlainHighlighter;

pub const SOURCE: &str = "template.json";
pub const DESTINATION: &str = "output.json";

/// An operator that answers from a fixed script and records every exchange.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
	answers: VecDeque<String>,
	pub asked: Vec<String>,
	pub shown: Vec<(String, String)>,
}

impl ScriptedOperator {
	pub fn new(answers: &[&str]) -> Self {
		Self {
			answers: answers.iter().map(ToString::to_string).collect(),
			..Self::default()
		}
	}

	/// How many times the operator was asked `label`.
	pub fn times_asked(&self, label: &str) -> usize {
		self.asked.iter().filter(|asked| *asked == label).count()
	}

	/// Previews shown under `heading`, in order.
	pub fn previews(&self, heading: &str) -> Vec<&str> {
		self.shown
			.iter()
			.filter(|(shown, _)| shown == heading)
			.map(|(_, text)| text.as_str())
			.collect()
	}

	pub fn remaining(&self) -> usize {
		self.answers.len()
	}
}

impl Operator for ScriptedOperator {
	fn show(&mut self, heading: &str, text: &str) -> HydrateResult<()> {
		self.shown.push((heading.to_string(), text.to_string()));
		Ok(())
	}

	fn ask(&mut self, label: &str) -> HydrateResult<String> {
		self.asked.push(label.to_string());
		self.answers.pop_front().ok_or_else(|| {
			HydrateError::InputClosed {
				label: label.to_string(),
			}
		})
	}
}

/// Wraps highlighted text in square brackets so previews are easy to assert.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketHighlighter;

impl Highlighter for BracketHighlighter {
	fn highlight(&self, text: &str) -> String {
		format!("[{text}]")
	}
}

pub fn store_with_source(source: impl Into<Vec<u8>>) -> MemoryStore {
	MemoryStore::new().with_file(SOURCE, source)
}

pub fn scripted_hydrator<'a>(
	store: &'a MemoryStore,
	answers: &[&str],
) -> Hydrator<&'a MemoryStore, ScriptedOperator, PlainHighlighter> {
	Hydrator::new(store, ScriptedOperator::new(answers), PlainHighlighter)
}
