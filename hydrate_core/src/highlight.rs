use owo_colors::OwoColorize;

use crate::session::splice_literal;

/// Decorates text for display. Must never change the text itself, only how
/// it renders.
pub trait Highlighter {
	fn highlight(&self, text: &str) -> String;
}

impl<H: Highlighter + ?Sized> Highlighter for Box<H> {
	fn highlight(&self, text: &str) -> String {
		(**self).highlight(text)
	}
}

/// Bold, underlined, bright red ANSI styling.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiHighlighter;

impl Highlighter for AnsiHighlighter {
	fn highlight(&self, text: &str) -> String {
		format!("{}", text.bright_red().bold().underline())
	}
}

/// Leaves text untouched. Used when color is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
	fn highlight(&self, text: &str) -> String {
		text.to_string()
	}
}

/// Pick a highlighter for the given color preference.
pub fn highlighter(color: bool) -> Box<dyn Highlighter> {
	if color {
		Box::new(AnsiHighlighter)
	} else {
		Box::new(PlainHighlighter)
	}
}

/// Render `buffer` with every occurrence of each of `needles` replaced by the
/// highlighted `replacement`. Splices at exactly the positions the committed
/// candidate does.
pub(crate) fn render_with<H: Highlighter + ?Sized>(
	highlighter: &H,
	buffer: &[u8],
	needles: &[&[u8]],
	replacement: &str,
) -> String {
	let styled = highlighter.highlight(replacement);
	let (rendered, _) = splice_literal(buffer, needles, |_| styled.as_bytes());
	String::from_utf8_lossy(&rendered).into_owned()
}

/// Render `buffer` with every occurrence of each of `needles` highlighted.
pub(crate) fn mark<H: Highlighter + ?Sized>(
	highlighter: &H,
	buffer: &[u8],
	needles: &[&[u8]],
) -> String {
	let (rendered, _) = splice_literal(buffer, needles, |needle| {
		highlighter.highlight(&String::from_utf8_lossy(needle))
	});
	String::from_utf8_lossy(&rendered).into_owned()
}
