use std::io::BufRead;
use std::io::StdinLock;
use std::io::Stdout;
use std::io::Write;

use crate::HydrateError;
use crate::HydrateResult;

/// The human answering prompts during a hydration session.
pub trait Operator {
	/// Present `text` under `heading`.
	fn show(&mut self, heading: &str, text: &str) -> HydrateResult<()>;

	/// Block until the operator answers `label`. The answer is returned raw,
	/// without its line terminator but with any other whitespace intact.
	fn ask(&mut self, label: &str) -> HydrateResult<String>;
}

impl<O: Operator + ?Sized> Operator for &mut O {
	fn show(&mut self, heading: &str, text: &str) -> HydrateResult<()> {
		(**self).show(heading, text)
	}

	fn ask(&mut self, label: &str) -> HydrateResult<String> {
		(**self).ask(label)
	}
}

/// Line-based operator over any reader and writer.
#[derive(Debug)]
pub struct LineOperator<R, W> {
	input: R,
	output: W,
}

/// A [`LineOperator`] bound to the process's standard input and output.
pub type StdioOperator = LineOperator<StdinLock<'static>, Stdout>;

impl LineOperator<StdinLock<'static>, Stdout> {
	pub fn stdio() -> Self {
		Self::new(std::io::stdin().lock(), std::io::stdout())
	}
}

impl<R: BufRead, W: Write> LineOperator<R, W> {
	pub fn new(input: R, output: W) -> Self {
		Self { input, output }
	}

	pub fn into_output(self) -> W {
		self.output
	}
}

impl<R: BufRead, W: Write> Operator for LineOperator<R, W> {
	fn show(&mut self, heading: &str, text: &str) -> HydrateResult<()> {
		writeln!(self.output, "{heading}: {text}\n")?;
		self.output.flush()?;
		Ok(())
	}

	fn ask(&mut self, label: &str) -> HydrateResult<String> {
		write!(self.output, "{label} ")?;
		self.output.flush()?;

		let mut line = String::new();
		let read = self.input.read_line(&mut line)?;
		if read == 0 {
			return Err(HydrateError::InputClosed {
				label: label.to_string(),
			});
		}

		if line.ends_with('\n') {
			line.pop();
			if line.ends_with('\r') {
				line.pop();
			}
		}

		Ok(line)
	}
}
