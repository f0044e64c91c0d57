use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum HydrateError {
	#[error(transparent)]
	#[diagnostic(code(hydrate::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read `{path}`: {source}")]
	#[diagnostic(
		code(hydrate::read),
		help("check that the source file exists and is readable, then run hydrate again")
	)]
	Read {
		path: String,
		source: std::io::Error,
	},

	#[error("failed to write `{path}`: {source}")]
	#[diagnostic(
		code(hydrate::write),
		help("check that the destination directory exists and is writable, then run hydrate again")
	)]
	Write {
		path: String,
		source: std::io::Error,
	},

	#[error("input closed while waiting for `{label}`")]
	#[diagnostic(
		code(hydrate::input_closed),
		help("hydrate is interactive: run it from a terminal or pipe one answer per line")
	)]
	InputClosed { label: String },

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(hydrate::config_parse),
		help("check that the config file is valid TOML with `write_unchanged`, `color` and [prompt] keys")
	)]
	ConfigParse { path: String, reason: String },
}

pub type HydrateResult<T> = Result<T, HydrateError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
