use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::HydrateError;
use crate::HydrateResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"hydrate.toml",
	".hydrate.toml",
	".config/hydrate.toml",
];

/// Prompt shown when asking the operator to accept an output preview.
pub const DEFAULT_CONFIRM_PROMPT: &str = "Continue (Y/N) ?";

/// Configuration loaded from a `hydrate.toml` file.
///
/// ```toml
/// write_unchanged = false
/// color = true
///
/// [prompt]
/// confirm = "Continue (Y/N) ?"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HydrateConfig {
	/// Write the destination even when the source has no placeholders. The
	/// destination then holds an exact copy of the source. Defaults to
	/// `false`, in which case nothing is written.
	#[serde(default)]
	pub write_unchanged: bool,
	/// Highlight placeholders and answers in previews. Defaults to `true`;
	/// `--no-color` and `NO_COLOR` still take precedence.
	#[serde(default = "default_color")]
	pub color: bool,
	/// Prompt wording.
	#[serde(default)]
	pub prompt: PromptConfig,
}

impl Default for HydrateConfig {
	fn default() -> Self {
		Self {
			write_unchanged: false,
			color: default_color(),
			prompt: PromptConfig::default(),
		}
	}
}

/// ```toml
/// [prompt]
/// confirm = "Keep this value? (y to accept)"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PromptConfig {
	/// Question asked after the output preview. Only an exact `y` answer
	/// accepts the preview.
	#[serde(default = "default_confirm_prompt")]
	pub confirm: String,
}

impl Default for PromptConfig {
	fn default() -> Self {
		Self {
			confirm: default_confirm_prompt(),
		}
	}
}

fn default_color() -> bool {
	true
}

fn default_confirm_prompt() -> String {
	DEFAULT_CONFIRM_PROMPT.to_string()
}

impl HydrateConfig {
	/// Resolve the first config file found at `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> HydrateResult<Option<HydrateConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit file path.
	pub fn load_file(path: &Path) -> HydrateResult<HydrateConfig> {
		let content = std::fs::read_to_string(path).map_err(|source| {
			HydrateError::Read {
				path: path.display().to_string(),
				source,
			}
		})?;

		let config: HydrateConfig = toml::from_str(&content).map_err(|e| {
			HydrateError::ConfigParse {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		tracing::debug!(path = %path.display(), ?config, "loaded config");

		Ok(config)
	}
}
