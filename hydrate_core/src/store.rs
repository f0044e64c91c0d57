use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use crate::HydrateError;
use crate::HydrateResult;

/// Where documents are read from and written to.
pub trait Store {
	/// Read the full contents of `path`.
	fn load(&self, path: &Path) -> HydrateResult<Vec<u8>>;

	/// Replace the contents of `path` with `bytes`, creating it if needed.
	fn save(&self, path: &Path, bytes: &[u8]) -> HydrateResult<()>;
}

impl<S: Store + ?Sized> Store for &S {
	fn load(&self, path: &Path) -> HydrateResult<Vec<u8>> {
		(**self).load(path)
	}

	fn save(&self, path: &Path, bytes: &[u8]) -> HydrateResult<()> {
		(**self).save(path, bytes)
	}
}

/// Reads and writes files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl Store for FileStore {
	fn load(&self, path: &Path) -> HydrateResult<Vec<u8>> {
		std::fs::read(path).map_err(|source| {
			HydrateError::Read {
				path: path.display().to_string(),
				source,
			}
		})
	}

	fn save(&self, path: &Path, bytes: &[u8]) -> HydrateResult<()> {
		std::fs::write(path, bytes).map_err(|source| {
			HydrateError::Write {
				path: path.display().to_string(),
				source,
			}
		})
	}
}

/// An in-memory store keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
	files: RefCell<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed the store with a file.
	#[must_use]
	pub fn with_file(self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
		self.files.borrow_mut().insert(path.into(), bytes.into());
		self
	}

	/// The current contents of `path`, if it was ever saved or seeded.
	pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
		self.files.borrow().get(path).cloned()
	}

	pub fn contains(&self, path: &Path) -> bool {
		self.files.borrow().contains_key(path)
	}
}

impl Store for MemoryStore {
	fn load(&self, path: &Path) -> HydrateResult<Vec<u8>> {
		self.get(path).ok_or_else(|| {
			HydrateError::Read {
				path: path.display().to_string(),
				source: ErrorKind::NotFound.into(),
			}
		})
	}

	fn save(&self, path: &Path, bytes: &[u8]) -> HydrateResult<()> {
		self.files
			.borrow_mut()
			.insert(path.to_path_buf(), bytes.to_vec());
		Ok(())
	}
}
