//! Storage ports for the single best-run record

use super::StoreError;
use super::record::Standing;

/// Raw load/save of the stored standing. Callers serialize access.
pub trait Repository {
    /// Load the stored standing; an empty store yields `Standing::default()`
    fn load(&mut self) -> Result<Standing, StoreError>;
    /// Replace the stored standing
    fn save(&mut self, standing: &Standing) -> Result<(), StoreError>;
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    standing: Standing,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_standing(standing: Standing) -> Self {
        Self { standing }
    }
}

impl Repository for MemoryRepository {
    fn load(&mut self) -> Result<Standing, StoreError> {
        Ok(self.standing.clone())
    }

    fn save(&mut self, standing: &Standing) -> Result<(), StoreError> {
        self.standing = standing.clone();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileRepository;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use tempfile::NamedTempFile;

    use super::{Repository, Standing, StoreError};

    /// Standing kept as one JSON file, replaced atomically on every save
    #[derive(Debug, Clone)]
    pub struct JsonFileRepository {
        path: PathBuf,
    }

    impl JsonFileRepository {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        fn dir(&self) -> &Path {
            match self.path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            }
        }
    }

    impl Repository for JsonFileRepository {
        fn load(&mut self) -> Result<Standing, StoreError> {
            match fs::read(&self.path) {
                Ok(bytes) if bytes.is_empty() => Ok(Standing::default()),
                Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(Standing::default()),
                Err(err) => Err(StoreError::Io(err)),
            }
        }

        fn save(&mut self, standing: &Standing) -> Result<(), StoreError> {
            let dir = self.dir();
            fs::create_dir_all(dir)?;

            // Write beside the target so the rename stays on one filesystem
            let mut tmp = NamedTempFile::new_in(dir)?;
            serde_json::to_writer_pretty(&mut tmp, standing)?;
            tmp.write_all(b"\n")?;
            tmp.as_file().sync_all()?;
            tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

            log::debug!("Standing written to {}", self.path.display());
            Ok(())
        }
    }
}
