use crate::errors::StateError;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Identifiers of feed entries that were already delivered.
///
/// Stored on disk as a JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedSet {
    ids: HashSet<String>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the set from `path`. A missing file is an empty set; a file that
    /// is not a JSON array of strings is [`StateError::Corrupt`].
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No state file at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(StateError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let ids: Vec<String> = serde_json::from_str(&raw).map_err(|source| StateError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded {} processed ids from {}", ids.len(), path.display());
        Ok(ids.into_iter().collect())
    }

    /// Write the set to `path`, creating parent directories as needed.
    ///
    /// The document is written to a sibling temp file and renamed into place,
    /// so readers see either the old or the new contents.
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let write_err = |source: io::Error| StateError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        serde_json::to_writer(&mut tmp, &ids).map_err(|e| write_err(e.into()))?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        tracing::debug!("Saved {} processed ids to {}", ids.len(), path.display());
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns `false` if the id was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl FromIterator<String> for ProcessedSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
