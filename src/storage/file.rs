use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use super::Storage;
use crate::{Result, StorefrontError};

/// Storage backed by a single JSON document on disk.
///
/// The whole map is held in memory and the file is rewritten on every
/// mutation. Writes land in a sibling `.tmp` file first and are renamed over
/// the original, so a crash mid-write leaves the previous contents intact.
/// Two processes sharing a file race with last-writer-wins semantics.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    #[tracing::instrument(fields(storage = "file"))]
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let items = match fs::read_to_string(path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                error!(err = ?e, path = %path.display(), "storage file is not a JSON object");
                StorefrontError::MalformedData
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no storage file yet, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            items: RefCell::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `items` to disk; memory is only replaced by the caller once
    /// this succeeds
    fn flush(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let serialized = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut next = self.items.borrow().clone();
        next.insert(key.to_owned(), value.to_owned());
        self.flush(&next)?;
        self.items.replace(next);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut next = self.items.borrow().clone();
        if next.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&next)?;
        self.items.replace(next);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.borrow().keys().cloned().collect())
    }
}
