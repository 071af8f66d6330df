use crate::error::{Error, Result};
use crate::storage::KeyValueStore;
use miniserde::json::{self, Object, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Persistent store backed by a single JSON object file
///
/// Every call reads the file so that values written by other processes are
/// seen. Writes go to a uniquely named temporary file in the same directory
/// which then replaces the original.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Use `path` as the backing file; it is created on first write
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Object> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Object::new()),
            Err(e) => return Err(self.io_error("read", e)),
        };

        if contents.trim().is_empty() {
            return Ok(Object::new());
        }

        json::from_str(&contents).map_err(|e| {
            Error::Storage(format!("{} is not a JSON object: {e}", self.path.display()))
        })
    }

    fn save(&self, entries: &Object) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error("create directory for", e))?;

        // Unique name per write; other stores may share this path
        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| self.io_error("create temporary file for", e))?;
        tmp.write_all(json::to_string(entries).as_bytes())
            .map_err(|e| self.io_error("write", e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error("replace", e.error))?;

        Ok(())
    }

    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Object),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("file store lock poisoned".into()))?;

        let mut entries = self.load()?;
        change(&mut entries);
        self.save(&entries)
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> Error {
        Error::Storage(format!("failed to {action} {}: {e}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("file store lock poisoned".into()))?;

        match self.load()?.get(key) {
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(Error::Storage(format!(
                "value for '{key}' in {} is not a string",
                self.path.display()
            ))),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
