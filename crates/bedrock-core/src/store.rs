use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bedrock_model::{Ledger, LedgerStore, PersistError};

/// Ledger kept as a pretty-printed JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    path: PathBuf,
}

impl JsonFileLedgerStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileLedgerStore {
    /// A missing file is the first run and a corrupt one is logged and
    /// replaced on the next successful save. Invalid UTF-8 is replaced with
    /// U+FFFD so the remaining records survive.
    fn load(&self) -> Result<Ledger, PersistError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No ledger at {}, starting with an empty one",
                    self.path.display()
                );
                return Ok(Ledger::new());
            }
            Err(source) => {
                return Err(PersistError::Read {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        let data = match String::from_utf8(bytes) {
            Ok(data) => data,
            Err(error) => {
                log::warn!(
                    "Ledger {} contains invalid UTF-8 ({}); replacing the bad bytes",
                    self.path.display(),
                    error.utf8_error()
                );
                String::from_utf8_lossy(error.as_bytes()).into_owned()
            }
        };

        match serde_json::from_str(&data) {
            Ok(ledger) => Ok(ledger),
            Err(error) => {
                log::warn!(
                    "Ledger {} is not valid JSON ({error}); starting with an empty one",
                    self.path.display()
                );
                Ok(Ledger::new())
            }
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistError> {
        let data = serde_json::to_vec_pretty(ledger).map_err(PersistError::Serialize)?;
        write_atomic(&self.path, &data).map_err(|source| PersistError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        log::debug!("Saved {} versions to {}", ledger.len(), self.path.display());
        Ok(())
    }
}

/// In-process store, handy for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    ledger: Mutex<Option<Ledger>>,
    saves: Mutex<usize>,
}

impl MemoryLedgerStore {
    #[must_use]
    pub fn new(initial: Option<Ledger>) -> Self {
        Self {
            ledger: Mutex::new(initial),
            saves: Mutex::new(0),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<Ledger> {
        self.ledger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        *self
            .saves
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> Result<Ledger, PersistError> {
        Ok(self.snapshot().unwrap_or_default())
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistError> {
        *self
            .ledger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(ledger.clone());
        *self
            .saves
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) += 1;
        Ok(())
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("ledger");
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    let pid = std::process::id();

    let mut tmp_path = None;
    for attempt in 0..16_u8 {
        let candidate = parent.join(format!(".{file_name}.{pid}.{timestamp}.{attempt}.tmp"));
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(mut file) => {
                write_temp(&candidate, &mut file, data)?;
                tmp_path = Some(candidate);
                break;
            }
            Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(error) => return Err(error),
        }
    }

    let Some(tmp_path) = tmp_path else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "failed to create unique ledger temp file",
        ));
    };

    // std::fs::rename replaces an existing destination on every platform.
    if let Err(error) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(error);
    }

    Ok(())
}

/// Fill a freshly created temp file, removing it again if the write fails.
fn write_temp(candidate: &Path, file: &mut File, data: &[u8]) -> std::io::Result<()> {
    if let Err(error) = file.write_all(data).and_then(|()| file.sync_all()) {
        let _ = std::fs::remove_file(candidate);
        return Err(error);
    }
    Ok(())
}
