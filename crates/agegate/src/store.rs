//! Verification value persistence.
//!
//! One storage key, one string value. Read/write failures on the file-backed
//! store are logged and degraded (`None` / no-op) rather than propagated:
//! every failure path upstream of the gate must land on "re-prompt", and a
//! missing value does exactly that.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

use crate::gate::STORAGE_KEY;

/// Injected key-value seam for the single persisted gate value.
pub trait VerificationStore: Send + Sync {
    /// Current stored value, if any.
    fn get(&self) -> Option<String>;
    /// Replace the stored value.
    fn set(&self, value: &str);
    /// Remove the stored value.
    fn clear(&self);
}

/// Process-local store. Default for tests and for deployments that are happy
/// to re-prompt after a restart.
#[derive(Debug, Default)]
pub struct InMemoryVerificationStore {
    value: Mutex<Option<String>>,
}

impl InMemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VerificationStore for InMemoryVerificationStore {
    fn get(&self) -> Option<String> {
        self.value.lock().expect("verification store poisoned").clone()
    }

    fn set(&self, value: &str) {
        *self.value.lock().expect("verification store poisoned") = Some(value.to_string());
    }

    fn clear(&self) {
        *self.value.lock().expect("verification store poisoned") = None;
    }
}

/// File-backed store: a small JSON document under the OS data directory,
/// holding the value at its fixed storage key.
#[derive(Debug, Clone)]
pub struct FileVerificationStore {
    path: PathBuf,
}

impl FileVerificationStore {
    /// Store at `{app_data_dir}/coneworks/age_gate.json`.
    pub fn open_default() -> anyhow::Result<Self> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

        let mut dir = base;
        dir.push("coneworks");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory at {dir:?}"))?;

        dir.push("age_gate.json");
        Ok(Self::at_path(dir))
    }

    /// Store at an explicit path. The parent directory must exist.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_document(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::error!("failed to read verification store at {:?}: {err:?}", self.path);
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                // A mangled document is indistinguishable from an absent one.
                tracing::warn!("verification store at {:?} is not a JSON object", self.path);
                None
            }
        }
    }

    fn write_document(&self, document: &serde_json::Map<String, serde_json::Value>) {
        let payload = serde_json::Value::Object(document.clone()).to_string();
        if let Err(err) = std::fs::write(&self.path, payload) {
            tracing::error!("failed to write verification store at {:?}: {err:?}", self.path);
        }
    }
}

impl VerificationStore for FileVerificationStore {
    fn get(&self) -> Option<String> {
        self.read_document()?
            .get(STORAGE_KEY)
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
    }

    fn set(&self, value: &str) {
        let mut document = self.read_document().unwrap_or_default();
        document.insert(STORAGE_KEY.to_string(), serde_json::Value::from(value));
        self.write_document(&document);
    }

    fn clear(&self) {
        let Some(mut document) = self.read_document() else {
            return;
        };
        if document.remove(STORAGE_KEY).is_some() {
            self.write_document(&document);
        }
    }
}
