//! Recovery ledger — the crash-safe breadcrumb around the claim step.
//!
//! An entry is written before the irreversible on-chain claim and cleared
//! immediately after the transaction hash is obtained. If the process dies
//! in between, the entry survives and reconciliation tooling can check the
//! on-chain status before anything is resubmitted. The ledger is a local
//! best-effort recovery aid, not a source of truth.
//!
//! The storage medium sits behind [`RecoveryStore`] so it can be swapped
//! (memory for tests, one JSON file per entry in production) without
//! touching orchestration logic.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use offramp_types::{AttemptId, ClaimLink, OfframpError, Result, constants};

/// Durable key-value store for recovery entries. Writes and removes for
/// different keys never conflict, so implementations only need per-key
/// atomicity.
pub trait RecoveryStore: Send + Sync {
    fn put(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    /// All live (key, value) pairs.
    fn entries(&self) -> Result<Vec<(String, String)>>;
}

/// The persisted breadcrumb: which link was about to be claimed, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryEntry {
    pub link: ClaimLink,
    pub created_at: DateTime<Utc>,
}

/// A stale entry surfaced to reconciliation tooling: the claim may have
/// succeeded without confirmation — check on-chain status before
/// resubmitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleEntry {
    pub attempt_id: AttemptId,
    pub entry: RecoveryEntry,
}

/// Append/remove record of in-flight settlements.
pub struct RecoveryLedger {
    store: Box<dyn RecoveryStore>,
}

fn key_for(attempt_id: AttemptId) -> String {
    format!("{}{attempt_id}", constants::RECOVERY_KEY_PREFIX)
}

impl RecoveryLedger {
    #[must_use]
    pub fn new(store: Box<dyn RecoveryStore>) -> Self {
        Self { store }
    }

    /// Record that `link` is about to be claimed under `attempt_id`.
    /// Must complete before the claim is dispatched.
    ///
    /// # Errors
    /// Returns [`OfframpError::RecoveryEntryExists`] if a live entry already
    /// exists for this attempt — at most one entry per in-flight attempt.
    pub fn write(&self, attempt_id: AttemptId, link: &ClaimLink) -> Result<()> {
        let key = key_for(attempt_id);
        if self.store.entries()?.iter().any(|(k, _)| *k == key) {
            return Err(OfframpError::RecoveryEntryExists(attempt_id));
        }
        let entry = RecoveryEntry {
            link: link.clone(),
            created_at: Utc::now(),
        };
        self.store.put(&key, &serde_json::to_string(&entry)?)?;
        debug!(%attempt_id, "recovery entry written");
        Ok(())
    }

    /// Remove the entry for a claimed attempt. Called as soon as the claim
    /// transaction hash is in hand; the remaining workflow steps are safe to
    /// retry without the breadcrumb.
    pub fn clear(&self, attempt_id: AttemptId) -> Result<()> {
        self.store.remove(&key_for(attempt_id))?;
        debug!(%attempt_id, "recovery entry cleared");
        Ok(())
    }

    /// Whether a live entry exists for the attempt.
    pub fn contains(&self, attempt_id: AttemptId) -> Result<bool> {
        let key = key_for(attempt_id);
        Ok(self.store.entries()?.iter().any(|(k, _)| *k == key))
    }

    /// Entries older than `max_age`, for out-of-band reconciliation. Not
    /// exercised mid-workflow. Keys that do not parse are skipped.
    pub fn list_stale(&self, max_age: Duration) -> Result<Vec<StaleEntry>> {
        let cutoff = Utc::now() - max_age;
        let mut stale = Vec::new();
        for (key, value) in self.store.entries()? {
            let Some(id_part) = key.strip_prefix(constants::RECOVERY_KEY_PREFIX) else {
                continue;
            };
            let Ok(uuid) = Uuid::parse_str(id_part) else {
                continue;
            };
            let entry: RecoveryEntry = serde_json::from_str(&value)?;
            if entry.created_at < cutoff {
                stale.push(StaleEntry {
                    attempt_id: AttemptId(uuid),
                    entry,
                });
            }
        }
        stale.sort_by_key(|s| s.attempt_id);
        if !stale.is_empty() {
            info!(count = stale.len(), "stale recovery entries found");
        }
        Ok(stale)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store for tests. Not durable.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecoveryStore for MemoryStore {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .lock()
            .map_err(|_| OfframpError::Storage("poisoned lock".into()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map
            .lock()
            .map_err(|_| OfframpError::Storage("poisoned lock".into()))?
            .remove(key);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .map
            .lock()
            .map_err(|_| OfframpError::Storage("poisoned lock".into()))?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// One JSON file per entry under a directory. Survives process restarts;
/// per-key independence falls out of one-file-per-key.
pub struct JsonFileStore {
    dir: PathBuf,
}

/// On-disk envelope: the logical key travels inside the file because file
/// names cannot carry the key's slashes losslessly.
#[derive(Serialize, Deserialize)]
struct StoredEnvelope {
    key: String,
    value: String,
}

impl JsonFileStore {
    /// Open (and create if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key.replace('/', "_")))
    }
}

impl RecoveryStore for JsonFileStore {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        let envelope = StoredEnvelope {
            key: key.to_string(),
            value: value.to_string(),
        };
        fs::write(self.path_for(key), serde_json::to_vec(&envelope)?)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        let mut out = Vec::new();
        for dirent in fs::read_dir(&self.dir)? {
            let path = dirent?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let envelope: StoredEnvelope = serde_json::from_slice(&fs::read(&path)?)?;
            out.push((envelope.key, envelope.value));
        }
        Ok(out)
    }
}
