use std::{collections::HashMap, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{config::Config, prelude::*, reading::ReadingLog};

/// Logical blob names for the two persistent structures.
pub const CONFIG_BLOB: &str = "config";
pub const READINGS_BLOB: &str = "readings";

/// The key-value boundary the repository persists through. Implementations
/// only move bytes; (de)serialization and validation stay in [`Repository`].
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result;
}

/// One file per key under a root directory.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl BlobStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        if path.is_file() {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            Ok(Some(bytes))
        } else {
            Ok(None)
        }
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create `{}`", self.root.display()))?;
        let path = self.path(key);
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write `{}`", path.display()))
    }
}

/// Ephemeral store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore(HashMap<String, Vec<u8>>);

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.0.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result {
        self.0.insert(key.to_owned(), bytes.to_vec());
        Ok(())
    }
}

/// Load/save access to the configuration and the reading log.
///
/// A missing blob is a fresh installation, not an error; a malformed blob is
/// rejected here so the derivation engine never sees structurally invalid
/// input.
pub struct Repository<S> {
    store: S,
}

impl<S: BlobStore> Repository<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[instrument(skip_all, name = "Loading configuration…")]
    pub fn load_config(&self) -> Result<Config> {
        match self.store.get(CONFIG_BLOB)? {
            Some(bytes) => serde_json::from_slice(&bytes).context("malformed configuration blob"),
            None => {
                info!("No stored configuration, using the seeded site");
                Ok(Config::default_site())
            }
        }
    }

    pub fn save_config(&mut self, config: &Config) -> Result {
        self.store.put(CONFIG_BLOB, &serde_json::to_vec(config)?)
    }

    #[instrument(skip_all, name = "Loading readings…")]
    pub fn load_readings(&self) -> Result<ReadingLog> {
        match self.store.get(READINGS_BLOB)? {
            Some(bytes) => serde_json::from_slice(&bytes).context("malformed readings blob"),
            None => Ok(ReadingLog::default()),
        }
    }

    pub fn save_readings(&mut self, readings: &ReadingLog) -> Result {
        self.store.put(READINGS_BLOB, &serde_json::to_vec(readings)?)
    }

    /// Bundle both structures for a backup download.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot { config: self.load_config()?, readings: self.load_readings()? })
    }

    /// Overwrite both structures from a restored backup.
    #[instrument(skip_all, name = "Restoring from backup…")]
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result {
        self.save_config(&snapshot.config)?;
        self.save_readings(&snapshot.readings)?;
        info!(
            groups = snapshot.config.0.len(),
            readings = snapshot.readings.len(),
            "Restored from backup",
        );
        Ok(())
    }
}

/// The backup file payload: both persistent structures verbatim.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    pub config: Config,
    pub readings: ReadingLog,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("unreadable backup payload")
    }
}
