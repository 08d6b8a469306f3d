//! File-backed OTP store
//!
//! The whole table lives in one JSON document on local disk; every
//! operation is a full read-modify-write of that file, serialized by an
//! in-process lock. Nothing coordinates across processes, so this backend
//! is only suitable for single-process deployments.
//!
//! An unreadable or corrupt file is treated as an empty table rather than
//! an error, so a damaged document heals on the next write. Write failures
//! do propagate, since acknowledging a code that was never persisted would
//! break verification later.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use jn_core::domain::entities::otp_challenge::{OtpChallenge, OtpPurpose};
use jn_core::services::OtpStore;

use crate::InfraError;

type Table = HashMap<String, OtpChallenge>;

/// OTP store persisted to a single JSON file
pub struct FileOtpStore {
    path: PathBuf,
    /// Serializes the read-modify-write cycles within this process
    guard: Mutex<()>,
}

impl FileOtpStore {
    /// Create a store over the given file path
    ///
    /// The file is created lazily on the first write.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            guard: Mutex::new(()),
        }
    }

    /// Create the parent directory of the store file if it is missing
    pub async fn ensure_parent_dir(&self) -> Result<(), InfraError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Format the table key for an `(email, purpose)` pair
    fn record_key(email: &str, purpose: OtpPurpose) -> String {
        format!("{}:{}", purpose.as_str(), email)
    }

    /// Load the table from disk
    ///
    /// A missing, unreadable, or corrupt file yields an empty table.
    async fn load_table(&self) -> Table {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Table::new(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read OTP store file, starting from an empty table"
                );
                return Table::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "OTP store file is corrupt, starting from an empty table"
                );
                Table::new()
            }
        }
    }

    /// Write the table back to disk
    async fn write_table(&self, table: &Table) -> Result<(), String> {
        let json = serde_json::to_string_pretty(table).map_err(|e| e.to_string())?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| format!("failed to write '{}': {}", self.path.display(), e))
    }
}

#[async_trait]
impl OtpStore for FileOtpStore {
    async fn get(&self, email: &str, purpose: OtpPurpose) -> Result<Option<OtpChallenge>, String> {
        let _guard = self.guard.lock().await;
        let table = self.load_table().await;
        Ok(table.get(&Self::record_key(email, purpose)).cloned())
    }

    async fn put(&self, challenge: &OtpChallenge) -> Result<(), String> {
        let _guard = self.guard.lock().await;
        let mut table = self.load_table().await;
        table.insert(
            Self::record_key(&challenge.email, challenge.purpose),
            challenge.clone(),
        );
        self.write_table(&table).await
    }

    async fn delete(&self, email: &str, purpose: OtpPurpose) -> Result<(), String> {
        let _guard = self.guard.lock().await;
        let mut table = self.load_table().await;
        if table.remove(&Self::record_key(email, purpose)).is_some() {
            self.write_table(&table).await?;
        }
        Ok(())
    }

    async fn increment_attempts(&self, email: &str, purpose: OtpPurpose) -> Result<u32, String> {
        let _guard = self.guard.lock().await;
        let mut table = self.load_table().await;
        match table.get_mut(&Self::record_key(email, purpose)) {
            Some(challenge) => {
                challenge.attempts += 1;
                let count = challenge.attempts;
                self.write_table(&table).await?;
                Ok(count)
            }
            // Mirrors a counter primitive creating itself at 1
            None => Ok(1),
        }
    }

    async fn sweep(&self) -> Result<usize, String> {
        let _guard = self.guard.lock().await;
        let mut table = self.load_table().await;
        let before = table.len();
        table.retain(|_, challenge| !challenge.is_expired());
        let removed = before - table.len();
        if removed > 0 {
            self.write_table(&table).await?;
        }
        Ok(removed)
    }
}
