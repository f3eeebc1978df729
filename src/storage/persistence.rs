//! Ledger persistence layer
//!
//! Provides save/load functionality for a deployed ledger.

use crate::ledger::Ledger;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: std::path::PathBuf,
    pub ledger_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".ledger_data"),
            ledger_file: "ledger.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Ledger storage manager
pub struct LedgerStore {
    config: StoreConfig,
}

impl LedgerStore {
    /// Create a new storage manager
    pub fn new(config: StoreConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StoreConfig::default())
    }

    /// Get the ledger file path
    fn ledger_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.ledger_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> std::path::PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.ledger_file, index))
    }

    /// Save the ledger to disk
    pub fn save(&self, ledger: &Ledger) -> Result<(), StorageError> {
        let path = self.ledger_path();

        // Create backup if enabled
        if self.config.backup_enabled && self.config.max_backups > 0 && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("ledger.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, ledger)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the ledger from disk
    pub fn load(&self) -> Result<Ledger, StorageError> {
        let path = self.ledger_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Ledger file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let ledger: Ledger = serde_json::from_reader(reader)?;

        Ok(ledger)
    }

    /// Check if a saved ledger exists
    pub fn exists(&self) -> bool {
        self.ledger_path().exists()
    }

    /// Delete the saved ledger
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.ledger_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        if self.config.max_backups == 0 {
            return Ok(());
        }

        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                let next = self.backup_path(i + 1);
                fs::rename(&current, &next)?;
            }
        }

        Ok(())
    }

    /// Restore from a backup
    pub fn restore_backup(&self, backup_index: usize) -> Result<Ledger, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        let file = fs::File::open(&backup_path)?;
        let reader = BufReader::new(file);

        let ledger: Ledger = serde_json::from_reader(reader)?;

        Ok(ledger)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        let mut backups = Vec::new();

        for i in 0..self.config.max_backups {
            if self.backup_path(i).exists() {
                backups.push(i);
            }
        }

        backups
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StorageError> {
        let path = self.ledger_path();

        let file_size = if path.exists() {
            fs::metadata(&path)?.len()
        } else {
            0
        };

        let backup_count = self.list_backups().len();

        Ok(StorageStats {
            file_size,
            backup_count,
            data_dir: self.config.data_dir.clone(),
        })
    }
}

/// Storage statistics
#[derive(Debug)]
pub struct StorageStats {
    pub file_size: u64,
    pub backup_count: usize,
    pub data_dir: std::path::PathBuf,
}

/// Save a ledger snapshot to a specific file path
pub fn save_to_file(ledger: &Ledger, path: &Path) -> Result<(), StorageError> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, ledger)?;
    Ok(())
}

/// Load a ledger snapshot from a specific file path
pub fn load_from_file(path: &Path) -> Result<Ledger, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let ledger: Ledger = serde_json::from_reader(reader)?;
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{units, Address};

    fn deploy() -> (Ledger, Address) {
        let deployer = Address::from_bytes([0xd1; 20]);
        let ledger = Ledger::create(
            "Snarfcoin".to_string(),
            "SNARF".to_string(),
            units(1_000_000),
            deployer,
        )
        .unwrap();
        (ledger, deployer)
    }

    #[test]
    fn test_save_load_ledger() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let store = LedgerStore::new(config).unwrap();
        let (mut ledger, deployer) = deploy();
        let receiver = Address::from_bytes([0x22; 20]);
        ledger.transfer(&deployer, &receiver, units(100)).unwrap();

        // Save
        store.save(&ledger).unwrap();
        assert!(store.exists());

        // Load
        let loaded = store.load().unwrap();
        assert_eq!(loaded.balance_of(&deployer), units(999_900));
        assert_eq!(loaded.balance_of(&receiver), units(100));
        assert_eq!(loaded.events().len(), ledger.events().len());
    }

    #[test]
    fn test_load_missing_ledger() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let store = LedgerStore::new(config).unwrap();
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_backup_rotation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            data_dir: temp_dir.path().to_path_buf(),
            max_backups: 3,
            ..Default::default()
        };

        let store = LedgerStore::new(config).unwrap();
        let (mut ledger, deployer) = deploy();
        let receiver = Address::from_bytes([0x22; 20]);

        // Save multiple times
        for _ in 0..5 {
            store.save(&ledger).unwrap();
            ledger.transfer(&deployer, &receiver, units(1)).unwrap();
        }

        // Should have 3 backups (max)
        let backups = store.list_backups();
        assert!(backups.len() <= 3);

        // The newest backup restores to a valid ledger
        let restored = store.restore_backup(0).unwrap();
        assert_eq!(restored.circulating(), restored.total_supply());
    }

    #[test]
    fn test_zero_max_backups() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            data_dir: temp_dir.path().to_path_buf(),
            max_backups: 0,
            ..Default::default()
        };

        let store = LedgerStore::new(config).unwrap();
        let (ledger, _) = deploy();

        // Repeated saves must not panic or leave backups behind
        store.save(&ledger).unwrap();
        store.save(&ledger).unwrap();

        assert!(store.list_backups().is_empty());
        assert!(store.exists());
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("snapshot.json");

        let (ledger, deployer) = deploy();
        save_to_file(&ledger, &path).unwrap();

        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded.balance_of(&deployer), units(1_000_000));
    }
}
