//! File system storage for scope snapshots

use discuss_core::error::{DiscussError, Result};
use discuss_core::store::{ScopeSnapshot, ScopeStorage, CURRENT_SCHEMA_VERSION};
use discuss_core::types::ScopeKey;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// File system based scope storage
///
/// Each root scope is one JSON file under `scopes/`, named after the scope's
/// hashed file stem so arbitrary tenant and object identifiers never reach
/// the file system.
pub struct FileSystemStorage {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Scopes subdirectory
    scopes_dir: PathBuf,
}

impl FileSystemStorage {
    /// Create a new file system storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let scopes_dir = base_dir.join("scopes");

        let storage = Self {
            base_dir,
            scopes_dir,
        };

        storage.ensure_dirs()?;
        Ok(storage)
    }

    /// Create storage with default directory (~/.discuss)
    pub fn default_location() -> Result<Self> {
        let base_dir = directories::ProjectDirs::from("com", "discuss", "discuss")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".discuss")
            });

        Self::new(base_dir)
    }

    /// Ensure required directories exist
    fn ensure_dirs(&self) -> Result<()> {
        if !self.scopes_dir.exists() {
            fs::create_dir_all(&self.scopes_dir).map_err(|e| {
                DiscussError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create scopes directory: {}", e),
                ))
            })?;
            debug!("Created scopes directory: {:?}", self.scopes_dir);
        }
        Ok(())
    }

    /// Get the path for a scope file
    fn scope_path(&self, scope: &ScopeKey) -> PathBuf {
        self.scopes_dir.join(format!("{}.json", scope.file_stem()))
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self, scope: &ScopeKey) -> PathBuf {
        self.scopes_dir
            .join(format!(".{}.json.tmp", scope.file_stem()))
    }

    /// Write a snapshot atomically (write to temp, then rename)
    fn atomic_write(&self, snapshot: &ScopeSnapshot) -> Result<()> {
        let temp_path = self.temp_path(&snapshot.scope);
        let final_path = self.scope_path(&snapshot.scope);

        // Write to temp file
        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            DiscussError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, &final_path).map_err(|e| {
            // Clean up temp file on failure
            let _ = fs::remove_file(&temp_path);
            DiscussError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved scope {} to {:?}", snapshot.scope, final_path);
        Ok(())
    }

    /// Read and parse a scope file
    fn read_snapshot(&self, path: &PathBuf, scope: Option<&ScopeKey>) -> Result<ScopeSnapshot> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                let name = scope
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned());
                DiscussError::ScopeNotFound(name)
            } else {
                DiscussError::Io(e)
            }
        })?;

        let reader = BufReader::new(file);
        let snapshot: ScopeSnapshot = serde_json::from_reader(reader)?;

        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(DiscussError::UnsupportedSchemaVersion(
                snapshot.schema_version,
            ));
        }

        Ok(snapshot)
    }

    /// Get base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get scopes directory
    pub fn scopes_dir(&self) -> &PathBuf {
        &self.scopes_dir
    }
}

impl ScopeStorage for FileSystemStorage {
    fn save(&self, snapshot: &ScopeSnapshot) -> Result<()> {
        self.atomic_write(snapshot)
    }

    fn load(&self, scope: &ScopeKey) -> Result<ScopeSnapshot> {
        let path = self.scope_path(scope);
        self.read_snapshot(&path, Some(scope))
    }

    fn list(&self) -> Result<Vec<ScopeKey>> {
        let mut scopes = Vec::new();

        let entries = fs::read_dir(&self.scopes_dir).map_err(|e| {
            DiscussError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read scopes directory: {}", e),
            ))
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // Skip non-json files and temp files
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }

            match self.read_snapshot(&path, None) {
                Ok(snapshot) => scopes.push(snapshot.scope),
                Err(e) => {
                    warn!("Failed to read scope file {:?}: {}", path, e);
                }
            }
        }

        Ok(scopes)
    }

    fn delete(&self, scope: &ScopeKey) -> Result<()> {
        let path = self.scope_path(scope);

        if !path.exists() {
            return Err(DiscussError::ScopeNotFound(scope.to_string()));
        }

        fs::remove_file(&path).map_err(|e| {
            DiscussError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete scope file: {}", e),
            ))
        })?;

        debug!("Deleted scope {} from {:?}", scope, path);
        Ok(())
    }

    fn exists(&self, scope: &ScopeKey) -> bool {
        self.scope_path(scope).exists()
    }
}
