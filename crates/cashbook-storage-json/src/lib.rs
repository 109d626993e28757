//! Filesystem-backed JSON snapshots for the cashbook CLI.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use cashbook_core::{CoreError, SnapshotInfo, SnapshotSource};
use cashbook_domain::Snapshot;
use chrono::Utc;
use tracing::debug;

const SNAPSHOT_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Stores snapshots as `<root>/<name>.json`, keeping the previous file of each
/// name under `<root>/backups/<name>/` before it is overwritten.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStorage {
    snapshots_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonSnapshotStorage {
    pub fn new(snapshots_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(snapshots_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(snapshots_dir: PathBuf, retention: usize) -> Result<Self, CoreError> {
        let backups_dir = snapshots_dir.join("backups");
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            snapshots_dir,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.snapshots_dir
            .join(format!("{}.{}", canonical_name(name), SNAPSHOT_EXTENSION))
    }

    /// Backup file names kept for `name`, newest first.
    pub fn list_backups(&self, name: &str) -> Result<Vec<PathBuf>, CoreError> {
        let dir = self.backups_dir.join(canonical_name(name));
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| has_snapshot_extension(path))
            .collect();
        // Timestamped names sort chronologically.
        paths.sort_by_key(|path| Reverse(path.file_name().map(|name| name.to_os_string())));
        Ok(paths)
    }

    fn backup_existing(&self, name: &str, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let slug = canonical_name(name);
        let dir = self.backups_dir.join(&slug);
        fs::create_dir_all(&dir)?;
        let file_name = format!(
            "{}_{}.{}",
            slug,
            Utc::now().format(BACKUP_TIMESTAMP_FORMAT),
            SNAPSHOT_EXTENSION
        );
        fs::copy(path, dir.join(file_name))?;
        for stale in self.list_backups(name)?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl SnapshotSource for JsonSnapshotStorage {
    fn load_snapshot(&self, name: &str) -> Result<Snapshot, CoreError> {
        load_snapshot_from_path(&self.snapshot_path(name))
    }

    fn save_snapshot(&self, name: &str, snapshot: &Snapshot) -> Result<PathBuf, CoreError> {
        let path = self.snapshot_path(name);
        self.backup_existing(name, &path)?;
        save_snapshot_to_path(snapshot, &path)?;
        Ok(path)
    }

    fn list_snapshots(&self) -> Result<Vec<SnapshotInfo>, CoreError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.snapshots_dir)? {
            let path = entry?.path();
            if !path.is_file() || !has_snapshot_extension(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let snapshot = load_snapshot_from_path(&path)?;
            entries.push(SnapshotInfo {
                name: stem.to_string(),
                payments: snapshot.payment_count(),
                path: path.clone(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn load_snapshot_from_path(&self, path: &Path) -> Result<Snapshot, CoreError> {
        load_snapshot_from_path(path)
    }

    fn save_snapshot_to_path(&self, snapshot: &Snapshot, path: &Path) -> Result<(), CoreError> {
        if path.starts_with(&self.snapshots_dir) {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                self.backup_existing(stem, path)?;
            }
        }
        save_snapshot_to_path(snapshot, path)
    }
}

/// Writes a snapshot to `path` through a temporary sibling and a rename.
pub fn save_snapshot_to_path(snapshot: &Snapshot, path: &Path) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), "snapshot saved");
    Ok(())
}

/// Loads a snapshot from any JSON file on disk.
pub fn load_snapshot_from_path(path: &Path) -> Result<Snapshot, CoreError> {
    let data = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => CoreError::SnapshotNotFound(path.display().to_string()),
        _ => CoreError::Io(err),
    })?;
    let snapshot: Snapshot =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    debug!(
        path = %path.display(),
        payments = snapshot.payment_count(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "snapshot".into()
    } else {
        sanitized
    }
}

fn has_snapshot_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SNAPSHOT_EXTENSION)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_replaces_unsafe_characters() {
        assert_eq!(canonical_name("  May 2024 / Final "), "may_2024___final");
        assert_eq!(canonical_name("fy-24"), "fy-24");
        assert_eq!(canonical_name("***"), "snapshot");
    }
}
