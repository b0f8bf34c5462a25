//! Timestamped zone file backups.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, ZoneError};

/// Default directory receiving zone backups.
pub const DEFAULT_BACKUP_DIR: &str = "/etc/bind/zone_backups";

/// Timestamp format appended to backup names (one-second resolution).
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Directory of `<basename>_<YYYYmmdd_HHMMSS>.bak` copies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    /// Use `dir` for backups; it is created on first use
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Backup directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the backup of `zone_file` taken at `now` would have
    #[must_use]
    pub fn backup_path(&self, zone_file: &Path, now: NaiveDateTime) -> PathBuf {
        self.dir.join(format!(
            "{}_{}.bak",
            basename(zone_file),
            now.format(STAMP_FORMAT)
        ))
    }

    /// Copy `zone_file` into the backup directory.
    ///
    /// Existing backups are never overwritten: a second backup within the
    /// same second gets a `_1`, `_2`, ... suffix after the stamp.
    pub fn create(&self, zone_file: &Path, now: NaiveDateTime) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ZoneError::io(&self.dir, e))?;

        let mut target = self.backup_path(zone_file, now);
        let mut seq = 0u32;
        while target.exists() {
            seq += 1;
            target = self.dir.join(format!(
                "{}_{}_{seq}.bak",
                basename(zone_file),
                now.format(STAMP_FORMAT)
            ));
        }
        std::fs::copy(zone_file, &target).map_err(|e| ZoneError::io(zone_file, e))?;

        info!(zone_file = %zone_file.display(), backup = %target.display(), "backup created");
        Ok(target)
    }

    /// Backups of `zone_file`, oldest first.
    ///
    /// A missing backup directory yields an empty list.
    pub fn list(&self, zone_file: &Path) -> Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ZoneError::io(&self.dir, e)),
        };

        let prefix = format!("{}_", basename(zone_file));
        let mut backups: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| is_backup_of(n, &prefix))
            })
            .collect();

        backups.sort_by_cached_key(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| backup_order(n, &prefix))
        });
        Ok(backups)
    }

    /// Most recent backup of `zone_file`, if any
    pub fn latest(&self, zone_file: &Path) -> Result<Option<PathBuf>> {
        Ok(self.list(zone_file)?.pop())
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "zone".to_string(), |n| n.to_string_lossy().into_owned())
}

fn is_backup_of(name: &str, prefix: &str) -> bool {
    backup_order(name, prefix).is_some()
}

/// Stamp and same-second sequence of a backup name, for ordering.
fn backup_order(name: &str, prefix: &str) -> Option<(NaiveDateTime, u32)> {
    let rest = name.strip_prefix(prefix)?.strip_suffix(".bak")?;
    let (stamp, seq) = match rest.get(15..) {
        Some("") => (rest, 0),
        Some(tail) => (&rest[..15], tail.strip_prefix('_')?.parse().ok()?),
        None => return None,
    };
    let at = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()?;
    Some((at, seq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_backup_name() {
        let store = BackupStore::new("/var/backups/zones");
        let path = store.backup_path(Path::new("/etc/bind/db.example.com"), at(9, 5, 7));
        assert_eq!(
            path,
            Path::new("/var/backups/zones/db.example.com_20240102_090507.bak")
        );
    }

    #[test]
    fn test_create_makes_directory_and_copies() {
        let dir = tempfile::tempdir().unwrap();
        let zone = dir.path().join("db.example.com");
        std::fs::write(&zone, "www\t3600\tIN\tA\t192.0.2.1\n").unwrap();

        let store = BackupStore::new(dir.path().join("nested/backups"));
        let backup = store.create(&zone, at(1, 2, 3)).unwrap();

        assert!(backup.ends_with("db.example.com_20240102_010203.bak"));
        assert_eq!(
            std::fs::read_to_string(&backup).unwrap(),
            "www\t3600\tIN\tA\t192.0.2.1\n"
        );
    }

    #[test]
    fn test_list_and_latest() {
        let dir = tempfile::tempdir().unwrap();
        let zone = dir.path().join("db.example.com");
        let other = dir.path().join("db.example.com.signed");
        std::fs::write(&zone, "a").unwrap();
        std::fs::write(&other, "b").unwrap();

        let store = BackupStore::new(dir.path().join("backups"));
        assert!(store.list(&zone).unwrap().is_empty());

        store.create(&zone, at(10, 0, 0)).unwrap();
        store.create(&zone, at(9, 0, 0)).unwrap();
        store.create(&other, at(11, 0, 0)).unwrap();

        let backups = store.list(&zone).unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].ends_with("db.example.com_20240102_090000.bak"));
        assert!(store
            .latest(&zone)
            .unwrap()
            .unwrap()
            .ends_with("db.example.com_20240102_100000.bak"));
    }

    #[test]
    fn test_same_second_backups_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let zone = dir.path().join("db.example.com");
        let store = BackupStore::new(dir.path().join("backups"));

        let mut taken = Vec::new();
        for content in ["first", "second", "third"] {
            std::fs::write(&zone, content).unwrap();
            taken.push(store.create(&zone, at(8, 0, 0)).unwrap());
        }
        store.create(&zone, at(7, 59, 59)).unwrap();

        assert!(taken[0].ends_with("db.example.com_20240102_080000.bak"));
        assert!(taken[1].ends_with("db.example.com_20240102_080000_1.bak"));
        assert_eq!(std::fs::read_to_string(&taken[0]).unwrap(), "first");
        assert_eq!(std::fs::read_to_string(&taken[2]).unwrap(), "third");

        let backups = store.list(&zone).unwrap();
        assert_eq!(backups.len(), 4);
        assert!(backups[0].ends_with("db.example.com_20240102_075959.bak"));
        assert_eq!(&backups[1..], taken.as_slice());
        assert_eq!(store.latest(&zone).unwrap().as_ref(), taken.last());
    }

    #[test]
    fn test_missing_zone_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackupStore::new(dir.path());
        let err = store.create(&dir.path().join("absent"), at(0, 0, 0)).unwrap_err();
        assert!(matches!(err, ZoneError::Io { .. }));
    }
}
