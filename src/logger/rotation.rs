//! Size-based rotation with numbered backups

use std::fs;
use std::path::{Path, PathBuf};

use crate::logger::config::RotationConfig;
use crate::logger::error::LoggerError;

/// Decides when the active log file is full and shifts backups
/// (`app.log` -> `app.log.1` -> `app.log.2` ...).
pub struct RotationManager {
    config: RotationConfig,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    /// True once writing `incoming` more bytes would push the file past `max_size`.
    pub fn should_rotate(&self, current_size: u64, incoming: usize) -> bool {
        current_size > 0 && current_size + incoming as u64 > self.config.max_size
    }

    /// Shift every backup up by one, dropping the one past `max_files`, then
    /// move the active file into slot 1.
    pub fn rotate(&self, current_path: &Path) -> Result<(), LoggerError> {
        let max = self.config.max_files;

        let oldest = backup_path(current_path, max);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..max).rev() {
            let from = backup_path(current_path, index);
            if from.exists() {
                fs::rename(&from, backup_path(current_path, index + 1))?;
            }
        }

        if current_path.exists() {
            fs::rename(current_path, backup_path(current_path, 1)).map_err(|e| {
                LoggerError::rotation(format!(
                    "failed to move {} aside: {}",
                    current_path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }
}

/// `<path>.<index>`
pub fn backup_path(base: &Path, index: usize) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn manager(max_size: u64, max_files: usize) -> RotationManager {
        RotationManager::new(RotationConfig {
            max_size,
            max_files,
        })
    }

    #[test]
    fn test_empty_file_never_rotates() {
        assert!(!manager(10, 3).should_rotate(0, 1000));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_rotation_triggers_past_max_size(
            current in 1u64..1_000_000u64,
            incoming in 0usize..10_000usize,
            max_size in 1u64..1_000_000u64,
        ) {
            let should = manager(max_size, 3).should_rotate(current, incoming);
            prop_assert_eq!(should, current + incoming as u64 > max_size);
        }
    }

    #[test]
    fn test_rotate_shifts_backups_and_caps_count() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("app.log");
        let rotation = manager(10, 2);

        for round in 0..4 {
            fs::write(&log, format!("round {}", round)).unwrap();
            rotation.rotate(&log).unwrap();
        }

        assert!(!log.exists());
        assert_eq!(fs::read_to_string(backup_path(&log, 1)).unwrap(), "round 3");
        assert_eq!(fs::read_to_string(backup_path(&log, 2)).unwrap(), "round 2");
        assert!(!backup_path(&log, 3).exists());
    }

    #[test]
    fn test_backup_path_appends_index() {
        let path = backup_path(Path::new("logs/app.log"), 3);
        assert_eq!(path, PathBuf::from("logs/app.log.3"));
    }
}
