//! Tests for the logger module

use crate::logger::config::*;
use crate::logger::rotation::backup_path;
use crate::logger::writer::RotatingFileWriter;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;

fn console_only() -> LoggerConfig {
    LoggerConfig {
        console: ConsoleConfig::new(true, false),
        file: FileConfig {
            enabled: false,
            path: PathBuf::from("test.log"),
            append: true,
            format: LogFormat::Full,
            rotation: RotationConfig::default(),
        },
        level: "info".to_string(),
    }
}

fn file_config(path: PathBuf, append: bool, max_size: u64, max_files: usize) -> FileConfig {
    FileConfig {
        enabled: true,
        path,
        append,
        format: LogFormat::Json,
        rotation: RotationConfig {
            max_size,
            max_files,
        },
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_both_outputs_disabled_fails() {
        let mut config = console_only();
        assert!(config.validate().is_ok());

        config.console.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_envfilter_directives_accept_base_level() {
        let mut config = console_only();
        config.level = "debug,diesel=warn,hyper=info".to_string();
        assert_eq!(config.parse_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_enabled_file_needs_path() {
        let mut config = console_only();
        config.file.enabled = true;
        config.file.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Full);
        assert_eq!(LogFormat::Compact.as_str(), "compact");
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_invalid_levels_fail(level in "[a-z]{1,10}") {
            prop_assume!(!["trace", "debug", "info", "warn", "error"].contains(&level.as_str()));
            let mut config = console_only();
            config.level = level;
            prop_assert!(config.validate().is_err());
        }

        #[test]
        fn prop_zero_rotation_values_fail(max_size in 0u64..2u64, max_files in 0usize..2usize) {
            let result = RotationConfig::new(max_size, max_files);
            prop_assert_eq!(result.is_ok(), max_size > 0 && max_files > 0);
        }
    }
}

mod writer_tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writer_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), true, 1024, 2)).unwrap();

        writer.make_writer().write_all(b"hello\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_writer_truncates_when_not_appending() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "old contents\n").unwrap();

        let writer = RotatingFileWriter::new(&file_config(path.clone(), false, 1024, 2)).unwrap();
        writer.make_writer().write_all(b"new\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_writer_rotates_when_full() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), true, 10, 2)).unwrap();

        for line in ["aaaaaaaa\n", "bbbbbbbb\n", "cccccccc\n", "dddddddd\n"] {
            writer.make_writer().write_all(line.as_bytes()).unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dddddddd\n");
        assert_eq!(
            std::fs::read_to_string(backup_path(&path, 1)).unwrap(),
            "cccccccc\n"
        );
        assert_eq!(
            std::fs::read_to_string(backup_path(&path, 2)).unwrap(),
            "bbbbbbbb\n"
        );
        assert!(!backup_path(&path, 3).exists());
    }
}
