//! File logging for style composition.
//!
//! Only records from the style crates are written, so a host application
//! that routes its own logging elsewhere does not flood the composition log.

use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::fs::OpenOptions;
use std::io::Write;

/// Log targets that reach the file.
const TARGETS: [&str; 3] = ["stylecomp", "feed_styles", "feedstyle"];

struct FileLogger {
    file_path: String,
    level: LevelFilter,
}

impl FileLogger {
    fn accepts_target(target: &str) -> bool {
        TARGETS.iter().any(|crate_name| {
            target
                .strip_prefix(crate_name)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
        })
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && Self::accepts_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)
            {
                let _ = writeln!(
                    file,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

/// Routes composition logging at `level` and above to a file. Fails if a
/// logger is already installed.
pub fn init_logger_with_level(path: &str, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = FileLogger {
        file_path: path.to_string(),
        level,
    };
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

/// [`init_logger_with_level`] at `Debug`.
pub fn init_logger(path: &str) -> Result<(), SetLoggerError> {
    init_logger_with_level(path, LevelFilter::Debug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log};

    fn metadata(level: Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn filters_by_level_and_crate() {
        let logger = FileLogger {
            file_path: String::new(),
            level: LevelFilter::Info,
        };
        assert!(logger.enabled(&metadata(Level::Warn, "stylecomp::theme")));
        assert!(logger.enabled(&metadata(Level::Info, "feed_styles")));
        assert!(!logger.enabled(&metadata(Level::Debug, "stylecomp::composite")));
        assert!(!logger.enabled(&metadata(Level::Error, "hyper::client")));
        assert!(!logger.enabled(&metadata(Level::Error, "stylecompiler")));
    }

    #[test]
    fn writes_level_target_and_message() {
        let path = std::env::temp_dir().join(format!("feed-styles-unit-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let logger = FileLogger {
            file_path: path.to_string_lossy().to_string(),
            level: LevelFilter::Trace,
        };

        logger.log(
            &Record::builder()
                .level(Level::Trace)
                .target("stylecomp::parser::cascade")
                .args(format_args!("cascade for <div>"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("other")
                .args(format_args!("dropped"))
                .build(),
        );

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[TRACE] stylecomp::parser::cascade: cascade for <div>\n");
        let _ = std::fs::remove_file(&path);
    }
}
