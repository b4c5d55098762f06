use rust_i18n::t;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::LogConfig;
use crate::constants::LOG_FILE_NAME;
use crate::error::AppError;

/// Shortens source paths in log lines: project files keep `src/...`, crates
/// from the cargo registry lose the registry prefix.
fn simplify_file_path(file_path: &str) -> String {
    if file_path.contains("collect-and-run") || file_path.contains("collect_and_run") {
        if let Some(pos) = file_path.rfind("src/") {
            return file_path[pos..].to_string();
        }
    }

    match file_path.split_once(".cargo/registry/src/") {
        Some((_, suffix)) => match suffix.find('/') {
            Some(first_slash) => suffix[(first_slash + 1)..].to_string(),
            None => suffix.to_string(),
        },
        None => file_path.to_string(),
    }
}

/// Compact, colored console format: `HH:MM:SS.mmm [L] file:line message`.
pub fn console_log_formatter(
    out: fern::FormatCallback,
    message: &std::fmt::Arguments,
    record: &log::Record,
) {
    let level_color = match record.level() {
        log::Level::Error => "\x1B[31m",
        log::Level::Warn => "\x1B[33m",
        log::Level::Info => "\x1B[32m",
        log::Level::Debug => "\x1B[0m",
        log::Level::Trace => "\x1B[35m",
    };

    out.finish(format_args!(
        "{}{}[{}] {}:{} {}\x1B[0m",
        level_color,
        chrono::Local::now().format("%H:%M:%S.%3f "),
        level_tag(record.level()),
        simplify_file_path(record.file().unwrap_or("")),
        record.line().unwrap_or(0),
        message,
    ))
}

/// File format with the full date and no color codes.
pub fn file_log_formatter(
    out: fern::FormatCallback,
    message: &std::fmt::Arguments,
    record: &log::Record,
) {
    out.finish(format_args!(
        "{}[{}] {}:{} {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        level_tag(record.level()),
        simplify_file_path(record.file().unwrap_or("")),
        record.line().unwrap_or(0),
        message
    ))
}

/// Records from this crate pass at any enabled level; everything else only
/// at warn and above.
fn is_own_or_important(record: &log::Metadata) -> bool {
    record.target().starts_with("collect_and_run") || record.level() <= log::Level::Warn
}

/// Installs the global logger: console plus `<log_dir>/collect-and-run.log`.
///
/// Returns the path of the log file.
pub fn setup_logger(config: &LogConfig, log_dir: &Path) -> Result<PathBuf, AppError> {
    let level = config.level_filter()?;

    std::fs::create_dir_all(log_dir).map_err(|e| AppError::Logger {
        message: t!(
            "main.failed_to_create_log_directory",
            path = log_dir.display().to_string(),
            error = e.to_string()
        )
        .to_string(),
    })?;

    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let file_error = |e: std::io::Error| AppError::Logger {
        message: t!(
            "main.failed_to_create_log_file",
            path = log_file_path.display().to_string(),
            error = e.to_string()
        )
        .to_string(),
    };
    // start every run with an empty file
    File::create(&log_file_path).map_err(&file_error)?;
    let log_file = fern::log_file(&log_file_path).map_err(&file_error)?;

    let stdout_dispatcher = fern::Dispatch::new()
        .filter(|metadata| is_own_or_important(metadata))
        .format(console_log_formatter)
        .chain(std::io::stdout());

    let file_dispatcher = fern::Dispatch::new()
        .level(level.min(log::LevelFilter::Info))
        .filter(|metadata| is_own_or_important(metadata))
        .format(file_log_formatter)
        .chain(log_file);

    fern::Dispatch::new()
        .level(level)
        .chain(stdout_dispatcher)
        .chain(file_dispatcher)
        .apply()
        .map_err(|e| AppError::Logger {
            message: t!("main.failed_to_initialize_logger", error = e.to_string()).to_string(),
        })?;

    log::debug!("Logger initialized, log file: {}", log_file_path.display());
    Ok(log_file_path)
}

fn level_tag(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "E",
        log::Level::Warn => "W",
        log::Level::Info => "I",
        log::Level::Debug => "D",
        log::Level::Trace => "T",
    }
}

/// Console-only logger for unit tests. Safe to call more than once.
#[cfg(test)]
pub fn setup_test_logger() -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(console_log_formatter)
        .level(log::LevelFilter::Trace)
        .filter(|metadata| is_own_or_important(metadata))
        .chain(std::io::stdout())
        .apply()?;

    log::debug!("Test logger initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_project_path() {
        assert_eq!(
            simplify_file_path("/home/dev/collect-and-run/src/updater/manager.rs"),
            "src/updater/manager.rs"
        );
    }

    #[test]
    fn test_simplify_registry_path() {
        assert_eq!(
            simplify_file_path(
                "/home/dev/.cargo/registry/src/index.crates.io-6f17d22bba15001f/sled-0.34.7/src/db.rs"
            ),
            "sled-0.34.7/src/db.rs"
        );
        assert_eq!(simplify_file_path("other/file.rs"), "other/file.rs");
    }

    #[test]
    fn test_level_tags() {
        assert_eq!(level_tag(log::Level::Warn), "W");
        assert_eq!(level_tag(log::Level::Trace), "T");
    }
}
