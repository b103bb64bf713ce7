// Logger setup plus conditional logging macros - the macros are only active
// in debug builds

use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

const LOG_DIR: &str = "detective-quest";
const LOG_FILE: &str = "detective-quest.log";

/// Where the log file goes when stderr is unavailable (full-screen mode).
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(LOG_DIR).join(LOG_FILE))
}

/// Installs `env_logger`. `RUST_LOG` wins over `verbose`.
///
/// With `to_file` set, records are appended to [`log_file_path`] instead of
/// stderr. Calling this twice is harmless.
pub fn init_logging(verbose: bool, to_file: bool) -> io::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if to_file && let Some(path) = log_file_path() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = File::options().create(true).append(true).open(&path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();
    Ok(())
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_shape() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("detective-quest/detective-quest.log"));
        }
    }

    #[test]
    fn test_init_logging_twice() {
        assert!(init_logging(false, false).is_ok());
        assert!(init_logging(true, false).is_ok());
        debug_log!("logging initialised for tests");
    }
}
