use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILE: &str = "boardql.log";

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("boardql={}", level)
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to a log file. Files rotate daily and hold
///   JSON lines; stderr always gets the compact human format.
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if let Some(log_path) = log_file {
        let (dir, file_name) = split_log_path(&log_path);
        let _ = std::fs::create_dir_all(&dir);
        let file_appender = tracing_appender::rolling::daily(dir, file_name);

        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json();

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }
}

fn split_log_path(log_path: &Path) -> (PathBuf, PathBuf) {
    let dir = match log_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = log_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "boardql=info");
        assert_eq!(default_directive(true), "boardql=debug");
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/boardql/server.log"));
        assert_eq!(dir, PathBuf::from("/var/log/boardql"));
        assert_eq!(name, PathBuf::from("server.log"));

        let (dir, name) = split_log_path(Path::new("server.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, PathBuf::from("server.log"));
    }
}
