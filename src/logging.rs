use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// How many old session logs to keep around.
const KEEP_SESSIONS: usize = 10;

#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

/// Initialize debug logging.
///
/// When `debug` is enabled, each run writes to its own session file under
/// `~/.config/pixfind/` (e.g. `pixfind-debug.log.session-20260806-101500`),
/// and old sessions beyond [`KEEP_SESSIONS`] are removed.
/// When `debug` is disabled, this is a no-op.
pub fn init(config: &crate::config::Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let base = match config.debug_log_path.as_deref() {
        Some(raw) => PathBuf::from(raw),
        None => default_log_path()?,
    };
    let (dir, base_name) = split_dir_and_name(&base)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    // Clean up before opening a new writer to keep the directory tidy.
    cleanup_session_logs(&dir, &base_name, KEEP_SESSIONS)?;

    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let session_path = dir.join(format!("{base_name}.session-{ts}"));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&session_path)
        .with_context(|| format!("Failed to open log file: {}", session_path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    // Default: debug our crate, warn for everything else.
    let filter =
        EnvFilter::try_new("pixfind=debug,warn").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // If already initialized (e.g., in tests), don't crash.

    tracing::info!(log_file = %session_path.display(), "debug logging enabled");

    Ok(Some(LogGuard(guard)))
}

fn default_log_path() -> Result<PathBuf> {
    let config_path = crate::config::config_path()?;
    Ok(config_path.with_file_name("pixfind-debug.log"))
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

fn cleanup_session_logs(dir: &Path, base_name: &str, keep: usize) -> Result<()> {
    if keep == 0 {
        return Ok(());
    }

    let prefix = format!("{base_name}.session-");

    let mut candidates: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
    {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else { continue };
        if name.starts_with(&prefix) {
            candidates.push(name.to_string());
        }
    }

    candidates.sort();
    candidates.reverse(); // newest first (lexicographic works for the timestamp suffix)

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}

/// Mask API keys carried in query strings (`key=...`) before a URL or error
/// body reaches a log line. Pixabay is the only provider whose key travels
/// in the URL.
pub fn redact_key_params(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut last = 0usize;
    let mut i = 0usize;

    while i < input.len() {
        let at_param_start = i == 0 || matches!(bytes[i - 1], b'?' | b'&');
        if at_param_start && input[i..].starts_with("key=") {
            let mut j = i + 4;
            while j < input.len() && !matches!(bytes[j], b'&' | b'#' | b' ' | b'"') {
                j += 1;
            }

            out.push_str(&input[last..i]);
            out.push_str("key=***REDACTED***");
            last = j;
            i = j;
            continue;
        }

        let ch = input[i..].chars().next().unwrap();
        i += ch.len_utf8();
    }

    out.push_str(&input[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_key_query_param() {
        let url = "https://pixabay.com/api/?key=52415389-secret&q=nature&per_page=12";
        assert_eq!(
            redact_key_params(url),
            "https://pixabay.com/api/?key=***REDACTED***&q=nature&per_page=12"
        );
    }

    #[test]
    fn test_leaves_other_params_alone() {
        let url = "https://api.example.com/?q=monkey&donkey=1";
        assert_eq!(redact_key_params(url), url);
    }

    #[test]
    fn test_does_not_match_inside_words() {
        let text = "the turkey=stuffed one";
        assert_eq!(redact_key_params(text), text);
    }
}
