use crate::settings::ViewerSettings;
use crate::{LOG_PATH, keys};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Logs and never fails; write errors go to stderr.
pub fn log_cli(message: impl Into<String>) {
    let text = message.into();
    if let Err(err) = log_desktop(&text) {
        eprintln!("[log] cannot write '{}': {}", text, err);
    }
}

/// Logs and echoes to stdout (helper tool only).
pub fn log_ui(message: impl AsRef<str>) {
    let msg = message.as_ref();
    log_cli(msg);
    println!("{msg}");
}

pub fn log_desktop(message: impl AsRef<str>) -> Result<(), String> {
    if !log_enabled() {
        return Ok(());
    }
    let path = LOG_PATH.as_ref().map_err(|err| err.clone())?;
    append_line(path, message.as_ref())
}

/// Appends one timestamped line to `path`, creating parent directories.
pub fn append_line(path: &std::path::Path, message: &str) -> Result<(), String> {
    use chrono::Local;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("failed to open {}: {}", path.display(), e))?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    writeln!(file, "[{}] {}", timestamp, message)
        .map_err(|e| format!("failed to write to {}: {}", path.display(), e))?;

    Ok(())
}

pub fn log_enabled() -> bool {
    ViewerSettings::load().logging
}

/// `%LOCALAPPDATA%\jxl-dopus-viewer\viewer.log`
pub(crate) fn resolve_log_path() -> Result<PathBuf, String> {
    let base = std::env::var_os("LOCALAPPDATA")
        .map(PathBuf::from)
        .ok_or_else(|| "LOCALAPPDATA is not set".to_string())?;
    Ok(base.join(keys::LOG_DIR_NAME).join(keys::LOG_FILE_NAME))
}
