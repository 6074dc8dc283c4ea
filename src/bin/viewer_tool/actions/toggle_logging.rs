use jxl_dopus_viewer::log::log_ui;
use std::io;

/* ============================================================================
Toggle runtime logging (per-user, HKCU).

Flips the per-user logging switch stored under:
  HKCU\{SETTINGS_SUBKEY}\{LOGGING_VALUE_NAME}  (DWORD: 1 = enabled, 0 = disabled)

When disabling, the current log file is removed on a best-effort basis.
The plugin reads the flag on every call, so no restart of Opus is needed.
============================================================================ */
#[cfg(windows)]
pub fn toggle_logging() -> io::Result<()> {
    use jxl_dopus_viewer::keys::{LOGGING_VALUE_NAME, SETTINGS_SUBKEY};
    use jxl_dopus_viewer::log::log_enabled;
    use std::fs;
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    let current = log_enabled();
    let target = !current;

    log_ui(format!(
        "Logging toggle: current = {}, target = {}",
        if current { "enabled" } else { "disabled" },
        if target { "enabled" } else { "disabled" }
    ));

    let root = RegKey::predef(HKEY_CURRENT_USER);
    let (key, _) = root.create_subkey(SETTINGS_SUBKEY)?;
    let value: u32 = if target { 1 } else { 0 };

    log_ui(format!(
        r"Writing HKCU\{} \ {} = {}",
        SETTINGS_SUBKEY, LOGGING_VALUE_NAME, value
    ));

    if let Err(err) = key.set_value(LOGGING_VALUE_NAME, &value) {
        if err.raw_os_error() == Some(5) {
            log_ui("Access denied when writing the HKCU logging flag. Review policy.");
        }
        return Err(err);
    }

    if !target {
        match jxl_dopus_viewer::log_file_path() {
            Some(path) if path.exists() => {
                log_ui(format!("Removing log file: {}", path.display()));
                match fs::remove_file(&path) {
                    Ok(()) => log_ui("Log file removed."),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        log_ui("Log file already absent.");
                    }
                    Err(e) => log_ui(format!("Failed to remove log file: {}", e)),
                }
            }
            Some(_) => log_ui("No log file to remove."),
            None => log_ui("Log file path is not configured."),
        }
    }

    log_ui(format!(
        "Logging is now {}.",
        if target { "ENABLED" } else { "DISABLED" }
    ));
    Ok(())
}

#[cfg(not(windows))]
pub fn toggle_logging() -> io::Result<()> {
    log_ui("Logging is controlled through the Windows registry; nothing to toggle here.");
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "registry settings require Windows",
    ))
}
