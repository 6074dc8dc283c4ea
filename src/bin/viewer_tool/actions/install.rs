use crate::paths::{bundled_dll, installed_dll};
use jxl_dopus_viewer::log::log_ui;
use std::{fs, io};

/// Copies the plugin DLL into the Opus `Viewers` folder. Opus picks it up on
/// the next start (or after Preferences / Viewer Plugins / Refresh).
pub fn install() -> io::Result<()> {
    let src = bundled_dll()?;
    if !src.is_file() {
        log_ui(format!("Plugin DLL not found next to the tool: {}", src.display()));
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is missing", src.display()),
        ));
    }

    let dst = installed_dll()?;
    if let Some(dir) = dst.parent() {
        log_ui(format!("Install: ensuring directory {}", dir.display()));
        fs::create_dir_all(dir)?;
    }

    log_ui(format!("Install: copying {} -> {}", src.display(), dst.display()));
    match fs::copy(&src, &dst) {
        Ok(bytes) => log_ui(format!("Install: wrote {} bytes", bytes)),
        Err(err) if err.raw_os_error() == Some(32) => {
            // ERROR_SHARING_VIOLATION: Opus has the old plugin loaded.
            log_ui("Install: the plugin is in use. Close Directory Opus and try again.");
            return Err(err);
        }
        Err(err) => return Err(err),
    }

    log_ui("Installed. Restart Directory Opus to load the plugin.");
    Ok(())
}
