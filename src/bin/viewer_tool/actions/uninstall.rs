use crate::paths::installed_dll;
use jxl_dopus_viewer::log::log_ui;
use std::{fs, io};

pub fn uninstall() -> io::Result<()> {
    let dst = installed_dll()?;
    match fs::remove_file(&dst) {
        Ok(()) => log_ui(format!("Uninstall: removed {}", dst.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log_ui(format!("Uninstall: nothing at {}", dst.display()));
        }
        Err(e) => {
            log_ui(format!("Uninstall: cannot remove {}: {}", dst.display(), e));
            return Err(e);
        }
    }
    Ok(())
}
