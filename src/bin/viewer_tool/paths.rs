use jxl_dopus_viewer::keys::DLL_FILE_NAME;
use std::path::PathBuf;
use std::{env, io};

/// `%APPDATA%\GPSoftware\Directory Opus\Viewers` (the `/dopusdata/Viewers` alias).
pub fn opus_viewers_dir() -> io::Result<PathBuf> {
    let appdata = env::var_os("APPDATA")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "APPDATA is not set"))?;
    Ok(PathBuf::from(appdata)
        .join("GPSoftware")
        .join("Directory Opus")
        .join("Viewers"))
}

/// The plugin DLL shipped next to this executable.
pub fn bundled_dll() -> io::Result<PathBuf> {
    let exe = env::current_exe()?;
    Ok(exe.with_file_name(DLL_FILE_NAME))
}

pub fn installed_dll() -> io::Result<PathBuf> {
    Ok(opus_viewers_dir()?.join(DLL_FILE_NAME))
}
