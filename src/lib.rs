pub mod bitmap;
pub mod decode;
pub mod error;
pub mod file;
pub mod keys;
pub mod log;
pub mod pixels;
pub mod plugin;
pub mod settings;
pub mod signature;
pub mod viewer;

#[cfg(windows)]
mod abi;
#[cfg(windows)]
mod dll_export;

use std::path::PathBuf;
use std::sync::LazyLock;

pub use error::{Result, ViewerError};
pub use log::log_desktop;

/// Where the plugin log goes, when logging is switched on.
pub static LOG_PATH: LazyLock<Result<PathBuf, String>> = LazyLock::new(log::resolve_log_path);

/// Log file path if it can be resolved on this machine.
pub fn log_file_path() -> Option<PathBuf> {
    LOG_PATH.as_ref().ok().cloned()
}
