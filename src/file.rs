use crate::error::{Result, ViewerError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Host file sizes are signed 32-bit; anything at or beyond this is refused.
pub const MAX_FILE_SIZE: u64 = i32::MAX as u64;

/// Reads the whole file, refusing directories and oversized files.
pub fn load_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| ViewerError::io(path, e))?;
    let meta = file.metadata().map_err(|e| ViewerError::io(path, e))?;
    if !meta.is_file() {
        return Err(ViewerError::NotAFile(path.to_path_buf()));
    }

    let size = meta.len();
    if size >= MAX_FILE_SIZE {
        return Err(ViewerError::FileTooLarge {
            path: path.to_path_buf(),
            size,
        });
    }

    let expected = size as usize;
    let mut out = Vec::with_capacity(expected);
    file.read_to_end(&mut out)
        .map_err(|e| ViewerError::io(path, e))?;

    if out.len() != expected {
        return Err(ViewerError::ShortRead {
            path: path.to_path_buf(),
            expected,
            actual: out.len(),
        });
    }
    Ok(out)
}
