use std::io;
use std::path::PathBuf;

/// Everything that can stop a file from reaching the host as a bitmap.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} is too large ({size} bytes)", path.display())]
    FileTooLarge { path: PathBuf, size: u64 },

    #[error("short read on {}: expected {expected} bytes, got {actual}", path.display())]
    ShortRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("not a JPEG XL file")]
    NotJpegXl,

    #[error("decoder error: {0}")]
    Decoder(String),

    #[error("decoder wants more input, but all input was already provided")]
    Truncated,

    #[error("invalid out buffer size {actual}, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("image is {width}x{height}, larger than the {limit_megapixels} MP limit")]
    TooManyPixels {
        width: u32,
        height: u32,
        limit_megapixels: u32,
    },

    #[error("unsupported image: {0}")]
    Unsupported(String),

    #[error("decoder emitted {0} events without finishing")]
    DecoderStalled(usize),

    #[error("aborted by host")]
    Aborted,

    #[error("bitmap creation failed: {0}")]
    Bitmap(String),
}

impl ViewerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ViewerError::Io {
            path: path.into(),
            source,
        }
    }
}

/// `jxl-oxide` reports failures as boxed errors.
impl From<Box<dyn std::error::Error + Send + Sync + 'static>> for ViewerError {
    fn from(err: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        ViewerError::Decoder(err.to_string())
    }
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_decoder_errors_keep_their_message() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "bad TOC".into();
        let err = ViewerError::from(boxed);
        assert!(matches!(&err, ViewerError::Decoder(msg) if msg == "bad TOC"));
        assert_eq!(err.to_string(), "decoder error: bad TOC");
    }
}
