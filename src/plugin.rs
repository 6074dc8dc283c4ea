//! What the plugin tells Directory Opus about itself and about a file.
//!
//! These are plain Rust values; `abi` copies them into the host's structs.

use crate::keys;

/// `DVPFIF_*` flag bits shared by the plugin and file info structs.
pub mod flags {
    pub const CAN_RETURN_BITMAP: u32 = 1 << 0;
    pub const CAN_RETURN_VIEWER: u32 = 1 << 1;
    pub const CAN_RETURN_THUMBNAIL: u32 = 1 << 2;
    pub const CAN_SHOW_ABOUT: u32 = 1 << 3;
    pub const CAN_CONFIGURE: u32 = 1 << 4;
    pub const EXTENSIONS_ONLY: u32 = 1 << 5;
    pub const EXTENSIONS_ONLY_IF_SLOW: u32 = 1 << 6;
    pub const EXTENSIONS_ONLY_IF_NO_RND_SEEK: u32 = 1 << 7;
    pub const EXTENSIONS_ONLY_FOR_THUMBNAILS: u32 = 1 << 8;
    pub const NO_THUMBNAIL_BORDER: u32 = 1 << 9;
    pub const ZERO_BYTES_OK: u32 = 1 << 10;
    pub const NO_FILE_INFORMATION: u32 = 1 << 11;
    pub const INFO_ONLY: u32 = 1 << 12;
    pub const USE_VERSION_RESOURCE: u32 = 1 << 13;
    pub const CATCH_ALL: u32 = 1 << 14;
    pub const NEED_RANDOM_SEEK: u32 = 1 << 15;
    pub const CAN_HANDLE_STREAMS: u32 = 1 << 16;
    pub const CAN_HANDLE_BYTES: u32 = 1 << 17;
    pub const DEFAULT_CATCH_ALL: u32 = 1 << 18;
    pub const NO_SLIDESHOW: u32 = 1 << 19;
    pub const NO_MULTITHREAD_THUMBNAILS: u32 = 1 << 20;
}

/// `DVPMajorType_*`
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MajorType {
    Image = 0,
    Sound = 1,
    Text = 2,
    Other = 3,
    Movie = 4,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginInfo {
    pub flags: u32,
    pub version_high: u32,
    pub version_low: u32,
    pub handle_exts: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub copyright: &'static str,
    pub min_file_size: u64,
    pub major_type: MajorType,
    pub id: u128,
}

impl PluginInfo {
    pub fn jpeg_xl() -> Self {
        let (version_high, version_low) = keys::version_dwords();
        Self {
            flags: flags::EXTENSIONS_ONLY | flags::NEED_RANDOM_SEEK | flags::NO_MULTITHREAD_THUMBNAILS,
            version_high,
            version_low,
            handle_exts: keys::HANDLED_EXTS,
            name: keys::PLUGIN_NAME,
            description: keys::PLUGIN_DESCRIPTION,
            copyright: keys::PLUGIN_COPYRIGHT,
            min_file_size: keys::MIN_FILE_SIZE,
            major_type: MajorType::Image,
            id: keys::PLUGIN_ID,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub flags: u32,
    pub major_type: MajorType,
    pub minor_type: u16,
    pub width: u32,
    pub height: u32,
    pub num_bits: i32,
    pub info: String,
}

impl FileInfo {
    pub fn for_image(width: u32, height: u32) -> Self {
        Self {
            flags: flags::CAN_RETURN_BITMAP | flags::CAN_RETURN_VIEWER | flags::CAN_RETURN_THUMBNAIL,
            major_type: MajorType::Image,
            minor_type: 0,
            width,
            height,
            num_bits: 32,
            info: format!("{width} x {height} JPEG XL Image"),
        }
    }
}

/// `lstrcpyn` into a host buffer: at most `dst.len() - 1` UTF-16 units, then
/// NUL. Returns the number of units copied (without the terminator). An empty
/// `dst` is left alone.
pub fn copy_wide_truncated(src: &str, dst: &mut [u16]) -> usize {
    let Some(room) = dst.len().checked_sub(1) else {
        return 0;
    };
    let mut n = 0;
    for (slot, unit) in dst.iter_mut().zip(src.encode_utf16().take(room)) {
        *slot = unit;
        n += 1;
    }
    dst[n] = 0;
    n
}
