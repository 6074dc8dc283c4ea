//! Common constants for the JPEG XL viewer plugin.
//! Shared between the plugin DLL and the helper tool.

/// Plugin identifier reported to Directory Opus in `idPlugin`.
/// `{FA959248-AB91-4363-88B8-059C5D848824}`
pub const PLUGIN_ID: u128 = 0xFA959248_AB91_4363_88B8_059C5D848824;

/// Extensions handled by the plugin (semicolon separated, as the host expects).
pub const HANDLED_EXTS: &str = ".jxl";

/// Name shown in the viewer plugin list.
pub const PLUGIN_NAME: &str = "JPEG XL";

pub const PLUGIN_DESCRIPTION: &str = "JPEG XL Viewer Plugin";

pub const PLUGIN_COPYRIGHT: &str = "(c) Copyright 2022 Kuro68k";

/// Version number H.L.H.L (high word pair, low word pair).
pub const VERSION: [u16; 4] = [0, 0, 2, 0];

/// Files smaller than this are never offered to the plugin.
pub const MIN_FILE_SIZE: u64 = 100;

/// File name of the built plugin.
pub const DLL_FILE_NAME: &str = "jxl_dopus_viewer.dll";

/// Per-user and machine settings live under this subkey (HKCU first, then HKLM).
pub const SETTINGS_SUBKEY: &str = r"Software\jxl-dopus-viewer";

/// DWORD: 1 = write the log file, 0 = silent.
pub const LOGGING_VALUE_NAME: &str = "Logging";

/// DWORD: decoder worker threads, 0 = let the decoder decide.
pub const THREADS_VALUE_NAME: &str = "DecodeThreads";

/// DWORD: largest image (in megapixels) the plugin agrees to decode.
pub const MAX_MEGAPIXELS_VALUE_NAME: &str = "MaxMegapixels";

/// Directory (under `%LOCALAPPDATA%`) holding the log file.
pub const LOG_DIR_NAME: &str = "jxl-dopus-viewer";

pub const LOG_FILE_NAME: &str = "viewer.log";

/// Packs two 16-bit halves the way `MAKELPARAM(lo, hi)` does.
#[inline]
pub const fn make_lparam(lo: u16, hi: u16) -> u32 {
    (lo as u32) | ((hi as u32) << 16)
}

/// `dwVersionHigh` / `dwVersionLow` as written into the host struct.
#[inline]
pub const fn version_dwords() -> (u32, u32) {
    (
        make_lparam(VERSION[0], VERSION[1]),
        make_lparam(VERSION[2], VERSION[3]),
    )
}

/// Returns `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}` (uppercase, with braces).
pub fn guid_braced_upper(g: u128) -> String {
    let bytes = g.to_be_bytes();
    format!(
        "{{{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}}}",
        (g >> 96) as u32,
        (g >> 80) as u16,
        (g >> 64) as u16,
        bytes[8],
        bytes[9],
        bytes[10],
        bytes[11],
        bytes[12],
        bytes[13],
        bytes[14],
        bytes[15]
    )
}

/// `{PLUGIN_ID}` as a braced uppercase string.
#[inline]
pub fn plugin_id_str() -> String {
    guid_braced_upper(PLUGIN_ID)
}
