//! `#[repr(C)]` mirrors of the Directory Opus viewer plugin structs.
//!
//! Only the leading fields the plugin reads or writes are declared; the host
//! owns the allocation and reports its real size in `cb_size`.

use crate::plugin::{FileInfo, PluginInfo, copy_wide_truncated};
use windows::Win32::Foundation::{HWND, SIZE};
use windows_core::{GUID, PWSTR};

/// `VIEWERPLUGININFOW`
#[repr(C)]
pub struct ViewerPluginInfoW {
    pub cb_size: u32,
    pub dw_flags: u32,
    pub dw_version_high: u32,
    pub dw_version_low: u32,
    pub lpsz_handle_exts: PWSTR,
    pub lpsz_name: PWSTR,
    pub lpsz_description: PWSTR,
    pub lpsz_copyright: PWSTR,
    pub lpsz_url: PWSTR,
    pub cch_handle_exts_max: u32,
    pub cch_name_max: u32,
    pub cch_description_max: u32,
    pub cch_copyright_max: u32,
    pub cch_url_max: u32,
    pub dwl_min_file_size: u64,
    pub dwl_min_preview_file_size: u64,
    pub ui_major_file_type: u32,
    pub id_plugin: GUID,
}

/// `VIEWERPLUGINFILEINFOW`
#[repr(C)]
pub struct ViewerPluginFileInfoW {
    pub cb_size: u32,
    pub dw_flags: u32,
    pub w_major_type: u16,
    pub w_minor_type: u16,
    pub sz_image_size: SIZE,
    pub i_num_bits: i32,
    pub lpsz_info: PWSTR,
    pub cch_info_max: u32,
    pub dw_private_flags: u32,
}

/// `DVPINITEXDATA`
#[repr(C)]
pub struct DvpInitExData {
    pub cb_size: u32,
    pub hwnd_dopus_msg_window: HWND,
    pub dw_opus_ver_major: u32,
    pub dw_opus_ver_minor: u32,
    pub psz_language_name: PWSTR,
}

/// `OPUSUSBSAFEDATA`
#[repr(C)]
pub struct OpusUsbSafeData {
    pub cb_size: u32,
    pub psz_other_exports: PWSTR,
    pub cch_other_exports: u32,
}

/// Copies `text` into a host-owned buffer of `cch` UTF-16 units.
///
/// # Safety
/// `dst` must be null or point to at least `cch` writable units.
unsafe fn write_wide(dst: PWSTR, cch: u32, text: &str) {
    if dst.is_null() || cch == 0 {
        return;
    }
    let buf = unsafe { std::slice::from_raw_parts_mut(dst.0, cch as usize) };
    copy_wide_truncated(text, buf);
}

/// Fills the host's plugin info. `false` when the host struct is too small.
///
/// # Safety
/// All string pointers in `dst` must honour their `cch*Max` sizes.
pub unsafe fn write_plugin_info(dst: &mut ViewerPluginInfoW, info: &PluginInfo) -> bool {
    if (dst.cb_size as usize) < size_of::<ViewerPluginInfoW>() {
        return false;
    }
    dst.dw_flags = info.flags;
    dst.dw_version_high = info.version_high;
    dst.dw_version_low = info.version_low;
    unsafe {
        write_wide(dst.lpsz_handle_exts, dst.cch_handle_exts_max, info.handle_exts);
        write_wide(dst.lpsz_name, dst.cch_name_max, info.name);
        write_wide(dst.lpsz_description, dst.cch_description_max, info.description);
        write_wide(dst.lpsz_copyright, dst.cch_copyright_max, info.copyright);
    }
    dst.dwl_min_file_size = info.min_file_size;
    dst.ui_major_file_type = info.major_type as u32;
    dst.id_plugin = GUID::from_u128(info.id);
    true
}

/// Fills the host's file info. `false` when the host struct is too small.
///
/// # Safety
/// `dst.lpsz_info` must be null or hold `dst.cch_info_max` units.
pub unsafe fn write_file_info(dst: &mut ViewerPluginFileInfoW, info: &FileInfo) -> bool {
    if (dst.cb_size as usize) < size_of::<ViewerPluginFileInfoW>() {
        return false;
    }
    dst.dw_flags = info.flags;
    dst.w_major_type = info.major_type as u16;
    dst.w_minor_type = info.minor_type;
    dst.sz_image_size = SIZE {
        cx: info.width as i32,
        cy: info.height as i32,
    };
    dst.i_num_bits = info.num_bits;
    unsafe { write_wide(dst.lpsz_info, dst.cch_info_max, &info.info) };
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use crate::plugin::MajorType;

    fn wide_str(buf: &[u16]) -> String {
        let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
        String::from_utf16_lossy(&buf[..end])
    }

    #[test]
    fn plugin_info_respects_the_host_size() {
        let mut name = [0u16; 32];
        let mut exts = [0u16; 32];
        let mut dst: ViewerPluginInfoW = unsafe { std::mem::zeroed() };
        dst.lpsz_name = PWSTR(name.as_mut_ptr());
        dst.cch_name_max = name.len() as u32;
        dst.lpsz_handle_exts = PWSTR(exts.as_mut_ptr());
        dst.cch_handle_exts_max = exts.len() as u32;
        let info = PluginInfo::jpeg_xl();

        dst.cb_size = size_of::<ViewerPluginInfoW>() as u32 - 4;
        assert!(!unsafe { write_plugin_info(&mut dst, &info) });
        assert_eq!(dst.dw_flags, 0);
        assert_eq!(name[0], 0);

        dst.cb_size = size_of::<ViewerPluginInfoW>() as u32;
        assert!(unsafe { write_plugin_info(&mut dst, &info) });
        assert_eq!(dst.dw_flags, info.flags);
        assert_eq!(dst.dwl_min_file_size, 100);
        assert_eq!(dst.ui_major_file_type, MajorType::Image as u32);
        assert_eq!(dst.id_plugin, GUID::from_u128(keys::PLUGIN_ID));
        assert_eq!(wide_str(&name), "JPEG XL");
        assert_eq!(wide_str(&exts), ".jxl");
    }

    #[test]
    fn file_info_respects_the_host_size() {
        let mut text = [0u16; 8];
        let mut dst: ViewerPluginFileInfoW = unsafe { std::mem::zeroed() };
        dst.lpsz_info = PWSTR(text.as_mut_ptr());
        dst.cch_info_max = text.len() as u32;
        let info = FileInfo::for_image(640, 480);

        dst.cb_size = 8;
        assert!(!unsafe { write_file_info(&mut dst, &info) });
        assert_eq!(dst.i_num_bits, 0);

        dst.cb_size = size_of::<ViewerPluginFileInfoW>() as u32;
        assert!(unsafe { write_file_info(&mut dst, &info) });
        assert_eq!((dst.sz_image_size.cx, dst.sz_image_size.cy), (640, 480));
        assert_eq!(dst.i_num_bits, 32);
        assert_eq!(dst.w_major_type, MajorType::Image as u16);
        // Truncated to the host buffer, terminator included.
        assert_eq!(wide_str(&text), "640 x 4");
    }
}
