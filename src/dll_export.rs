use crate::abi::{
    DvpInitExData, OpusUsbSafeData, ViewerPluginFileInfoW, ViewerPluginInfoW, write_file_info,
    write_plugin_info,
};
use crate::bitmap::create_dib;
use crate::decode::AbortSignal;
use crate::log::log_cli;
use crate::viewer::{identify_file, identify_plugin, load_bitmap};
use std::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::atomic::{AtomicPtr, Ordering};
use windows::Win32::Foundation::{HANDLE, HINSTANCE, HMODULE, HWND, SIZE, WAIT_OBJECT_0};
use windows::Win32::Graphics::Gdi::HBITMAP;
use windows::Win32::System::LibraryLoader::GetModuleFileNameW;
use windows::Win32::System::SystemServices::DLL_PROCESS_ATTACH;
use windows::Win32::System::Threading::WaitForSingleObject;
use windows_core::{BOOL, PCWSTR};

static DLL_MODULE: AtomicPtr<c_void> = AtomicPtr::new(std::ptr::null_mut());

/// `hAbortEvent` from the host; signalled when the user moves on.
struct HostAbort(HANDLE);

impl AbortSignal for HostAbort {
    fn is_aborted(&self) -> bool {
        if self.0.is_invalid() {
            return false;
        }
        unsafe { WaitForSingleObject(self.0, 0) == WAIT_OBJECT_0 }
    }
}

/// Runs an export body, turning a panic into `fallback`.
fn guarded<T>(name: &str, fallback: T, body: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(_) => {
            log_cli(format!("{name}: panicked"));
            fallback
        }
    }
}

/// # Safety
/// `name` must be null or a NUL-terminated UTF-16 string.
unsafe fn path_from_host(name: PCWSTR) -> Option<PathBuf> {
    if name.is_null() {
        return None;
    }
    let s16 = unsafe { widestring::U16CStr::from_ptr_str(name.0) };
    Some(PathBuf::from(s16.to_os_string()))
}

fn module_path() -> Option<String> {
    let raw = DLL_MODULE.load(Ordering::Acquire);
    if raw.is_null() {
        return None;
    }
    let mut buf = [0u16; 1024];
    let len = unsafe { GetModuleFileNameW(Some(HMODULE(raw)), &mut buf) } as usize;
    (len > 0).then(|| String::from_utf16_lossy(&buf[..len]))
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DllMain(hinst: HINSTANCE, reason: u32, _reserved: *mut c_void) -> BOOL {
    if reason == DLL_PROCESS_ATTACH {
        DLL_MODULE.store(hinst.0, Ordering::Release);
    }
    BOOL::from(true)
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DVP_InitEx(data: *mut DvpInitExData) -> BOOL {
    guarded("DVP_InitEx", BOOL::from(false), || {
        let version = unsafe { data.as_ref() }
            .filter(|d| d.cb_size as usize >= size_of::<DvpInitExData>())
            .map(|d| format!("{}.{}", d.dw_opus_ver_major, d.dw_opus_ver_minor));
        log_cli(format!(
            "DVP_InitEx: opus={} module={}",
            version.as_deref().unwrap_or("<unknown>"),
            module_path().as_deref().unwrap_or("<unknown>")
        ));
        BOOL::from(true)
    })
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DVP_Uninit() {
    guarded("DVP_Uninit", (), || {
        log_cli("DVP_Uninit called");
    })
}

/// Nothing is stored on the machine except the opt-in log.
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DVP_USBSafe(_data: *mut OpusUsbSafeData) -> BOOL {
    BOOL::from(true)
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DVP_IdentifyW(info: *mut ViewerPluginInfoW) -> BOOL {
    guarded("DVP_IdentifyW", BOOL::from(false), || {
        let Some(dst) = (unsafe { info.as_mut() }) else {
            return BOOL::from(false);
        };
        let ok = unsafe { write_plugin_info(dst, &identify_plugin()) };
        if !ok {
            log_cli(format!("DVP_IdentifyW: host struct too small ({})", dst.cb_size));
        }
        BOOL::from(ok)
    })
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DVP_IdentifyFileW(
    _hwnd: HWND,
    name: PCWSTR,
    file_info: *mut ViewerPluginFileInfoW,
    abort_event: HANDLE,
) -> BOOL {
    guarded("DVP_IdentifyFileW", BOOL::from(false), || {
        let Some(path) = (unsafe { path_from_host(name) }) else {
            return BOOL::from(false);
        };
        let Some(dst) = (unsafe { file_info.as_mut() }) else {
            return BOOL::from(false);
        };

        match identify_file(&path, &HostAbort(abort_event)) {
            Ok(info) => BOOL::from(unsafe { write_file_info(dst, &info) }),
            Err(err) => {
                log_cli(format!("DVP_IdentifyFileW: {}: {}", path.display(), err));
                BOOL::from(false)
            }
        }
    })
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DVP_LoadBitmapW(
    _hwnd: HWND,
    name: PCWSTR,
    file_info: *mut ViewerPluginFileInfoW,
    _desired_size: *mut SIZE,
    abort_event: HANDLE,
) -> HBITMAP {
    guarded("DVP_LoadBitmapW", HBITMAP::default(), || {
        let Some(path) = (unsafe { path_from_host(name) }) else {
            return HBITMAP::default();
        };

        let (image, info) = match load_bitmap(&path, &HostAbort(abort_event)) {
            Ok(pair) => pair,
            Err(err) => {
                log_cli(format!("DVP_LoadBitmapW: {}: {}", path.display(), err));
                return HBITMAP::default();
            }
        };

        if let Some(dst) = unsafe { file_info.as_mut() } {
            let _ = unsafe { write_file_info(dst, &info) };
        }

        match create_dib(&image) {
            Ok(hbmp) => hbmp,
            Err(err) => {
                log_cli(format!("DVP_LoadBitmapW: {}: {}", path.display(), err));
                HBITMAP::default()
            }
        }
    })
}
