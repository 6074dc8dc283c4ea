//! Runtime settings stored in the registry.
//!
//! Values are DWORDs under `HKCU\{SETTINGS_SUBKEY}`, falling back to
//! `HKLM\{SETTINGS_SUBKEY}` value by value. Anything missing keeps its default.

use crate::keys::{LOGGING_VALUE_NAME, MAX_MEGAPIXELS_VALUE_NAME, THREADS_VALUE_NAME};

pub const DEFAULT_MAX_MEGAPIXELS: u32 = 256;

/// Registry values above this are clamped. 1024 MP of RGBA8 is already 4 GiB.
pub const MAX_MEGAPIXELS_CEILING: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerSettings {
    pub logging: bool,
    /// `None` lets the decoder pick its own worker count.
    pub decode_threads: Option<usize>,
    pub max_megapixels: u32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            logging: false,
            decode_threads: None,
            max_megapixels: DEFAULT_MAX_MEGAPIXELS,
        }
    }
}

impl ViewerSettings {
    /// Builds settings from a value lookup (`name -> DWORD`).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<u32>,
    {
        let mut out = Self::default();
        if let Some(v) = lookup(LOGGING_VALUE_NAME) {
            out.logging = v != 0;
        }
        if let Some(v) = lookup(THREADS_VALUE_NAME) {
            out.decode_threads = (v != 0).then_some(v as usize);
        }
        if let Some(v) = lookup(MAX_MEGAPIXELS_VALUE_NAME) {
            if v != 0 {
                out.max_megapixels = v.min(MAX_MEGAPIXELS_CEILING);
            }
        }
        out
    }

    /// Reads the current settings. Off Windows this is always the defaults.
    pub fn load() -> Self {
        #[cfg(windows)]
        {
            Self::from_lookup(registry::read_dword)
        }
        #[cfg(not(windows))]
        {
            Self::default()
        }
    }

    /// Largest pixel count accepted before allocating the output buffer.
    pub fn max_pixels(&self) -> u64 {
        u64::from(self.max_megapixels) * 1_000_000
    }
}

#[cfg(windows)]
pub(crate) mod registry {
    use crate::keys::SETTINGS_SUBKEY;
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

    pub(crate) fn read_dword(name: &str) -> Option<u32> {
        fn read_from(hive: RegKey, name: &str) -> Option<u32> {
            let key = hive.open_subkey(SETTINGS_SUBKEY).ok()?;
            key.get_value::<u32, _>(name).ok()
        }

        read_from(RegKey::predef(HKEY_CURRENT_USER), name)
            .or_else(|| read_from(RegKey::predef(HKEY_LOCAL_MACHINE), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, u32)]) -> impl Fn(&str) -> Option<u32> {
        let map: HashMap<String, u32> = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        move |name| map.get(name).copied()
    }

    #[test]
    fn empty_registry_gives_defaults() {
        let s = ViewerSettings::from_lookup(|_| None);
        assert_eq!(s, ViewerSettings::default());
        assert!(!s.logging);
        assert_eq!(s.decode_threads, None);
        assert_eq!(s.max_pixels(), 256_000_000);
    }

    #[test]
    fn values_override_defaults() {
        let s = ViewerSettings::from_lookup(lookup_from(&[
            (LOGGING_VALUE_NAME, 1),
            (THREADS_VALUE_NAME, 4),
            (MAX_MEGAPIXELS_VALUE_NAME, 64),
        ]));
        assert!(s.logging);
        assert_eq!(s.decode_threads, Some(4));
        assert_eq!(s.max_megapixels, 64);
    }

    #[test]
    fn zero_means_automatic_or_default() {
        let s = ViewerSettings::from_lookup(lookup_from(&[
            (THREADS_VALUE_NAME, 0),
            (MAX_MEGAPIXELS_VALUE_NAME, 0),
        ]));
        assert_eq!(s.decode_threads, None);
        assert_eq!(s.max_megapixels, DEFAULT_MAX_MEGAPIXELS);
    }

    #[test]
    fn huge_pixel_limit_is_clamped() {
        let s = ViewerSettings::from_lookup(lookup_from(&[(MAX_MEGAPIXELS_VALUE_NAME, u32::MAX)]));
        assert_eq!(s.max_megapixels, MAX_MEGAPIXELS_CEILING);
        assert_eq!(s.max_pixels(), 1_024_000_000);

        let s = ViewerSettings::from_lookup(lookup_from(&[(MAX_MEGAPIXELS_VALUE_NAME, 1024)]));
        assert_eq!(s.max_megapixels, 1024);
    }
}
