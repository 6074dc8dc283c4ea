//! The three requests Directory Opus makes of a viewer plugin.

use crate::bitmap::BgraImage;
use crate::decode::{
    AbortSignal, DecodeLimits, DecodeMode, Decoded, EventDecoder, OxideDecoder, decode_one_shot,
};
use crate::error::{Result, ViewerError};
use crate::file::load_file;
use crate::log::log_cli;
use crate::pixels::rgba_to_bgra_in_place;
use crate::plugin::{FileInfo, PluginInfo};
use crate::settings::ViewerSettings;
use crate::signature;
use std::path::Path;

/// `DVP_IdentifyW`
pub fn identify_plugin() -> PluginInfo {
    PluginInfo::jpeg_xl()
}

/// `DVP_IdentifyFileW`: header-only decode.
pub fn identify_file<A>(path: &Path, abort: &A) -> Result<FileInfo>
where
    A: AbortSignal + ?Sized,
{
    let settings = ViewerSettings::load();
    let data = load_file(path)?;
    let decoded = decode_bytes(
        &mut OxideDecoder::new(settings.decode_threads),
        &data,
        DecodeMode::InfoOnly,
        &settings,
        abort,
    )?;
    log_cli(format!(
        "identify_file: {} -> {}x{}",
        path.display(),
        decoded.info.width,
        decoded.info.height
    ));
    Ok(FileInfo::for_image(decoded.info.width, decoded.info.height))
}

/// `DVP_LoadBitmapW`: full decode, returned as BGRA for the DIB.
pub fn load_bitmap<A>(path: &Path, abort: &A) -> Result<(BgraImage, FileInfo)>
where
    A: AbortSignal + ?Sized,
{
    let settings = ViewerSettings::load();
    let data = load_file(path)?;
    let decoded = decode_bytes(
        &mut OxideDecoder::new(settings.decode_threads),
        &data,
        DecodeMode::Full,
        &settings,
        abort,
    )?;
    log_cli(format!(
        "load_bitmap: {} -> {}x{}, alpha={}, icc={} bytes",
        path.display(),
        decoded.info.width,
        decoded.info.height,
        decoded.info.has_alpha,
        decoded.icc_profile.as_ref().map_or(0, Vec::len)
    ));
    Ok(into_bgra(decoded))
}

/// Signature check plus the decoder loop, with the configured pixel limit.
pub fn decode_bytes<D, A>(
    decoder: &mut D,
    data: &[u8],
    mode: DecodeMode,
    settings: &ViewerSettings,
    abort: &A,
) -> Result<Decoded>
where
    D: EventDecoder + ?Sized,
    A: AbortSignal + ?Sized,
{
    if signature::detect(data).is_none() {
        return Err(ViewerError::NotJpegXl);
    }
    let limits = DecodeLimits {
        max_pixels: settings.max_pixels(),
    };
    decode_one_shot(decoder, data, mode, limits, abort)
}

/// Swizzles a full decode into the host's pixel order.
pub fn into_bgra(decoded: Decoded) -> (BgraImage, FileInfo) {
    let Decoded { info, mut rgba, .. } = decoded;
    rgba_to_bgra_in_place(&mut rgba);
    (
        BgraImage {
            width: info.width,
            height: info.height,
            pixels: rgba,
        },
        FileInfo::for_image(info.width, info.height),
    )
}
