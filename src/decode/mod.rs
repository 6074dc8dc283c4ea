//! Event-driven JPEG XL decoding.
//!
//! [`decode_one_shot`] drives any [`EventDecoder`] through its event sequence
//! with the whole file already in memory. The concrete decoder is
//! [`OxideDecoder`], backed by `jxl-oxide`.

mod oxide;

pub use oxide::OxideDecoder;

use crate::error::{Result, ViewerError};
use crate::log::log_cli;

/// Upper bound on decoder events per file. A well-behaved single-frame decode
/// needs five or six; animations add two per frame.
pub const MAX_DECODER_EVENTS: usize = 4096;

/// Bytes per output pixel (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecoderStatus {
    BasicInfo,
    ColorEncoding,
    NeedImageOutBuffer,
    FullImage,
    Success,
    NeedMoreInput,
}

/// Which events the caller wants to see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Events {
    pub basic_info: bool,
    pub color_encoding: bool,
    pub full_image: bool,
}

impl Events {
    pub const BASIC_INFO: Events = Events {
        basic_info: true,
        color_encoding: false,
        full_image: false,
    };

    pub const ALL: Events = Events {
        basic_info: true,
        color_encoding: true,
        full_image: true,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasicInfo {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    pub bits_per_sample: u32,
}

impl BasicInfo {
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// The event API of an external decoder.
///
/// Input is handed over once and closed; the decoder then reports progress
/// one status at a time from [`process_input`](EventDecoder::process_input).
pub trait EventDecoder {
    fn subscribe(&mut self, events: Events) -> Result<()>;

    fn set_input(&mut self, data: &[u8]) -> Result<()>;

    fn process_input(&mut self) -> Result<DecoderStatus>;

    /// Valid after [`DecoderStatus::BasicInfo`].
    fn basic_info(&self) -> Result<BasicInfo>;

    /// ICC profile describing the output pixels. Valid after
    /// [`DecoderStatus::ColorEncoding`].
    fn icc_profile(&self) -> Result<Vec<u8>>;

    /// Size in bytes of an RGBA8 frame. Valid after
    /// [`DecoderStatus::NeedImageOutBuffer`].
    fn image_out_buffer_size(&self) -> Result<usize>;

    /// Copies the current frame into `out` (exactly
    /// [`image_out_buffer_size`](EventDecoder::image_out_buffer_size) bytes).
    fn write_image(&mut self, out: &mut [u8]) -> Result<()>;
}

/// Lets the host cancel a decode between events.
pub trait AbortSignal {
    fn is_aborted(&self) -> bool;
}

/// Never aborts.
pub struct NoAbort;

impl AbortSignal for NoAbort {
    fn is_aborted(&self) -> bool {
        false
    }
}

impl<F: Fn() -> bool> AbortSignal for F {
    fn is_aborted(&self) -> bool {
        self()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeMode {
    /// Stop after the image header.
    InfoOnly,
    /// Produce pixels and the ICC profile.
    Full,
}

#[derive(Debug, Default)]
pub struct Decoded {
    pub info: BasicInfo,
    /// Empty in [`DecodeMode::InfoOnly`].
    pub rgba: Vec<u8>,
    pub icc_profile: Option<Vec<u8>>,
}

/// Largest image (pixels) accepted before buffers are allocated.
#[derive(Clone, Copy, Debug)]
pub struct DecodeLimits {
    pub max_pixels: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self { max_pixels: u64::MAX }
    }
}

/// Drives `decoder` over `data` until it reports success.
pub fn decode_one_shot<D, A>(
    decoder: &mut D,
    data: &[u8],
    mode: DecodeMode,
    limits: DecodeLimits,
    abort: &A,
) -> Result<Decoded>
where
    D: EventDecoder + ?Sized,
    A: AbortSignal + ?Sized,
{
    let events = match mode {
        DecodeMode::InfoOnly => Events::BASIC_INFO,
        DecodeMode::Full => Events::ALL,
    };
    decoder.subscribe(events)?;
    decoder.set_input(data)?;

    let mut out = Decoded::default();
    let mut have_info = false;
    let mut have_buffer = false;

    for _ in 0..MAX_DECODER_EVENTS {
        if abort.is_aborted() {
            return Err(ViewerError::Aborted);
        }

        match decoder.process_input()? {
            DecoderStatus::NeedMoreInput => return Err(ViewerError::Truncated),
            DecoderStatus::BasicInfo => {
                let info = decoder.basic_info()?;
                if info.pixel_count() > limits.max_pixels {
                    return Err(too_many_pixels(&info, &limits));
                }
                out.info = info;
                have_info = true;
            }
            DecoderStatus::ColorEncoding => {
                out.icc_profile = Some(decoder.icc_profile()?);
            }
            DecoderStatus::NeedImageOutBuffer => {
                if mode == DecodeMode::InfoOnly {
                    continue;
                }
                if !have_info {
                    return Err(ViewerError::Decoder(
                        "output buffer requested before basic info".into(),
                    ));
                }
                let expected = usize::try_from(out.info.pixel_count())
                    .ok()
                    .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
                    .ok_or_else(|| too_many_pixels(&out.info, &limits))?;
                let actual = decoder.image_out_buffer_size()?;
                if actual != expected {
                    return Err(ViewerError::BufferSizeMismatch { expected, actual });
                }
                // Running out of memory here would abort the host process.
                let mut rgba = Vec::new();
                rgba.try_reserve_exact(expected)
                    .map_err(|_| too_many_pixels(&out.info, &limits))?;
                rgba.resize(expected, 0);
                out.rgba = rgba;
                have_buffer = true;
            }
            DecoderStatus::FullImage => {
                // More frames may follow; the last one wins.
                if have_buffer {
                    decoder.write_image(&mut out.rgba)?;
                }
            }
            DecoderStatus::Success => {
                if !have_info {
                    return Err(ViewerError::Decoder("finished without basic info".into()));
                }
                if mode == DecodeMode::Full && !have_buffer {
                    return Err(ViewerError::Decoder("finished without pixels".into()));
                }
                return Ok(out);
            }
        }
    }

    log_cli(format!(
        "decode_one_shot: gave up after {} events",
        MAX_DECODER_EVENTS
    ));
    Err(ViewerError::DecoderStalled(MAX_DECODER_EVENTS))
}

fn too_many_pixels(info: &BasicInfo, limits: &DecodeLimits) -> ViewerError {
    ViewerError::TooManyPixels {
        width: info.width,
        height: info.height,
        limit_megapixels: u32::try_from(limits.max_pixels / 1_000_000).unwrap_or(u32::MAX),
    }
}
