use super::{BYTES_PER_PIXEL, BasicInfo, DecoderStatus, EventDecoder, Events};
use crate::error::{Result, ViewerError};
use crate::pixels::expand_into_rgba;
use jxl_oxide::{JxlImage, JxlThreadPool, PixelFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Header,
    Color,
    OutBuffer,
    Frame,
    Done,
}

/// [`EventDecoder`] over `jxl-oxide`.
///
/// The event order is fixed: basic info, color encoding, out buffer, full
/// image, success. Unsubscribed events are skipped. Only the first keyframe is
/// rendered, straight into the caller's buffer from
/// [`write_image`](EventDecoder::write_image).
pub struct OxideDecoder {
    threads: Option<usize>,
    events: Events,
    input: Vec<u8>,
    stage: Stage,
    image: Option<JxlImage>,
}

impl OxideDecoder {
    /// `threads = None` lets the decoder size its own pool.
    pub fn new(threads: Option<usize>) -> Self {
        Self {
            threads,
            events: Events::default(),
            input: Vec::new(),
            stage: Stage::Header,
            image: None,
        }
    }

    fn pool(&self) -> JxlThreadPool {
        if !self.events.full_image {
            return JxlThreadPool::none();
        }
        match self.threads {
            Some(0 | 1) => JxlThreadPool::none(),
            Some(n) => JxlThreadPool::rayon(Some(n)),
            None => JxlThreadPool::rayon(None),
        }
    }

    fn image(&self) -> Result<&JxlImage> {
        self.image
            .as_ref()
            .ok_or_else(|| ViewerError::Decoder("image header not parsed yet".into()))
    }

    fn parse_header(&mut self) -> Result<()> {
        let image = JxlImage::builder()
            .pool(self.pool())
            .read(self.input.as_slice())?;
        self.image = Some(image);
        Ok(())
    }

    /// Renders the first keyframe as RGBA8 into `out`. Four-channel output is
    /// written in place; other layouts go through a smaller sample buffer.
    fn render_first_frame_into(&self, out: &mut [u8]) -> Result<()> {
        let render = self.image()?.render_frame(0)?;
        let mut stream = render.stream();
        let channels = stream.channels() as usize;
        let len = stream.width() as usize * stream.height() as usize * channels;

        if channels == BYTES_PER_PIXEL {
            if out.len() != len {
                return Err(ViewerError::BufferSizeMismatch {
                    expected: out.len(),
                    actual: len,
                });
            }
            let written = stream.write_to_buffer(out);
            return check_written(written, len);
        }

        let mut samples = vec![0u8; len];
        let written = stream.write_to_buffer(&mut samples);
        check_written(written, len)?;
        expand_into_rgba(&samples, channels, out)
    }
}

fn check_written(written: usize, len: usize) -> Result<()> {
    if written != len {
        return Err(ViewerError::Decoder(format!(
            "renderer wrote {written} of {len} samples"
        )));
    }
    Ok(())
}

impl EventDecoder for OxideDecoder {
    fn subscribe(&mut self, events: Events) -> Result<()> {
        if self.image.is_some() {
            return Err(ViewerError::Decoder(
                "cannot change subscriptions after decoding started".into(),
            ));
        }
        self.events = events;
        Ok(())
    }

    fn set_input(&mut self, data: &[u8]) -> Result<()> {
        self.input = data.to_vec();
        self.stage = Stage::Header;
        self.image = None;
        Ok(())
    }

    fn process_input(&mut self) -> Result<DecoderStatus> {
        loop {
            match self.stage {
                Stage::Header => {
                    if self.input.is_empty() {
                        return Ok(DecoderStatus::NeedMoreInput);
                    }
                    self.parse_header()?;
                    self.stage = Stage::Color;
                    if self.events.basic_info {
                        return Ok(DecoderStatus::BasicInfo);
                    }
                }
                Stage::Color => {
                    self.stage = Stage::OutBuffer;
                    if self.events.color_encoding {
                        return Ok(DecoderStatus::ColorEncoding);
                    }
                }
                Stage::OutBuffer => {
                    if !self.events.full_image {
                        self.stage = Stage::Done;
                        continue;
                    }
                    let image = self.image()?;
                    if matches!(image.pixel_format(), PixelFormat::Cmyk | PixelFormat::Cmyka) {
                        return Err(ViewerError::Unsupported("CMYK image".into()));
                    }
                    if image.num_loaded_keyframes() == 0 {
                        return Ok(DecoderStatus::NeedMoreInput);
                    }
                    self.stage = Stage::Frame;
                    return Ok(DecoderStatus::NeedImageOutBuffer);
                }
                Stage::Frame => {
                    self.stage = Stage::Done;
                    return Ok(DecoderStatus::FullImage);
                }
                Stage::Done => return Ok(DecoderStatus::Success),
            }
        }
    }

    fn basic_info(&self) -> Result<BasicInfo> {
        let image = self.image()?;
        Ok(BasicInfo {
            width: image.width(),
            height: image.height(),
            has_alpha: image.pixel_format().has_alpha(),
            bits_per_sample: image.image_header().metadata.bit_depth.bits_per_sample(),
        })
    }

    fn icc_profile(&self) -> Result<Vec<u8>> {
        Ok(self.image()?.rendered_icc())
    }

    fn image_out_buffer_size(&self) -> Result<usize> {
        let image = self.image()?;
        Ok(image.width() as usize * image.height() as usize * BYTES_PER_PIXEL)
    }

    fn write_image(&mut self, out: &mut [u8]) -> Result<()> {
        if self.stage != Stage::Done {
            return Err(ViewerError::Decoder("no frame decoded yet".into()));
        }
        self.render_first_frame_into(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodeLimits, DecodeMode, NoAbort, decode_one_shot};

    #[test]
    fn empty_input_wants_more() {
        let mut dec = OxideDecoder::new(None);
        dec.subscribe(Events::BASIC_INFO).unwrap();
        dec.set_input(&[]).unwrap();
        assert_eq!(dec.process_input().unwrap(), DecoderStatus::NeedMoreInput);
    }

    #[test]
    fn garbage_is_rejected() {
        let junk: Vec<u8> = (0..512u32).map(|i| (i * 37 % 251) as u8).collect();
        let mut dec = OxideDecoder::new(Some(1));
        let res = decode_one_shot(
            &mut dec,
            &junk,
            DecodeMode::Full,
            DecodeLimits::default(),
            &NoAbort,
        );
        assert!(res.is_err());
    }

    #[test]
    fn header_accessors_fail_before_parse() {
        let dec = OxideDecoder::new(None);
        assert!(dec.basic_info().is_err());
        assert!(dec.icc_profile().is_err());
        assert!(dec.image_out_buffer_size().is_err());
    }

    #[test]
    fn pixels_are_not_written_before_the_frame_event() {
        let mut dec = OxideDecoder::new(None);
        let mut out = [0u8; 4];
        assert!(matches!(dec.write_image(&mut out), Err(ViewerError::Decoder(_))));
        assert_eq!(out, [0; 4]);
    }
}
