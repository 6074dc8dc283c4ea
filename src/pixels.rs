//! Pixel packing for the host bitmap.
//!
//! The decoder hands back interleaved 8-bit samples with 1 to 4 channels.
//! The host wants 32bpp BGRA with straight (not premultiplied) alpha.

use crate::error::{Result, ViewerError};

/// Expands gray / gray+alpha / RGB / RGBA samples into an RGBA8 buffer.
///
/// `out` must hold exactly four bytes per source pixel.
pub fn expand_into_rgba(samples: &[u8], channels: usize, out: &mut [u8]) -> Result<()> {
    if channels == 0 || channels > 4 {
        return Err(ViewerError::Unsupported(format!(
            "{channels} channels per pixel"
        )));
    }
    if samples.len() % channels != 0 {
        return Err(ViewerError::Decoder(format!(
            "{} samples do not divide into {channels}-channel pixels",
            samples.len()
        )));
    }
    let pixels = samples.len() / channels;
    if out.len() != pixels * 4 {
        return Err(ViewerError::BufferSizeMismatch {
            expected: out.len(),
            actual: pixels * 4,
        });
    }

    if channels == 4 {
        out.copy_from_slice(samples);
        return Ok(());
    }

    for (src, dst) in samples.chunks_exact(channels).zip(out.chunks_exact_mut(4)) {
        let rgba = match *src {
            [g] => [g, g, g, 255],
            [g, a] => [g, g, g, a],
            [r, g, b] => [r, g, b, 255],
            _ => unreachable!("channel count checked above"),
        };
        dst.copy_from_slice(&rgba);
    }
    Ok(())
}

/// Swaps R and B of every pixel in place; alpha is left as is.
pub fn rgba_to_bgra_in_place(buf: &mut [u8]) {
    for px in buf.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(samples: &[u8], channels: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; samples.len() / channels.max(1) * 4];
        expand_into_rgba(samples, channels, &mut out)?;
        Ok(out)
    }

    #[test]
    fn gray_fills_all_colour_channels() {
        let out = expand(&[10, 200], 1).unwrap();
        assert_eq!(out, vec![10, 10, 10, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn gray_alpha_keeps_alpha() {
        let out = expand(&[7, 128], 2).unwrap();
        assert_eq!(out, vec![7, 7, 7, 128]);
    }

    #[test]
    fn rgb_gets_opaque_alpha() {
        let out = expand(&[1, 2, 3, 4, 5, 6], 3).unwrap();
        assert_eq!(out, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn rgba_is_copied_verbatim() {
        let out = expand(&[9, 8, 7, 6], 4).unwrap();
        assert_eq!(out, vec![9, 8, 7, 6]);
    }

    #[test]
    fn rejects_ragged_or_odd_layouts() {
        assert!(expand(&[1, 2, 3, 4], 3).is_err());
        assert!(matches!(expand(&[0; 10], 5), Err(ViewerError::Unsupported(_))));
        assert!(expand(&[], 0).is_err());
    }

    #[test]
    fn output_must_fit_exactly() {
        let mut short = [0u8; 4];
        assert!(matches!(
            expand_into_rgba(&[1, 2, 3, 4, 5, 6], 3, &mut short),
            Err(ViewerError::BufferSizeMismatch { expected: 4, actual: 8 })
        ));
    }

    #[test]
    fn swizzle_does_not_premultiply() {
        let mut buf = vec![0x11, 0x22, 0x33, 0x00, 0xAA, 0xBB, 0xCC, 0x80];
        rgba_to_bgra_in_place(&mut buf);
        assert_eq!(buf, vec![0x33, 0x22, 0x11, 0x00, 0xCC, 0xBB, 0xAA, 0x80]);
    }
}
