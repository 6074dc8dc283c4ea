// Real JPEG XL files, encoded on the fly, through the jxl-oxide backend.
use jxl_dopus_viewer::ViewerError;
use jxl_dopus_viewer::decode::{DecodeMode, Decoded, NoAbort, OxideDecoder};
use jxl_dopus_viewer::settings::ViewerSettings;
use jxl_dopus_viewer::viewer::{decode_bytes, identify_file, into_bgra, load_bitmap};
use std::fs;
use std::path::PathBuf;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::EncoderOptions;
use zune_jpegxl::JxlSimpleEncoder;

fn encode(pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace) -> Vec<u8> {
    let options = EncoderOptions::new(width, height, colorspace, BitDepth::Eight);
    JxlSimpleEncoder::new(pixels, options).encode().unwrap()
}

fn decode(data: &[u8], mode: DecodeMode) -> jxl_dopus_viewer::Result<Decoded> {
    let settings = ViewerSettings::default();
    decode_bytes(&mut OxideDecoder::new(Some(1)), data, mode, &settings, &NoAbort)
}

const RGBA_3X2: [u8; 24] = [
    0, 100, 200, 50, 255, 0, 0, 255, 0, 255, 0, 128, //
    0, 0, 255, 0, 10, 20, 30, 40, 250, 240, 230, 220,
];

/// 64x64 RGB gradient; large enough that half the file stops mid-frame.
fn gradient_rgb() -> Vec<u8> {
    (0..64u32 * 64)
        .flat_map(|i| {
            let (x, y) = (i % 64, i / 64);
            [(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 3) as u8]
        })
        .collect()
}

fn scratch_file(tag: &str, data: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jxl-oxide-{}-{}", tag, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("image.jxl");
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn lossless_rgba_decodes_to_the_source_pixels() {
    let jxl = encode(&RGBA_3X2, 3, 2, ColorSpace::RGBA);
    let decoded = decode(&jxl, DecodeMode::Full).unwrap();

    assert_eq!((decoded.info.width, decoded.info.height), (3, 2));
    assert!(decoded.info.has_alpha);
    assert_eq!(decoded.info.bits_per_sample, 8);
    assert!(decoded.icc_profile.as_ref().is_some_and(|icc| !icc.is_empty()));
    assert_eq!(decoded.rgba, RGBA_3X2);

    let (bgra, info) = into_bgra(decoded);
    assert_eq!((info.width, info.height), (3, 2));
    assert_eq!(&bgra.pixels[..4], &[200, 100, 0, 50]);
    assert_eq!(&bgra.pixels[20..], &[230, 240, 250, 220]);
}

#[test]
fn gray_is_expanded_to_opaque_rgba() {
    let gray: Vec<u8> = (0..16u8).map(|i| i * 15).collect();
    let jxl = encode(&gray, 4, 4, ColorSpace::Luma);
    let decoded = decode(&jxl, DecodeMode::Full).unwrap();

    assert!(!decoded.info.has_alpha);
    assert_eq!(decoded.rgba.len(), 4 * 4 * 4);
    assert_eq!(&decoded.rgba[..8], &[0, 0, 0, 255, 15, 15, 15, 255]);
    for (px, g) in decoded.rgba.chunks_exact(4).zip(&gray) {
        assert_eq!(px, [*g, *g, *g, 255]);
    }
}

#[test]
fn info_only_reads_the_header_without_pixels() {
    let jxl = encode(&gradient_rgb(), 64, 64, ColorSpace::RGB);
    let decoded = decode(&jxl, DecodeMode::InfoOnly).unwrap();
    assert_eq!((decoded.info.width, decoded.info.height), (64, 64));
    assert!(decoded.rgba.is_empty());
    assert!(decoded.icc_profile.is_none());
}

#[test]
fn cut_file_reports_truncation() {
    let jxl = encode(&gradient_rgb(), 64, 64, ColorSpace::RGB);
    let half = &jxl[..jxl.len() / 2];
    let err = decode(half, DecodeMode::Full).unwrap_err();
    assert!(matches!(err, ViewerError::Truncated), "got {err:?}");
}

#[test]
fn host_requests_work_on_a_file() {
    let jxl = encode(&gradient_rgb(), 64, 64, ColorSpace::RGB);
    let path = scratch_file("requests", &jxl);

    let info = identify_file(&path, &NoAbort).unwrap();
    assert_eq!((info.width, info.height), (64, 64));
    assert_eq!(info.info, "64 x 64 JPEG XL Image");

    let (bgra, _) = load_bitmap(&path, &NoAbort).unwrap();
    assert_eq!(bgra.pixels.len(), 64 * 64 * 4);
    // Pixel (1, 0) is RGB (4, 0, 3), stored as BGRA.
    assert_eq!(&bgra.pixels[4..8], &[3, 0, 4, 255]);

    fs::remove_dir_all(path.parent().unwrap()).ok();
}
