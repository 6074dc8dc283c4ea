use dialoguer::Input;
use jxl_dopus_viewer::decode::{DecodeMode, NoAbort, OxideDecoder};
use jxl_dopus_viewer::file::load_file;
use jxl_dopus_viewer::log::{log_cli, log_ui};
use jxl_dopus_viewer::settings::ViewerSettings;
use jxl_dopus_viewer::signature;
use jxl_dopus_viewer::viewer::{decode_bytes, identify_file};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

/// Runs both plugin requests against a file and prints what the host would see.
pub fn inspect() -> io::Result<()> {
    let raw: String = Input::new()
        .with_prompt("Path to a .jxl file")
        .interact_text()
        .map_err(io::Error::other)?;
    let path = PathBuf::from(raw.trim().trim_matches('"'));
    log_cli(format!("Inspect: {}", path.display()));

    let started = Instant::now();
    let info = identify_file(&path, &NoAbort).map_err(io::Error::other)?;
    log_ui(format!(
        "Identify: {} (flags 0x{:08X}, {} bits) in {:?}",
        info.info,
        info.flags,
        info.num_bits,
        started.elapsed()
    ));

    let settings = ViewerSettings::load();
    let data = load_file(&path).map_err(io::Error::other)?;
    let started = Instant::now();
    let decoded = decode_bytes(
        &mut OxideDecoder::new(settings.decode_threads),
        &data,
        DecodeMode::Full,
        &settings,
        &NoAbort,
    )
    .map_err(io::Error::other)?;

    println!("  Layout:          {:?}", signature::detect(&data));
    println!("  File size:       {} bytes", data.len());
    println!("  Dimensions:      {}x{}", decoded.info.width, decoded.info.height);
    println!("  Alpha:           {}", decoded.info.has_alpha);
    println!("  Bits per sample: {}", decoded.info.bits_per_sample);
    println!(
        "  ICC profile:     {} bytes",
        decoded.icc_profile.as_ref().map_or(0, Vec::len)
    );
    println!("  Pixel buffer:    {} bytes", decoded.rgba.len());
    log_ui(format!("Full decode took {:?}", started.elapsed()));
    Ok(())
}
