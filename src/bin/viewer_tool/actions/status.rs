use crate::paths::{bundled_dll, installed_dll, opus_viewers_dir};
use jxl_dopus_viewer::keys::{SETTINGS_SUBKEY, plugin_id_str};
use jxl_dopus_viewer::log::log_cli;
use jxl_dopus_viewer::log_file_path;
use jxl_dopus_viewer::settings::ViewerSettings;
use std::fs;
use std::io;
use std::path::Path;

fn mark(b: bool) -> &'static str {
    if b { "OK" } else { "NO" }
}

fn file_len(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().filter(|m| m.is_file()).map(|m| m.len())
}

pub fn status() -> io::Result<()> {
    log_cli("Status: probing");

    let viewers = opus_viewers_dir()?;
    let installed = installed_dll()?;
    let bundled = bundled_dll()?;
    let installed_len = file_len(&installed);
    let bundled_len = file_len(&bundled);
    let settings = ViewerSettings::load();

    println!("Status:");
    println!("  Plugin id:              {}", plugin_id_str());
    println!("  Viewers folder:         {}", viewers.display());
    println!("  Viewers folder exists:  {}", mark(viewers.is_dir()));
    println!("  Installed DLL:          {}", mark(installed_len.is_some()));
    println!("  Bundled DLL:            {}", mark(bundled_len.is_some()));
    println!(
        "  Installed matches size: {}",
        mark(installed_len.is_some() && installed_len == bundled_len)
    );
    println!("  Settings key:           HKCU|HKLM\\{}", SETTINGS_SUBKEY);
    println!("  Logging:                {}", mark(settings.logging));
    println!(
        "  Decode threads:         {}",
        settings
            .decode_threads
            .map_or_else(|| "auto".to_string(), |n| n.to_string())
    );
    println!("  Max megapixels:         {}", settings.max_megapixels);
    println!(
        "  Log file:               {}",
        log_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unavailable>".into())
    );

    log_cli(format!(
        "Status: installed={} bundled={} logging={}",
        installed_len.is_some(),
        bundled_len.is_some(),
        settings.logging
    ));
    Ok(())
}
