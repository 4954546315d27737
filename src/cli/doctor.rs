//! Environment readiness check.

use crate::config;
use crate::fetcher::chromium::find_chromium;
use anyhow::Result;

/// Check Chromium availability, the history db path, and webhook config.
pub async fn run() -> Result<()> {
    println!("Hhwatch Doctor");
    println!("==============");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    // Check Chromium
    let chromium_path = find_chromium();
    match &chromium_path {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Chrome/Chromium or set HHWATCH_CHROMIUM_PATH \
             (or run with --no-browser)."
        ),
    }

    // Check history db path
    let db_path = config::resolve_db_path(None);
    let db_dir = db_path.parent().unwrap_or(&db_path);
    let db_writable = db_dir.exists() || std::fs::create_dir_all(db_dir).is_ok();
    if db_writable {
        println!("[OK] History db path {} is writable", db_path.display());
    } else {
        println!("[!!] Cannot create history db directory: {}", db_dir.display());
    }

    // Check webhook config
    match config::resolve_webhook_url(None) {
        Some(_) => println!("[OK] Webhook configured (HHWATCH_WEBHOOK_URL)"),
        None => println!("[!!] No webhook configured. Set HHWATCH_WEBHOOK_URL or pass --webhook."),
    }

    println!();
    let ready = chromium_path.is_some() && db_writable;
    if ready {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
