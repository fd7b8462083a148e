mod config;
mod models;
mod stats;
mod store;
mod ui;

use anyhow::Result;
use crate::config::settings::Settings;
use crate::store::session_log;
use crate::ui::app::DashboardApp;
use crate::ui::theme::PageConfig;
use dotenvy::dotenv;
use std::env;
use std::fs::OpenOptions;
use clap::{Arg, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("LockedIn Dashboard")
        .version("0.1.0")
        .about("Browser dashboard for LockedIn focus sessions")
        .arg(
            Arg::new("probe-log")
                .long("probe-log")
                .help("Print the sessions log candidate paths and which one resolves, then exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load .env file
    dotenv().ok();

    // Check if debug logging is enabled via .env
    let debug_enabled = env::var("DEBUG_LOGS_ENABLED")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    if debug_enabled {
        // Enable debug logging to app.log file
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open("app.log")
            .expect("Failed to open log file");

        env_logger::Builder::from_env(
            env_logger::Env::default()
                .default_filter_or("lockedin_dashboard=debug")
        )
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

        log::info!("=== DEBUG LOGGING ENABLED ===");
        log::info!("Writing logs to app.log");
        log::info!("To disable: Remove DEBUG_LOGS_ENABLED from .env or set to false");
    } else {
        // No logging for regular users
        env_logger::Builder::from_env(
            env_logger::Env::default()
                .default_filter_or("off")
        )
        .init();
    }

    log::info!("Starting LockedIn Dashboard");
    let settings = Settings::new()?;

    // Check if we're running the log-probe diagnostic
    if matches.get_flag("probe-log") {
        probe_log(&settings);
        return Ok(());
    }

    log::info!("Sessions log candidates:");
    for candidate in &settings.sessions_log_candidates {
        log::info!("  {}", candidate.display());
    }

    let app = DashboardApp::new(settings, PageConfig::default());
    app.run().await?;

    Ok(())
}

fn probe_log(settings: &Settings) {
    println!("Looking for a sessions log in:");
    for path in &settings.sessions_log_candidates {
        let marker = if path.exists() { "found" } else { "missing" };
        println!("  [{}] {}", marker, path.display());
    }
    match session_log::find_sessions_log(&settings.sessions_log_candidates) {
        Some(path) => println!("✅ Dashboard will read {}", path.display()),
        None => println!("❌ No sessions log found. Run lockedin_generator first."),
    }
}
