mod config;
mod generator;
mod models;
mod store;

use anyhow::Result;
use crate::config::settings::Settings;
use crate::generator::faker;
use crate::store::session_log;
use dotenvy::dotenv;
use std::env;
use std::fs::OpenOptions;
use clap::{Arg, Command};

const DEFAULT_SESSION_COUNT: usize = 25;

fn cli() -> Command {
    Command::new("LockedIn Generator")
        .version("0.1.0")
        .about("Writes synthetic LockedIn session records for dashboard demos")
        .arg(
            Arg::new("count")
                .help("Number of session records to generate")
                .value_parser(clap::value_parser!(usize))
                .default_value(DEFAULT_SESSION_COUNT.to_string()),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Load .env file
    dotenv().ok();

    // Check if debug logging is enabled via .env
    let debug_enabled = env::var("DEBUG_LOGS_ENABLED")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    if debug_enabled {
        // Enable debug logging to generator.log file
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open("generator.log")
            .expect("Failed to open log file");

        env_logger::Builder::from_env(
            env_logger::Env::default()
                .default_filter_or("lockedin_generator=debug")
        )
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

        log::info!("=== DEBUG LOGGING ENABLED ===");
        log::info!("Writing logs to generator.log");
        log::info!("To disable: Remove DEBUG_LOGS_ENABLED from .env or set to false");
    } else {
        // No logging for regular users
        env_logger::Builder::from_env(
            env_logger::Env::default()
                .default_filter_or("off")
        )
        .init();
    }

    let count = matches
        .get_one::<usize>("count")
        .copied()
        .unwrap_or(DEFAULT_SESSION_COUNT);

    log::info!("Starting LockedIn Generator, count={}", count);
    let settings = Settings::new()?;

    let records = faker::generate_sessions(count);
    session_log::write_sessions(&settings.generator_output, &records)?;

    log::info!("Generated {} sessions at {}", count, settings.generator_output.display());
    println!("Wrote {} sessions to {}", count, settings.generator_output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_falls_back_to_default() {
        let matches = cli().get_matches_from(["lockedin_generator"]);
        assert_eq!(
            matches.get_one::<usize>("count").copied(),
            Some(DEFAULT_SESSION_COUNT)
        );
        println!("✓ Missing count argument falls back to {}", DEFAULT_SESSION_COUNT);
    }

    #[test]
    fn test_count_parses_positional_value() {
        let matches = cli().get_matches_from(["lockedin_generator", "40"]);
        assert_eq!(matches.get_one::<usize>("count").copied(), Some(40));
        println!("✓ Positional count argument parsed");
    }
}
