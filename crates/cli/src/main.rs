// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use cavebook_api::{EligibilityEngine, EngineConfig, TripRecord, UserRecord};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string())),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Cavebook - evaluate caving club trip signup windows and eligibility
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON engine configuration file. Missing keys take defaults.
    #[arg(short, long, env = "CAVEBOOK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// IANA timezone trip times are written in. Overrides the config file.
    #[arg(short, long, env = "CAVEBOOK_TIMEZONE", global = true)]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Evaluate a trip for a user and print the full eligibility report
    #[command(visible_alias = "e")]
    Evaluate {
        /// Trip product JSON file
        #[arg(long)]
        trip: PathBuf,

        /// User JSON file. Omit for a logged-out visitor.
        #[arg(long)]
        user: Option<PathBuf>,

        /// Backend-resolved access level tag
        #[arg(long, default_value = "public")]
        access_level: String,

        /// Evaluation instant (RFC 3339). Defaults to the system clock.
        #[arg(long)]
        now: Option<String>,
    },

    /// Print only the signup window of a trip
    #[command(visible_alias = "t")]
    Timing {
        /// Trip product JSON file
        #[arg(long)]
        trip: PathBuf,

        /// Evaluation instant (RFC 3339). Defaults to the system clock.
        #[arg(long)]
        now: Option<String>,
    },

    /// Print the effective engine configuration
    Config,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(timezone) = &self.timezone {
            config = config.with_timezone(timezone);
        }
        Ok(config)
    }

    fn run(self) -> Result<()> {
        let config = self.engine_config()?;

        match self.command {
            Command::Evaluate {
                trip,
                user,
                access_level,
                now,
            } => {
                let engine = EligibilityEngine::new(config)?;
                let now = parse_now(now.as_deref())?;
                let trip_record = TripRecord::from_json(&read_file(&trip)?)?;
                let user_record = match user {
                    Some(path) => UserRecord::from_json(&read_file(&path)?)?,
                    None => UserRecord::default(),
                };

                info!(
                    trip_id = trip_record.id,
                    access_level = %access_level,
                    "Evaluating trip"
                );
                let report = engine.evaluate_records(trip_record, user_record, &access_level, now)?;
                print_json(&report)
            }
            Command::Timing { trip, now } => {
                let engine = EligibilityEngine::new(config)?;
                let now = parse_now(now.as_deref())?;
                let trip = TripRecord::from_json(&read_file(&trip)?)?.into_trip();
                print_json(&engine.timing_response(&trip, now))
            }
            Command::Config => {
                config.tz()?;
                print_json(&config)
            }
        }
    }
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .wrap_err_with(|| format!("Invalid --now value '{s}'"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn read_file(path: &Path) -> Result<String> {
    debug!("Reading {}", path.display());
    std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_now_converts_to_utc() {
        let now = parse_now(Some("2026-04-04T00:00:00+01:00")).unwrap();
        assert_eq!(now, Utc.with_ymd_and_hms(2026, 4, 3, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_now_rejects_garbage() {
        assert!(parse_now(Some("tomorrow")).is_err());
    }

    #[test]
    fn test_evaluate_arguments() {
        let args = Args::try_parse_from([
            "cavebook",
            "--timezone",
            "Asia/Tokyo",
            "evaluate",
            "--trip",
            "trip.json",
            "--access-level",
            "participant",
        ])
        .unwrap();

        assert_eq!(args.timezone.as_deref(), Some("Asia/Tokyo"));
        match args.command {
            Command::Evaluate {
                trip,
                user,
                access_level,
                now,
            } => {
                assert_eq!(trip, PathBuf::from("trip.json"));
                assert!(user.is_none());
                assert_eq!(access_level, "participant");
                assert!(now.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_timezone_flag_overrides_default() {
        let args = Args::try_parse_from(["cavebook", "config", "--timezone", "Asia/Tokyo"]).unwrap();
        let config = args.engine_config().unwrap();
        assert_eq!(config.timezone, "Asia/Tokyo");
    }
}
