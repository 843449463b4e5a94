use chrono::Local;
use colored::*;
use env_logger::{Builder, Env};
use log::info;
use std::{env as stdenv, io::Write, path::Path};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Colored log format: binary name + version dimmed, local timestamp, level
/// colored by severity, then file:line. `RUST_LOG=trace` collapses the
/// prefix to keep trace floods readable.
pub fn setup_logger() {
    let this_script_name = Path::new(&stdenv::args().next().unwrap_or_default())
        .file_name()
        .unwrap_or_default()
        .to_str()
        .unwrap_or_default()
        .to_owned();
    let this_script_name_with_version = match stdenv::var("RUST_LOG") {
        Ok(val) if val.to_lowercase() == "trace" => "T".to_string().dimmed(),
        _ => format!("{}_{}", this_script_name, VERSION).dimmed(),
    };
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            let level = match record.level() {
                log::Level::Error => format!("{}", record.level()).red(),
                log::Level::Warn => format!(" {}", record.level()).yellow(),
                log::Level::Info => format!(" {}", record.level()).green(),
                log::Level::Debug => format!("{}", record.level()).blue(),
                log::Level::Trace => format!("{}", record.level()).purple(),
            };
            let file = record.file().unwrap_or("unknown");
            let line = record.line().map_or(0, |l| l);

            match &*this_script_name_with_version {
                "T" => writeln!(buf, "{}:{} {}: {}", file, line, level, record.args()),
                _ => writeln!(
                    buf,
                    "{}:{} [{} {}]{}: {}",
                    file,
                    line,
                    format!("{}", this_script_name_with_version).purple(),
                    format!("{}", Local::now().format("%Y%m%d %H:%M:%S")).purple(),
                    level,
                    record.args()
                ),
            }
        })
        .init();
    info!("Logger initialized");
}
