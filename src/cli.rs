use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Scenes the binary knows how to build
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneChoice {
    /// Field of random spheres around three large ones
    Cover,
    /// One sphere on a ground sphere
    Quick,
}

/// Parse `16:9` or `1.777` into a width/height ratio.
fn parse_aspect_ratio(s: &str) -> Result<f64, String> {
    let ratio = match s.split_once(':') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().map_err(|e| format!("bad width '{}': {}", w, e))?;
            let h: f64 = h.trim().parse().map_err(|e| format!("bad height '{}': {}", h, e))?;
            w / h
        }
        None => s.trim().parse().map_err(|e| format!("bad aspect ratio '{}': {}", s, e))?,
    };
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("aspect ratio must be positive, got '{}'", s))
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "spheretracer")]
#[command(about = "A recursive Monte-Carlo path tracer for sphere scenes")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Scene to render
    #[arg(long, value_enum, default_value = "cover")]
    pub scene: SceneChoice,

    /// Image width in pixels
    #[arg(long, default_value = "400")]
    pub width: u32,

    /// Width over height, as `16:9` or a decimal number
    #[arg(long, default_value = "16:9", value_parser = parse_aspect_ratio)]
    pub aspect_ratio: f64,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "50")]
    pub samples_per_pixel: u32,

    /// Maximum number of bounces per ray
    #[arg(long, default_value = "50")]
    pub max_depth: u32,

    /// Seed for the random generator; omit for a different image every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (.ppm for ASCII P3, .png for 8-bit PNG)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}
