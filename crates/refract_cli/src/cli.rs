use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use refract_core::{BeamConfig, DropletConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

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

/// Trace a beam of sunlight through a water droplet and write the ray paths as JSON.
#[derive(Debug, Parser)]
#[command(name = "refractulator")]
#[command(version)]
pub struct Args {
    /// Number of rays in the beam
    #[arg(short = 'n', long, default_value_t = 100)]
    pub rays: usize,

    /// Radius of the cylindrical beam
    #[arg(long, default_value_t = 0.5)]
    pub beam_radius: f64,

    /// Azimuth of the incident direction, degrees
    #[arg(long, default_value_t = 120.0, allow_negative_numbers = true)]
    pub azimuth: f64,

    /// Elevation of the incident direction, degrees
    #[arg(long, default_value_t = -30.0, allow_negative_numbers = true)]
    pub elevation: f64,

    /// Distance of the ray origins behind the droplet center
    #[arg(long, default_value_t = 5.0)]
    pub distance: f64,

    /// Droplet radius (overrides the config file)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Length of the drawn outgoing segment (overrides the config file)
    #[arg(long)]
    pub extension: Option<f64>,

    /// JSON droplet configuration; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Trace origins on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn beam_config(&self) -> BeamConfig {
        BeamConfig {
            num_rays: self.rays,
            cylinder_radius: self.beam_radius,
            theta_deg: self.azimuth,
            phi_deg: self.elevation,
            distance: self.distance,
        }
    }

    /// Apply command-line overrides on top of `base`.
    pub fn droplet_config(&self, base: DropletConfig) -> DropletConfig {
        DropletConfig {
            radius: self.radius.unwrap_or(base.radius),
            exit_extension: self.extension.unwrap_or(base.exit_extension),
            ..base
        }
    }
}
