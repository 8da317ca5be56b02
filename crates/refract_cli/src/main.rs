mod cli;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use refract_core::{BatchReport, Droplet, DropletConfig, Execution, RayPath};

use cli::Args;

fn load_droplet_config(path: Option<&Path>) -> Result<DropletConfig> {
    let Some(path) = path else {
        return Ok(DropletConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read droplet config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Invalid droplet config {}", path.display()))?;
    log::info!("Loaded droplet config from {}", path.display());
    Ok(config)
}

fn write_paths(paths: &[RayPath], output: Option<&Path>, pretty: bool) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if pretty {
        serde_json::to_writer_pretty(&mut writer, paths)?;
    } else {
        serde_json::to_writer(&mut writer, paths)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn log_report(report: &BatchReport) {
    log::info!(
        "{} origins, {} paths emitted, {} discarded",
        report.origins,
        report.emitted,
        report.discarded()
    );
    log::debug!(
        "Discarded: {} missed, {} TIR at entry, {} without bounce, {} without exit, {} TIR at exit",
        report.missed_entry,
        report.entry_total_reflection,
        report.no_internal_bounce,
        report.no_exit,
        report.exit_total_reflection
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting refractulator");

    let base = load_droplet_config(args.config.as_deref())?;
    let droplet =
        Droplet::new(args.droplet_config(base)).context("Invalid droplet configuration")?;
    let beam_config = args.beam_config();

    let execution = if args.parallel {
        Execution::Parallel
    } else {
        Execution::Sequential
    };

    let start = Instant::now();
    let (beam, result) = droplet
        .trace_beam(&beam_config, execution)
        .context("Invalid beam configuration")?;
    log::info!(
        "Traced {} rays x {} colors in {:?}",
        beam.len(),
        droplet.table().len(),
        start.elapsed()
    );
    log::debug!(
        "Incident direction {:?}, sun at {:?}",
        beam.direction(),
        droplet.default_sun_position(beam.direction())
    );
    log_report(&result.report);

    write_paths(&result.paths, args.output.as_deref(), args.pretty)?;
    if let Some(path) = &args.output {
        log::info!("Wrote {} paths to {}", result.paths.len(), path.display());
    }

    Ok(())
}
