//! surface-sampler command line.
//!
//! ```text
//! surface-sampler <molecule> <distance> <points> [--no-preview] [-v]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use surface_sampler::{preview, run_with, SamplerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sample swarm points on an expanded molecular surface
#[derive(Parser, Debug)]
#[command(name = "surface-sampler")]
#[command(about = "Sample swarm points on an expanded molecular surface", long_about = None)]
#[command(version)]
struct Cli {
    /// PDB or mmCIF file of the input structure
    molecule: PathBuf,

    /// Distance to the surface; one 2 Å normal step per whole unit
    #[arg(allow_negative_numbers = true)]
    distance: f64,

    /// Number of points to generate
    points: usize,

    /// Density grid spacing in Å
    #[arg(long, default_value_t = 1.0)]
    grid_spacing: f64,

    /// Density level of the molecular surface
    #[arg(long, default_value_t = 2.5)]
    isovalue: f64,

    /// Directory for the outputs (defaults to the working directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not open the preview window
    #[arg(long)]
    no_preview: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> SamplerConfig {
        let config = SamplerConfig::new(&self.molecule, self.distance, self.points)
            .with_grid_spacing(self.grid_spacing)
            .with_isovalue(self.isovalue);
        match &self.output_dir {
            Some(dir) => config.with_output_dir(dir),
            None => config,
        }
    }

    const fn default_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(cli: &Cli) -> Result<()> {
    let config = cli.config();
    // The points are written once the preview window closes
    let output = run_with(&config, |output| {
        if cli.no_preview {
            info!("Preview disabled");
            Ok(())
        } else {
            preview(output)
        }
    })
    .with_context(|| format!("failed to sample {}", config.molecule.display()))?;

    info!(
        obj = %output.obj_path.display(),
        swarms = %output.swarms_path.display(),
        points = output.clustering.cluster_count(),
        "Done"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.default_level());

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments() {
        let cli = Cli::try_parse_from(["surface-sampler", "1abc.pdb", "10", "400"]).unwrap();
        assert_eq!(cli.molecule, PathBuf::from("1abc.pdb"));
        assert!((cli.distance - 10.0).abs() < f64::EPSILON);
        assert_eq!(cli.points, 400);
        assert!(!cli.no_preview);
        assert_eq!(cli.default_level(), "info");

        let config = cli.config();
        assert!((config.grid_spacing - 1.0).abs() < f64::EPSILON);
        assert!((config.isovalue - 2.5).abs() < f64::EPSILON);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn optional_flags() {
        let cli = Cli::try_parse_from([
            "surface-sampler",
            "in/1abc.pdb",
            "3.5",
            "50",
            "--grid-spacing",
            "0.5",
            "--isovalue",
            "1.5",
            "--output-dir",
            "out",
            "--no-preview",
            "-vv",
        ])
        .unwrap();
        assert!(cli.no_preview);
        assert_eq!(cli.default_level(), "trace");

        let config = cli.config();
        assert_eq!(config.swarms_path(), PathBuf::from("out/1abc_swarms.pdb"));
        assert!((config.grid_spacing - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_distance_parses() {
        let cli = Cli::try_parse_from(["surface-sampler", "x.pdb", "-2", "10"]).unwrap();
        assert!((cli.distance + 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_points_is_rejected() {
        assert!(Cli::try_parse_from(["surface-sampler", "x.pdb", "10"]).is_err());
        assert!(Cli::try_parse_from(["surface-sampler", "x.pdb", "10", "many"]).is_err());
    }
}
