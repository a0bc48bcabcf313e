//! `jali generate`: one jali from command line flags.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use jali::{JaliRequest, TileChoice};

use super::common::{Job, TileSources, print_report, write_png, write_text};
use super::error::CliError;

/// Flags of the `generate` subcommand.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Frame width.
    #[arg(short = 'W', long, default_value_t = 400.0)]
    pub width: f64,

    /// Frame height.
    #[arg(short = 'H', long, default_value_t = 600.0)]
    pub height: f64,

    /// Tile family name, or `customTiles`.
    #[arg(short, long, default_value = "arcSweeps")]
    pub tile: String,

    /// Lines or arcs per rail/corner tile.
    #[arg(short, long, default_value_t = 2)]
    pub count: usize,

    /// Columns across the frame width.
    #[arg(short, long, default_value_t = 10)]
    pub resolution: u32,

    /// Stroke weight.
    #[arg(short, long, default_value_t = 4.0)]
    pub stroke: f64,

    /// Skip the arch outline and mask.
    #[arg(long)]
    pub no_frame: bool,

    /// PRNG seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// SVG file to use as a custom tile (repeatable).
    #[arg(long = "tile-svg", value_name = "FILE")]
    pub tile_svgs: Vec<PathBuf>,

    /// Raw path data to use as a custom tile (repeatable).
    #[arg(long = "tile-path", value_name = "DATA")]
    pub tile_paths: Vec<String>,

    /// Output SVG file; `-` writes to stdout.
    #[arg(short, long, default_value = "jali.svg")]
    pub output: PathBuf,

    /// Also rasterise to this PNG file.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// PNG pixels per canvas unit.
    #[arg(long, default_value_t = 1.0)]
    pub png_scale: f64,

    /// Run against the recording renderer and only print the report.
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn to_job(&self) -> Result<Job, CliError> {
        let tile = TileChoice::from_name(&self.tile)
            .ok_or_else(|| CliError::Input(format!("unknown tile type '{}', see `jali tiles`", self.tile)))?;
        Ok(Job {
            width: self.width,
            height: self.height,
            request: JaliRequest {
                count: self.count,
                resolution: self.resolution,
                stroke: self.stroke,
                tile,
                frame: !self.no_frame,
            },
            seed: self.seed,
            tiles: TileSources {
                svg_files: self.tile_svgs.clone(),
                path_data: self.tile_paths.clone(),
            },
        })
    }
}

pub fn cmd_generate(args: &GenerateArgs, json: bool) -> Result<(), CliError> {
    let job = args.to_job()?;

    if args.dry_run {
        let output = job.dry_run()?;
        return print_report(&output.report, json);
    }

    let output = job.run()?;
    let svg = output.svg.unwrap_or_default();

    if args.output.as_os_str() == "-" {
        print!("{svg}");
    } else {
        write_text(&args.output, &svg)?;
        info!(path = %args.output.display(), "wrote SVG");
        if !json {
            eprintln!("Wrote: {}", args.output.display());
        }
    }

    if let Some(png) = &args.png {
        let (w, h) = write_png(&svg, png, args.png_scale)?;
        if !json {
            eprintln!("Wrote: {} ({w}x{h})", png.display());
        }
    }

    // Stdout carries the SVG in `-` mode; keep the report off it.
    if args.output.as_os_str() == "-" {
        print_report(&output.report, false)
    } else {
        print_report(&output.report, json)
    }
}
