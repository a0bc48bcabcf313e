//! Jali recipes: YAML files describing a frame, a request and outputs.
//!
//! Relative tile and output paths are resolved against the recipe's own
//! directory, so a recipe and its tiles can travel together.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use jali::{JaliRequest, TileChoice};

use super::common::{Job, TileSources, print_report, write_png, write_text};
use super::error::CliError;

/// A complete recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name/title
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Frame the jali is generated into
    pub canvas: Canvas,

    /// PRNG seed; omitted means a fresh pattern every run
    #[serde(default)]
    pub seed: Option<u64>,

    /// Request fields
    #[serde(default)]
    pub jali: JaliSettings,

    /// Shapes used when `tile_type` is `customTiles`
    #[serde(default)]
    pub custom_tiles: CustomTileSources,

    /// Output files
    #[serde(default)]
    pub output: RecipeOutput,
}

/// Frame size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// The `create-jali` fields, with the UI defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JaliSettings {
    #[serde(default = "default_count")]
    pub count: usize,

    #[serde(default = "default_resolution")]
    pub resolution: u32,

    #[serde(default = "default_stroke")]
    pub stroke: f64,

    #[serde(default = "default_tile_type")]
    pub tile_type: String,

    #[serde(default = "default_frame")]
    pub frame: bool,
}

fn default_count() -> usize {
    2
}

fn default_resolution() -> u32 {
    10
}

fn default_stroke() -> f64 {
    4.0
}

fn default_tile_type() -> String {
    "arcSweeps".to_string()
}

fn default_frame() -> bool {
    true
}

impl Default for JaliSettings {
    fn default() -> Self {
        Self {
            count: default_count(),
            resolution: default_resolution(),
            stroke: default_stroke(),
            tile_type: default_tile_type(),
            frame: default_frame(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomTileSources {
    /// SVG files, one shape each
    #[serde(default)]
    pub svg: Vec<PathBuf>,

    /// Raw path data
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeOutput {
    #[serde(default)]
    pub svg: Option<PathBuf>,

    #[serde(default)]
    pub png: Option<PathBuf>,

    #[serde(default = "default_png_scale")]
    pub png_scale: f64,
}

fn default_png_scale() -> f64 {
    1.0
}

impl Default for RecipeOutput {
    fn default() -> Self {
        Self {
            svg: None,
            png: None,
            png_scale: default_png_scale(),
        }
    }
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("failed to read recipe {}: {e}", path.display())))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build the job, resolving relative tile paths against `base`.
    pub fn to_job(&self, base: &Path) -> Result<Job, CliError> {
        let tile = TileChoice::from_name(&self.jali.tile_type)
            .ok_or_else(|| CliError::Input(format!("unknown tile type '{}'", self.jali.tile_type)))?;

        if tile != TileChoice::Custom && !(self.custom_tiles.svg.is_empty() && self.custom_tiles.paths.is_empty()) {
            warn!(tile = tile.name(), "custom tiles listed but not used");
        }

        Ok(Job {
            width: self.canvas.width,
            height: self.canvas.height,
            request: JaliRequest {
                count: self.jali.count,
                resolution: self.jali.resolution,
                stroke: self.jali.stroke,
                tile,
                frame: self.jali.frame,
            },
            seed: self.seed,
            tiles: TileSources {
                svg_files: self.custom_tiles.svg.iter().map(|p| resolve(base, p)).collect(),
                path_data: self.custom_tiles.paths.clone(),
            },
        })
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}

/// Execute the recipe command.
pub fn cmd_recipe(recipe_path: &Path, output: Option<&Path>, json: bool) -> Result<(), CliError> {
    let recipe = Recipe::load(recipe_path)?;
    let base = recipe_path.parent().unwrap_or_else(|| Path::new("."));
    debug!(name = %recipe.name, "loaded recipe");

    let job = recipe.to_job(base)?;
    let result = job.run()?;
    let svg = result.svg.unwrap_or_default();

    let svg_path = match (output, &recipe.output.svg) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(path)) => Some(resolve(base, path)),
        (None, None) => None,
    };

    match &svg_path {
        Some(path) => {
            write_text(path, &svg)?;
            if !json {
                eprintln!("Wrote: {}", path.display());
            }
        }
        None => print!("{svg}"),
    }

    if let Some(png) = &recipe.output.png {
        let png = resolve(base, png);
        let (w, h) = write_png(&svg, &png, recipe.output.png_scale)?;
        if !json {
            eprintln!("Wrote: {} ({w}x{h})", png.display());
        }
    }

    print_report(&result.report, json && svg_path.is_some())
}

/// Print an example recipe.
pub fn print_example() {
    println!(
        r##"# Example jali recipe
name: "Arched window"
description: "Arc sweeps in a 400x600 frame"

canvas:
  width: 400
  height: 600

seed: 7

jali:
  count: 2          # lines/arcs per rail or corner tile
  resolution: 10    # columns across the width
  stroke: 4
  tile_type: arcSweeps
  frame: true

# Used when tile_type is customTiles
custom_tiles:
  svg: []
  paths:
    - "M 0 0 C 10 0 10 10 0 10 Z"

output:
  svg: window.svg
  png: window.png
  png_scale: 2
"##
    );
}
