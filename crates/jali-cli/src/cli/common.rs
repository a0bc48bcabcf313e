//! Common utilities shared across CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use jali::{
    GenerationReport, JaliEngine, JaliRequest, NodeKind, Picker, RecordingRenderer, Renderer, SceneNode,
    SvgDocument, SvgNodeId, TileShape, extract_shape_from_svg, select_custom_tiles, shape_from_path_data,
};

use super::error::CliError;

/// Where custom tile shapes come from.
#[derive(Debug, Clone, Default)]
pub struct TileSources {
    /// SVG files; each file is one shape.
    pub svg_files: Vec<PathBuf>,
    /// Raw path data strings.
    pub path_data: Vec<String>,
}

impl TileSources {
    /// Parse every source, files first.
    pub fn load(&self) -> Result<Vec<TileShape>, CliError> {
        let mut shapes = Vec::with_capacity(self.svg_files.len() + self.path_data.len());
        for path in &self.svg_files {
            let content = fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("failed to read tile {}: {e}", path.display())))?;
            let shape = extract_shape_from_svg(&content)
                .map_err(|e| CliError::Input(format!("tile {}: {e}", path.display())))?;
            debug!(file = %path.display(), bounds = ?shape.bounds, "loaded tile");
            shapes.push(shape);
        }
        for data in &self.path_data {
            let shape = shape_from_path_data(data)
                .map_err(|e| CliError::Input(format!("tile path '{data}': {e}")))?;
            shapes.push(shape);
        }
        Ok(shapes)
    }
}

/// One generation run: a frame of the given size and a request.
#[derive(Debug, Clone)]
pub struct Job {
    pub width: f64,
    pub height: f64,
    pub request: JaliRequest,
    pub seed: Option<u64>,
    pub tiles: TileSources,
}

/// Result of a job. `svg` is `None` for dry runs.
#[derive(Debug)]
pub struct JobOutput {
    pub report: GenerationReport,
    pub svg: Option<String>,
}

impl Job {
    /// Generate into a fresh SVG document.
    pub fn run(&self) -> Result<JobOutput, CliError> {
        let mut doc = SvgDocument::new();
        let root = doc
            .create_container(self.width, self.height)
            .map_err(|e| CliError::Generation(e.into()))?;
        let frame = doc.scene_node(root).map_err(|e| CliError::Generation(e.into()))?;

        let shapes: Vec<SceneNode<SvgNodeId>> = self
            .tiles
            .load()?
            .into_iter()
            .map(|shape| doc.import_shape(shape))
            .collect();

        let report = self.generate(&mut doc, frame, &shapes)?;
        let svg = doc.to_svg_string(root).map_err(|e| CliError::Generation(e.into()))?;
        Ok(JobOutput { report, svg: Some(svg) })
    }

    /// Generate against the recording renderer; nothing is written.
    pub fn dry_run(&self) -> Result<JobOutput, CliError> {
        let mut renderer = RecordingRenderer::new();
        let shapes: Vec<SceneNode<usize>> = self
            .tiles
            .load()?
            .iter()
            .map(|shape| SceneNode::new(renderer.reserve(), NodeKind::Vector, shape.bounds.width(), shape.bounds.height()))
            .collect();
        let root = renderer
            .create_container(self.width, self.height)
            .map_err(|e| CliError::Generation(e.into()))?;
        let frame = SceneNode::new(root, NodeKind::Frame, self.width, self.height);

        let report = self.generate(&mut renderer, frame, &shapes)?;
        info!(calls = renderer.calls().len(), "dry run complete");
        Ok(JobOutput { report, svg: None })
    }

    fn generate<R: Renderer>(
        &self,
        renderer: &mut R,
        frame: SceneNode<R::Node>,
        shapes: &[SceneNode<R::Node>],
    ) -> Result<GenerationReport, CliError> {
        let custom = if shapes.is_empty() {
            None
        } else {
            Some(select_custom_tiles(shapes).map_err(|e| CliError::Generation(e.into()))?)
        };

        let mut picker = Picker::new(self.seed);
        let report = JaliEngine::default().generate(renderer, &[frame], &self.request, custom.as_ref(), &mut picker)?;
        Ok(report)
    }
}

/// Write a text file, creating parent directories as needed.
pub fn write_text(path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::Io(format!("failed to create {}: {e}", parent.display())))?;
    }
    fs::write(path, content).map_err(|e| CliError::Io(format!("failed to write {}: {e}", path.display())))
}

/// Rasterise SVG content to a PNG on a white background.
///
/// Returns the pixel size written.
pub fn write_png(svg_content: &str, png_path: &Path, scale: f64) -> Result<(u32, u32), CliError> {
    use resvg::usvg;
    use tiny_skia::Pixmap;

    if !(scale.is_finite() && scale > 0.0) {
        return Err(CliError::Input(format!("PNG scale must be positive, got {scale}")));
    }

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| CliError::Input(format!("generated SVG did not parse: {e}")))?;

    let size = tree.size();
    let pixmap_width = (size.width() as f64 * scale).ceil() as u32;
    let pixmap_height = (size.height() as f64 * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height).ok_or_else(|| {
        CliError::Input(format!("could not create a {pixmap_width}x{pixmap_height} pixmap"))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    if let Some(parent) = png_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::Io(format!("failed to create {}: {e}", parent.display())))?;
    }
    pixmap
        .save_png(png_path)
        .map_err(|e| CliError::Io(format!("failed to write {}: {e}", png_path.display())))?;

    Ok((pixmap_width, pixmap_height))
}

/// Print a report as text or JSON.
pub fn print_report(report: &GenerationReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        eprintln!(
            "jali: {} tiles, {} cells of {:.2}, {} mesh members, {} frame members ({}x{})",
            report.tile,
            report.cells,
            report.cell_size,
            report.mesh_members,
            report.frame_members,
            report.width,
            report.height
        );
    }
    Ok(())
}
