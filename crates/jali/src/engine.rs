//! Tessellation engine.
//!
//! One request runs start to finish against a [`Renderer`]:
//!
//! 1. validate the selection and the request (nothing is touched yet)
//! 2. clear the target frame
//! 3. walk the grid, picking a tile variant (or a custom shape) per cell
//! 4. draw the frame outline and its mask, when enabled
//! 5. draw the mesh and collect it into one collapsed group
//!
//! A renderer failure aborts the request where it happened; whatever was
//! drawn so far stays in the document.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{JaliError, SelectionError};
use crate::flatten::{FlattenConfig, flatten_paths};
use crate::frame::FrameContour;
use crate::geometry::Point;
use crate::grid::GridSpec;
use crate::path::Path;
use crate::picker::Picker;
use crate::render::{GroupLayout, Renderer, SceneNode, Shape, StrokeStyle};
use crate::tiles::{TileFamily, TileKind, TileRegistry};

/// What each cell is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileChoice {
    Family(TileKind),
    /// Clones of the shapes stored by `select-tiles`.
    Custom,
}

impl TileChoice {
    pub const CUSTOM_NAME: &'static str = "customTiles";

    /// Parse a `tileType` value.
    pub fn from_name(name: &str) -> Option<TileChoice> {
        let key = name.trim();
        if key.eq_ignore_ascii_case(Self::CUSTOM_NAME) || key.eq_ignore_ascii_case("custom") {
            return Some(TileChoice::Custom);
        }
        TileKind::from_name(key).map(TileChoice::Family)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TileChoice::Family(kind) => kind.name(),
            TileChoice::Custom => Self::CUSTOM_NAME,
        }
    }
}

/// Parameters of one `create-jali` request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaliRequest {
    /// Lines or arcs per rail/corner tile.
    pub count: usize,
    /// Columns across the target width.
    pub resolution: u32,
    /// Stroke weight of every generated shape.
    pub stroke: f64,
    pub tile: TileChoice,
    /// Draw the arch outline and clip the mesh to it.
    pub frame: bool,
}

impl Default for JaliRequest {
    fn default() -> Self {
        Self {
            count: 2,
            resolution: 10,
            stroke: 4.0,
            tile: TileChoice::Family(TileKind::ArcSweeps),
            frame: true,
        }
    }
}

impl JaliRequest {
    /// Range-check the request against a target of `width x height`.
    pub fn validate(&self, width: f64, height: f64) -> Result<(), JaliError> {
        if self.count < 1 {
            return Err(JaliError::invalid("count must be at least 1"));
        }
        if self.resolution < 1 {
            return Err(JaliError::invalid("resolution must be at least 1"));
        }
        if !self.stroke.is_finite() || self.stroke < 0.0 {
            return Err(JaliError::invalid(format!(
                "stroke must be a non-negative number, got {}",
                self.stroke
            )));
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(JaliError::invalid(format!(
                "target area must be positive, got {width}x{height}"
            )));
        }
        Ok(())
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::round(self.stroke)
    }
}

/// Shapes chosen as custom tiles, held between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTiles<N> {
    shapes: Vec<SceneNode<N>>,
}

impl<N> CustomTiles<N> {
    pub fn shapes(&self) -> &[SceneNode<N>] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Text for the `tile-status` response.
    pub fn status(tiles: Option<&Self>) -> String {
        match tiles.map(|t| t.len()).unwrap_or(0) {
            0 => "no custom tiles selected".to_string(),
            n => format!("{n} custom tiles selected"),
        }
    }
}

/// The single frame a jali is generated into.
pub fn select_target<N>(selection: &[SceneNode<N>]) -> Result<&SceneNode<N>, SelectionError> {
    match selection {
        [] => Err(SelectionError::NoSelection),
        [node] if node.kind.is_frame() => Ok(node),
        [_] => Err(SelectionError::NotAFrame),
        _ => Err(SelectionError::MultipleTargets),
    }
}

/// Validate a selection as custom tiles: non-empty, vector shapes only.
pub fn select_custom_tiles<N: Clone>(selection: &[SceneNode<N>]) -> Result<CustomTiles<N>, SelectionError> {
    if selection.is_empty() {
        return Err(SelectionError::NoTileSelection);
    }
    if let Some(node) = selection.iter().find(|n| !n.kind.is_vector_shape()) {
        debug!(kind = ?node.kind, "rejecting custom tile selection");
        return Err(SelectionError::NotAVectorShape);
    }
    Ok(CustomTiles {
        shapes: selection.to_vec(),
    })
}

/// Run one variant per grid cell and collect the paths, in walk order.
pub fn tessellate(grid: &GridSpec, family: &TileFamily, picker: &mut Picker) -> Vec<Path> {
    let mut paths = Vec::new();
    for cell in grid.cells() {
        let Some(variant) = family.pick(picker) else {
            break;
        };
        trace!(column = cell.column, row = cell.row, variant = variant.name(), "tile");
        paths.push(variant.draw(cell.origin, cell.size));
    }
    paths
}

/// Summary of a finished generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub tile: &'static str,
    pub cells: usize,
    pub cell_size: f64,
    pub mesh_members: usize,
    pub frame_members: usize,
    pub width: f64,
    pub height: f64,
}

/// Tile registry plus flattening settings; reusable across requests.
#[derive(Debug, Clone, Default)]
pub struct JaliEngine {
    registry: TileRegistry,
    flatten: FlattenConfig,
}

impl JaliEngine {
    pub fn new(registry: TileRegistry, flatten: FlattenConfig) -> Self {
        Self { registry, flatten }
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    pub fn flatten_config(&self) -> &FlattenConfig {
        &self.flatten
    }

    /// Generate a jali into the single frame in `selection`.
    pub fn generate<R: Renderer>(
        &self,
        renderer: &mut R,
        selection: &[SceneNode<R::Node>],
        request: &JaliRequest,
        custom_tiles: Option<&CustomTiles<R::Node>>,
        picker: &mut Picker,
    ) -> Result<GenerationReport, JaliError> {
        let target = select_target(selection).inspect_err(|e| warn!("{e}"))?;
        let (width, height) = (target.width, target.height);
        request.validate(width, height).inspect_err(|e| warn!("{e}"))?;

        let fill = match request.tile {
            TileChoice::Custom => match custom_tiles.filter(|t| !t.is_empty()) {
                Some(tiles) => Fill::Custom(tiles),
                None => {
                    warn!("custom tiles requested but none stored");
                    return Err(SelectionError::NoCustomTiles.into());
                }
            },
            TileChoice::Family(kind) => match self.registry.family(kind, request.count) {
                Some(family) => Fill::Family(family),
                None => return Err(JaliError::invalid(format!("tile family {kind} is not available"))),
            },
        };

        let grid = GridSpec::new(width, height, request.resolution);
        let cell_size = grid.cell_size();
        let style = request.style();
        debug!(
            width,
            height,
            cell_size,
            tile = request.tile.name(),
            "generating jali"
        );

        renderer.clear(&target.handle)?;

        // Tile paths are generated and flattened before anything is drawn.
        let polylines = match &fill {
            Fill::Family(family) => {
                let paths = tessellate(&grid, family, picker);
                let lines = flatten_paths(&paths, &self.flatten)?;
                debug!(paths = paths.len(), polylines = lines.len(), "flattened tiles");
                lines
            }
            Fill::Custom(_) => Vec::new(),
        };

        let mut frame_members = 0;
        if request.frame {
            let contour = FrameContour::for_area(width, height, cell_size, request.stroke);
            renderer.append_shape(&target.handle, Shape::Contour(&contour), &style)?;
            renderer.apply_mask(&target.handle, &contour)?;
            frame_members = 2;
        }

        let mut members = Vec::new();
        let mut cells = 0;
        match &fill {
            Fill::Custom(tiles) => {
                for cell in grid.cells() {
                    cells += 1;
                    let Some(shape) = picker.pick(tiles.shapes()) else {
                        break;
                    };
                    trace!(column = cell.column, row = cell.row, "custom tile");
                    let node = renderer.clone_and_place(&target.handle, &shape.handle, cell.origin, cell.size, &style)?;
                    members.push(node);
                }
            }
            Fill::Family(_) => {
                cells = grid.cell_count();
                for line in &polylines {
                    let node = renderer.append_shape(&target.handle, Shape::Polyline(line), &style)?;
                    members.push(node);
                }
            }
        }

        if members.is_empty() {
            debug!("no mesh members to group");
        } else {
            let layout = GroupLayout {
                origin: Point::new(0.0, 0.0),
                width,
                height,
                expanded: false,
            };
            renderer.group(&target.handle, &members, layout)?;
        }

        let report = GenerationReport {
            tile: request.tile.name(),
            cells,
            cell_size,
            mesh_members: members.len(),
            frame_members,
            width,
            height,
        };
        debug!(?report, "jali complete");
        Ok(report)
    }
}

enum Fill<'a, N> {
    Family(TileFamily),
    Custom(&'a CustomTiles<N>),
}

// ============================================================================
// TESTS
// ============================================================================
