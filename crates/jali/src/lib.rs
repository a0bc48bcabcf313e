//! # jali
//!
//! Tile-pattern generation for jali lattice screens: a grid of randomly
//! picked tiles, flattened to polylines and clipped by an ogee arch frame.
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod document;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod frame;
pub mod geometry;
pub mod grid;
pub mod path;
pub mod picker;
pub mod render;
pub mod session;
pub mod svg;
pub mod tiles;

// Re-export common types at crate root for convenience.
pub use document::{SvgDocument, SvgNodeId};
pub use engine::{CustomTiles, GenerationReport, JaliEngine, JaliRequest, TileChoice, select_custom_tiles, select_target, tessellate};
pub use error::{JaliError, SelectionError};
pub use flatten::{FlattenConfig, flatten_path, flatten_paths};
pub use frame::{ContourSegment, FrameContour};
pub use geometry::{Bounds, Point, Polyline};
pub use grid::{GridCell, GridSpec};
pub use path::{Path, PathCommand, PathError};
pub use picker::Picker;
pub use render::{GroupLayout, NodeKind, RecordingRenderer, RenderError, Renderer, SceneNode, Shape, StrokeStyle};
pub use session::{CreateJali, Request, Response, Session};
pub use svg::{SvgError, TileShape, extract_shape_from_svg, shape_from_path_data};
pub use tiles::{TileFamily, TileKind, TileRegistry, TileVariant};
