//! The renderer capability the engine draws through.
//!
//! The engine never touches a concrete document API. Anything that can
//! create a container, append stroked shapes, clone a shape into place,
//! group nodes and add a clipping mask can host a jali: an SVG document
//! ([`crate::document::SvgDocument`]), a design tool bridge, or the
//! [`RecordingRenderer`] used by tests and dry runs.
//!
//! ## Rust Lesson #12: Traits with Associated Types
//!
//! `type Node` lets each renderer pick its own handle type (an index, an
//! id string, ...). The engine is generic over `R: Renderer` and only ever
//! passes `R::Node` values back to the same renderer.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::frame::FrameContour;
use crate::geometry::Point;

/// A renderer call failed. The message is passed through to the user.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Stroke join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Round,
    Miter,
    Bevel,
}

/// Stroke cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Round,
    Butt,
    Square,
}

impl LineJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineJoin::Round => "round",
            LineJoin::Miter => "miter",
            LineJoin::Bevel => "bevel",
        }
    }
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Round => "round",
            LineCap::Butt => "butt",
            LineCap::Square => "square",
        }
    }
}

/// Stroke styling applied to every generated shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub weight: f64,
    pub join: LineJoin,
    pub cap: LineCap,
}

impl StrokeStyle {
    /// `weight` wide with round joins and caps.
    pub fn round(weight: f64) -> Self {
        Self {
            weight,
            join: LineJoin::Round,
            cap: LineCap::Round,
        }
    }
}

/// Something the renderer can stroke.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// A flattened subpath.
    Polyline(&'a [Point]),
    /// The frame outline, Bézier segments kept as-is.
    Contour(&'a FrameContour),
}

/// Where a group lands once its members are collected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupLayout {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    /// Whether the group shows its children expanded in layer lists.
    pub expanded: bool,
}

/// Document operations the engine needs from its host.
pub trait Renderer {
    /// Handle to a node owned by this renderer.
    type Node: Clone + fmt::Debug;

    /// Create a fresh, empty container of the given size.
    fn create_container(&mut self, width: f64, height: f64) -> Result<Self::Node, RenderError>;

    /// Remove every child of `container`.
    fn clear(&mut self, container: &Self::Node) -> Result<(), RenderError>;

    /// Append a stroked shape as the last child of `parent`.
    fn append_shape(
        &mut self,
        parent: &Self::Node,
        shape: Shape<'_>,
        style: &StrokeStyle,
    ) -> Result<Self::Node, RenderError>;

    /// Append a solid copy of `contour` flagged as a mask; it clips the
    /// siblings appended after it.
    fn apply_mask(&mut self, parent: &Self::Node, contour: &FrameContour) -> Result<Self::Node, RenderError>;

    /// Clone `source` into `parent`, resized to `size x size` at `origin`.
    fn clone_and_place(
        &mut self,
        parent: &Self::Node,
        source: &Self::Node,
        origin: Point,
        size: f64,
        style: &StrokeStyle,
    ) -> Result<Self::Node, RenderError>;

    /// Move `members` into a new group inside `parent`.
    fn group(
        &mut self,
        parent: &Self::Node,
        members: &[Self::Node],
        layout: GroupLayout,
    ) -> Result<Self::Node, RenderError>;
}

/// Host node types, as far as selection checks care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Frame,
    Group,
    Vector,
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Line,
    Text,
    Image,
    Other,
}

impl NodeKind {
    /// Can host a jali.
    pub fn is_frame(&self) -> bool {
        matches!(self, NodeKind::Frame)
    }

    /// Can be used as a custom tile.
    pub fn is_vector_shape(&self) -> bool {
        matches!(
            self,
            NodeKind::Vector
                | NodeKind::Rectangle
                | NodeKind::Ellipse
                | NodeKind::Polygon
                | NodeKind::Star
                | NodeKind::Line
        )
    }
}

/// A selected node as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode<N> {
    pub handle: N,
    pub kind: NodeKind,
    pub width: f64,
    pub height: f64,
}

impl<N> SceneNode<N> {
    pub fn new(handle: N, kind: NodeKind, width: f64, height: f64) -> Self {
        Self { handle, kind, width, height }
    }
}

// ============================================================================
// RECORDING RENDERER
// ============================================================================

/// Handle type of [`RecordingRenderer`].
pub type RecordedId = usize;

/// One call made against a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateContainer { id: RecordedId, width: f64, height: f64 },
    Clear { container: RecordedId },
    AppendPolyline { id: RecordedId, parent: RecordedId, points: Vec<Point>, style: StrokeStyle },
    AppendContour { id: RecordedId, parent: RecordedId, contour: FrameContour, style: StrokeStyle },
    ApplyMask { id: RecordedId, parent: RecordedId, contour: FrameContour },
    CloneAndPlace {
        id: RecordedId,
        parent: RecordedId,
        source: RecordedId,
        origin: Point,
        size: f64,
        style: StrokeStyle,
    },
    Group { id: RecordedId, parent: RecordedId, members: Vec<RecordedId>, layout: GroupLayout },
}

/// Headless renderer that records every call.
///
/// Ids are handed out sequentially; [`RecordingRenderer::reserve`] hands out
/// ids for nodes that exist "outside" the recording (custom tile sources).
/// [`RecordingRenderer::fail_after`] makes later calls fail, to exercise
/// error paths.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    next_id: RecordedId,
    fail_after: Option<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call once `calls` calls have succeeded.
    pub fn fail_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Allocate an id without recording a call.
    pub fn reserve(&mut self) -> RecordedId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Number of stroked polylines appended.
    pub fn polyline_count(&self) -> usize {
        self.count(|c| matches!(c, RenderCall::AppendPolyline { .. }))
    }

    /// Number of clones placed.
    pub fn clone_count(&self) -> usize {
        self.count(|c| matches!(c, RenderCall::CloneAndPlace { .. }))
    }

    /// Number of frame outline and mask nodes.
    pub fn frame_member_count(&self) -> usize {
        self.count(|c| matches!(c, RenderCall::AppendContour { .. } | RenderCall::ApplyMask { .. }))
    }

    /// The last group created, if any.
    pub fn last_group(&self) -> Option<(&[RecordedId], GroupLayout)> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::Group { members, layout, .. } => Some((members.as_slice(), *layout)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&mut self, make: impl FnOnce(RecordedId) -> RenderCall) -> Result<RecordedId, RenderError> {
        if let Some(limit) = self.fail_after {
            if self.calls.len() >= limit {
                return Err(RenderError::new(format!(
                    "renderer rejected call {}",
                    self.calls.len() + 1
                )));
            }
        }
        let id = self.reserve();
        self.calls.push(make(id));
        Ok(id)
    }
}

impl Renderer for RecordingRenderer {
    type Node = RecordedId;

    fn create_container(&mut self, width: f64, height: f64) -> Result<RecordedId, RenderError> {
        self.record(|id| RenderCall::CreateContainer { id, width, height })
    }

    fn clear(&mut self, container: &RecordedId) -> Result<(), RenderError> {
        let container = *container;
        self.record(|_| RenderCall::Clear { container }).map(|_| ())
    }

    fn append_shape(
        &mut self,
        parent: &RecordedId,
        shape: Shape<'_>,
        style: &StrokeStyle,
    ) -> Result<RecordedId, RenderError> {
        let (parent, style) = (*parent, *style);
        match shape {
            Shape::Polyline(points) => self.record(|id| RenderCall::AppendPolyline {
                id,
                parent,
                points: points.to_vec(),
                style,
            }),
            Shape::Contour(contour) => self.record(|id| RenderCall::AppendContour {
                id,
                parent,
                contour: contour.clone(),
                style,
            }),
        }
    }

    fn apply_mask(&mut self, parent: &RecordedId, contour: &FrameContour) -> Result<RecordedId, RenderError> {
        let parent = *parent;
        self.record(|id| RenderCall::ApplyMask {
            id,
            parent,
            contour: contour.clone(),
        })
    }

    fn clone_and_place(
        &mut self,
        parent: &RecordedId,
        source: &RecordedId,
        origin: Point,
        size: f64,
        style: &StrokeStyle,
    ) -> Result<RecordedId, RenderError> {
        let (parent, source, style) = (*parent, *source, *style);
        self.record(|id| RenderCall::CloneAndPlace {
            id,
            parent,
            source,
            origin,
            size,
            style,
        })
    }

    fn group(
        &mut self,
        parent: &RecordedId,
        members: &[RecordedId],
        layout: GroupLayout,
    ) -> Result<RecordedId, RenderError> {
        let parent = *parent;
        let members = members.to_vec();
        self.record(|id| RenderCall::Group {
            id,
            parent,
            members,
            layout,
        })
    }
}
