//! In-memory SVG document implementing [`Renderer`].
//!
//! Nodes live in an arena and are addressed by [`SvgNodeId`]. Imported tile
//! shapes are arena nodes with no parent: they can be cloned into the tree
//! but are never written out themselves.
//!
//! Serialisation uses quick-xml. Masks follow design-tool semantics: a mask
//! node clips the siblings that come after it, which in SVG becomes a
//! `<clipPath>` plus a `<g clip-path>` wrapping those siblings.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::frame::FrameContour;
use crate::geometry::{Bounds, Point};
use crate::render::{GroupLayout, NodeKind, RenderError, Renderer, SceneNode, Shape, StrokeStyle};
use crate::svg::TileShape;

const STROKE_COLOR: &str = "black";

/// Handle to a node in an [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SvgNodeId(usize);

#[derive(Debug, Clone)]
enum SvgNodeKind {
    Container { width: f64, height: f64 },
    Polyline { points: Vec<Point>, style: StrokeStyle },
    Outline { data: String, style: StrokeStyle },
    Mask { data: String },
    Shape { data: String, bounds: Bounds, placement: Option<Placement> },
    Group { layout: GroupLayout },
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    origin: Point,
    size: f64,
    style: StrokeStyle,
}

#[derive(Debug, Clone)]
struct SvgNode {
    kind: SvgNodeKind,
    parent: Option<SvgNodeId>,
    children: Vec<SvgNodeId>,
}

/// An SVG document under construction.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    nodes: Vec<SvgNode>,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an imported shape as a selectable vector node.
    pub fn import_shape(&mut self, shape: TileShape) -> SceneNode<SvgNodeId> {
        let (width, height) = (shape.bounds.width(), shape.bounds.height());
        let id = self.push(
            SvgNodeKind::Shape {
                data: shape.data,
                bounds: shape.bounds,
                placement: None,
            },
            None,
        );
        SceneNode::new(id, NodeKind::Vector, width, height)
    }

    /// Describe a container for selection checks.
    pub fn scene_node(&self, id: SvgNodeId) -> Result<SceneNode<SvgNodeId>, RenderError> {
        let node = self.node(id)?;
        Ok(match node.kind {
            SvgNodeKind::Container { width, height } => SceneNode::new(id, NodeKind::Frame, width, height),
            SvgNodeKind::Shape { bounds, .. } => SceneNode::new(id, NodeKind::Vector, bounds.width(), bounds.height()),
            SvgNodeKind::Group { layout } => SceneNode::new(id, NodeKind::Group, layout.width, layout.height),
            SvgNodeKind::Polyline { .. } | SvgNodeKind::Outline { .. } | SvgNodeKind::Mask { .. } => {
                SceneNode::new(id, NodeKind::Vector, 0.0, 0.0)
            }
        })
    }

    /// Children of `id`, in paint order.
    pub fn children(&self, id: SvgNodeId) -> Result<&[SvgNodeId], RenderError> {
        Ok(&self.node(id)?.children)
    }

    /// Serialise the tree under `root` as a standalone SVG document.
    pub fn to_svg_string(&self, root: SvgNodeId) -> Result<String, RenderError> {
        let SvgNodeKind::Container { width, height } = self.node(root)?.kind else {
            return Err(RenderError::new("only containers can be written as documents"));
        };

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        svg.push_attribute(("width", num(width).as_str()));
        svg.push_attribute(("height", num(height).as_str()));
        svg.push_attribute(("viewBox", format!("0 0 {} {}", num(width), num(height)).as_str()));
        write(&mut writer, Event::Start(svg))?;

        self.write_children(&mut writer, root)?;

        write(&mut writer, Event::End(BytesEnd::new("svg")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| RenderError::new(e.to_string()))
    }

    fn push(&mut self, kind: SvgNodeKind, parent: Option<SvgNodeId>) -> SvgNodeId {
        let id = SvgNodeId(self.nodes.len());
        self.nodes.push(SvgNode {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn node(&self, id: SvgNodeId) -> Result<&SvgNode, RenderError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| RenderError::new(format!("unknown node {}", id.0)))
    }

    fn ensure_parent(&self, id: SvgNodeId) -> Result<(), RenderError> {
        match self.node(id)?.kind {
            SvgNodeKind::Container { .. } | SvgNodeKind::Group { .. } => Ok(()),
            _ => Err(RenderError::new(format!("node {} cannot hold children", id.0))),
        }
    }

    fn detach(&mut self, id: SvgNodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    fn write_children<W: Write>(&self, writer: &mut Writer<W>, id: SvgNodeId) -> Result<(), RenderError> {
        let mut open_clips = 0;

        for &child in &self.node(id)?.children {
            if let SvgNodeKind::Mask { data } = &self.node(child)?.kind {
                let clip_id = format!("jali-mask-{}", child.0);

                write(writer, Event::Start(BytesStart::new("defs")))?;
                let mut clip = BytesStart::new("clipPath");
                clip.push_attribute(("id", clip_id.as_str()));
                write(writer, Event::Start(clip))?;
                let mut path = BytesStart::new("path");
                path.push_attribute(("d", data.as_str()));
                path.push_attribute(("fill", STROKE_COLOR));
                write(writer, Event::Empty(path))?;
                write(writer, Event::End(BytesEnd::new("clipPath")))?;
                write(writer, Event::End(BytesEnd::new("defs")))?;

                let mut clipped = BytesStart::new("g");
                clipped.push_attribute(("clip-path", format!("url(#{clip_id})").as_str()));
                write(writer, Event::Start(clipped))?;
                open_clips += 1;
                continue;
            }
            self.write_node(writer, child)?;
        }

        for _ in 0..open_clips {
            write(writer, Event::End(BytesEnd::new("g")))?;
        }
        Ok(())
    }

    fn write_node<W: Write>(&self, writer: &mut Writer<W>, id: SvgNodeId) -> Result<(), RenderError> {
        match &self.node(id)?.kind {
            SvgNodeKind::Container { width, height } => {
                let mut g = BytesStart::new("g");
                g.push_attribute(("data-width", num(*width).as_str()));
                g.push_attribute(("data-height", num(*height).as_str()));
                write(writer, Event::Start(g))?;
                self.write_children(writer, id)?;
                write(writer, Event::End(BytesEnd::new("g")))
            }
            SvgNodeKind::Polyline { points, style } => {
                let points: String = points
                    .iter()
                    .map(|p| format!("{:.2},{:.2}", p.x, p.y))
                    .collect::<Vec<_>>()
                    .join(" ");
                let mut el = BytesStart::new("polyline");
                el.push_attribute(("points", points.as_str()));
                push_stroke(&mut el, style);
                write(writer, Event::Empty(el))
            }
            SvgNodeKind::Outline { data, style } => {
                let mut el = BytesStart::new("path");
                el.push_attribute(("d", data.as_str()));
                push_stroke(&mut el, style);
                write(writer, Event::Empty(el))
            }
            // Masks are handled by the parent in write_children.
            SvgNodeKind::Mask { .. } => Ok(()),
            SvgNodeKind::Shape { data, bounds, placement } => {
                let mut el = BytesStart::new("path");
                el.push_attribute(("d", data.as_str()));
                if let Some(placement) = placement {
                    el.push_attribute(("transform", placement_transform(bounds, placement).as_str()));
                    el.push_attribute(("vector-effect", "non-scaling-stroke"));
                    push_stroke(&mut el, &placement.style);
                }
                write(writer, Event::Empty(el))
            }
            SvgNodeKind::Group { layout } => {
                let mut g = BytesStart::new("g");
                g.push_attribute(("transform", format!("translate({} {})", num(layout.origin.x), num(layout.origin.y)).as_str()));
                g.push_attribute(("data-width", num(layout.width).as_str()));
                g.push_attribute(("data-height", num(layout.height).as_str()));
                g.push_attribute(("data-expanded", if layout.expanded { "true" } else { "false" }));
                write(writer, Event::Start(g))?;
                self.write_children(writer, id)?;
                write(writer, Event::End(BytesEnd::new("g")))
            }
        }
    }
}

impl Renderer for SvgDocument {
    type Node = SvgNodeId;

    fn create_container(&mut self, width: f64, height: f64) -> Result<SvgNodeId, RenderError> {
        Ok(self.push(SvgNodeKind::Container { width, height }, None))
    }

    fn clear(&mut self, container: &SvgNodeId) -> Result<(), RenderError> {
        self.ensure_parent(*container)?;
        let children = std::mem::take(&mut self.nodes[container.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        Ok(())
    }

    fn append_shape(
        &mut self,
        parent: &SvgNodeId,
        shape: Shape<'_>,
        style: &StrokeStyle,
    ) -> Result<SvgNodeId, RenderError> {
        self.ensure_parent(*parent)?;
        let kind = match shape {
            Shape::Polyline(points) => SvgNodeKind::Polyline {
                points: points.to_vec(),
                style: *style,
            },
            Shape::Contour(contour) => SvgNodeKind::Outline {
                data: contour.to_path_data(),
                style: *style,
            },
        };
        Ok(self.push(kind, Some(*parent)))
    }

    fn apply_mask(&mut self, parent: &SvgNodeId, contour: &FrameContour) -> Result<SvgNodeId, RenderError> {
        self.ensure_parent(*parent)?;
        Ok(self.push(SvgNodeKind::Mask { data: contour.to_path_data() }, Some(*parent)))
    }

    fn clone_and_place(
        &mut self,
        parent: &SvgNodeId,
        source: &SvgNodeId,
        origin: Point,
        size: f64,
        style: &StrokeStyle,
    ) -> Result<SvgNodeId, RenderError> {
        self.ensure_parent(*parent)?;
        let SvgNodeKind::Shape { data, bounds, .. } = &self.node(*source)?.kind else {
            return Err(RenderError::new(format!("node {} is not a vector shape", source.0)));
        };
        let kind = SvgNodeKind::Shape {
            data: data.clone(),
            bounds: *bounds,
            placement: Some(Placement {
                origin,
                size,
                style: *style,
            }),
        };
        Ok(self.push(kind, Some(*parent)))
    }

    fn group(
        &mut self,
        parent: &SvgNodeId,
        members: &[SvgNodeId],
        layout: GroupLayout,
    ) -> Result<SvgNodeId, RenderError> {
        self.ensure_parent(*parent)?;
        for member in members {
            self.node(*member)?;
        }

        // The group takes the paint position of its first member.
        let position = members
            .first()
            .and_then(|first| self.nodes[parent.0].children.iter().position(|c| c == first));

        let group = SvgNodeId(self.nodes.len());
        self.nodes.push(SvgNode {
            kind: SvgNodeKind::Group { layout },
            parent: Some(*parent),
            children: Vec::new(),
        });

        for &member in members {
            self.detach(member);
            self.nodes[member.0].parent = Some(group);
            self.nodes[group.0].children.push(member);
        }

        let siblings = &mut self.nodes[parent.0].children;
        match position {
            Some(index) if index <= siblings.len() => siblings.insert(index, group),
            _ => siblings.push(group),
        }

        Ok(group)
    }
}

fn write<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), RenderError> {
    writer
        .write_event(event)
        .map_err(|e| RenderError::new(format!("SVG write failed: {e}")))
}

fn push_stroke(el: &mut BytesStart<'_>, style: &StrokeStyle) {
    el.push_attribute(("fill", "none"));
    el.push_attribute(("stroke", STROKE_COLOR));
    el.push_attribute(("stroke-width", num(style.weight).as_str()));
    el.push_attribute(("stroke-linejoin", style.join.as_str()));
    el.push_attribute(("stroke-linecap", style.cap.as_str()));
}

/// Map the shape's bounds onto the `size x size` square at the origin.
fn placement_transform(bounds: &Bounds, placement: &Placement) -> String {
    let scale = |extent: f64| if extent > 0.0 { placement.size / extent } else { 1.0 };
    format!(
        "translate({} {}) scale({} {}) translate({} {})",
        num(placement.origin.x),
        num(placement.origin.y),
        num(scale(bounds.width())),
        num(scale(bounds.height())),
        num(-bounds.min_x),
        num(-bounds.min_y),
    )
}

/// Compact number formatting: at most 4 decimals, no trailing zeros.
fn num(value: f64) -> String {
    let s = format!("{value:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

// ============================================================================
// TESTS
// ============================================================================
