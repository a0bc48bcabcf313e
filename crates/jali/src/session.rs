//! Request/response session between a UI and the engine.
//!
//! Messages are JSON objects tagged by `type`, exactly as the UI posts
//! them. A [`Session`] owns the renderer, the picker (seeded once) and the
//! custom tile set, which survives between requests until replaced.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::{CustomTiles, GenerationReport, JaliEngine, JaliRequest, TileChoice, select_custom_tiles};
use crate::error::JaliError;
use crate::picker::Picker;
use crate::render::{Renderer, SceneNode};

/// Messages from the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    CreateJali(CreateJali),
    SelectTiles,
    Cancel,
}

/// Fields of a `create-jali` message.
///
/// The UI parses its text boxes with `parseInt`, so any field may arrive as
/// `null`; missing and `null` fields take the UI defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJali {
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub resolution: Option<i64>,
    #[serde(default)]
    pub stroke: Option<f64>,
    #[serde(default)]
    pub tile_type: Option<String>,
    #[serde(default)]
    pub frame: Option<bool>,
}

impl CreateJali {
    /// Resolve defaults and convert to an engine request.
    pub fn to_request(&self) -> Result<JaliRequest, JaliError> {
        let defaults = JaliRequest::default();

        let count = match self.count {
            None => defaults.count,
            Some(n) if n >= 1 => n as usize,
            Some(n) => return Err(JaliError::invalid(format!("count must be at least 1, got {n}"))),
        };
        let resolution = match self.resolution {
            None => defaults.resolution,
            Some(n) if n >= 1 => u32::try_from(n)
                .map_err(|_| JaliError::invalid(format!("resolution {n} is too large")))?,
            Some(n) => return Err(JaliError::invalid(format!("resolution must be at least 1, got {n}"))),
        };
        let tile = match self.tile_type.as_deref() {
            None => defaults.tile,
            Some(name) => TileChoice::from_name(name)
                .ok_or_else(|| JaliError::invalid(format!("unknown tile type '{name}'")))?,
        };

        Ok(JaliRequest {
            count,
            resolution,
            stroke: self.stroke.unwrap_or(defaults.stroke),
            tile,
            frame: self.frame.unwrap_or(defaults.frame),
        })
    }
}

impl From<JaliRequest> for CreateJali {
    fn from(request: JaliRequest) -> Self {
        Self {
            count: Some(request.count as i64),
            resolution: Some(request.resolution as i64),
            stroke: Some(request.stroke),
            tile_type: Some(request.tile.name().to_string()),
            frame: Some(request.frame),
        }
    }
}

/// Messages back to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Response {
    Done,
    Error { value: String },
    TileStatus { value: String },
}

/// A UI session against one document.
#[derive(Debug)]
pub struct Session<R: Renderer> {
    renderer: R,
    engine: JaliEngine,
    picker: Picker,
    custom_tiles: Option<CustomTiles<R::Node>>,
    last_report: Option<GenerationReport>,
    closed: bool,
}

impl<R: Renderer> Session<R> {
    pub fn new(renderer: R, engine: JaliEngine, picker: Picker) -> Self {
        Self {
            renderer,
            engine,
            picker,
            custom_tiles: None,
            last_report: None,
            closed: false,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn custom_tiles(&self) -> Option<&CustomTiles<R::Node>> {
        self.custom_tiles.as_ref()
    }

    /// Report of the last successful `create-jali`.
    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    /// Closed by `cancel` or by a completed jali.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Handle one message with the host's current selection.
    ///
    /// Returns the responses to post back, in order; `cancel` posts none.
    pub fn handle(&mut self, request: &Request, selection: &[SceneNode<R::Node>]) -> Vec<Response> {
        if self.closed {
            return vec![Response::Error {
                value: "error: session is closed".to_string(),
            }];
        }

        match request {
            Request::CreateJali(fields) => match self.create_jali(fields, selection) {
                Ok(report) => {
                    self.last_report = Some(report);
                    self.closed = true;
                    vec![Response::Done]
                }
                Err(e) => vec![Response::Error { value: e.to_string() }],
            },
            Request::SelectTiles => self.select_tiles(selection),
            Request::Cancel => {
                debug!("session cancelled");
                self.closed = true;
                Vec::new()
            }
        }
    }

    fn create_jali(
        &mut self,
        fields: &CreateJali,
        selection: &[SceneNode<R::Node>],
    ) -> Result<GenerationReport, JaliError> {
        let request = fields.to_request().inspect_err(|e| warn!("{e}"))?;
        self.engine.generate(
            &mut self.renderer,
            selection,
            &request,
            self.custom_tiles.as_ref(),
            &mut self.picker,
        )
    }

    fn select_tiles(&mut self, selection: &[SceneNode<R::Node>]) -> Vec<Response> {
        let mut responses = Vec::with_capacity(2);
        match select_custom_tiles(selection) {
            Ok(tiles) => {
                debug!(count = tiles.len(), "custom tiles stored");
                self.custom_tiles = Some(tiles);
            }
            Err(e) => {
                warn!("{e}");
                self.custom_tiles = None;
                responses.push(Response::Error { value: e.to_string() });
            }
        }
        responses.push(Response::TileStatus {
            value: CustomTiles::status(self.custom_tiles.as_ref()),
        });
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{NodeKind, RecordingRenderer};

    #[test]
    fn parses_ui_messages() {
        let json = r#"{"type":"create-jali","count":3,"resolution":8,"stroke":2,"tileType":"diagonals","frame":false}"#;
        let request: Request = serde_json::from_str(json).unwrap();
        let Request::CreateJali(fields) = &request else {
            panic!("expected create-jali, got {request:?}");
        };
        let parsed = fields.to_request().unwrap();
        assert_eq!(parsed.count, 3);
        assert_eq!(parsed.resolution, 8);
        assert_eq!(parsed.stroke, 2.0);
        assert!(!parsed.frame);

        let cancel: Request = serde_json::from_str(r#"{"type":"cancel"}"#).unwrap();
        assert_eq!(cancel, Request::Cancel);
        let select: Request = serde_json::from_str(r#"{"type":"select-tiles"}"#).unwrap();
        assert_eq!(select, Request::SelectTiles);
    }

    #[test]
    fn null_fields_take_defaults() {
        let json = r#"{"type":"create-jali","count":null,"resolution":null}"#;
        let Request::CreateJali(fields) = serde_json::from_str::<Request>(json).unwrap() else {
            panic!("expected create-jali");
        };
        assert_eq!(fields.to_request().unwrap(), JaliRequest::default());
    }

    #[test]
    fn out_of_range_fields_are_invalid() {
        let fields = CreateJali {
            resolution: Some(0),
            ..CreateJali::from(JaliRequest::default())
        };
        assert!(matches!(fields.to_request(), Err(JaliError::InvalidRequest(_))));

        let fields = CreateJali {
            tile_type: Some("hexagons".into()),
            ..CreateJali::from(JaliRequest::default())
        };
        let err = fields.to_request().unwrap_err();
        assert!(err.to_string().contains("hexagons"));
    }

    #[test]
    fn responses_serialise_with_type_tags() {
        let json = serde_json::to_string(&Response::TileStatus {
            value: "2 custom tiles selected".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"tile-status","value":"2 custom tiles selected"}"#);
        assert_eq!(serde_json::to_string(&Response::Done).unwrap(), r#"{"type":"done"}"#);
    }

    #[test]
    fn cancel_closes_the_session() {
        let mut session = Session::new(RecordingRenderer::new(), JaliEngine::default(), Picker::seeded(1));
        assert!(session.handle(&Request::Cancel, &[]).is_empty());
        assert!(session.is_closed());

        let responses = session.handle(&Request::SelectTiles, &[]);
        assert!(matches!(&responses[0], Response::Error { value } if value.contains("closed")));
    }

    #[test]
    fn select_tiles_replaces_the_stored_set() {
        let mut session = Session::new(RecordingRenderer::new(), JaliEngine::default(), Picker::seeded(1));
        let shapes = [
            SceneNode::new(10, NodeKind::Vector, 5.0, 5.0),
            SceneNode::new(11, NodeKind::Ellipse, 5.0, 5.0),
        ];
        let responses = session.handle(&Request::SelectTiles, &shapes);
        assert_eq!(
            responses,
            vec![Response::TileStatus {
                value: "2 custom tiles selected".into()
            }]
        );

        let bad = [SceneNode::new(12, NodeKind::Text, 5.0, 5.0)];
        let responses = session.handle(&Request::SelectTiles, &bad);
        assert_eq!(responses.len(), 2);
        assert_eq!(
            responses[1],
            Response::TileStatus {
                value: "no custom tiles selected".into()
            }
        );
        assert!(session.custom_tiles().is_none());
    }
}
