//! Errors surfaced to the user.
//!
//! Every failure of a request ends up as one [`JaliError`], whose `Display`
//! text is exactly what the UI shows.

use thiserror::Error;

use crate::path::PathError;
use crate::render::RenderError;
use crate::svg::SvgError;

/// The current selection cannot be used for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("error: nothing selected, select one frame")]
    NoSelection,
    #[error("error: select just one frame")]
    MultipleTargets,
    #[error("error: select a frame")]
    NotAFrame,
    #[error("error: no custom tiles selected")]
    NoCustomTiles,
    #[error("error: select one or more vector shapes to use as tiles")]
    NoTileSelection,
    #[error("error: custom tiles must be vector shapes")]
    NotAVectorShape,
}

/// Any failure while handling a request.
#[derive(Debug, Error)]
pub enum JaliError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("error: {0}")]
    Render(#[from] RenderError),

    #[error("error: {0}")]
    Path(#[from] PathError),

    #[error("error: {0}")]
    Svg(#[from] SvgError),

    #[error("error: invalid request: {0}")]
    InvalidRequest(String),
}

impl JaliError {
    pub fn invalid(message: impl Into<String>) -> Self {
        JaliError::InvalidRequest(message.into())
    }

    /// Rejected before anything in the document changed.
    pub fn is_pre_mutation(&self) -> bool {
        matches!(self, JaliError::Selection(_) | JaliError::InvalidRequest(_))
    }
}
