//! `jali request`: replay UI messages against a fresh document.
//!
//! Accepts one JSON message or an array of them (`@file` reads from a
//! file). `select-tiles` sees the loaded custom tiles as the selection,
//! every other message sees the frame. Responses are printed one JSON
//! object per line, the way the UI would receive them.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use jali::{JaliEngine, Picker, Renderer, Request, Response, SceneNode, Session, SvgDocument, SvgNodeId};

use super::common::{TileSources, write_text};
use super::error::CliError;

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// JSON message(s), or `@path` to read them from a file.
    pub message: String,

    /// Frame width.
    #[arg(short = 'W', long, default_value_t = 400.0)]
    pub width: f64,

    /// Frame height.
    #[arg(short = 'H', long, default_value_t = 600.0)]
    pub height: f64,

    /// PRNG seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// SVG file offered as selection to `select-tiles` (repeatable).
    #[arg(long = "tile-svg", value_name = "FILE")]
    pub tile_svgs: Vec<PathBuf>,

    /// Raw path data offered to `select-tiles` (repeatable).
    #[arg(long = "tile-path", value_name = "DATA")]
    pub tile_paths: Vec<String>,

    /// Send every message with nothing selected.
    #[arg(long)]
    pub empty_selection: bool,

    /// Write the document here after the last message.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse one message or an array of messages.
pub fn parse_messages(text: &str) -> Result<Vec<Request>, CliError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let messages = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Request>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(messages)
}

pub fn cmd_request(args: &RequestArgs) -> Result<(), CliError> {
    let text = match args.message.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).map_err(|e| CliError::Io(format!("failed to read {path}: {e}")))?,
        None => args.message.clone(),
    };
    let messages = parse_messages(&text)?;

    let mut doc = SvgDocument::new();
    let root = doc
        .create_container(args.width, args.height)
        .map_err(|e| CliError::Generation(e.into()))?;
    let frame = doc.scene_node(root).map_err(|e| CliError::Generation(e.into()))?;

    let sources = TileSources {
        svg_files: args.tile_svgs.clone(),
        path_data: args.tile_paths.clone(),
    };
    let shapes: Vec<SceneNode<SvgNodeId>> = sources
        .load()?
        .into_iter()
        .map(|shape| doc.import_shape(shape))
        .collect();

    let mut session = Session::new(doc, JaliEngine::default(), Picker::new(args.seed));
    let mut failed = None;

    for message in &messages {
        let selection: &[SceneNode<SvgNodeId>] = match (args.empty_selection, message) {
            (true, _) => &[],
            (false, Request::SelectTiles) => &shapes,
            (false, _) => std::slice::from_ref(&frame),
        };
        debug!(?message, selected = selection.len(), "handling message");

        for response in session.handle(message, selection) {
            println!("{}", serde_json::to_string(&response)?);
            if let Response::Error { value } = response {
                failed.get_or_insert(value);
            }
        }
    }

    if let Some(path) = &args.output {
        let svg = session
            .renderer()
            .to_svg_string(root)
            .map_err(|e| CliError::Generation(e.into()))?;
        write_text(path, &svg)?;
    }

    match failed {
        Some(message) => Err(CliError::Input(message)),
        None => Ok(()),
    }
}
