//! Core data structures for the editor-side pipeline graph

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Discriminates the three node roles in a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A stream origin (media file opened for reading).
    Source,
    /// The stream terminus (output file). A pipeline has exactly one.
    Sink,
    /// An intermediate processing stage.
    Filter,
}

impl NodeKind {
    /// Lowercase form used when minting node ids (`filter-3`).
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Source => "source",
            NodeKind::Sink => "sink",
            NodeKind::Filter => "filter",
        }
    }
}

/// A named, typed connection slot on one side of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handle {
    pub id: String,
    #[serde(rename = "type")]
    pub handle_type: String,
}

impl Handle {
    pub fn new(id: impl Into<String>, handle_type: impl Into<String>) -> Self {
        Handle {
            id: id.into(),
            handle_type: handle_type.into(),
        }
    }
}

/// Editor canvas coordinates. Cosmetic only; never affects conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A single node as the editor hands it to us.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Filter name (e.g. `scale`) or a display label for sources/sinks.
    pub name: String,
    /// Media kind flowing out of this node: `video`, `audio` or `av`.
    pub stream_type: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub input_handles: Vec<Handle>,
    #[serde(default)]
    pub output_handles: Vec<Handle>,
    /// Only meaningful for sources and sinks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Explicit typing metadata; when absent it is derived from the handles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_typings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_typings: Option<Vec<String>>,
    #[serde(default)]
    pub position: Position,
}

/// A directed connection between two node handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
}

/// The editor's wire payload: a flat node/edge listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
