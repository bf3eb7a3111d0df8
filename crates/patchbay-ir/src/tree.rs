//! The canonical nested tree and its wire format
//!
//! Field names and the stream-class tag convention are contract with the
//! external engine and must not drift: `"<Capitalized streamType>Stream"`
//! for ordinary streams, `"AVStream"` for container-level streams and
//! `"OutputStream"` for the sink.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConvertError;

/// Wire tag of the sink's wrapping stream.
pub const OUTPUT_STREAM: &str = "OutputStream";
/// Wire tag of a container-level (audio+video) stream.
pub const AV_STREAM: &str = "AVStream";

/// One node of the canonical filter tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Stream class tag, e.g. `VideoStream`, `AVStream`, `OutputStream`.
    pub tag: String,
    pub node: TreeNodeBody,
    /// Output pad index: 0 on filters, null on the sink (reserved for
    /// future multi-output support) and on sources.
    #[serde(default)]
    pub index: Option<u32>,
}

/// The role-specific payload of a tree node.
///
/// Each variant carries exactly the fields meaningful for that role, so a
/// reader never has to probe optional fields to learn what it is looking at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag")]
pub enum TreeNodeBody {
    /// A media input. Always a leaf.
    Source {
        kwargs: BTreeMap<String, String>,
        inputs: Vec<TreeNode>,
        filename: String,
    },
    /// A processing stage with its argument map and pad typings.
    Filter {
        kwargs: BTreeMap<String, String>,
        inputs: Vec<TreeNode>,
        name: String,
        #[serde(rename = "inputTypings")]
        input_typings: Vec<String>,
        #[serde(rename = "outputTypings")]
        output_typings: Vec<String>,
    },
    /// The output file. Always the root.
    Sink {
        kwargs: BTreeMap<String, String>,
        inputs: Vec<TreeNode>,
        filename: String,
    },
}

impl TreeNode {
    pub fn inputs(&self) -> &[TreeNode] {
        match &self.node {
            TreeNodeBody::Source { inputs, .. }
            | TreeNodeBody::Filter { inputs, .. }
            | TreeNodeBody::Sink { inputs, .. } => inputs,
        }
    }
}

/// Map a stream type tag (`video`, `audio`, `av`) to its stream-class tag.
pub fn stream_tag(stream_type: &str) -> String {
    if stream_type.eq_ignore_ascii_case("av") {
        return AV_STREAM.to_string();
    }
    let lower = stream_type.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => format!("{}{}Stream", first.to_ascii_uppercase(), chars.as_str()),
        None => stream_tag("video"),
    }
}

/// Recover the lowercase stream type from a stream-class tag.
pub fn stream_type_of_tag(tag: &str) -> String {
    if tag == AV_STREAM {
        return "av".to_string();
    }
    tag.strip_suffix("Stream").unwrap_or(tag).to_ascii_lowercase()
}

/// Convert a tree into the plain JSON value handed to the oracle.
///
/// Both conversion directions go through this one routine so the oracle sees
/// identical shapes from either call site; absent optional fields come out
/// as explicit nulls, never as missing keys.
pub fn to_oracle_value(tree: &TreeNode) -> Result<Value, ConvertError> {
    Ok(serde_json::to_value(tree)?)
}
