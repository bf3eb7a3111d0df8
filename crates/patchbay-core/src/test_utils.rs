//! Test helpers for assembling pipeline graphs by hand

use std::collections::BTreeMap;

use crate::model::{Edge, Handle, Node, NodeKind, Position};

/// A source node with one `av`-typed output handle.
pub fn source(id: &str, filename: Option<&str>) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Source,
        name: "input".to_string(),
        stream_type: "av".to_string(),
        parameters: BTreeMap::new(),
        input_handles: Vec::new(),
        output_handles: vec![Handle::new("output-0", "av")],
        filename: filename.map(str::to_string),
        input_typings: None,
        output_typings: None,
        position: Position::default(),
    }
}

/// A sink node with one `av`-typed input handle.
pub fn sink(id: &str, filename: Option<&str>) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Sink,
        name: "output".to_string(),
        stream_type: "av".to_string(),
        parameters: BTreeMap::new(),
        input_handles: vec![Handle::new("input-0", "av")],
        output_handles: Vec::new(),
        filename: filename.map(str::to_string),
        input_typings: None,
        output_typings: None,
        position: Position::default(),
    }
}

/// A filter node with `inputs` video input handles and `outputs` video
/// output handles.
pub fn filter(id: &str, name: &str, inputs: usize, outputs: usize) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Filter,
        name: name.to_string(),
        stream_type: "video".to_string(),
        parameters: BTreeMap::new(),
        input_handles: (0..inputs)
            .map(|i| Handle::new(format!("input-{i}"), "video"))
            .collect(),
        output_handles: (0..outputs)
            .map(|i| Handle::new(format!("output-{i}"), "video"))
            .collect(),
        filename: None,
        input_typings: None,
        output_typings: None,
        position: Position::default(),
    }
}

pub fn edge(id: &str, source: &str, source_handle: &str, target: &str, target_handle: &str) -> Edge {
    Edge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: source_handle.to_string(),
        target_handle: target_handle.to_string(),
    }
}
