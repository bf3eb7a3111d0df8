//! Graph → tree conversion (the export path)

use patchbay_core::{Node, NodeKind, PipelineGraph};
use patchbay_oracle::Validator;
use tracing::debug;

use crate::error::ConvertError;
use crate::tree::{stream_tag, to_oracle_value, TreeNode, TreeNodeBody, OUTPUT_STREAM};

/// Filename stamped on a source that never had one set in the editor.
pub const DEFAULT_SOURCE_FILENAME: &str = "input.mp4";
/// Filename stamped on a sink that never had one set in the editor.
pub const DEFAULT_SINK_FILENAME: &str = "out.mp4";

const DEFAULT_FILTER_STREAM_TYPE: &str = "video";

/// Build the canonical tree for `graph`, rooted at its unique sink, and run
/// it past the oracle before handing it back.
///
/// A graph with no sink fails with [`patchbay_core::GraphError::NoSink`]
/// before the oracle is ever invoked. Shared ancestors are re-expanded at
/// every consumption point; the tree does not express sharing.
pub async fn serialize(
    graph: &PipelineGraph,
    validator: &dyn Validator,
) -> Result<TreeNode, ConvertError> {
    let sink = graph.sink()?;

    let mut path = Vec::new();
    let tree = serialize_node(graph, sink, &mut path)?;

    validator.validate(&to_oracle_value(&tree)?).await?;
    debug!("Serialized pipeline rooted at `{}`", sink.id);

    Ok(tree)
}

fn serialize_node<'g>(
    graph: &'g PipelineGraph,
    node: &'g Node,
    path: &mut Vec<&'g str>,
) -> Result<TreeNode, ConvertError> {
    // The tree is acyclic by construction only if the graph is; a cycle
    // would otherwise recurse forever.
    if path.iter().any(|id| *id == node.id) {
        return Err(ConvertError::CycleDetected(node.id.clone()));
    }
    path.push(&node.id);

    let result = match node.kind {
        NodeKind::Source => Ok(serialize_source(node)),
        NodeKind::Sink => serialize_sink(graph, node, path),
        NodeKind::Filter => serialize_filter(graph, node, path),
    };

    path.pop();
    result
}

fn serialize_inputs<'g>(
    graph: &'g PipelineGraph,
    node: &'g Node,
    path: &mut Vec<&'g str>,
) -> Result<Vec<TreeNode>, ConvertError> {
    graph
        .inputs_of(&node.id)
        .into_iter()
        .map(|input| serialize_node(graph, input, path))
        .collect()
}

fn serialize_source(node: &Node) -> TreeNode {
    TreeNode {
        tag: stream_tag(&node.stream_type),
        node: TreeNodeBody::Source {
            kwargs: node.parameters.clone(),
            inputs: Vec::new(),
            filename: node
                .filename
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_FILENAME.to_string()),
        },
        index: None,
    }
}

fn serialize_sink<'g>(
    graph: &'g PipelineGraph,
    node: &'g Node,
    path: &mut Vec<&'g str>,
) -> Result<TreeNode, ConvertError> {
    let inputs = serialize_inputs(graph, node, path)?;

    Ok(TreeNode {
        tag: OUTPUT_STREAM.to_string(),
        node: TreeNodeBody::Sink {
            kwargs: node.parameters.clone(),
            inputs,
            filename: node
                .filename
                .clone()
                .unwrap_or_else(|| DEFAULT_SINK_FILENAME.to_string()),
        },
        index: None,
    })
}

fn serialize_filter<'g>(
    graph: &'g PipelineGraph,
    node: &'g Node,
    path: &mut Vec<&'g str>,
) -> Result<TreeNode, ConvertError> {
    let inputs = serialize_inputs(graph, node, path)?;

    // The wrapping stream class comes from the first declared output pad;
    // a filter with no declared outputs still serializes as video.
    let stream_type = node
        .output_handles
        .first()
        .map(|h| h.handle_type.as_str())
        .unwrap_or(DEFAULT_FILTER_STREAM_TYPE);

    let input_typings = node.input_typings.clone().unwrap_or_else(|| {
        node.input_handles
            .iter()
            .map(|h| h.handle_type.to_ascii_lowercase())
            .collect()
    });
    let output_typings = node.output_typings.clone().unwrap_or_else(|| {
        node.output_handles
            .iter()
            .map(|h| h.handle_type.to_ascii_lowercase())
            .collect()
    });

    Ok(TreeNode {
        tag: stream_tag(stream_type),
        node: TreeNodeBody::Filter {
            kwargs: node.parameters.clone(),
            inputs,
            name: node.name.clone(),
            input_typings,
            output_typings,
        },
        index: Some(0),
    })
}
