//! Tree → graph expansion (the import path)

use std::collections::HashMap;

use patchbay_core::{Edge, GraphDocument, Handle, Node, NodeKind, Position};
use patchbay_oracle::Validator;
use tracing::debug;

use crate::error::ConvertError;
use crate::tree::{stream_type_of_tag, to_oracle_value, TreeNode, TreeNodeBody, OUTPUT_STREAM};

/// Horizontal spacing between depth levels.
pub const COLUMN_WIDTH: f32 = 200.0;
/// Vertical spacing between nodes stacked in one column.
pub const ROW_HEIGHT: f32 = 100.0;

/// Expand a stored tree back into a positioned node/edge graph.
///
/// The tree is validated by the oracle before anything is built. Every tree
/// occurrence becomes a fresh node with a freshly minted id; sharing that
/// existed before the original export is not recovered. Layout is a
/// deterministic cosmetic grid: depth maps to columns right of the sink,
/// visitation order stacks rows, with no non-overlap guarantee for large
/// graphs.
pub async fn deserialize(
    tree: &TreeNode,
    validator: &dyn Validator,
) -> Result<GraphDocument, ConvertError> {
    validator.validate(&to_oracle_value(tree)?).await?;

    if tree.tag != OUTPUT_STREAM || !matches!(tree.node, TreeNodeBody::Sink { .. }) {
        return Err(ConvertError::MalformedTree(format!(
            "root must be an {OUTPUT_STREAM} sink, got `{}`",
            tree.tag
        )));
    }

    let mut builder = GraphBuilder::default();
    builder.expand(tree, 0)?;

    debug!(
        "Expanded tree into {} nodes, {} edges",
        builder.nodes.len(),
        builder.edges.len()
    );

    Ok(GraphDocument {
        nodes: builder.nodes,
        edges: builder.edges,
    })
}

#[derive(Default)]
struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    kind_counters: HashMap<&'static str, usize>,
    column_counts: HashMap<u32, usize>,
}

impl GraphBuilder {
    /// Mint the next id for `kind`: `source-0`, `filter-3`, ...
    fn next_id(&mut self, kind: NodeKind) -> String {
        let n = self.kind_counters.entry(kind.as_str()).or_insert(0);
        let id = format!("{}-{}", kind.as_str(), n);
        *n += 1;
        id
    }

    /// Column by depth, row by how many nodes the column already holds.
    fn place(&mut self, level: u32) -> Position {
        let row = self.column_counts.entry(level).or_insert(0);
        let position = Position {
            x: level as f32 * COLUMN_WIDTH,
            y: *row as f32 * ROW_HEIGHT,
        };
        *row += 1;
        position
    }

    /// Expand one tree node, returning the id of the node it produced.
    fn expand(&mut self, tree: &TreeNode, level: u32) -> Result<String, ConvertError> {
        match &tree.node {
            TreeNodeBody::Sink {
                kwargs,
                inputs,
                filename,
            } => {
                if level != 0 {
                    return Err(ConvertError::MalformedTree(
                        "sink occurs below the root".to_string(),
                    ));
                }
                let id = self.next_id(NodeKind::Sink);
                let position = self.place(level);
                // One declared handle per incoming edge, or the edges minted
                // by connect_inputs would reference handles the sink lacks.
                let input_handles = (0..inputs.len().max(1))
                    .map(|i| Handle::new(format!("input-{i}"), "av"))
                    .collect();
                self.nodes.push(Node {
                    id: id.clone(),
                    kind: NodeKind::Sink,
                    name: "output".to_string(),
                    stream_type: "av".to_string(),
                    parameters: kwargs.clone(),
                    input_handles,
                    output_handles: Vec::new(),
                    filename: Some(filename.clone()),
                    input_typings: None,
                    output_typings: None,
                    position,
                });
                self.connect_inputs(&id, inputs, level)?;
                Ok(id)
            }

            TreeNodeBody::Source {
                kwargs,
                inputs,
                filename,
            } => {
                if !inputs.is_empty() {
                    return Err(ConvertError::MalformedTree(
                        "source with non-empty inputs".to_string(),
                    ));
                }
                let id = self.next_id(NodeKind::Source);
                let position = self.place(level);
                let stream_type = stream_type_of_tag(&tree.tag);
                self.nodes.push(Node {
                    id: id.clone(),
                    kind: NodeKind::Source,
                    name: "input".to_string(),
                    stream_type: stream_type.clone(),
                    parameters: kwargs.clone(),
                    input_handles: Vec::new(),
                    output_handles: vec![Handle::new("output-0", stream_type)],
                    filename: Some(filename.clone()),
                    input_typings: None,
                    output_typings: None,
                    position,
                });
                Ok(id)
            }

            TreeNodeBody::Filter {
                kwargs,
                inputs,
                name,
                input_typings,
                output_typings,
            } => {
                let id = self.next_id(NodeKind::Filter);
                let position = self.place(level);
                // Handle lists must cover every edge this node takes part
                // in: all of `inputs` on the input side even when the
                // typings run short, and at least `output-0` on the output
                // side since every non-root node feeds its parent.
                let input_handles = (0..input_typings.len().max(inputs.len()))
                    .map(|i| {
                        let typing = input_typings
                            .get(i)
                            .cloned()
                            .unwrap_or_else(|| "video".to_string());
                        Handle::new(format!("input-{i}"), typing)
                    })
                    .collect();
                let output_handles = (0..output_typings.len().max(1))
                    .map(|i| {
                        let typing = output_typings
                            .get(i)
                            .cloned()
                            .unwrap_or_else(|| "video".to_string());
                        Handle::new(format!("output-{i}"), typing)
                    })
                    .collect();
                self.nodes.push(Node {
                    id: id.clone(),
                    kind: NodeKind::Filter,
                    name: name.clone(),
                    stream_type: stream_type_of_tag(&tree.tag),
                    parameters: kwargs.clone(),
                    input_handles,
                    output_handles,
                    filename: None,
                    input_typings: Some(input_typings.clone()),
                    output_typings: Some(output_typings.clone()),
                    position,
                });
                self.connect_inputs(&id, inputs, level)?;
                Ok(id)
            }
        }
    }

    /// Expand each child subtree, then wire its root to `parent_id`. The
    /// child's position in the input list is the argument position, so the
    /// target handle index is fixed by `i`.
    fn connect_inputs(
        &mut self,
        parent_id: &str,
        inputs: &[TreeNode],
        level: u32,
    ) -> Result<(), ConvertError> {
        for (i, child) in inputs.iter().enumerate() {
            let child_id = self.expand(child, level + 1)?;
            self.edges.push(Edge {
                id: format!("{child_id}->{parent_id}"),
                source: child_id,
                target: parent_id.to_string(),
                source_handle: "output-0".to_string(),
                target_handle: format!("input-{i}"),
            });
        }
        Ok(())
    }
}
