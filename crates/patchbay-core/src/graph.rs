//! Pipeline graph wrapper using petgraph::StableDiGraph keyed by string node ids

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use tracing::debug;

use crate::error::GraphError;
use crate::model::{Edge, Node, NodeKind};

/// Parse the trailing numeric index out of a handle id like `input-3`.
pub fn handle_index(handle_id: &str) -> Option<usize> {
    handle_id.rsplit('-').next().and_then(|s| s.parse().ok())
}

/// An immutable snapshot of the editor graph with adjacency queries.
///
/// Built once per conversion call from the flat node/edge lists the editor
/// supplies. Construction validates every edge reference; there is no
/// mutation API beyond that.
pub struct PipelineGraph {
    inner: StableDiGraph<Node, Edge>,
    ids: HashMap<String, NodeIndex>,
}

impl std::fmt::Debug for PipelineGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl PipelineGraph {
    /// Build a graph from the editor's node and edge lists.
    ///
    /// Every edge endpoint must name an existing node and a handle that node
    /// declares; a dangling reference fails the whole call rather than being
    /// dropped.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut inner = StableDiGraph::new();
        let mut ids = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id.clone();
            let idx = inner.add_node(node);
            ids.insert(id, idx);
        }

        for edge in edges {
            let source = *ids
                .get(&edge.source)
                .ok_or_else(|| GraphError::MissingReference {
                    edge: edge.id.clone(),
                    node: edge.source.clone(),
                })?;
            let target = *ids
                .get(&edge.target)
                .ok_or_else(|| GraphError::MissingReference {
                    edge: edge.id.clone(),
                    node: edge.target.clone(),
                })?;

            let source_node = &inner[source];
            if !source_node
                .output_handles
                .iter()
                .any(|h| h.id == edge.source_handle)
            {
                return Err(GraphError::UnknownHandle {
                    edge: edge.id.clone(),
                    node: edge.source.clone(),
                    handle: edge.source_handle.clone(),
                });
            }
            let target_node = &inner[target];
            if !target_node
                .input_handles
                .iter()
                .any(|h| h.id == edge.target_handle)
            {
                return Err(GraphError::UnknownHandle {
                    edge: edge.id.clone(),
                    node: edge.target.clone(),
                    handle: edge.target_handle.clone(),
                });
            }

            inner.add_edge(source, target, edge);
        }

        debug!(
            "Built pipeline graph with {} nodes, {} edges",
            inner.node_count(),
            inner.edge_count()
        );

        Ok(PipelineGraph { inner, ids })
    }

    /// Get a node by its editor id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.ids.get(id).and_then(|&idx| self.inner.node_weight(idx))
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// The unique sink node the tree is rooted at.
    pub fn sink(&self) -> Result<&Node, GraphError> {
        self.nodes()
            .find(|n| n.kind == NodeKind::Sink)
            .ok_or(GraphError::NoSink)
    }

    /// The nodes feeding `id`, ordered by the numeric index parsed from each
    /// edge's target handle.
    ///
    /// Handle order is authoritative here: for multi-input filters the
    /// argument position (overlay base vs. overlay layer) is encoded in the
    /// `input-<i>` handle, not in whatever order the editor happened to
    /// append edges. Edges whose target handle carries no parsable index
    /// keep their insertion order at the end.
    pub fn inputs_of(&self, id: &str) -> Vec<&Node> {
        let Some(&idx) = self.ids.get(id) else {
            return Vec::new();
        };

        let mut incoming: Vec<&Edge> = self
            .inner
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.weight())
            .collect();
        // petgraph yields incoming edges most-recent-first; restore
        // insertion order before the stable sort so ties stay deterministic.
        incoming.reverse();
        incoming.sort_by_key(|e| handle_index(&e.target_handle).unwrap_or(usize::MAX));

        incoming.iter().filter_map(|e| self.node(&e.source)).collect()
    }
}
