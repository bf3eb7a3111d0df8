//! Patchbay Core — pipeline graph data model and adjacency queries

pub mod error;
pub mod graph;
pub mod model;


#[cfg(test)]
pub mod test_utils;

pub use error::GraphError;
pub use graph::{handle_index, PipelineGraph};
pub use model::{Edge, GraphDocument, Handle, Node, NodeKind, Position};
