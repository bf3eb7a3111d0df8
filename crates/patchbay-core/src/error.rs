//! Typed errors raised while building or walking a pipeline graph

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// No node with `kind == Sink`; there is nothing to root a tree at.
    #[error("pipeline has no sink node")]
    NoSink,

    /// An edge endpoint names a node id absent from the node list.
    #[error("edge `{edge}` references unknown node `{node}`")]
    MissingReference { edge: String, node: String },

    /// An edge endpoint names a handle the node never declared.
    #[error("edge `{edge}` references undeclared handle `{handle}` on node `{node}`")]
    UnknownHandle {
        edge: String,
        node: String,
        handle: String,
    },
}
