//! Patchbay IR — bidirectional graph ⇄ tree conversion
//!
//! The editor's flat node/edge graph is converted into a canonical nested
//! tree for the external filter-graph engine, and a stored tree is expanded
//! back into a positioned graph for re-editing. The expansion from graph to
//! tree is deliberately lossy: a node feeding N consumers appears N times in
//! the tree, and the reverse direction mints a fresh node per occurrence.

pub mod deserialize;
pub mod error;
pub mod serialize;
pub mod tree;


pub use deserialize::{deserialize, COLUMN_WIDTH, ROW_HEIGHT};
pub use error::ConvertError;
pub use serialize::{serialize, DEFAULT_SINK_FILENAME, DEFAULT_SOURCE_FILENAME};
pub use tree::{
    stream_tag, stream_type_of_tag, to_oracle_value, TreeNode, TreeNodeBody, AV_STREAM,
    OUTPUT_STREAM,
};
