//! CLI command implementations

use std::path::{Path, PathBuf};

use anyhow::Context;
use patchbay_core::{GraphDocument, PipelineGraph};
use patchbay_ir::{to_oracle_value, TreeNode};
use patchbay_oracle::Validator;
use patchbay_server::{PatchbayServer, ServerConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub async fn export(
    input: PathBuf,
    output: Option<PathBuf>,
    oracle: Box<dyn Validator>,
) -> anyhow::Result<()> {
    let doc: GraphDocument = read_json(&input)?;
    let graph = PipelineGraph::from_parts(doc.nodes, doc.edges)?;
    tracing::info!(
        "Loaded graph with {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    oracle.init().await?;
    let result = patchbay_ir::serialize(&graph, oracle.as_ref()).await;
    oracle.shutdown().await?;

    write_json(output.as_deref(), &result?)?;
    tracing::info!("Exported pipeline tree");
    Ok(())
}

pub async fn import(
    input: PathBuf,
    output: Option<PathBuf>,
    oracle: Box<dyn Validator>,
) -> anyhow::Result<()> {
    let tree: TreeNode = read_json(&input)?;

    oracle.init().await?;
    let result = patchbay_ir::deserialize(&tree, oracle.as_ref()).await;
    oracle.shutdown().await?;

    let doc = result?;
    tracing::info!(
        "Rebuilt graph with {} nodes, {} edges",
        doc.nodes.len(),
        doc.edges.len()
    );
    write_json(output.as_deref(), &doc)?;
    Ok(())
}

pub async fn validate(input: PathBuf, oracle: Box<dyn Validator>) -> anyhow::Result<()> {
    let tree: TreeNode = read_json(&input)?;
    let value = to_oracle_value(&tree)?;

    oracle.init().await?;
    let result = oracle.validate(&value).await;
    oracle.shutdown().await?;

    result?;
    println!("ok");
    Ok(())
}

pub async fn serve(host: String, port: u16, oracle: Box<dyn Validator>) -> anyhow::Result<()> {
    oracle.init().await?;

    let server = PatchbayServer::new(oracle, ServerConfig { host, port });
    server.start().await
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("cannot parse {}", path.display()))
}

fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))?
        }
        None => println!("{text}"),
    }
    Ok(())
}
