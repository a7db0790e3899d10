use std::fs::File;
use std::io;
use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::interaction_graph::InteractionGraph;

/// Writes the graph as a CSV edge list: a leading numeric index column
/// followed by `source` and `target`, one row per undirected edge. The
/// layout is directly ingestible by edge-list graph loaders.
pub fn write_edge_list<W: io::Write>(graph: &InteractionGraph, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["", "source", "target"])?;
    for (index, edge) in graph.edges().iter().enumerate() {
        writer.write_record([
            index.to_string(),
            edge.source.to_string(),
            edge.target.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

pub fn write_edge_list_to_path<P: AsRef<Path>>(graph: &InteractionGraph, path: P) -> Result<()> {
    let file = File::create(&path)?;
    write_edge_list(graph, file)?;

    info!(
        edges = graph.num_edges(),
        path = %path.as_ref().display(),
        "wrote edge list"
    );
    Ok(())
}
