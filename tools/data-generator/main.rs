use clap::Parser;
use kairo::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate random but structurally valid workflow documents
/// for fixtures and benchmarks.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// How many nodes to generate
    #[arg(long, default_value_t = 12)]
    nodes: usize,

    /// Roughly how many connection attempts to make per node
    #[arg(long, default_value_t = 2)]
    fanout: usize,
}

// Types whose outputs chain naturally into the next stage.
const NODE_TYPES: [&str; 5] = ["text", "image", "video", "audio", "upscale"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    println!(
        "Generating workflow with {} node(s), fanout {}...",
        cli.nodes, cli.fanout
    );

    let mut workspace = Workspace::new(Document::empty("generated"), NodeTypeRegistry::builtin());

    let specs: Vec<NodeSpec> = (0..cli.nodes)
        .map(|index| {
            let node_type = NODE_TYPES[rng.random_range(0..NODE_TYPES.len())];
            NodeSpec {
                id: Some(format!("{}-{}", node_type, index)),
                node_type: node_type.to_string(),
                ..NodeSpec::default()
            }
        })
        .collect();

    let edges = random_edges(&mut rng, &specs, cli.fanout);
    let report = workspace
        .gateway_mut()
        .create_nodes(&specs, &edges, CreateOptions::default());

    println!(
        "-> Created {} node(s), accepted {} edge(s), rejected {} edge(s).",
        report.created.len(),
        report.edges.len(),
        report.skipped_edges.len()
    );

    let json_output = serde_json::to_string_pretty(workspace.document())?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved workflow to '{}'",
        cli.output
    );

    Ok(())
}

/// Proposes edges between random node pairs. Invalid pairs (self-loops, kind
/// mismatches) are expected; the gateway's validation weeds them out, which
/// keeps the output document structurally valid by construction.
fn random_edges(rng: &mut ThreadRng, specs: &[NodeSpec], fanout: usize) -> Vec<EdgeSpec> {
    let mut edges = Vec::new();
    if specs.len() < 2 {
        return edges;
    }
    for _ in 0..specs.len() * fanout {
        let source = rng.random_range(0..specs.len());
        let target = rng.random_range(0..specs.len());
        let (Some(source_id), Some(target_id)) = (&specs[source].id, &specs[target].id) else {
            continue;
        };
        edges.push(EdgeSpec {
            source: source_id.clone(),
            target: target_id.clone(),
            source_handle: None,
            target_handle: None,
            data_type: None,
        });
    }
    edges
}
