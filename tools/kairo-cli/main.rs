use clap::Parser;
use kairo::prelude::*;
use std::fs;
use std::io::{self, BufRead, Write};

/// A workflow graph engine CLI: apply structured commands to a workflow
/// document and inspect the results.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a workflow JSON document to load; omit to start empty
    workflow_path: Option<String>,

    /// Path to a JSON file containing an array of command requests to apply
    #[arg(short, long)]
    commands: Option<String>,

    /// Write the resulting document to this path when done
    #[arg(short, long)]
    save: Option<String>,

    /// Run in interactive mode: one JSON command request per line
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    let document = match &cli.workflow_path {
        Some(path) => {
            let raw = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read workflow file '{}': {}", path, e))
            });
            serde_json::from_str(&raw).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse workflow JSON '{}': {}", path, e))
            })
        }
        None => Document::empty("untitled"),
    };

    let mut workspace = Workspace::new(document, NodeTypeRegistry::builtin());

    if let Some(commands_path) = &cli.commands {
        run_batch(&mut workspace, commands_path);
    }
    if cli.human {
        run_interactive(&mut workspace);
    }
    if cli.commands.is_none() && !cli.human {
        // No commands requested: report the document's validation state.
        let response = workspace.dispatch(CommandRequest::new("validate", serde_json::Value::Null));
        print_pretty(&response);
    }

    if let Some(save_path) = &cli.save {
        let json = serde_json::to_string_pretty(workspace.document()).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to serialize document: {}", e))
        });
        fs::write(save_path, json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write '{}': {}", save_path, e))
        });
        println!("Saved document to '{}'", save_path);
    }
}

/// Applies a JSON array of command requests in order, printing each response.
fn run_batch(workspace: &mut Workspace, commands_path: &str) {
    let raw = fs::read_to_string(commands_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read commands file '{}': {}",
            commands_path, e
        ))
    });
    let requests: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to parse commands JSON '{}': {}",
            commands_path, e
        ))
    });

    println!("Applying {} command(s) from '{}'...", requests.len(), commands_path);
    for (index, request) in requests.into_iter().enumerate() {
        let response = workspace.dispatch_json(&request.to_string());
        println!("--- Command {} ---", index + 1);
        print_pretty(&response);
    }
    println!(
        "\nDocument now holds {} node(s) and {} edge(s).",
        workspace.document().nodes.len(),
        workspace.document().edges.len()
    );
}

/// Reads one JSON command request per line until EOF or an empty line.
fn run_interactive(workspace: &mut Workspace) {
    println!("--- Kairo Interactive Mode ---");
    println!(
        "Known node types: {}",
        workspace.gateway().registry().type_names().join(", ")
    );
    println!("Enter one JSON request per line, e.g.:");
    println!(r#"  {{"command": "getState"}}"#);
    println!("An empty line exits.\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        let response = workspace.dispatch_json(trimmed);
        print_pretty(&response);
    }
}

fn print_pretty(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{}", pretty),
        Err(_) => println!("{}", value),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
