use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use weft_graph::successors;
use weft_store::WorkflowStore;
use weft_workflow::{Workflow, extract_placeholders, new_workflow};

/// Weft - a visual workflow editor core
#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Scaffold a new workflow document
  New {
    /// Workflow name (normalized into the namespace)
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Name of the job spec resource
    #[arg(long, default_value = "jobspec")]
    jobspec: String,

    #[arg(long, default_value = "support")]
    event_source: String,

    #[arg(long, default_value = "ticket.Created")]
    event_type: String,

    /// Write to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
  },

  /// Print a flow of a workflow document as a positioned graph
  Render {
    /// Path to the workflow document (JSON)
    workflow_file: PathBuf,

    /// Flow resource key (default: the document's first flow)
    #[arg(long)]
    flow: Option<String>,
  },

  /// Check a workflow document and report flows, dangling references,
  /// and action usage
  Validate {
    /// Path to the workflow document (JSON)
    workflow_file: PathBuf,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();
  let cli = Cli::parse();

  match cli.command {
    Some(Commands::New {
      name,
      description,
      jobspec,
      event_source,
      event_type,
      out,
    }) => cmd_new(&name, &description, &jobspec, &event_source, &event_type, out),
    Some(Commands::Render {
      workflow_file,
      flow,
    }) => cmd_render(workflow_file, flow.as_deref()),
    Some(Commands::Validate { workflow_file }) => cmd_validate(workflow_file),
    None => {
      println!("weft - use --help to see available commands");
      Ok(())
    }
  }
}

fn cmd_new(
  name: &str,
  description: &str,
  jobspec: &str,
  event_source: &str,
  event_type: &str,
  out: Option<PathBuf>,
) -> Result<()> {
  let workflow = new_workflow(name, description, jobspec, event_source, event_type);
  let document = workflow
    .to_json_string_pretty()
    .context("failed to serialize workflow")?;

  match out {
    Some(path) => {
      fs::write(&path, document)
        .with_context(|| format!("failed to write workflow file: {}", path.display()))?;
      eprintln!("Created workflow \"{}\" at {}", workflow.name, path.display());
    }
    None => println!("{document}"),
  }
  Ok(())
}

fn cmd_render(workflow_file: PathBuf, flow: Option<&str>) -> Result<()> {
  let workflow = read_workflow(&workflow_file)?;

  let mut store = WorkflowStore::new();
  store.load(workflow);
  if let Some(flow_key) = flow {
    store
      .select_flow(flow_key)
      .with_context(|| format!("no flow \"{flow_key}\" in the document"))?;
  }

  let graph = serde_json::to_string_pretty(store.graph()).context("failed to serialize graph")?;
  println!("{graph}");
  Ok(())
}

fn cmd_validate(workflow_file: PathBuf) -> Result<()> {
  let workflow = read_workflow(&workflow_file)?;
  println!(
    "workflow \"{}\": {} resources",
    workflow.name,
    workflow.resources.len()
  );

  for flow_key in workflow.flow_keys() {
    let flow = match workflow.flow(flow_key) {
      Some(flow) => flow,
      None => continue,
    };
    let definition = &flow.definition;
    let graph = weft_graph::layout(definition);
    println!(
      "  flow \"{}\": {} steps, {} edges{}",
      flow_key,
      definition.states.len(),
      graph.edges.len(),
      if definition.has_start() {
        String::new()
      } else {
        format!(" (StartAt \"{}\" names no step)", definition.start_at)
      }
    );

    // Dangling successors are tolerated by the editor, but worth
    // surfacing before an upload.
    for (step_id, step) in &definition.states {
      for successor in successors(step) {
        if !definition.states.contains_key(&successor) {
          println!("    dangling reference: {step_id} -> {successor}");
        }
      }
    }

    for (action_key, count) in weft_graph::action_usage(&workflow, flow_key) {
      println!("    action \"{action_key}\" used {count}x");
    }
  }

  for (key, resource) in &workflow.resources {
    if let Some(action) = resource.as_http_action() {
      let placeholders = extract_placeholders(&action.definition);
      if !placeholders.is_empty() {
        println!("  action \"{key}\" placeholders: {}", placeholders.join(", "));
      }
    }
  }

  Ok(())
}

fn read_workflow(path: &PathBuf) -> Result<Workflow> {
  let content = fs::read_to_string(path)
    .with_context(|| format!("failed to read workflow file: {}", path.display()))?;
  Workflow::from_json_str(&content)
    .with_context(|| format!("failed to import workflow file: {}", path.display()))
}
