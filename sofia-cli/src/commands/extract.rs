//! Extract command: run the pipeline over every annotated document.

use clap::Parser;

use super::load_documents;
use crate::output::{log_info, write_output};

use sofia::{LexiconFrameRefiner, Pipeline, PipelineConfig};

/// Extract entities, events and causal relations
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Annotation file (one document or an array of documents)
    #[arg(value_name = "PATH")]
    pub input: String,

    /// Query to select and score sentences (repeatable)
    #[arg(short, long = "query", value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Source label stamped on every record
    #[arg(short, long)]
    pub source: Option<String>,

    /// Pipeline configuration JSON
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Frame lexicon JSON replacing the built-in inventory
    #[arg(long, value_name = "PATH")]
    pub frames: Option<String>,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Minimal output
    #[arg(long)]
    pub quiet: bool,
}

pub fn run(args: ExtractArgs) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .map_err(|e| format!("Failed to load config {path}: {e}"))?,
        None => PipelineConfig::default(),
    };
    if let Some(source) = &args.source {
        config.source = source.clone();
    }

    let mut pipeline = Pipeline::new(config);
    if let Some(path) = &args.frames {
        let refiner = LexiconFrameRefiner::from_json_file(path)
            .map_err(|e| format!("Failed to load frames {path}: {e}"))?;
        pipeline = pipeline.with_refiner(refiner);
    }

    let annotator = load_documents(&args.input)?;
    let outputs: Vec<_> = annotator
        .documents()
        .iter()
        .map(|doc| {
            if args.queries.is_empty() {
                pipeline.process_document(doc, None)
            } else {
                pipeline.process_queries(doc, &args.queries)
            }
        })
        .collect();

    for (doc, out) in outputs.iter().enumerate() {
        for fault in &out.faults {
            log_info(
                &format!("document {doc}: skipped sentence {}: {}", fault.index, fault.message),
                args.quiet,
            );
        }
    }

    let mut json = if args.pretty {
        serde_json::to_string_pretty(&outputs)
    } else {
        serde_json::to_string(&outputs)
    }
    .map_err(|e| format!("Failed to serialize output: {e}"))?;
    json.push('\n');

    write_output(&json, args.output.as_deref())
}
