//! Validate command: report sentences missing required annotation layers.

use clap::Parser;

use super::load_documents;
use crate::output::write_output;

/// Check annotation files for missing required layers
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Annotation file (one document or an array of documents)
    #[arg(value_name = "PATH")]
    pub input: String,
}

pub fn run(args: ValidateArgs) -> Result<(), String> {
    let annotator = load_documents(&args.input)?;

    let mut report = String::new();
    let mut sentences = 0;
    let mut faults = 0;
    for (doc, document) in annotator.documents().iter().enumerate() {
        for (index, sentence) in document.sentences.iter().enumerate() {
            sentences += 1;
            if let Err(e) = sentence.view(index) {
                faults += 1;
                report.push_str(&format!("document {doc}: {e}\n"));
            }
        }
    }
    report.push_str(&format!("{sentences} sentence(s), {faults} fault(s)\n"));
    write_output(&report, None)?;

    if faults > 0 {
        return Err(format!("{faults} sentence(s) missing required annotation"));
    }
    Ok(())
}
