pub mod parse;
pub mod policy;
pub mod report;

use challan_core::batch::{ProcessOptions, SourceDocument};
use challan_core::error::ChallanError;
use challan_core::extraction::pdftotext::PdftotextExtractor;
use challan_core::extraction::AutoExtractor;
use challan_core::model::BatchOutcome;
use challan_core::policy::builtin;
use challan_core::policy::schema::ChallanPolicy;
use std::path::{Path, PathBuf};

/// The policy named on the command line, or the default preset.
pub fn resolve_policy(
    preset: Option<&str>,
    file: Option<&Path>,
) -> Result<ChallanPolicy, ChallanError> {
    let policy = match (preset, file) {
        (_, Some(path)) => challan_core::policy::load_policy(path)?,
        (Some(name), None) => builtin::load_preset(name)?,
        (None, None) => builtin::load_preset(builtin::PRESETS[0])?,
    };
    log::debug!("using policy '{}' (v{})", policy.name, policy.version);
    Ok(policy)
}

/// Settings shared by the commands that process documents.
pub struct BatchArgs {
    pub policy: ChallanPolicy,
    pub layout: bool,
}

fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Read every input file and run the batch.
pub fn run_batch(input_files: &[PathBuf], args: &BatchArgs) -> Result<BatchOutcome, ChallanError> {
    if input_files.iter().any(|p| is_pdf_path(p)) && !PdftotextExtractor::is_available() {
        return Err(ChallanError::PdftotextNotFound);
    }

    let documents = input_files
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(SourceDocument::new(name, bytes))
        })
        .collect::<Result<Vec<_>, ChallanError>>()?;

    let extractor = AutoExtractor::new(PdftotextExtractor::new().with_layout(args.layout));
    let options = ProcessOptions {
        policy: args.policy.clone(),
        stop: None,
    };
    challan_core::process_documents(&documents, &extractor, &options)
}

pub fn print_warnings(outcome: &BatchOutcome) {
    for w in &outcome.warnings {
        eprintln!("  warning: {w}");
    }
}
