use challan_core::error::ChallanError;
use challan_core::report::xlsx::write_xlsx;
use challan_core::report::ReportLayout;
use std::path::{Path, PathBuf};

use crate::commands::{print_warnings, run_batch, BatchArgs};

pub fn run(
    input_files: &[PathBuf],
    out: &Path,
    args: &BatchArgs,
    layout: ReportLayout,
) -> Result<(), ChallanError> {
    let outcome = run_batch(input_files, args)?;
    write_xlsx(&outcome.report, layout, out)?;

    eprintln!(
        "Extracted {} challan(s) from {} document(s), written to {}",
        outcome.report.len(),
        outcome.documents_processed,
        out.display()
    );
    print_warnings(&outcome);

    if outcome.report.is_empty() {
        eprintln!("  no valid challans found; the report has only a header row");
    }

    Ok(())
}
