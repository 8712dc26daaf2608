use challan_core::error::ChallanError;
use challan_core::report::ReportLayout;
use std::path::PathBuf;

use crate::commands::{print_warnings, run_batch, BatchArgs};
use crate::output;

pub fn run(
    input_files: &[PathBuf],
    output_format: &str,
    args: &BatchArgs,
    verbose: bool,
    layout: ReportLayout,
) -> Result<(), ChallanError> {
    let outcome = run_batch(input_files, args)?;

    match output_format {
        "json" => output::json::print(&outcome, &args.policy)?,
        _ => {
            output::table::print(&outcome.report, layout);
            if verbose {
                output::table::print_trace(&outcome, &args.policy);
            }
            print_warnings(&outcome);
        }
    }

    Ok(())
}
