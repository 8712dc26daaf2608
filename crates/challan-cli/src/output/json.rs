use challan_core::error::ChallanError;
use challan_core::model::BatchOutcome;
use challan_core::policy::schema::ChallanPolicy;
use challan_core::trace::{build_bundle, TraceBundle};
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    outcome: &'a BatchOutcome,
    trace: TraceBundle,
}

pub fn print(outcome: &BatchOutcome, policy: &ChallanPolicy) -> Result<(), ChallanError> {
    let json = serde_json::to_string_pretty(&JsonOutput {
        outcome,
        trace: build_bundle(outcome, policy),
    })?;
    println!("{json}");
    Ok(())
}
