use challan_core::model::{BatchOutcome, Report};
use challan_core::policy::schema::ChallanPolicy;
use challan_core::report::{rows, ReportLayout};
use challan_core::trace::build_bundle;

pub fn print(report: &Report, layout: ReportLayout) {
    if report.is_empty() {
        println!("No challans found.\n");
        return;
    }

    let headers = layout.headers();
    let cells: Vec<Vec<String>> = rows(report, layout)
        .iter()
        .map(|row| row.iter().map(|c| c.display()).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: &[String]| {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = w))
            .collect();
        println!("  {}", padded.join("  ").trim_end());
    };

    line(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    println!("  {}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    for row in &cells {
        line(row);
    }
    println!("\n  {} challan(s)\n", report.len());
}

pub fn print_trace(outcome: &BatchOutcome, policy: &ChallanPolicy) {
    let bundle = build_bundle(outcome, policy);
    println!("=== Derivation ({}) ===\n", bundle.policy);

    for (entry, record) in bundle.entries.iter().zip(&outcome.report.records) {
        let label = entry
            .challan_number
            .as_deref()
            .map(|n| format!("Challan {n}"))
            .unwrap_or_else(|| format!("Challan dated {}", record.deposit_date_display()));
        println!("  {label}");
        for step in &entry.steps {
            println!("    {:<16} {}", format!("{:?}", step.step_type), step.message);
        }
        println!();
    }
}
