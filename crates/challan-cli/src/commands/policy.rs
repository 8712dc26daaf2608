use challan_core::error::ChallanError;
use challan_core::policy::builtin;
use challan_core::policy::schema::{ChallanPolicy, DueDateBasis};
use std::path::Path;

pub fn list() -> Result<(), ChallanError> {
    println!("Available predefined policies:\n");
    for (i, name) in builtin::PRESETS.iter().enumerate() {
        let p = builtin::load_preset(name)?;
        let default_marker = if i == 0 { " [default]" } else { "" };
        println!("  {:<14} {} (v{}){}", name, p.name, p.version, default_marker);
        if let Some(ref desc) = p.description {
            println!("                 {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), ChallanError> {
    let p = builtin::load_preset(preset)?;

    println!("{} (version {})\n", p.name, p.version);
    if let Some(ref desc) = p.description {
        println!("{}\n", desc);
    }
    print_rules(&p);
    Ok(())
}

fn print_rules(p: &ChallanPolicy) {
    let pct = p.interest_rate_per_month * rust_decimal::Decimal::ONE_HUNDRED;
    println!("For every challan with a deposit date:\n");
    println!(
        "  Delay        ceil(interest / (tax x {})), i.e. {}% per month or part",
        p.interest_rate_per_month,
        pct.normalize()
    );
    println!(
        "               of a month; {} month(s) when tax or interest is absent",
        p.default_delay_months
    );
    println!("  TDS month    deposit month minus the delay");
    match p.due_date_basis {
        DueDateBasis::FollowingAccountingMonth => println!(
            "  Due date     day {} of the month after the TDS month",
            p.due_day
        ),
        DueDateBasis::DepositMonth => {
            println!("  Due date     day {} of the deposit month", p.due_day)
        }
    }
    println!("  Delay days   deposit date minus due date, never negative");
    println!(
        "  Reconcile    components must sum to the total within {}",
        p.reconciliation_tolerance
    );
    println!("  Status       Late when interest was paid, otherwise On Time");
    if p.require_amount {
        println!("\nChallans without a total or declared amount are skipped.");
    }
    println!();
}

pub fn schema() -> Result<(), ChallanError> {
    print!(
        r#"JSON Policy Schema
==================

A policy file holds the constants used to derive the TDS month, due date
and lateness of each challan. Pass it with `challan parse --policy FILE`.

Fields:
  name                     (string, required)  Human-readable name
  description              (string, optional)  What this policy is for
  version                  (string, required)  Version identifier
  interest_rate_per_month  (string, required)  Fraction of tax charged per
                                               month or part-month of delay.
                                               Between 0 and 1, e.g. "0.015".
  reconciliation_tolerance (string, required)  Largest difference between the
                                               component sum and the total
                                               still treated as balanced.
  default_delay_months     (number, required)  Delay used when tax or interest
                                               is absent. 0 to 12.
  due_day                  (number, required)  Day of month deposits are due
                                               on. 1 to 28.
  due_date_basis           (string, optional)  "following_accounting_month"
                                               (default) or "deposit_month".
  require_amount           (bool, optional)    Skip challans with neither a
                                               total nor a declared amount.
                                               Default: false.

Example:
{{
  "name": "Quarterly review",
  "version": "2024.1",
  "interest_rate_per_month": "0.015",
  "reconciliation_tolerance": "0.5",
  "default_delay_months": 1,
  "due_day": 7,
  "due_date_basis": "following_accounting_month"
}}

Note: decimal values must be quoted strings, not bare numbers,
to preserve exact decimal precision (e.g., "0.015" not 0.015).
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ChallanError> {
    let p = challan_core::policy::load_policy(file)?;

    println!("Policy '{}' (v{}) is valid.\n", p.name, p.version);
    print_rules(&p);

    let mut warnings = Vec::new();
    if p.due_date_basis == DueDateBasis::DepositMonth && p.default_delay_months > 0 {
        warnings.push(format!(
            "default_delay_months is {} but the due date is taken from the deposit month",
            p.default_delay_months
        ));
    }
    if p.reconciliation_tolerance > rust_decimal::Decimal::from(100) {
        warnings.push(format!(
            "reconciliation_tolerance {} hides most mismatches",
            p.reconciliation_tolerance
        ));
    }

    if !warnings.is_empty() {
        println!("Warnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
