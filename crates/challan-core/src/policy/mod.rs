pub mod builtin;
pub mod schema;

use crate::error::ChallanError;
use rust_decimal::Decimal;
use schema::ChallanPolicy;
use std::path::Path;

/// Load a policy from a JSON file.
pub fn load_policy(path: &Path) -> Result<ChallanPolicy, ChallanError> {
    let content = std::fs::read_to_string(path).map_err(|e| ChallanError::PolicyLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_policy(&content, path)
}

/// Parse a policy from a JSON string.
pub fn parse_policy(json: &str, source: &Path) -> Result<ChallanPolicy, ChallanError> {
    let policy: ChallanPolicy =
        serde_json::from_str(json).map_err(|e| ChallanError::PolicyLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Parse a policy from a JSON string (no file path context).
pub fn parse_policy_str(json: &str) -> Result<ChallanPolicy, ChallanError> {
    let policy: ChallanPolicy = serde_json::from_str(json).map_err(ChallanError::Json)?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Validate that a policy is usable for date and interest arithmetic.
pub fn validate_policy(policy: &ChallanPolicy) -> Result<(), ChallanError> {
    if policy.name.trim().is_empty() {
        return Err(ChallanError::PolicyInvalid("name must not be empty".into()));
    }

    if policy.version.trim().is_empty() {
        return Err(ChallanError::PolicyInvalid(
            "version must not be empty".into(),
        ));
    }

    if policy.interest_rate_per_month <= Decimal::ZERO
        || policy.interest_rate_per_month >= Decimal::ONE
    {
        return Err(ChallanError::PolicyInvalid(format!(
            "interest_rate_per_month must be between 0 and 1 (exclusive), got {}",
            policy.interest_rate_per_month
        )));
    }

    if policy.reconciliation_tolerance < Decimal::ZERO {
        return Err(ChallanError::PolicyInvalid(format!(
            "reconciliation_tolerance must not be negative, got {}",
            policy.reconciliation_tolerance
        )));
    }

    if !(1..=28).contains(&policy.due_day) {
        return Err(ChallanError::PolicyInvalid(format!(
            "due_day must be between 1 and 28, got {}",
            policy.due_day
        )));
    }

    if policy.default_delay_months > 12 {
        return Err(ChallanError::PolicyInvalid(format!(
            "default_delay_months must be at most 12, got {}",
            policy.default_delay_months
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use schema::DueDateBasis;

    #[test]
    fn test_parse_valid_policy() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "interest_rate_per_month": "0.01",
            "reconciliation_tolerance": "0.5",
            "default_delay_months": 0,
            "due_day": 7,
            "due_date_basis": "deposit_month"
        }"#;
        let p = parse_policy_str(json).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.interest_rate_per_month, dec!(0.01));
        assert_eq!(p.reconciliation_tolerance, dec!(0.5));
        assert_eq!(p.due_date_basis, DueDateBasis::DepositMonth);
        assert!(!p.require_amount);
    }

    #[test]
    fn test_default_policy_is_valid() {
        let p = ChallanPolicy::default();
        validate_policy(&p).unwrap();
        assert_eq!(p.interest_rate_per_month, dec!(0.015));
        assert_eq!(p.reconciliation_tolerance, dec!(1));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let p = ChallanPolicy {
            interest_rate_per_month: Decimal::ZERO,
            ..Default::default()
        };
        assert!(validate_policy(&p).is_err());
    }

    #[test]
    fn test_due_day_out_of_range_rejected() {
        let p = ChallanPolicy {
            due_day: 31,
            ..Default::default()
        };
        assert!(validate_policy(&p).is_err());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let p = ChallanPolicy {
            reconciliation_tolerance: dec!(-1),
            ..Default::default()
        };
        assert!(validate_policy(&p).is_err());
    }

    #[test]
    fn test_unknown_basis_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "interest_rate_per_month": "0.015",
            "reconciliation_tolerance": "1",
            "default_delay_months": 1,
            "due_day": 7,
            "due_date_basis": "end_of_quarter"
        }"#;
        assert!(parse_policy_str(json).is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_policy(Path::new("/nonexistent/policy.json")).unwrap_err();
        assert!(matches!(err, ChallanError::PolicyLoad { .. }));
    }
}
