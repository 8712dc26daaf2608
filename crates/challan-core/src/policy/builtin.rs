use crate::error::ChallanError;
use crate::policy::parse_policy_str;
use crate::policy::schema::ChallanPolicy;

const STANDARD_JSON: &str = include_str!("../../../../policies/standard.json");
const DEPOSIT_MONTH_JSON: &str = include_str!("../../../../policies/deposit-month.json");
const LEGACY_JSON: &str = include_str!("../../../../policies/legacy.json");

/// Available predefined policies. The first one is the default.
pub const PRESETS: &[&str] = &["standard", "deposit-month", "legacy"];

/// Load a predefined policy by name.
pub fn load_preset(name: &str) -> Result<ChallanPolicy, ChallanError> {
    let json = match name {
        "standard" => STANDARD_JSON,
        "deposit-month" => DEPOSIT_MONTH_JSON,
        "legacy" => LEGACY_JSON,
        _ => {
            return Err(ChallanError::PolicyInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    parse_policy_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::schema::DueDateBasis;

    #[test]
    fn test_standard_matches_default() {
        let p = load_preset("standard").unwrap();
        assert_eq!(p, ChallanPolicy::default());
    }

    #[test]
    fn test_deposit_month_preset() {
        let p = load_preset("deposit-month").unwrap();
        assert_eq!(p.due_date_basis, DueDateBasis::DepositMonth);
        assert_eq!(p.default_delay_months, 0);
    }

    #[test]
    fn test_legacy_requires_amount() {
        assert!(load_preset("legacy").unwrap().require_amount);
    }

    #[test]
    fn test_all_presets_load() {
        for name in PRESETS {
            load_preset(name).unwrap();
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
