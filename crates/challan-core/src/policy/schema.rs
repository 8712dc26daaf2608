use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which month the statutory due date falls in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueDateBasis {
    /// Due on `due_day` of the month after the accounting month.
    #[default]
    FollowingAccountingMonth,
    /// Due on `due_day` of the month the deposit was made in.
    DepositMonth,
}

impl fmt::Display for DueDateBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDateBasis::FollowingAccountingMonth => {
                write!(f, "month following the accounting month")
            }
            DueDateBasis::DepositMonth => write!(f, "deposit month"),
        }
    }
}

/// Business constants used when deriving fields from a challan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallanPolicy {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Interest accrued per month (or part) of delay, as a fraction of tax.
    pub interest_rate_per_month: Decimal,
    /// Largest difference between component sum and total still treated as balanced.
    pub reconciliation_tolerance: Decimal,
    /// Delay assumed when tax and interest give no signal.
    pub default_delay_months: u32,
    pub due_day: u32,
    #[serde(default)]
    pub due_date_basis: DueDateBasis,
    /// Reject challans that carry neither a total nor a declared amount.
    #[serde(default)]
    pub require_amount: bool,
}

impl Default for ChallanPolicy {
    fn default() -> Self {
        ChallanPolicy {
            name: "Standard TDS deposit policy".into(),
            description: None,
            version: "1".into(),
            interest_rate_per_month: Decimal::new(15, 3),
            reconciliation_tolerance: Decimal::ONE,
            default_delay_months: 1,
            due_day: 7,
            due_date_basis: DueDateBasis::FollowingAccountingMonth,
            require_amount: false,
        }
    }
}
