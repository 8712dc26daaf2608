use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A slice of document text believed to hold exactly one challan receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallanBlock {
    /// Position of the block within its document, starting at 0.
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LateStatus {
    Late,
    OnTime,
}

impl fmt::Display for LateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LateStatus::Late => write!(f, "Late"),
            LateStatus::OnTime => write!(f, "On Time"),
        }
    }
}

/// Outcome of comparing the tax components against the declared total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reconciliation {
    Balanced,
    Mismatch {
        component_sum: Decimal,
        declared_total: Decimal,
    },
    /// No declared total, or no component amounts, to compare.
    Unverifiable,
}

impl Reconciliation {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Reconciliation::Mismatch { .. })
    }
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reconciliation::Balanced => write!(f, "balanced"),
            Reconciliation::Mismatch {
                component_sum,
                declared_total,
            } => write!(
                f,
                "components sum to {component_sum} but total is {declared_total}"
            ),
            Reconciliation::Unverifiable => write!(f, "unverifiable"),
        }
    }
}

/// Tax breakup of one challan.
///
/// `None` means the document did not carry the field at all, which is
/// distinct from an explicit zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amounts {
    pub tax: Option<Decimal>,
    pub surcharge: Option<Decimal>,
    pub cess: Option<Decimal>,
    pub interest: Option<Decimal>,
    pub penalty: Option<Decimal>,
    pub fee_234e: Option<Decimal>,
}

impl Amounts {
    fn components(&self) -> [Option<Decimal>; 6] {
        [
            self.tax,
            self.surcharge,
            self.cess,
            self.interest,
            self.penalty,
            self.fee_234e,
        ]
    }

    /// Sum of all components, absent ones counting as zero. `None` when the
    /// sum does not fit in a `Decimal`.
    pub fn checked_sum(&self) -> Option<Decimal> {
        self.components()
            .iter()
            .flatten()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
    }

    pub fn any_present(&self) -> bool {
        self.components().iter().any(Option::is_some)
    }
}

/// A validated challan with its derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallanRecord {
    pub financial_year: Option<String>,
    pub nature_of_payment: Option<String>,
    pub challan_number: Option<String>,
    pub deposit_date: NaiveDate,
    /// First day of the month the withholding obligation arose in.
    pub accounting_month: NaiveDate,
    pub due_date: NaiveDate,
    pub delay_months: u32,
    pub delay_days: u32,
    pub amounts: Amounts,
    pub total: Decimal,
    /// Interest the statutory rate implies for the derived delay, rounded to
    /// two decimals. Zero for on-time deposits.
    pub expected_interest: Decimal,
    pub reconciliation: Reconciliation,
    pub status: LateStatus,
}

impl ChallanRecord {
    /// Month name of the accounting month, e.g. "March".
    pub fn tds_month(&self) -> String {
        self.accounting_month.format("%B").to_string()
    }

    /// Deposit date in the receipt's own `DD-Mon-YYYY` form.
    pub fn deposit_date_display(&self) -> String {
        self.deposit_date.format("%d-%b-%Y").to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub records: Vec<ChallanRecord>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    UnreadableDocument,
    NoChallanFound,
    MissingRequiredField,
    /// Amounts or dates too large to derive a record from.
    ValueOutOfRange,
    ReconciliationMismatch,
    NoValidRecords,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WarningKind::UnreadableDocument => "unreadable document",
            WarningKind::NoChallanFound => "no challan found",
            WarningKind::MissingRequiredField => "missing required field",
            WarningKind::ValueOutOfRange => "value out of range",
            WarningKind::ReconciliationMismatch => "reconciliation mismatch",
            WarningKind::NoValidRecords => "no valid records",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentWarning {
    pub document: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_index: Option<usize>,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for DocumentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block_index {
            Some(i) => write!(f, "{} (challan #{}): {}", self.document, i + 1, self.message),
            None => write!(f, "{}: {}", self.document, self.message),
        }
    }
}

/// Everything one batch run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub report: Report,
    pub warnings: Vec<DocumentWarning>,
    pub documents_processed: usize,
    /// Set when the caller's stop flag ended the batch before the last document.
    pub stopped_early: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sum_treats_absent_as_zero() {
        let a = Amounts {
            tax: Some(dec!(10000)),
            interest: Some(dec!(300)),
            ..Default::default()
        };
        assert_eq!(a.checked_sum(), Some(dec!(10300)));
        assert!(a.any_present());
        assert!(!Amounts::default().any_present());
    }

    #[test]
    fn checked_sum_reports_overflow() {
        let a = Amounts {
            tax: Some(Decimal::MAX),
            surcharge: Some(dec!(1)),
            ..Default::default()
        };
        assert_eq!(a.checked_sum(), None);
    }

    #[test]
    fn warning_display_names_block() {
        let w = DocumentWarning {
            document: "a.pdf".into(),
            block_index: Some(1),
            kind: WarningKind::MissingRequiredField,
            message: "no deposit date".into(),
        };
        assert_eq!(w.to_string(), "a.pdf (challan #2): no deposit date");
    }
}
