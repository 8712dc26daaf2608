use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::parsing::values::clean_amount;

/// A named field printed on a challan receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    FinancialYear,
    NatureOfPayment,
    ChallanNumber,
    DepositDate,
    Tax,
    Surcharge,
    Cess,
    Interest,
    Penalty,
    Fee234E,
    Total,
    /// "Amount (in Rs.)" line of older single-amount receipts.
    Amount,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::FinancialYear,
        Field::NatureOfPayment,
        Field::ChallanNumber,
        Field::DepositDate,
        Field::Tax,
        Field::Surcharge,
        Field::Cess,
        Field::Interest,
        Field::Penalty,
        Field::Fee234E,
        Field::Total,
        Field::Amount,
    ];

    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            Field::FinancialYear | Field::NatureOfPayment | Field::ChallanNumber | Field::DepositDate
        )
    }

    /// Value reported when the field's pattern does not match.
    pub fn default_value(self) -> &'static str {
        if self.is_numeric() {
            "0"
        } else {
            ""
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::FinancialYear => "Financial Year",
            Field::NatureOfPayment => "Nature of Payment",
            Field::ChallanNumber => "Challan No",
            Field::DepositDate => "Date of Deposit",
            Field::Tax => "Tax",
            Field::Surcharge => "Surcharge",
            Field::Cess => "Cess",
            Field::Interest => "Interest",
            Field::Penalty => "Penalty",
            Field::Fee234E => "Fee 234E",
            Field::Total => "Total",
            Field::Amount => "Amount",
        };
        write!(f, "{s}")
    }
}

/// Raw field values found in one block, keyed by field.
///
/// Only matched fields are stored; [`ExtractedFields::get`] fills in the
/// default for the rest so callers can tell "absent" from "zero".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    found: BTreeMap<Field, String>,
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by callers that already hold field values.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.found.insert(field, value.into());
        self
    }

    /// The matched value, or the field's default (`"0"` or `""`).
    pub fn get(&self, field: Field) -> &str {
        self.found(field).unwrap_or(field.default_value())
    }

    pub fn found(&self, field: Field) -> Option<&str> {
        self.found.get(&field).map(String::as_str)
    }

    pub fn is_present(&self, field: Field) -> bool {
        self.found.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

/// Matches "₹ 1,23,456.00" style values after a label, allowing any text
/// (including newlines) in between.
pub(crate) const AMOUNT_VALUE: &str = r".*?₹?\s*(\d[\d,]*(?:\.\d+)?)";

/// A total label followed by its figure with no words in between, so
/// "Total (In Words) : Rupees ... Only" is never read as a total.
pub(crate) const TOTAL_AMOUNT: &str =
    r"(?is)\bTotal\b(?:\s*\([A-F\s+]*\))?[^A-Za-z\d]*(\d[\d,]*(?:\.\d+)?)";

pub(crate) const CHALLAN_NO_LABEL: &str = r"\bChallan\s+No\b\.?";

pub(crate) const FINANCIAL_YEAR_LABEL: &str = r"\bFinancial\s+Year";
pub(crate) const NATURE_LABEL: &str = r"\bNature\s+of\s+Payment";
pub(crate) const DEPOSIT_DATE_LABEL: &str = r"\bDate\s+of\s+Deposit";
pub(crate) const AMOUNT_LABEL: &str = r"\bAmount\s*\(in\s+Rs\.?\)\s*:?";

static PATTERNS: LazyLock<Vec<(Field, Regex)>> = LazyLock::new(|| {
    // Text values must sit on the label's own line.
    let text = |label: &str, value: &str| format!(r"(?i){label}[ \t]*:?[ \t]*({value})\b");
    let amount = |label: &str| format!(r"(?is){label}{AMOUNT_VALUE}");

    let table = [
        (Field::FinancialYear, text(FINANCIAL_YEAR_LABEL, r"\d{4}-\d{2}")),
        (Field::NatureOfPayment, text(NATURE_LABEL, r"[0-9A-Z]+")),
        (Field::ChallanNumber, text(CHALLAN_NO_LABEL, r"\d+")),
        (
            Field::DepositDate,
            text(DEPOSIT_DATE_LABEL, r"\d{1,2}-[A-Za-z]{3}-\d{4}"),
        ),
        (Field::Tax, amount(r"(?:\bA\s+Tax\b|\bBasic\s+Tax\b)")),
        (Field::Surcharge, amount(r"\bSurcharge\b")),
        (Field::Cess, amount(r"\bCess\b")),
        (Field::Interest, amount(r"\bInterest\b")),
        (Field::Penalty, amount(r"\bPenalty\b")),
        (Field::Fee234E, amount(r"\bFee\b[^₹\d]*?234\s*E\b")),
        (Field::Total, TOTAL_AMOUNT.to_string()),
        (Field::Amount, amount(AMOUNT_LABEL)),
    ];

    table
        .into_iter()
        .map(|(field, pattern)| {
            let re = Regex::new(&pattern).expect("built-in field pattern is valid");
            (field, re)
        })
        .collect()
});

/// Pull every recognised field out of a block of challan text.
///
/// Never fails: a field whose pattern does not match is simply absent.
pub fn extract(block_text: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::new();

    for (field, re) in PATTERNS.iter() {
        let Some(value) = re
            .captures(block_text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
        else {
            continue;
        };

        let value = if field.is_numeric() {
            clean_amount(value)
        } else {
            value.trim().to_string()
        };
        fields.found.insert(*field, value);
    }

    log::debug!("extracted {} of {} fields", fields.len(), Field::ALL.len());
    fields
}
