use crate::model::{BatchOutcome, ChallanRecord, DocumentWarning, LateStatus, WarningKind};
use crate::policy::schema::{ChallanPolicy, DueDateBasis};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Critical,
    Important,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    ParseDate,
    DelayMonths,
    AccountingMonth,
    DueDate,
    DelayDays,
    Reconciliation,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub entry_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challan_number: Option<String>,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceWarning {
    pub document: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_index: Option<usize>,
    pub message: String,
    pub severity: TraceSeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    pub policy: String,
    pub entries: Vec<TraceEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

/// Explain every derived field of `record`, step by step.
pub fn build_record_trace(
    record_idx: usize,
    record: &ChallanRecord,
    policy: &ChallanPolicy,
) -> TraceEntry {
    let step = |step_type, message: String| TraceStep { step_type, message };
    let rate = policy.interest_rate_per_month;

    let delay = match (record.amounts.tax, record.amounts.interest) {
        (Some(tax), Some(interest)) if tax > Decimal::ZERO && interest > Decimal::ZERO => format!(
            "ceil({interest} / ({tax} x {rate})) = {} month(s)",
            record.delay_months
        ),
        _ => format!(
            "no tax/interest signal; policy default of {} month(s)",
            record.delay_months
        ),
    };

    let due = match policy.due_date_basis {
        DueDateBasis::FollowingAccountingMonth => format!(
            "day {} of the month after {} = {}",
            policy.due_day,
            record.accounting_month.format("%B %Y"),
            record.due_date
        ),
        DueDateBasis::DepositMonth => format!(
            "day {} of the deposit month = {}",
            policy.due_day, record.due_date
        ),
    };

    let status = match record.status {
        LateStatus::Late => format!(
            "interest {} paid; Late (expected {} at {rate}/month)",
            record.amounts.interest.unwrap_or_default(),
            record.expected_interest
        ),
        LateStatus::OnTime => "no interest paid; On Time".to_string(),
    };

    TraceEntry {
        entry_id: format!("rec_{record_idx}"),
        challan_number: record.challan_number.clone(),
        steps: vec![
            step(
                TraceStepType::ParseDate,
                format!("deposit date {}", record.deposit_date),
            ),
            step(TraceStepType::DelayMonths, delay),
            step(
                TraceStepType::AccountingMonth,
                format!(
                    "{} minus {} month(s) = {}",
                    record.deposit_date.format("%B %Y"),
                    record.delay_months,
                    record.tds_month()
                ),
            ),
            step(TraceStepType::DueDate, due),
            step(
                TraceStepType::DelayDays,
                format!(
                    "{} - {} = {} day(s)",
                    record.deposit_date, record.due_date, record.delay_days
                ),
            ),
            step(
                TraceStepType::Reconciliation,
                record.reconciliation.to_string(),
            ),
            step(TraceStepType::Status, status),
        ],
    }
}

fn trace_warning(w: &DocumentWarning) -> TraceWarning {
    let severity = match w.kind {
        WarningKind::UnreadableDocument | WarningKind::NoValidRecords => TraceSeverity::Critical,
        WarningKind::MissingRequiredField
        | WarningKind::ValueOutOfRange
        | WarningKind::ReconciliationMismatch => TraceSeverity::Important,
        WarningKind::NoChallanFound => TraceSeverity::Info,
    };
    TraceWarning {
        document: w.document.clone(),
        block_index: w.block_index,
        message: format!("{}: {}", w.kind, w.message),
        severity,
    }
}

/// Trace every record of a batch, with its warnings.
pub fn build_bundle(outcome: &BatchOutcome, policy: &ChallanPolicy) -> TraceBundle {
    TraceBundle {
        trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
        policy: format!("{} (v{})", policy.name, policy.version),
        entries: outcome
            .report
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| build_record_trace(i, r, policy))
            .collect(),
        warnings: outcome.warnings.iter().map(trace_warning).collect(),
    }
}
