use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::derive::calendar::{day_in_month_after, days_late, first_of_month, months_before};
use crate::error::ChallanError;
use crate::model::{Amounts, ChallanRecord, LateStatus, Reconciliation};
use crate::parsing::fields::{ExtractedFields, Field};
use crate::parsing::values::{parse_amount, parse_deposit_date};
use crate::policy::schema::{ChallanPolicy, DueDateBasis};

/// Turn one block's raw fields into a validated record.
///
/// Rejects the block when the deposit date is absent or unparseable, or when
/// the policy requires a declared amount and there is none. A reconciliation
/// mismatch does not reject; it is carried on the record.
pub fn derive(
    fields: &ExtractedFields,
    policy: &ChallanPolicy,
) -> Result<ChallanRecord, ChallanError> {
    let raw_date = fields
        .found(Field::DepositDate)
        .ok_or_else(|| ChallanError::MissingRequiredField {
            field: Field::DepositDate,
            reason: "no deposit date in challan".into(),
        })?;
    let deposit_date = parse_deposit_date(raw_date)?;

    let declared_total = amount(fields, Field::Total).or_else(|| amount(fields, Field::Amount));
    if policy.require_amount && declared_total.is_none() {
        return Err(ChallanError::MissingRequiredField {
            field: Field::Total,
            reason: "no total or declared amount in challan".into(),
        });
    }

    let amounts = Amounts {
        tax: amount(fields, Field::Tax),
        surcharge: amount(fields, Field::Surcharge),
        cess: amount(fields, Field::Cess),
        interest: amount(fields, Field::Interest),
        penalty: amount(fields, Field::Penalty),
        fee_234e: amount(fields, Field::Fee234E),
    };

    let delay_months = delay_months(amounts.tax, amounts.interest, policy)?;
    let accounting_month = months_before(deposit_date, delay_months)?;
    let due_date = match policy.due_date_basis {
        DueDateBasis::FollowingAccountingMonth => {
            day_in_month_after(accounting_month, 1, policy.due_day)?
        }
        DueDateBasis::DepositMonth => {
            day_in_month_after(first_of_month(deposit_date), 0, policy.due_day)?
        }
    };
    let delay_days = days_late(due_date, deposit_date);

    let component_sum = amounts.checked_sum().ok_or_else(|| {
        ChallanError::AmountOutOfRange("tax components do not sum to a representable amount".into())
    })?;
    let reconciliation = reconcile(
        &amounts,
        component_sum,
        declared_total,
        policy.reconciliation_tolerance,
    )?;

    let status = if amounts.interest.is_some_and(|i| i > Decimal::ZERO) {
        LateStatus::Late
    } else {
        LateStatus::OnTime
    };

    let expected_interest = match (status, amounts.tax.or(declared_total)) {
        (LateStatus::Late, Some(base)) => base
            .checked_mul(policy.interest_rate_per_month)
            .and_then(|v| v.checked_mul(Decimal::from(delay_months)))
            .map(|v| v.round_dp(2))
            .ok_or_else(|| {
                ChallanError::AmountOutOfRange(format!(
                    "expected interest on {base} over {delay_months} month(s)"
                ))
            })?,
        _ => Decimal::ZERO,
    };

    let total = declared_total.unwrap_or(component_sum);

    Ok(ChallanRecord {
        financial_year: text(fields, Field::FinancialYear),
        nature_of_payment: text(fields, Field::NatureOfPayment),
        challan_number: text(fields, Field::ChallanNumber),
        deposit_date,
        accounting_month,
        due_date,
        delay_months,
        delay_days,
        amounts,
        total,
        expected_interest,
        reconciliation,
        status,
    })
}

/// Months of delay implied by the accrued interest.
///
/// Interest accrues at `rate` of the tax per month or part-month, so the
/// delay is `ceil(interest / (tax * rate))`. Without both signals the
/// policy default applies.
pub fn delay_months(
    tax: Option<Decimal>,
    interest: Option<Decimal>,
    policy: &ChallanPolicy,
) -> Result<u32, ChallanError> {
    match (tax, interest) {
        (Some(tax), Some(interest)) if tax > Decimal::ZERO && interest > Decimal::ZERO => {
            let per_month = tax * policy.interest_rate_per_month;
            let months = interest
                .checked_div(per_month)
                .map(|m| m.ceil())
                .and_then(|m| m.to_u32())
                .ok_or_else(|| {
                    ChallanError::DateOutOfRange(format!(
                        "interest {interest} on tax {tax} implies an unrepresentable delay"
                    ))
                })?;
            Ok(months)
        }
        _ => Ok(policy.default_delay_months),
    }
}

fn reconcile(
    amounts: &Amounts,
    component_sum: Decimal,
    declared_total: Option<Decimal>,
    tolerance: Decimal,
) -> Result<Reconciliation, ChallanError> {
    let Some(declared_total) = declared_total else {
        return Ok(Reconciliation::Unverifiable);
    };
    if !amounts.any_present() {
        return Ok(Reconciliation::Unverifiable);
    }

    let difference = component_sum.checked_sub(declared_total).ok_or_else(|| {
        ChallanError::AmountOutOfRange(format!(
            "difference between {component_sum} and {declared_total}"
        ))
    })?;
    if difference.abs() > tolerance {
        Ok(Reconciliation::Mismatch {
            component_sum,
            declared_total,
        })
    } else {
        Ok(Reconciliation::Balanced)
    }
}

fn amount(fields: &ExtractedFields, field: Field) -> Option<Decimal> {
    let raw = fields.found(field)?;
    let parsed = parse_amount(raw);
    if parsed.is_none() {
        log::warn!("ignoring malformed {field} amount '{raw}'");
    }
    parsed
}

fn text(fields: &ExtractedFields, field: Field) -> Option<String> {
    fields
        .found(field)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
