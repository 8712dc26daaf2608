pub mod xlsx;

use rust_decimal::Decimal;

use crate::model::{ChallanRecord, Report};

/// Report columns, in output order.
pub const COLUMNS: [&str; 14] = [
    "Financial Year",
    "TDS Month",
    "Deposit Date",
    "Delay (Days)",
    "Nature",
    "Challan No",
    "Tax",
    "Surcharge",
    "Cess",
    "Interest",
    "Penalty",
    "Fee 234E",
    "Total",
    "Status",
];

pub const EXPECTED_INTEREST_COLUMN: &str = "Expected Interest";

pub const SERIAL_COLUMN: &str = "S.No";

/// Optional report columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportLayout {
    /// Prepend a running serial number starting at 1.
    pub serial_number: bool,
    /// Append the interest the statutory rate implies, for cross-checking.
    pub expected_interest: bool,
}

impl ReportLayout {
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = Vec::with_capacity(COLUMNS.len() + 2);
        if self.serial_number {
            headers.push(SERIAL_COLUMN);
        }
        headers.extend_from_slice(&COLUMNS);
        if self.expected_interest {
            headers.push(EXPECTED_INTEREST_COLUMN);
        }
        headers
    }
}

/// A typed report cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(Decimal),
    Integer(u32),
    /// Field not present in the source document.
    Empty,
}

impl Cell {
    fn text(s: Option<&str>) -> Cell {
        s.map_or(Cell::Empty, |s| Cell::Text(s.to_string()))
    }

    fn amount(v: Option<Decimal>) -> Cell {
        v.map_or(Cell::Empty, Cell::Number)
    }

    /// Plain-text rendering, as shown in terminal tables.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(d) => d.to_string(),
            Cell::Integer(i) => i.to_string(),
            Cell::Empty => "-".into(),
        }
    }
}

/// One report row, cells in [`ReportLayout::headers`] order. `serial` is the
/// row's 1-based position in the report.
pub fn row(serial: usize, record: &ChallanRecord, layout: ReportLayout) -> Vec<Cell> {
    let a = &record.amounts;
    let mut cells = Vec::with_capacity(COLUMNS.len() + 2);
    if layout.serial_number {
        cells.push(Cell::Integer(u32::try_from(serial).unwrap_or(u32::MAX)));
    }
    cells.extend([
        Cell::text(record.financial_year.as_deref()),
        Cell::Text(record.tds_month()),
        Cell::Text(record.deposit_date_display()),
        Cell::Integer(record.delay_days),
        Cell::text(record.nature_of_payment.as_deref()),
        Cell::text(record.challan_number.as_deref()),
        Cell::amount(a.tax),
        Cell::amount(a.surcharge),
        Cell::amount(a.cess),
        Cell::amount(a.interest),
        Cell::amount(a.penalty),
        Cell::amount(a.fee_234e),
        Cell::Number(record.total),
        Cell::Text(record.status.to_string()),
    ]);
    if layout.expected_interest {
        cells.push(Cell::Number(record.expected_interest));
    }
    cells
}

/// All report rows in report order.
pub fn rows(report: &Report, layout: ReportLayout) -> Vec<Vec<Cell>> {
    report
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| row(i + 1, r, layout))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive;
    use crate::parsing::fields::{ExtractedFields, Field};
    use crate::policy::schema::ChallanPolicy;
    use rust_decimal_macros::dec;

    fn record() -> ChallanRecord {
        let f = ExtractedFields::new()
            .with(Field::FinancialYear, "2023-24")
            .with(Field::ChallanNumber, "111")
            .with(Field::DepositDate, "07-May-2023")
            .with(Field::Tax, "10000")
            .with(Field::Interest, "300")
            .with(Field::Total, "10300");
        derive(&f, &ChallanPolicy::default()).unwrap()
    }

    #[test]
    fn test_row_matches_columns() {
        let cells = row(1, &record(), ReportLayout::default());
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], Cell::Text("2023-24".into()));
        assert_eq!(cells[1], Cell::Text("March".into()));
        assert_eq!(cells[2], Cell::Text("07-May-2023".into()));
        assert_eq!(cells[3], Cell::Integer(30));
        assert_eq!(cells[4], Cell::Empty);
        assert_eq!(cells[6], Cell::Number(dec!(10000)));
        assert_eq!(cells[7], Cell::Empty);
        assert_eq!(cells[12], Cell::Number(dec!(10300)));
        assert_eq!(cells[13], Cell::Text("Late".into()));
    }

    #[test]
    fn test_expected_interest_column() {
        let layout = ReportLayout {
            expected_interest: true,
            ..Default::default()
        };
        let cells = row(1, &record(), layout);
        assert_eq!(layout.headers().last(), Some(&EXPECTED_INTEREST_COLUMN));
        assert_eq!(cells.len(), layout.headers().len());
        assert_eq!(cells.last(), Some(&Cell::Number(dec!(300))));
    }

    #[test]
    fn test_serial_column_counts_rows() {
        let layout = ReportLayout {
            serial_number: true,
            ..Default::default()
        };
        let report = Report {
            records: vec![record(), record()],
        };
        let rows = rows(&report, layout);
        assert_eq!(layout.headers()[0], SERIAL_COLUMN);
        assert_eq!(layout.headers()[1], COLUMNS[0]);
        assert_eq!(rows[0][0], Cell::Integer(1));
        assert_eq!(rows[1][0], Cell::Integer(2));
        assert_eq!(rows[1][1], Cell::Text("2023-24".into()));
        assert_eq!(rows[1].len(), COLUMNS.len() + 1);
    }
}
