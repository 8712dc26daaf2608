use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::ChallanError;
use crate::model::Report;
use crate::report::{rows, Cell, ReportLayout};

pub const SHEET_NAME: &str = "Challans";

/// Write the report as a single-sheet workbook at `path`.
pub fn write_xlsx(report: &Report, layout: ReportLayout, path: &Path) -> Result<(), ChallanError> {
    let mut workbook = build_workbook(report, layout)?;
    workbook.save(path)?;
    log::info!("wrote {} row(s) to {}", report.len(), path.display());
    Ok(())
}

/// Render the report workbook into memory.
pub fn to_xlsx_bytes(report: &Report, layout: ReportLayout) -> Result<Vec<u8>, ChallanError> {
    let mut workbook = build_workbook(report, layout)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(report: &Report, layout: ReportLayout) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");

    for (col, header) in layout.headers().iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, column_width(header))?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (i, cells) in rows(report, layout).iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            write_cell(sheet, row, col as u16, cell, &money)?;
        }
    }

    Ok(workbook)
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    money: &Format,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
        Cell::Number(d) => {
            sheet.write_number_with_format(row, col, d.to_f64().unwrap_or_default(), money)?;
        }
        Cell::Integer(i) => {
            sheet.write_number(row, col, *i)?;
        }
        Cell::Empty => {}
    }
    Ok(())
}

fn column_width(header: &str) -> f64 {
    match header {
        "S.No" => 6.0,
        "Financial Year" | "Deposit Date" | "Challan No" => 16.0,
        "Total" | "Tax" | "Expected Interest" => 18.0,
        _ => (header.len() as f64 + 4.0).max(12.0),
    }
}
