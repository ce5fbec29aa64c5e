// src/extract/mod.rs
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;
use tracing::info;

use crate::error::EtlError;

/// The two source sheets, read and concatenated in this order.
pub const SHEET_NAMES: [&str; 2] = ["Year 2009-2010", "Year 2010-2011"];

/// Read each named sheet from the workbook at `path` and concatenate their
/// data rows into one sequence, preserving row order within and across
/// sheets. The first row of each sheet is a header row and is skipped;
/// columns are taken positionally, so header labels never matter.
#[tracing::instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_workbook(
    path: impl AsRef<Path>,
    sheets: &[&str],
) -> Result<Vec<Vec<Data>>, EtlError> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| EtlError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows: Vec<Vec<Data>> = Vec::new();
    for &sheet in sheets {
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|source| EtlError::Sheet {
                sheet: sheet.to_string(),
                source,
            })?;
        let before = rows.len();
        rows.extend(range.rows().skip(1).map(|r| r.to_vec()));
        info!(sheet, rows = rows.len() - before, "extracted sheet");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    const HEADERS: [&str; 8] = [
        "Invoice",
        "StockCode",
        "Description",
        "Quantity",
        "InvoiceDate",
        "Price",
        "Customer ID",
        "Country",
    ];

    /// Workbook with both source sheets: two data rows in the first sheet,
    /// one in the second.
    fn write_fixture(path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAMES[0])?;
        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header)?;
        }
        sheet.write_string(1, 0, "489434")?;
        sheet.write_string(1, 1, "85048")?;
        sheet.write_string(1, 2, " 15CM CHRISTMAS GLASS BALL ")?;
        sheet.write_number(1, 3, 12.0)?;
        sheet.write_string(1, 4, "2009-12-01 07:45:00")?;
        sheet.write_number(1, 5, 6.95)?;
        sheet.write_number(1, 6, 13085.0)?;
        sheet.write_string(1, 7, "United Kingdom")?;
        sheet.write_string(2, 0, "489435")?;
        sheet.write_string(2, 1, "22350")?;
        sheet.write_string(2, 2, "CAT BOWL")?;
        sheet.write_string(2, 3, "abc")?;
        sheet.write_string(2, 4, "not a date")?;
        sheet.write_string(2, 5, "")?;
        sheet.write_string(2, 6, "nan")?;
        sheet.write_string(2, 7, " France ")?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAMES[1])?;
        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header)?;
        }
        sheet.write_string(1, 0, "536365")?;
        sheet.write_string(1, 1, "85123A")?;
        sheet.write_string(1, 2, "WHITE HANGING HEART T-LIGHT HOLDER")?;
        sheet.write_number(1, 3, 6.0)?;
        sheet.write_string(1, 4, "2010-12-01 08:26:00")?;
        sheet.write_number(1, 5, 2.55)?;
        sheet.write_string(1, 6, "17850.0")?;
        sheet.write_string(1, 7, "United Kingdom")?;

        workbook.save(path)?;
        Ok(())
    }

    #[test]
    fn concatenates_sheets_in_order() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("retail.xlsx");
        write_fixture(&path)?;

        let rows = read_workbook(&path, &SHEET_NAMES)?;

        // header rows are skipped, sheet 1 rows precede sheet 2 rows
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], Data::String("489434".into()));
        assert_eq!(rows[1][0], Data::String("489435".into()));
        assert_eq!(rows[2][0], Data::String("536365".into()));
        assert_eq!(rows[0][3], Data::Float(12.0));
        Ok(())
    }

    #[test]
    fn missing_sheet_is_a_read_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("retail.xlsx");
        write_fixture(&path)?;

        let err = read_workbook(&path, &["Year 2011-2012"]).unwrap_err();
        assert!(matches!(err, EtlError::Sheet { ref sheet, .. } if sheet == "Year 2011-2012"));
        Ok(())
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_workbook("/nonexistent/retail.xlsx", &SHEET_NAMES).unwrap_err();
        assert!(matches!(err, EtlError::Workbook { .. }));
    }
}
