use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};

/// One cleaned retail transaction, fields in destination column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub invoice_no: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: Option<f64>,
    pub invoice_date: Option<NaiveDateTime>,
    pub unit_price: Option<f64>,
    pub customer_id: Option<String>,
    pub country: String,
}

static EMPTY: Data = Data::Empty;

/// Positionally map raw rows onto the canonical 8-column schema. Rows are
/// transformed in place, never dropped: a row whose every field fails
/// coercion still comes out, as empty strings and NULLs.
pub fn normalize(raw: &[Vec<Data>]) -> Vec<Transaction> {
    raw.iter().map(|row| normalize_row(row)).collect()
}

fn normalize_row(row: &[Data]) -> Transaction {
    let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY);
    Transaction {
        invoice_no: cell_text(cell(0)),
        stock_code: cell_text(cell(1)),
        description: cell_text(cell(2)),
        quantity: cell_number(cell(3)),
        invoice_date: cell_datetime(cell(4)),
        unit_price: cell_number(cell(5)),
        customer_id: canonical_customer_id(cell(6)),
        country: cell_text(cell(7)),
    }
}

/// String rendering of a cell, trimmed. Whole-number floats render without
/// a fractional part, so a numeric id cell comes out as "13085", not
/// "13085.0".
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    }
}

/// Canonical customer id: trimmed, one trailing ".0" stripped, with the
/// literal "nan" and empty cells mapped to NULL.
pub fn canonical_customer_id(cell: &Data) -> Option<String> {
    let text = cell_text(cell);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    if text.is_empty() || text == "nan" {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parse-or-null numeric coercion: a value that cannot be read as a number
/// becomes NULL rather than an error.
pub fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

const TEXT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse-or-null timestamp coercion. Native spreadsheet datetimes convert
/// directly; text cells are tried against common ISO-style formats, with a
/// bare date accepted as midnight.
pub fn cell_datetime(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime(),
        Data::DateTimeIso(s) | Data::String(s) => parse_text_datetime(s),
        _ => None,
    }
}

fn parse_text_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in TEXT_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
