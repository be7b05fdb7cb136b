#![cfg_attr(not(feature = "xlsx"), allow(dead_code))]

use std::path::Path;

use serde_json::Value;

use crate::{
    analysis::{DerivedMetricRecord, Opportunities},
    core::CseError,
};

/// A spreadsheet column: header plus how to read the cell from a record.
pub(crate) enum Column {
    Text(&'static str, fn(&DerivedMetricRecord) -> Option<String>),
    Number(&'static str, fn(&DerivedMetricRecord) -> Option<f64>),
}

impl Column {
    fn header(&self) -> &'static str {
        match self {
            Column::Text(h, _) | Column::Number(h, _) => h,
        }
    }
}

fn symbol(r: &DerivedMetricRecord) -> Option<String> {
    Some(r.symbol.clone())
}

fn name(r: &DerivedMetricRecord) -> Option<String> {
    r.name.clone()
}

fn risk(r: &DerivedMetricRecord) -> Option<String> {
    r.risk_category.map(|c| c.label().to_string())
}

pub(crate) const VALUE_COLUMNS: &[Column] = &[
    Column::Text("Symbol", symbol),
    Column::Text("Name", name),
    Column::Number("Last Price", |r| r.last_price),
    Column::Number("YTD Position %", |r| r.position_in_ytd_range_pct),
    Column::Number("Market Cap", |r| r.market_cap),
];

pub(crate) const GROWTH_COLUMNS: &[Column] = &[
    Column::Text("Symbol", symbol),
    Column::Text("Name", name),
    Column::Number("Last Price", |r| r.last_price),
    Column::Number("Change %", |r| r.change_pct),
    Column::Number("Volume", |r| r.volume),
];

pub(crate) const STABLE_COLUMNS: &[Column] = &[
    Column::Text("Symbol", symbol),
    Column::Text("Name", name),
    Column::Number("Last Price", |r| r.last_price),
    Column::Number("Beta", |r| r.beta),
    Column::Number("Market Cap", |r| r.market_cap),
];

pub(crate) const ANALYSIS_COLUMNS: &[Column] = &[
    Column::Text("Symbol", symbol),
    Column::Text("Name", name),
    Column::Number("Last Price", |r| r.last_price),
    Column::Number("Change %", |r| r.change_pct),
    Column::Number("YTD High", |r| r.ytd_high),
    Column::Number("YTD Low", |r| r.ytd_low),
    Column::Number("YTD Volatility %", |r| r.ytd_volatility_pct),
    Column::Number("YTD Position %", |r| r.position_in_ytd_range_pct),
    Column::Number("P12 Volatility %", |r| r.p12_volatility_pct),
    Column::Number("P12 Position %", |r| r.position_in_p12_range_pct),
    Column::Number("Book Value / Share", |r| r.book_value_per_share),
    Column::Number("Avg Price YTD", |r| r.avg_price_ytd),
    Column::Number("vs YTD Avg %", |r| r.price_vs_ytd_avg_pct),
    Column::Number("Beta", |r| r.beta),
    Column::Text("Risk", risk),
    Column::Number("Market Cap", |r| r.market_cap),
    Column::Number("Volume", |r| r.volume),
    Column::Number("Turnover", |r| r.turnover),
];

/// The sheets of the opportunities workbook, in order.
pub(crate) fn sheets<'a>(
    opportunities: &'a Opportunities,
    records: &'a [DerivedMetricRecord],
) -> [(&'static str, &'static [Column], &'a [DerivedMetricRecord]); 4] {
    [
        ("Value Opportunities", VALUE_COLUMNS, opportunities.value.as_slice()),
        ("Growth Opportunities", GROWTH_COLUMNS, opportunities.growth.as_slice()),
        ("Stable Opportunities", STABLE_COLUMNS, opportunities.stable.as_slice()),
        ("Company Analysis", ANALYSIS_COLUMNS, records),
    ]
}

#[cfg(feature = "xlsx")]
pub(crate) fn write_workbook(
    path: &Path,
    opportunities: &Opportunities,
    records: &[DerivedMetricRecord],
) -> Result<(), CseError> {
    use rust_xlsxwriter::{Format, Workbook};

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for (title, columns, rows) in sheets(opportunities, records) {
        let sheet = workbook.add_worksheet();
        sheet.set_name(title)?;

        for (c, column) in (0u16..).zip(columns.iter()) {
            sheet.write_string_with_format(0, c, column.header(), &bold)?;
        }
        for (r, record) in (1u32..).zip(rows.iter()) {
            for (c, column) in (0u16..).zip(columns.iter()) {
                match column {
                    Column::Text(_, get) => {
                        if let Some(v) = get(record) {
                            sheet.write_string(r, c, v)?;
                        }
                    }
                    Column::Number(_, get) => {
                        if let Some(v) = get(record) {
                            sheet.write_number(r, c, v)?;
                        }
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(not(feature = "xlsx"))]
pub(crate) fn write_workbook(
    _path: &Path,
    _opportunities: &Opportunities,
    _records: &[DerivedMetricRecord],
) -> Result<(), CseError> {
    Err(CseError::Unsupported(
        "spreadsheet export needs the `xlsx` feature".into(),
    ))
}

/// Writes one sheet per `(title, rows)` pair; each header is the union of its rows' keys.
///
/// Numbers stay numeric, nulls stay blank and nested values are written as compact JSON.
#[cfg(feature = "xlsx")]
pub(crate) fn write_tables(path: &Path, tables: &[(&str, &[Value])]) -> Result<(), CseError> {
    use rust_xlsxwriter::{Format, Workbook};

    use crate::export::table::{cell, union_keys};

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for (title, rows) in tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*title)?;

        let header = union_keys(rows);
        for (c, key) in (0u16..).zip(header.iter()) {
            sheet.write_string_with_format(0, c, key, &bold)?;
        }
        for (r, row) in (1u32..).zip(rows.iter()) {
            for (c, key) in (0u16..).zip(header.iter()) {
                match row.get(key) {
                    None | Some(Value::Null) => {}
                    Some(Value::Number(n)) => {
                        if let Some(v) = n.as_f64() {
                            sheet.write_number(r, c, v)?;
                        }
                    }
                    Some(Value::Bool(b)) => {
                        sheet.write_boolean(r, c, *b)?;
                    }
                    other => {
                        sheet.write_string(r, c, cell(other))?;
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(not(feature = "xlsx"))]
pub(crate) fn write_tables(_path: &Path, _tables: &[(&str, &[Value])]) -> Result<(), CseError> {
    Err(CseError::Unsupported(
        "spreadsheet export needs the `xlsx` feature".into(),
    ))
}
