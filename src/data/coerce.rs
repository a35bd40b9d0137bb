//! Type Coercion
//! Permissive numeric conversion of the measure columns.

use crate::data::model::{JoinedRow, Record};

/// Parse a raw cell as a finite number. Anything else is missing.
pub fn coerce_numeric(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Convert every measure cell of the unified table.
pub fn coerce_rows(rows: Vec<JoinedRow>) -> Vec<Record> {
    let mut missing = 0usize;
    let mut coerce = |raw: Option<String>| {
        let value = coerce_numeric(raw.as_deref());
        if value.is_none() {
            missing += 1;
        }
        value
    };

    let records: Vec<Record> = rows
        .into_iter()
        .map(|row| Record {
            prevalence: coerce(row.prevalence),
            median_household_income: coerce(row.median_household_income),
            gdp_2023: coerce(row.gdp_2023),
            state: row.state,
        })
        .collect();

    if missing > 0 {
        log::debug!("{} measure cells could not be read as numbers", missing);
    }
    records
}
