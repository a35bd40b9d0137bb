//! Join Engine
//! Inner joins of the source tables on the trimmed state key.

use crate::data::model::{JoinedRow, SourceRow, SourceTable};
use std::collections::HashMap;

/// A row that can take part in a join.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for SourceRow {
    fn key(&self) -> &str {
        &self.state
    }
}

impl Keyed for JoinedRow {
    fn key(&self) -> &str {
        &self.state
    }
}

/// Inner join of two row sets.
///
/// Output follows left order; each left row is paired with every right row
/// sharing its key, in right order. Duplicate keys therefore multiply.
pub fn inner_join<L, R, O, F>(left: &[L], right: &[R], combine: F) -> Vec<O>
where
    L: Keyed,
    R: Keyed,
    F: Fn(&L, &R) -> O,
{
    let mut index: HashMap<&str, Vec<&R>> = HashMap::with_capacity(right.len());
    for row in right {
        index.entry(row.key()).or_default().push(row);
    }

    let mut joined = Vec::with_capacity(left.len().min(right.len()));
    for l in left {
        if let Some(matches) = index.get(l.key()) {
            for r in matches {
                joined.push(combine(l, r));
            }
        }
    }
    joined
}

/// Keys that occur more than once, in first-seen order.
pub fn duplicate_keys<T: Keyed>(rows: &[T]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for row in rows {
        let count = counts.entry(row.key()).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(row.key().to_string());
        }
    }
    duplicates
}

/// Build the unified table: (obesity ⋈ household) ⋈ gdp.
pub fn join_sources(
    obesity: &SourceTable,
    household: &SourceTable,
    gdp: &SourceTable,
) -> Vec<JoinedRow> {
    for table in [obesity, household, gdp] {
        let duplicates = duplicate_keys(&table.rows);
        if !duplicates.is_empty() {
            log::warn!(
                "{} source has duplicate states, join rows will multiply: {}",
                table.kind,
                duplicates.join(", ")
            );
        }
    }

    let partial = inner_join(&obesity.rows, &household.rows, |o, h| JoinedRow {
        state: o.state.clone(),
        prevalence: o.value.clone(),
        median_household_income: h.value.clone(),
        gdp_2023: None,
    });

    inner_join(&partial, &gdp.rows, |p, g| JoinedRow {
        gdp_2023: g.value.clone(),
        ..p.clone()
    })
}
