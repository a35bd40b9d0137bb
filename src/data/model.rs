//! Row Types
//! Fixed-schema rows passed between the pipeline stages.

use crate::data::region::Region;
use std::fmt;

/// Name of the join key column in every source.
pub const STATE_COLUMN: &str = "State";

/// One of the three input datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Obesity,
    Household,
    Gdp,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Obesity, SourceKind::Household, SourceKind::Gdp];

    /// Column holding this source's measure.
    pub fn measure_column(self) -> &'static str {
        match self {
            SourceKind::Obesity => "Prevalence",
            SourceKind::Household => "Median Household Income",
            SourceKind::Gdp => "GDP_2023",
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            SourceKind::Obesity => "Obesity.csv",
            SourceKind::Household => "Household.csv",
            SourceKind::Gdp => "GDP.csv",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Obesity => "obesity",
            SourceKind::Household => "household",
            SourceKind::Gdp => "gdp",
        };
        f.write_str(name)
    }
}

/// A loaded source row: trimmed key plus the raw measure cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub state: String,
    pub value: Option<String>,
}

impl SourceRow {
    pub fn new(state: &str, value: Option<&str>) -> Self {
        Self {
            state: state.trim().to_string(),
            value: value.map(str::to_string),
        }
    }
}

/// All rows of one source, in file order.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub kind: SourceKind,
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    pub fn new(kind: SourceKind, rows: Vec<SourceRow>) -> Self {
        Self { kind, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Unified row before numeric coercion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinedRow {
    pub state: String,
    pub prevalence: Option<String>,
    pub median_household_income: Option<String>,
    pub gdp_2023: Option<String>,
}

/// Unified row with typed measures. `None` marks a cell that failed coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub state: String,
    pub prevalence: Option<f64>,
    pub median_household_income: Option<f64>,
    pub gdp_2023: Option<f64>,
}

impl Record {
    pub fn new(
        state: &str,
        prevalence: Option<f64>,
        median_household_income: Option<f64>,
        gdp_2023: Option<f64>,
    ) -> Self {
        Self {
            state: state.to_string(),
            prevalence,
            median_household_income,
            gdp_2023,
        }
    }
}

/// A record that resolved to a known state or territory.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    pub record: Record,
    pub region: &'static Region,
}

impl RegionRecord {
    pub fn code(&self) -> &'static str {
        self.region.code
    }
}
