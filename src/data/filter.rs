//! Filter Engine
//! Range and state-selection constraints over the unified table.

use crate::data::model::Record;
use std::collections::BTreeSet;

/// Inclusive numeric interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub const UNBOUNDED: ValueRange = ValueRange {
        low: f64::NEG_INFINITY,
        high: f64::INFINITY,
    };

    /// Bounds given in either order are normalized to `low <= high`.
    pub fn new(low: f64, high: f64) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    /// A missing value never satisfies a range.
    pub fn contains(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => self.low <= v && v <= self.high,
            None => false,
        }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Observed extent of a column, as offered by a range slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDomain {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ColumnDomain {
    /// Min and max of the present values, widened to whole numbers.
    /// `None` when no value is present.
    pub fn observe<I>(values: I, step: f64) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let (min, max) = values
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })?;

        Some(Self {
            min: min.floor(),
            max: max.ceil(),
            step,
        })
    }

    pub fn full_range(&self) -> ValueRange {
        ValueRange::new(self.min, self.max)
    }

    /// Clamp a range into the domain.
    pub fn clamp(&self, range: ValueRange) -> ValueRange {
        ValueRange::new(
            range.low.clamp(self.min, self.max),
            range.high.clamp(self.min, self.max),
        )
    }

    /// Clamp a slider value and pull it onto `max` when it is less than a
    /// step away. Steps count from `min`, so `max` is otherwise unreachable
    /// whenever the span is not a whole number of steps.
    pub fn snap(&self, value: f64) -> f64 {
        let value = value.clamp(self.min, self.max);
        if self.max - value < self.step {
            self.max
        } else {
            value
        }
    }
}

/// Step of the prevalence slider.
pub const PREVALENCE_STEP: f64 = 1.0;

/// Default step of the income slider.
pub const INCOME_STEP: f64 = 5000.0;

/// Constraints selected in the control panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterConstraints {
    pub prevalence: ValueRange,
    pub income: ValueRange,
    /// Empty means every state.
    pub states: BTreeSet<String>,
}

impl FilterConstraints {
    /// Ranges spanning the full observed columns, no state selection.
    pub fn defaults_for(records: &[Record], income_step: f64) -> Self {
        let prevalence = prevalence_domain(records)
            .map(|d| d.full_range())
            .unwrap_or_default();
        let income = income_domain(records, income_step)
            .map(|d| d.full_range())
            .unwrap_or_default();

        Self {
            prevalence,
            income,
            states: BTreeSet::new(),
        }
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.prevalence.contains(record.prevalence)
            && self.income.contains(record.median_household_income)
            && (self.states.is_empty() || self.states.contains(&record.state))
    }

    /// Matching records in input order.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

pub fn prevalence_domain(records: &[Record]) -> Option<ColumnDomain> {
    ColumnDomain::observe(records.iter().map(|r| r.prevalence), PREVALENCE_STEP)
}

pub fn income_domain(records: &[Record], step: f64) -> Option<ColumnDomain> {
    ColumnDomain::observe(records.iter().map(|r| r.median_household_income), step)
}
