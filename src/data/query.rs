//! Pure queries over a [`RecordTable`]: exact-match filtering, KPI lookup,
//! and the cross-sectional / longitudinal subsets behind the two charts.

use super::error::{NoDataAvailable, NoDataReason};
use super::model::{CellValue, Record, RecordTable};

// ---------------------------------------------------------------------------
// FilterSelection
// ---------------------------------------------------------------------------

/// The (region, survey, area) triple picked in the selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub region: CellValue,
    pub survey: CellValue,
    pub area: CellValue,
}

impl FilterSelection {
    pub fn new(
        region: impl Into<CellValue>,
        survey: impl Into<CellValue>,
        area: impl Into<CellValue>,
    ) -> Self {
        Self {
            region: region.into(),
            survey: survey.into(),
            area: area.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RowSet – an ordered subset of a table
// ---------------------------------------------------------------------------

/// Rows of `table` at `indices`, in table order.
#[derive(Debug, Clone)]
pub struct RowSet<'a> {
    table: &'a RecordTable,
    indices: Vec<usize>,
}

impl<'a> RowSet<'a> {
    /// Indices are expected to be in bounds; out-of-range ones are dropped.
    pub fn from_indices(table: &'a RecordTable, mut indices: Vec<usize>) -> Self {
        indices.retain(|&i| i < table.len());
        Self { table, indices }
    }

    pub fn table(&self) -> &'a RecordTable {
        self.table
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn first(&self) -> Option<&'a Record> {
        self.indices.first().map(|&i| &self.table.records()[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Indices of rows passing `predicate`, in table order.
fn select<'a>(table: &'a RecordTable, predicate: impl Fn(&Record) -> bool) -> RowSet<'a> {
    let indices = table
        .records()
        .iter()
        .enumerate()
        .filter(|&(_, r)| predicate(r))
        .map(|(i, _)| i)
        .collect();
    RowSet { table, indices }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Rows whose region, survey and area all equal the selection.
pub fn filter_exact<'a>(table: &'a RecordTable, selection: &FilterSelection) -> RowSet<'a> {
    let keys = table.keys();
    select(table, |r| {
        r.value(&keys.region) == &selection.region
            && r.value(&keys.survey) == &selection.survey
            && r.value(&keys.area) == &selection.area
    })
}

/// Rows for one survey and area across every region (bar chart).
pub fn cross_section<'a>(
    table: &'a RecordTable,
    survey: &CellValue,
    area: &CellValue,
) -> RowSet<'a> {
    let keys = table.keys();
    select(table, |r| {
        r.value(&keys.survey) == survey && r.value(&keys.area) == area
    })
}

/// Rows for one region and area across every survey wave (trend chart).
///
/// Table order is kept; use [`super::order::SurveyOrder`] to sort chronologically.
pub fn longitudinal<'a>(
    table: &'a RecordTable,
    region: &CellValue,
    area: &CellValue,
) -> RowSet<'a> {
    let keys = table.keys();
    select(table, |r| {
        r.value(&keys.region) == region && r.value(&keys.area) == area
    })
}

// ---------------------------------------------------------------------------
// KPI
// ---------------------------------------------------------------------------

/// The headline value of one indicator for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub indicator: String,
    /// Rounded to two decimals.
    pub value: f64,
    /// How many rows matched the selection; the first one supplied `value`.
    pub matching_rows: usize,
}

impl Kpi {
    pub fn is_ambiguous(&self) -> bool {
        self.matching_rows > 1
    }
}

/// Round to two decimals, ties to even (numpy's `round(v, 2)`).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// The indicator value of the first row of `rows`.
///
/// First row in table order wins when a selection is not unique.
pub fn kpi(rows: &RowSet<'_>, indicator: &str) -> Result<Kpi, NoDataAvailable> {
    let no_data = |reason| NoDataAvailable {
        indicator: indicator.to_string(),
        reason,
    };

    let first = rows.first().ok_or_else(|| no_data(NoDataReason::NoMatchingRows))?;
    if rows.len() > 1 {
        log::warn!(
            "{} rows match the selection; using the first for '{indicator}'",
            rows.len()
        );
    }

    let value = first
        .value(indicator)
        .as_f64()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| no_data(NoDataReason::MissingValue))?;

    Ok(Kpi {
        indicator: indicator.to_string(),
        value: round2(value),
        matching_rows: rows.len(),
    })
}
