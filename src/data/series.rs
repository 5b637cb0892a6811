use std::collections::HashSet;

use super::model::CellValue;
use super::query::RowSet;

/// One categorical point of a chart: label on the x axis, indicator on y.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: CellValue,
    pub value: f64,
}

/// Pair each row's `label_column` with its `indicator` value.
/// Rows with a null or non-numeric indicator are skipped, as the charts leave gaps for them.
pub fn series(rows: &RowSet<'_>, label_column: &str, indicator: &str) -> Vec<SeriesPoint> {
    rows.iter()
        .filter_map(|r| {
            let value = r.value(indicator).as_f64().filter(|v| v.is_finite())?;
            Some(SeriesPoint {
                label: r.value(label_column).clone(),
                value,
            })
        })
        .collect()
}

/// Keep one point per label, the first in row order, so each category gets a single bar.
/// Matches the KPI, where the first of several matching rows wins.
pub fn first_per_label(points: Vec<SeriesPoint>) -> Vec<SeriesPoint> {
    let mut seen = HashSet::new();
    let before = points.len();
    let points: Vec<SeriesPoint> = points
        .into_iter()
        .filter(|p| seen.insert(p.label.clone()))
        .collect();
    if points.len() < before {
        log::warn!(
            "{} duplicate chart categories dropped; keeping the first row of each",
            before - points.len()
        );
    }
    points
}

/// Region-by-indicator bars for a cross-sectional subset.
pub fn region_series(rows: &RowSet<'_>, indicator: &str) -> Vec<SeriesPoint> {
    first_per_label(series(rows, &rows.table().keys().region, indicator))
}

/// Survey-by-indicator points for a (sorted) longitudinal subset.
pub fn survey_series(rows: &RowSet<'_>, indicator: &str) -> Vec<SeriesPoint> {
    first_per_label(series(rows, &rows.table().keys().survey, indicator))
}
