use std::cmp::Ordering;

use serde::Deserialize;

use super::model::CellValue;
use super::query::RowSet;

/// How survey waves are ordered on the trend chart.
///
/// ```toml
/// survey_order = "natural"                           # NFHS-4 < NFHS-5 < NFHS-10
/// survey_order = "as_loaded"                         # file order
/// survey_order = { explicit = ["NFHS-3", "NFHS-4"] } # listed waves first
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyOrder {
    AsLoaded,
    #[default]
    Natural,
    /// Listed waves first, in list order; unlisted waves after, in file order.
    Explicit(Vec<String>),
}

impl SurveyOrder {
    /// Compare two survey values. `Equal` keeps file order under a stable sort.
    pub fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        match self {
            SurveyOrder::AsLoaded => Ordering::Equal,
            SurveyOrder::Natural => natural_cmp(&a.to_string(), &b.to_string()),
            SurveyOrder::Explicit(waves) => {
                let rank = |v: &CellValue| {
                    let label = v.to_string();
                    waves.iter().position(|w| *w == label).unwrap_or(waves.len())
                };
                rank(a).cmp(&rank(b))
            }
        }
    }

    /// Stable-sort `rows` by their survey column.
    pub fn sort<'a>(&self, rows: RowSet<'a>) -> RowSet<'a> {
        let table = rows.table();
        let survey = &table.keys().survey;
        let records = table.records();
        let mut indices = rows.into_indices();
        indices.sort_by(|&a, &b| {
            self.compare(records[a].value(survey), records[b].value(survey))
        });
        RowSet::from_indices(table, indices)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;
    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                out.push(chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        out.push(chunk(&s[start..], prev));
    }
    out
}

fn chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(s)
    } else {
        Chunk::Text(s)
    }
}

/// Digit-aware string comparison: `"NFHS-5" < "NFHS-10"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ca = chunks(a);
    let cb = chunks(b);
    for (x, y) in ca.iter().zip(cb.iter()) {
        let ord = match (x, y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => {
                let x = x.trim_start_matches('0');
                let y = y.trim_start_matches('0');
                x.len().cmp(&y.len()).then_with(|| x.cmp(y))
            }
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ca.len().cmp(&cb.len())
}
