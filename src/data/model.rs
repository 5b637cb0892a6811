use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Deserialize;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the survey table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the common spreadsheet/Pandas dtypes.
///
/// Equality and ordering go through [`Ord`], so `Float(NaN) == Float(NaN)`
/// and a loaded table always compares equal to itself.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) | CellValue::Date(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` (indicator values, chart heights).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    fn is_numeric_or_null(&self) -> bool {
        matches!(
            self,
            CellValue::Integer(_) | CellValue::Float(_) | CellValue::Null
        )
    }
}

// ---------------------------------------------------------------------------
// KeyColumns – names of the three categorical filter columns
// ---------------------------------------------------------------------------

/// Column names of the region / survey / area fields, configured once.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyColumns {
    pub region: String,
    pub survey: String,
    pub area: String,
}

impl Default for KeyColumns {
    fn default() -> Self {
        Self {
            region: "India/States/UTs".to_string(),
            survey: "Survey".to_string(),
            area: "Area".to_string(),
        }
    }
}

impl KeyColumns {
    pub fn contains(&self, column: &str) -> bool {
        column == self.region || column == self.survey || column == self.area
    }

    fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.region.as_str(),
            self.survey.as_str(),
            self.area.as_str(),
        ]
        .into_iter()
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the survey table
// ---------------------------------------------------------------------------

/// A single row: column_name → value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    /// Cell value or `Null` when the row lacks the column.
    pub fn value(&self, column: &str) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.values.get(column).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// RawTable – what the format readers produce
// ---------------------------------------------------------------------------

/// Header plus positional rows, straight from a reader.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Trim headers, name blank ones `Unnamed: <i>` and suffix duplicates `.1`, `.2`, ….
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();
    for (i, h) in raw.into_iter().enumerate() {
        let trimmed = h.as_ref().trim().trim_matches('\u{feff}');
        let base = if trimmed.is_empty() {
            format!("Unnamed: {i}")
        } else {
            trimmed.to_string()
        };
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        seen.insert(name.clone());
        headers.push(name);
    }
    headers
}

// ---------------------------------------------------------------------------
// RecordTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable in-memory survey table with pre-computed selector options.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    columns: Vec<String>,
    records: Vec<Record>,
    keys: KeyColumns,
    /// Per column, distinct values in first-appearance order.
    distinct: BTreeMap<String, Vec<CellValue>>,
    /// Numeric, non-key columns in header order.
    indicators: Vec<String>,
}

impl RecordTable {
    /// Build the table and its derived views. Fails when a key column is absent.
    pub fn from_raw(raw: RawTable, keys: KeyColumns) -> Result<Self, LoadError> {
        for key in keys.iter() {
            if !raw.headers.iter().any(|h| h == key) {
                return Err(LoadError::MissingColumn(key.to_string()));
            }
        }

        let records: Vec<Record> = raw
            .rows
            .into_iter()
            .map(|row| {
                let mut values = BTreeMap::new();
                let mut cells = row.into_iter();
                for col in &raw.headers {
                    let value = cells.next().unwrap_or(CellValue::Null);
                    values.insert(col.clone(), value);
                }
                Record { values }
            })
            .collect();

        let mut distinct: BTreeMap<String, Vec<CellValue>> = BTreeMap::new();
        for col in &raw.headers {
            let mut seen = HashSet::new();
            let values = records
                .iter()
                .map(|r| r.value(col))
                .filter(|v| seen.insert(*v))
                .cloned()
                .collect();
            distinct.insert(col.clone(), values);
        }

        let indicators = raw
            .headers
            .iter()
            .filter(|col| !keys.contains(col.as_str()))
            .filter(|col| records.iter().all(|r| r.value(col).is_numeric_or_null()))
            .cloned()
            .collect();

        Ok(RecordTable {
            columns: raw.headers,
            records,
            keys,
            distinct,
            indicators,
        })
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn keys(&self) -> &KeyColumns {
        &self.keys
    }

    /// Distinct values of `column` in first-appearance order (selector options).
    pub fn distinct_values(&self, column: &str) -> &[CellValue] {
        self.distinct.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn regions(&self) -> &[CellValue] {
        self.distinct_values(&self.keys.region)
    }

    pub fn surveys(&self) -> &[CellValue] {
        self.distinct_values(&self.keys.survey)
    }

    pub fn areas(&self) -> &[CellValue] {
        self.distinct_values(&self.keys.area)
    }

    /// Columns eligible as indicators: numeric and not a key column.
    pub fn numeric_columns(&self) -> &[String] {
        &self.indicators
    }

    pub fn is_indicator(&self, column: &str) -> bool {
        self.indicators.iter().any(|c| c == column)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
