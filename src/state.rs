use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::model::{CellValue, Record, RecordTable};
use crate::data::query::{
    cross_section, filter_exact, kpi, longitudinal, FilterSelection, Kpi, RowSet,
};
use crate::data::series::{region_series, survey_series, SeriesPoint};
use crate::data::{LoadError, NoDataAvailable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Memoized loader for the current file (None until a file is opened).
    cache: Option<DatasetCache>,

    /// Loaded table (None until a file loads).
    pub table: Option<Arc<RecordTable>>,

    /// Current (region, survey, area) selection.
    pub selection: Option<FilterSelection>,

    /// Current indicator column.
    pub indicator: Option<String>,

    /// Rows matching the selection exactly (cached).
    pub filtered: Vec<usize>,

    /// Rows for the selected survey/area across regions (cached).
    pub comparison: Vec<usize>,

    /// Rows for the selected region/area across surveys, in survey order (cached).
    pub trend: Vec<usize>,

    /// KPI for the current selection and indicator.
    pub kpi: Option<Result<Kpi, NoDataAvailable>>,

    /// One colour per region.
    pub region_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: None,
            table: None,
            selection: None,
            indicator: None,
            filtered: Vec::new(),
            comparison: Vec::new(),
            trend: Vec::new(),
            kpi: None,
            region_colors: ColorMap::default(),
            status_message: None,
        }
    }

    /// Open `path` through a fresh cache and ingest the table.
    pub fn open(&mut self, path: &Path) -> Result<(), LoadError> {
        let cache = DatasetCache::new(path, self.config.columns.clone(), self.config.cache);
        let result = cache.get();
        self.cache = Some(cache);
        self.apply_load(result)
    }

    /// Re-read the current file regardless of the cache policy.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let Some(cache) = &self.cache else {
            return Ok(());
        };
        let result = cache.reload();
        self.apply_load(result)
    }

    /// Pick up on-disk changes when the cache policy allows it.
    ///
    /// A failed reload keeps the current table and reports through `status_message`.
    pub fn poll_source(&mut self) {
        let Some(cache) = &self.cache else {
            return;
        };
        let Some(result) = cache.poll().transpose() else {
            return;
        };
        let _ = self.apply_load(result);
    }

    fn apply_load(&mut self, result: Result<Arc<RecordTable>, LoadError>) -> Result<(), LoadError> {
        match result {
            Ok(table) => {
                self.set_table(table);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Ingest a table; keep previous selections that still exist, else default to the first option.
    pub fn set_table(&mut self, table: Arc<RecordTable>) {
        let keep = |current: Option<&CellValue>, options: &[CellValue]| -> CellValue {
            current
                .filter(|v| options.contains(v))
                .or_else(|| options.first())
                .cloned()
                .unwrap_or(CellValue::Null)
        };
        let previous = self.selection.take();
        self.selection = Some(FilterSelection {
            region: keep(previous.as_ref().map(|s| &s.region), table.regions()),
            survey: keep(previous.as_ref().map(|s| &s.survey), table.surveys()),
            area: keep(previous.as_ref().map(|s| &s.area), table.areas()),
        });

        self.indicator = self
            .indicator
            .take()
            .filter(|i| table.is_indicator(i))
            .or_else(|| table.numeric_columns().first().cloned());

        self.region_colors = ColorMap::new(table.regions());
        self.table = Some(table);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute the cached row sets and KPI after any selection change.
    pub fn refresh(&mut self) {
        let (Some(table), Some(selection)) = (&self.table, &self.selection) else {
            self.filtered.clear();
            self.comparison.clear();
            self.trend.clear();
            self.kpi = None;
            return;
        };

        let filtered = filter_exact(table, selection);
        self.kpi = self.indicator.as_deref().map(|ind| kpi(&filtered, ind));
        self.filtered = filtered.into_indices();
        self.comparison = cross_section(table, &selection.survey, &selection.area).into_indices();
        self.trend = self
            .config
            .survey_order
            .sort(longitudinal(table, &selection.region, &selection.area))
            .into_indices();

        log::debug!(
            "selection {:?}: {} matching, {} compared, {} in trend",
            selection,
            self.filtered.len(),
            self.comparison.len(),
            self.trend.len()
        );
    }

    pub fn set_region(&mut self, region: CellValue) {
        if let Some(sel) = &mut self.selection {
            sel.region = region;
        }
        self.refresh();
    }

    pub fn set_survey(&mut self, survey: CellValue) {
        if let Some(sel) = &mut self.selection {
            sel.survey = survey;
        }
        self.refresh();
    }

    pub fn set_area(&mut self, area: CellValue) {
        if let Some(sel) = &mut self.selection {
            sel.area = area;
        }
        self.refresh();
    }

    pub fn set_indicator(&mut self, indicator: String) {
        self.indicator = Some(indicator);
        self.refresh();
    }

    /// Bars of the region-wise comparison chart.
    pub fn comparison_series(&self) -> Vec<SeriesPoint> {
        self.series_for(&self.comparison, region_series)
    }

    /// Points of the survey trend chart, in survey order.
    pub fn trend_series(&self) -> Vec<SeriesPoint> {
        self.series_for(&self.trend, survey_series)
    }

    fn series_for(
        &self,
        indices: &[usize],
        build: fn(&RowSet<'_>, &str) -> Vec<SeriesPoint>,
    ) -> Vec<SeriesPoint> {
        match (&self.table, &self.indicator) {
            (Some(table), Some(ind)) => build(&RowSet::from_indices(table, indices.to_vec()), ind),
            _ => Vec::new(),
        }
    }

    /// Rows for the raw data preview, capped at `preview_rows`.
    pub fn preview(&self) -> Vec<&Record> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        self.filtered
            .iter()
            .take(self.config.preview_rows)
            .map(|&i| &table.records()[i])
            .collect()
    }
}
