//! Configuration file and command-line options

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::data::{CachePolicy, KeyColumns, SurveyOrder};

const CONFIG_DIR: &str = "nfhs-dashboard";
const CONFIG_FILE: &str = "config.toml";

/// File the source dashboard read when nothing else was given.
pub const DEFAULT_DATA_FILE: &str = "All India National Family Health Survey.xlsx";

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "nfhs-dashboard", version, about)]
pub struct Cli {
    /// Survey export to open (.xlsx, .csv, .json, .parquet)
    pub data: Option<PathBuf>,

    /// Configuration file (default: ~/.config/nfhs-dashboard/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub columns: KeyColumns,
    pub survey_order: SurveyOrder,
    pub cache: CachePolicy,
    /// Maximum rows shown in the raw data preview.
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            columns: KeyColumns::default(),
            survey_order: SurveyOrder::default(),
            cache: CachePolicy::default(),
            preview_rows: 500,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing configuration")
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Resolve configuration from the CLI: explicit `--config` errors propagate,
    /// a broken default config file is logged and ignored.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => match default_config_path() {
                Some(path) => Self::load(&path).unwrap_or_else(|e| {
                    log::warn!("ignoring configuration: {e:#}");
                    Self::default()
                }),
                None => Self::default(),
            },
        };
        if let Some(data) = &cli.data {
            config.data_path = data.clone();
        }
        Ok(config)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.columns.region, "India/States/UTs");
        assert_eq!(config.survey_order, SurveyOrder::Natural);
        assert_eq!(config.cache, CachePolicy::OnModified);
    }

    #[test]
    fn parses_every_section() {
        let config = DashboardConfig::from_toml(
            r#"
data_path = "nfhs.csv"
survey_order = { explicit = ["NFHS-4", "NFHS-5"] }
cache = "never"
preview_rows = 20

[columns]
region = "State"
"#,
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("nfhs.csv"));
        assert_eq!(
            config.survey_order,
            SurveyOrder::Explicit(vec!["NFHS-4".into(), "NFHS-5".into()])
        );
        assert_eq!(config.cache, CachePolicy::Never);
        assert_eq!(config.preview_rows, 20);
        assert_eq!(config.columns.region, "State");
        assert_eq!(config.columns.survey, "Survey");
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(DashboardConfig::from_toml("cache = \"sometimes\"").is_err());
    }

    #[test]
    fn cli_path_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "data_path = \"from-config.xlsx\"\n").unwrap();

        let cli = Cli::parse_from(["nfhs-dashboard", "--config", config_path.to_str().unwrap()]);
        let config = DashboardConfig::resolve(&cli).unwrap();
        assert_eq!(config.data_path, PathBuf::from("from-config.xlsx"));

        let cli = Cli::parse_from([
            "nfhs-dashboard",
            "override.csv",
            "--config",
            config_path.to_str().unwrap(),
        ]);
        let config = DashboardConfig::resolve(&cli).unwrap();
        assert_eq!(config.data_path, PathBuf::from("override.csv"));
    }

    #[test]
    fn missing_explicit_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_named_orders_parse(order in prop::sample::select(vec!["as_loaded", "natural"])) {
            let config = DashboardConfig::from_toml(&format!("survey_order = \"{order}\"\n"));
            prop_assert!(config.is_ok());
            let expected = match order {
                "as_loaded" => SurveyOrder::AsLoaded,
                _ => SurveyOrder::Natural,
            };
            prop_assert_eq!(config.unwrap().survey_order, expected);
        }
    }
}
