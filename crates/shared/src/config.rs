//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Text/HTML rendering configuration.
    #[serde(default)]
    pub render: RenderConfig,
    /// Fixture generator configuration.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Rendering configuration for text tables and HTML reports.
///
/// Passed explicitly to every renderer; there is no global display state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Underline character for top-level report headings.
    pub root_heading_char: char,
    /// Underline character for nested report headings.
    pub section_heading_char: char,
    /// HTML heading level (1-6) for top-level report headings.
    pub root_heading_level: u8,
    /// HTML heading level (1-6) for nested report headings.
    pub section_heading_level: u8,
    /// Maximum number of table rows rendered before truncating the middle.
    pub max_rows: usize,
    /// Maximum number of table columns rendered before truncating the middle.
    pub max_columns: usize,
    /// Decimal places kept for derived statistics (mean, std, quantiles).
    pub precision: u32,
    /// Text shown for missing cells.
    pub na_rep: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            root_heading_char: '=',
            section_heading_char: '-',
            root_heading_level: 2,
            section_heading_level: 3,
            max_rows: 500,
            max_columns: 500,
            precision: 6,
            na_rep: String::new(),
        }
    }
}

/// Fixture generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Balance of the opening "Account Statement" row.
    pub initial_balance: Decimal,
    /// Maximum number of rows, including the opening row.
    pub max_count: Option<usize>,
    /// Chance (0-100) that a generated row is a debit.
    pub debit_percent: u8,
    /// Hours between consecutive transactions.
    pub step_hours: i64,
    /// Seed for reproducible fixtures.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            initial_balance: Decimal::from(1001),
            max_count: None,
            debit_percent: 95,
            step_hours: 2,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `PFI__*` variables
    /// (e.g. `PFI__RENDER__MAX_ROWS=100`). Every source is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PFI").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
