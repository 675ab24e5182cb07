use std::path::Path;

use anyhow::{bail, Context, Result};

use doe_viewer::data::loader::{
    load_design_matrix, parse_numeric_series, parse_numeric_text, parse_tabular,
};
use doe_viewer::data::model::{NumericSeries, Record, TabularDataset, Variable};
use doe_viewer::data::projection::{project, Projection};
use doe_viewer::data::request::{
    to_json_pretty, AdvancedRequest, ArimaOrder, ArimaRequest, DesignRequest, EffectSizeRequest,
    EstimationRequest, ProphetRequest, SeasonalityMode, SpcRequest,
};
use doe_viewer::data::source::SourceFile;

use crate::color::{generate_palette, to_hex};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Series,
    Table,
    Design,
}

/// Which backend body "Save request…" writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Design,
    Estimation,
    EffectSize,
    Advanced,
    Arima,
    Prophet,
    Spc,
}

impl RequestKind {
    pub const ALL: [RequestKind; 7] = [
        RequestKind::Design,
        RequestKind::Estimation,
        RequestKind::EffectSize,
        RequestKind::Advanced,
        RequestKind::Arima,
        RequestKind::Prophet,
        RequestKind::Spc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RequestKind::Design => "Design request (/design)",
            RequestKind::Estimation => "Estimation request (/stats/estimation)",
            RequestKind::EffectSize => "Effect size request (/stats/effect-size)",
            RequestKind::Advanced => "MLE / MAP request (/stats/advanced)",
            RequestKind::Arima => "ARIMA forecast request (/arima)",
            RequestKind::Prophet => "Prophet forecast request (/prophet)",
            RequestKind::Spc => "SPC request (/spc)",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            RequestKind::Design => "design_request.json",
            RequestKind::Estimation => "estimation_request.json",
            RequestKind::EffectSize => "effect_size_request.json",
            RequestKind::Advanced => "advanced_request.json",
            RequestKind::Arima => "arima_request.json",
            RequestKind::Prophet => "prophet_request.json",
            RequestKind::Spc => "spc_request.json",
        }
    }
}

/// Knobs of the statistics and forecasting bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSettings {
    pub confidence_level: f64,
    pub prior_mean: f64,
    pub prior_std: f64,
    pub arima: ArimaOrder,
    pub forecast_periods: u32,
    pub seasonality: SeasonalityMode,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            prior_mean: 5.5,
            prior_std: 0.5,
            arima: ArimaOrder::default(),
            forecast_periods: 7,
            seasonality: SeasonalityMode::default(),
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Single numeric series (None until a series is loaded or pasted).
    pub series: Option<NumericSeries>,
    /// Text box contents for pasted series input.
    pub paste_buffer: String,
    /// Second group for effect-size requests.
    pub comparison: Option<NumericSeries>,
    pub comparison_buffer: String,

    /// Uploaded table.
    pub table: Option<TabularDataset>,
    /// Column analysed by SPC requests.
    pub target_column: Option<String>,
    /// Optional categorical column for the SPC Pareto chart.
    pub factor_column: Option<String>,

    /// Design matrix rows shown on the Design tab.
    pub matrix: Vec<Record>,

    /// Variables and sampling settings being edited.
    pub design: DesignRequest,
    /// Comma-separated levels as typed, one per variable.
    pub level_buffers: Vec<String>,

    pub settings: RequestSettings,

    pub tab: Tab,

    /// Where the current series / table / matrix came from.
    pub sources: Sources,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct Sources {
    pub series: Option<String>,
    pub comparison: Option<String>,
    pub table: Option<String>,
    pub matrix: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let design = DesignRequest::default();
        let level_buffers = design
            .variables
            .iter()
            .map(|v| v.levels.join(", "))
            .collect();
        Self {
            series: None,
            paste_buffer: String::new(),
            comparison: None,
            comparison_buffer: String::new(),
            table: None,
            target_column: None,
            factor_column: None,
            matrix: Vec::new(),
            design,
            level_buffers,
            settings: RequestSettings::default(),
            tab: Tab::default(),
            sources: Sources::default(),
            status_message: None,
        }
    }
}

impl AppState {
    // ---- Loading ----

    /// Replace the series with the numbers found in `path`.
    pub fn load_series(&mut self, path: &Path) -> Result<()> {
        let src = SourceFile::read(path)?;
        let series = parse_numeric_series(&src)
            .with_context(|| format!("extracting numbers from {}", src.name))?;
        log::info!("Loaded {} values from {}", series.len(), src.name);
        self.paste_buffer = join_values(series.values());
        self.series = Some(series);
        self.sources.series = Some(src.name);
        self.tab = Tab::Series;
        self.status_message = None;
        Ok(())
    }

    /// Replace the comparison group with the numbers found in `path`.
    pub fn load_comparison(&mut self, path: &Path) -> Result<()> {
        let src = SourceFile::read(path)?;
        let series = parse_numeric_series(&src)
            .with_context(|| format!("extracting numbers from {}", src.name))?;
        log::info!("Loaded {} comparison values from {}", series.len(), src.name);
        self.comparison_buffer = join_values(series.values());
        self.comparison = Some(series);
        self.sources.comparison = Some(src.name);
        self.tab = Tab::Series;
        self.status_message = None;
        Ok(())
    }

    /// Replace the table with the first sheet of `path`.
    pub fn load_table(&mut self, path: &Path) -> Result<()> {
        let src = SourceFile::read(path)?;
        let table =
            parse_tabular(&src).with_context(|| format!("reading table from {}", src.name))?;
        log::info!(
            "Loaded {} rows with columns {:?} from {}",
            table.len(),
            table.headers,
            src.name
        );
        self.set_table(table, src.name);
        Ok(())
    }

    pub fn set_table(&mut self, table: TabularDataset, source: String) {
        self.target_column = table.default_target().map(str::to_string);
        self.factor_column = None;
        self.table = Some(table);
        self.sources.table = Some(source);
        self.tab = Tab::Table;
        self.status_message = None;
    }

    /// Replace the design matrix with the rows of `path` (JSON or table).
    pub fn load_matrix(&mut self, path: &Path) -> Result<()> {
        let src = SourceFile::read(path)?;
        let rows = load_design_matrix(&src)
            .with_context(|| format!("reading design matrix from {}", src.name))?;
        log::info!("Loaded design matrix with {} runs from {}", rows.len(), src.name);
        self.matrix = rows;
        self.sources.matrix = Some(src.name);
        self.tab = Tab::Design;
        self.status_message = None;
        Ok(())
    }

    /// Use the loaded table's rows as the design matrix.
    pub fn matrix_from_table(&mut self) {
        if let Some(table) = &self.table {
            self.matrix = table.rows.clone();
            self.sources.matrix = self.sources.table.clone();
            self.tab = Tab::Design;
        }
    }

    /// Parse the paste box into the series.
    pub fn apply_pasted_series(&mut self) -> Result<()> {
        let series = parse_numeric_text(&self.paste_buffer).context("parsing pasted values")?;
        self.series = Some(series);
        self.sources.series = Some("pasted".to_string());
        self.status_message = None;
        Ok(())
    }

    /// Parse the comparison paste box.
    pub fn apply_pasted_comparison(&mut self) -> Result<()> {
        let series =
            parse_numeric_text(&self.comparison_buffer).context("parsing pasted comparison values")?;
        self.comparison = Some(series);
        self.sources.comparison = Some("pasted".to_string());
        self.status_message = None;
        Ok(())
    }

    /// Record a failure for display; the app keeps running.
    pub fn report_error(&mut self, err: &anyhow::Error) {
        log::error!("{err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }

    // ---- Variable editing ----

    pub fn add_variable(&mut self) {
        let n = self.design.variables.len() + 1;
        let mut v = Variable::continuous(&format!("Factor {n}"), 0.0, 1.0);
        v.color = generate_palette(n).last().map(|c| to_hex(*c));
        self.design.variables.push(v);
        self.level_buffers.push(String::new());
    }

    pub fn remove_variable(&mut self, idx: usize) {
        if idx < self.design.variables.len() {
            self.design.variables.remove(idx);
            self.level_buffers.remove(idx);
        }
    }

    /// Re-split the level text typed for variable `idx`.
    pub fn sync_levels(&mut self, idx: usize) {
        if let (Some(v), Some(text)) = (self.design.variables.get_mut(idx), self.level_buffers.get(idx)) {
            v.levels = Variable::levels_from_text(text);
        }
    }

    // ---- Derived views ----

    pub fn projection(&self) -> Option<Projection> {
        project(&self.matrix, &self.design.variables)
    }

    /// Serialised body for `kind`, built from the current state.
    pub fn request_json(&self, kind: RequestKind) -> Result<String> {
        let settings = &self.settings;
        let json = match kind {
            RequestKind::Design => {
                self.design.validate().context("invalid design settings")?;
                to_json_pretty(&self.design)?
            }
            RequestKind::Estimation => {
                let mut body = EstimationRequest::new(self.require_series()?);
                body.confidence_level = settings.confidence_level;
                to_json_pretty(&body)?
            }
            RequestKind::EffectSize => {
                let Some(comparison) = &self.comparison else {
                    bail!("load or paste a comparison series first");
                };
                to_json_pretty(&EffectSizeRequest::new(
                    self.require_series()?,
                    comparison.clone(),
                )?)?
            }
            RequestKind::Advanced => to_json_pretty(&AdvancedRequest::new(
                self.require_series()?,
                settings.prior_mean,
                settings.prior_std,
            )?)?,
            RequestKind::Arima => {
                to_json_pretty(&ArimaRequest::new(self.require_series()?, settings.arima)?)?
            }
            RequestKind::Prophet => to_json_pretty(&ProphetRequest::new(
                self.require_series()?,
                settings.forecast_periods,
                settings.seasonality,
            )?)?,
            RequestKind::Spc => to_json_pretty(&self.spc_request()?)?,
        };
        Ok(json)
    }

    fn require_series(&self) -> Result<NumericSeries> {
        match &self.series {
            Some(series) => Ok(series.clone()),
            None => bail!("load or paste a numeric series first"),
        }
    }

    fn spc_request(&self) -> Result<SpcRequest> {
        if let Some(table) = &self.table {
            let Some(target) = self.target_column.as_deref() else {
                bail!("pick a target column for SPC");
            };
            return Ok(SpcRequest::from_table(
                table,
                target,
                self.factor_column.as_deref(),
            )?);
        }
        if let Some(series) = &self.series {
            return Ok(SpcRequest::from_series(series));
        }
        bail!("load a table or a numeric series first")
    }
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
