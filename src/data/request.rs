//! JSON bodies understood by the statistics/design backend.
//!
//! Only the shapes live here; sending them is someone else's job.

use serde::{Deserialize, Serialize};

use super::model::{CellValue, NumericSeries, Record, TabularDataset, Variable, VariableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Latin hypercube.
    #[default]
    Lhc,
    Factorial,
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Lhc, Strategy::Factorial, Strategy::Random];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Lhc => "Latin hypercube",
            Strategy::Factorial => "Full factorial",
            Strategy::Random => "Random",
        }
    }
}

/// POST body for `/design`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub strategy: Strategy,
    pub num_samples: usize,
    pub variables: Vec<Variable>,
}

impl Default for DesignRequest {
    fn default() -> Self {
        DesignRequest {
            name: None,
            description: None,
            strategy: Strategy::Lhc,
            num_samples: 10,
            variables: vec![Variable::continuous("Temperature", 200.0, 500.0)],
        }
    }
}

impl DesignRequest {
    /// Check every variable; sample count must be at least one.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.num_samples == 0 {
            return Err(RequestError::NoSamples);
        }
        if self.variables.is_empty() {
            return Err(RequestError::NoVariables);
        }
        for v in &self.variables {
            v.validate()?;
        }
        Ok(())
    }
}

/// `/design` response; only the matrix matters to the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResponse {
    pub strategy: String,
    pub num_factors: usize,
    pub num_runs: usize,
    pub matrix: Vec<Record>,
}

/// POST body for `/stats/estimation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub data: NumericSeries,
    pub confidence_level: f64,
}

impl EstimationRequest {
    pub fn new(data: NumericSeries) -> Self {
        EstimationRequest {
            data,
            confidence_level: 0.95,
        }
    }
}

/// POST body for `/stats/effect-size` (Cohen's d of two groups).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSizeRequest {
    pub group_a: NumericSeries,
    pub group_b: NumericSeries,
}

impl EffectSizeRequest {
    /// Each group needs at least two values.
    pub fn new(group_a: NumericSeries, group_b: NumericSeries) -> Result<Self, RequestError> {
        require_len("effect size", &group_a, 2)?;
        require_len("effect size", &group_b, 2)?;
        Ok(EffectSizeRequest { group_a, group_b })
    }
}

/// POST body for `/stats/advanced` (MLE / MAP with a normal prior).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedRequest {
    pub data: NumericSeries,
    pub prior_mean: f64,
    pub prior_std: f64,
}

impl AdvancedRequest {
    pub fn new(data: NumericSeries, prior_mean: f64, prior_std: f64) -> Result<Self, RequestError> {
        require_len("advanced estimation", &data, 2)?;
        if !(prior_std.is_finite() && prior_std > 0.0) {
            return Err(RequestError::InvalidPrior);
        }
        Ok(AdvancedRequest {
            data,
            prior_mean,
            prior_std,
        })
    }
}

/// Values of a forecasting request; dates are optional ISO strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<String>>,
    pub values: NumericSeries,
}

/// Forecasting endpoints reject shorter series.
pub const MIN_FORECAST_VALUES: usize = 10;

/// POST body for `/arima`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArimaRequest {
    pub data: TimeSeriesData,
    pub p: u32,
    pub d: u32,
    pub q: u32,
    pub forecast_steps: u32,
}

/// ARIMA order and horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArimaOrder {
    pub p: u32,
    pub d: u32,
    pub q: u32,
    pub forecast_steps: u32,
}

impl Default for ArimaOrder {
    fn default() -> Self {
        ArimaOrder {
            p: 1,
            d: 1,
            q: 1,
            forecast_steps: 5,
        }
    }
}

impl ArimaRequest {
    pub fn new(values: NumericSeries, order: ArimaOrder) -> Result<Self, RequestError> {
        require_len("ARIMA", &values, MIN_FORECAST_VALUES)?;
        Ok(ArimaRequest {
            data: TimeSeriesData {
                dates: None,
                values,
            },
            p: order.p,
            d: order.d,
            q: order.q,
            forecast_steps: order.forecast_steps,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityMode {
    #[default]
    Additive,
    Multiplicative,
}

/// POST body for `/prophet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProphetRequest {
    pub data: TimeSeriesData,
    pub forecast_periods: u32,
    pub seasonality_mode: SeasonalityMode,
    pub yearly_seasonality: bool,
    pub weekly_seasonality: bool,
    pub daily_seasonality: bool,
}

impl ProphetRequest {
    /// Sample indices carry no calendar, so every seasonality is off.
    pub fn new(
        values: NumericSeries,
        forecast_periods: u32,
        seasonality_mode: SeasonalityMode,
    ) -> Result<Self, RequestError> {
        require_len("Prophet", &values, MIN_FORECAST_VALUES)?;
        Ok(ProphetRequest {
            data: TimeSeriesData {
                dates: None,
                values,
            },
            forecast_periods,
            seasonality_mode,
            yearly_seasonality: false,
            weekly_seasonality: false,
            daily_seasonality: false,
        })
    }
}

/// Column a single series is wrapped under for `/spc`.
pub const SERIES_COLUMN: &str = "value";

/// POST body for `/spc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpcRequest {
    pub data: Vec<Record>,
    pub target_variable: String,
    /// Categorical column for the Pareto chart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_variable: Option<String>,
}

impl SpcRequest {
    /// Records of a table; `target` must be one of its headers.
    pub fn from_table(
        table: &TabularDataset,
        target: &str,
        factor: Option<&str>,
    ) -> Result<Self, RequestError> {
        for column in std::iter::once(target).chain(factor) {
            if !table.headers.iter().any(|h| h == column) {
                return Err(RequestError::UnknownColumn(column.to_string()));
            }
        }
        Ok(SpcRequest {
            data: table.rows.clone(),
            target_variable: target.to_string(),
            factor_variable: factor.map(str::to_string),
        })
    }

    /// One `{"value": v}` record per sample.
    pub fn from_series(series: &NumericSeries) -> Self {
        let data = series
            .values()
            .iter()
            .map(|&v| {
                std::iter::once((SERIES_COLUMN.to_string(), CellValue::Number(v))).collect()
            })
            .collect();
        SpcRequest {
            data,
            target_variable: SERIES_COLUMN.to_string(),
            factor_variable: None,
        }
    }
}

fn require_len(
    endpoint: &'static str,
    series: &NumericSeries,
    min: usize,
) -> Result<(), RequestError> {
    if series.len() < min {
        return Err(RequestError::TooFewValues {
            endpoint,
            min,
            got: series.len(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("number of samples must be at least 1")]
    NoSamples,
    #[error("declare at least one variable")]
    NoVariables,
    #[error(transparent)]
    Variable(#[from] VariableError),
    #[error("{endpoint} needs at least {min} values, got {got}")]
    TooFewValues {
        endpoint: &'static str,
        min: usize,
        got: usize,
    },
    #[error("prior standard deviation must be positive")]
    InvalidPrior,
    #[error("no column named {0:?}")]
    UnknownColumn(String),
}

/// Pretty JSON for any request body.
pub fn to_json_pretty<T: Serialize>(body: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::VariableKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn default_design_request_shape() {
        let body = serde_json::to_value(DesignRequest::default()).unwrap();
        assert_eq!(
            body,
            json!({
                "strategy": "lhc",
                "num_samples": 10,
                "variables": [
                    {"name": "Temperature", "type": "continuous", "min": 200.0, "max": 500.0, "levels": []}
                ]
            })
        );
    }

    #[test]
    fn design_request_validation() {
        let mut req = DesignRequest::default();
        assert!(req.validate().is_ok());

        req.num_samples = 0;
        assert_eq!(req.validate(), Err(RequestError::NoSamples));

        req.num_samples = 4;
        req.variables
            .push(Variable::with_levels("Catalyst", VariableKind::Categorical, &[]));
        assert_eq!(
            req.validate(),
            Err(RequestError::Variable(VariableError::MissingLevels(
                "Catalyst".into()
            )))
        );

        req.variables.clear();
        assert_eq!(req.validate(), Err(RequestError::NoVariables));
    }

    #[test]
    fn estimation_body_is_number_array() {
        let body = EstimationRequest::new(NumericSeries::from_values([1.0, 2.5]));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"data": [1.0, 2.5], "confidence_level": 0.95})
        );
    }

    fn series(values: &[f64]) -> NumericSeries {
        NumericSeries::from_values(values.iter().copied())
    }

    fn ramp(n: usize) -> NumericSeries {
        NumericSeries::from_values((0..n).map(|i| i as f64))
    }

    #[test]
    fn spc_body_from_table_names_target_and_factor() {
        let row: Record = [
            ("Temp".to_string(), CellValue::Number(100.0)),
            ("Shift".to_string(), CellValue::Text("night".into())),
        ]
        .into_iter()
        .collect();
        let table = TabularDataset {
            headers: vec!["Temp".into(), "Shift".into()],
            rows: vec![row],
        };

        let body = SpcRequest::from_table(&table, "Temp", Some("Shift")).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "data": [{"Temp": 100.0, "Shift": "night"}],
                "target_variable": "Temp",
                "factor_variable": "Shift"
            })
        );

        let body = SpcRequest::from_table(&table, "Temp", None).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"data": [{"Temp": 100.0, "Shift": "night"}], "target_variable": "Temp"})
        );

        assert_eq!(
            SpcRequest::from_table(&table, "Yield", None),
            Err(RequestError::UnknownColumn("Yield".into()))
        );
        assert_eq!(
            SpcRequest::from_table(&table, "Temp", Some("Line")),
            Err(RequestError::UnknownColumn("Line".into()))
        );
    }

    #[test]
    fn spc_body_from_series_is_records_with_target() {
        let body = SpcRequest::from_series(&series(&[4.0, 5.0]));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "data": [{"value": 4.0}, {"value": 5.0}],
                "target_variable": "value"
            })
        );
    }

    #[test]
    fn spc_body_without_target_is_rejected() {
        let parsed: Result<SpcRequest, _> = serde_json::from_str(r#"{"data": []}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn effect_size_body_shape() {
        let body = EffectSizeRequest::new(series(&[1.0, 2.0]), series(&[3.0, 4.0, 5.0])).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"group_a": [1.0, 2.0], "group_b": [3.0, 4.0, 5.0]})
        );
        assert_eq!(
            EffectSizeRequest::new(series(&[1.0, 2.0]), series(&[3.0])),
            Err(RequestError::TooFewValues {
                endpoint: "effect size",
                min: 2,
                got: 1
            })
        );
    }

    #[test]
    fn advanced_body_shape() {
        let body = AdvancedRequest::new(series(&[5.1, 4.9]), 5.5, 0.5).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"data": [5.1, 4.9], "prior_mean": 5.5, "prior_std": 0.5})
        );
        assert_eq!(
            AdvancedRequest::new(series(&[5.1, 4.9]), 5.5, 0.0),
            Err(RequestError::InvalidPrior)
        );
        assert!(AdvancedRequest::new(series(&[5.1]), 5.5, 0.5).is_err());
    }

    #[test]
    fn arima_body_shape() {
        let body = ArimaRequest::new(ramp(10), ArimaOrder::default()).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "data": {"values": [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]},
                "p": 1, "d": 1, "q": 1,
                "forecast_steps": 5
            })
        );
        assert_eq!(
            ArimaRequest::new(ramp(9), ArimaOrder::default()),
            Err(RequestError::TooFewValues {
                endpoint: "ARIMA",
                min: MIN_FORECAST_VALUES,
                got: 9
            })
        );
    }

    #[test]
    fn prophet_body_shape() {
        let body = ProphetRequest::new(ramp(10), 7, SeasonalityMode::Multiplicative).unwrap();
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["forecast_periods"], 7);
        assert_eq!(value["seasonality_mode"], "multiplicative");
        assert_eq!(value["yearly_seasonality"], false);
        assert_eq!(value["weekly_seasonality"], false);
        assert_eq!(value["daily_seasonality"], false);
        assert_eq!(value["data"]["values"].as_array().unwrap().len(), 10);
        assert!(value["data"].get("dates").is_none());

        assert!(ProphetRequest::new(ramp(3), 7, SeasonalityMode::Additive).is_err());
    }

    #[test]
    fn pretty_json_layout() {
        let body = EstimationRequest::new(series(&[3.0]));
        assert_eq!(
            to_json_pretty(&body).unwrap(),
            "{\n  \"data\": [\n    3.0\n  ],\n  \"confidence_level\": 0.95\n}"
        );
    }
}
