//! Financial impact of forecast residuals
//!
//! Translates forecast errors into asymmetric dollar costs: a missed unit of
//! demand loses margin, an excess unit incurs holding and waste cost. The
//! two directions price differently, which is the whole point of the
//! analysis.

use crate::data::PredictionRecord;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Cost assumptions per unit of forecast error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostAssumptions {
    /// Revenue per unit sold
    pub revenue_per_unit: f64,
    /// Holding / waste cost per excess unit
    pub over_forecast_cost: f64,
    /// Lost margin per missed unit
    pub under_forecast_cost: f64,
}

impl CostAssumptions {
    /// Create cost assumptions, rejecting negative amounts
    pub fn new(
        revenue_per_unit: f64,
        over_forecast_cost: f64,
        under_forecast_cost: f64,
    ) -> Result<Self> {
        if revenue_per_unit < 0.0 || over_forecast_cost < 0.0 || under_forecast_cost < 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Unit costs must be non-negative".to_string(),
            ));
        }
        Ok(Self {
            revenue_per_unit,
            over_forecast_cost,
            under_forecast_cost,
        })
    }
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            revenue_per_unit: 120.0,
            over_forecast_cost: 30.0,
            under_forecast_cost: 80.0,
        }
    }
}

/// Per-row cost breakdown of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactRow {
    #[serde(rename = "DATE")]
    pub date: NaiveDate,
    #[serde(rename = "COUNTRY")]
    pub country: String,
    #[serde(rename = "ACTUAL_DEMAND")]
    pub actual_demand: f64,
    #[serde(rename = "BASELINE_PREDICTION")]
    pub baseline_prediction: f64,
    #[serde(rename = "FORECAST_ERROR")]
    pub forecast_error: f64,
    #[serde(rename = "UNDER_FORECAST_UNITS")]
    pub under_forecast_units: f64,
    #[serde(rename = "OVER_FORECAST_UNITS")]
    pub over_forecast_units: f64,
    #[serde(rename = "UNDER_FORECAST_COST")]
    pub under_forecast_cost: f64,
    #[serde(rename = "OVER_FORECAST_COST")]
    pub over_forecast_cost: f64,
    #[serde(rename = "TOTAL_FORECAST_COST")]
    pub total_forecast_cost: f64,
}

/// Aggregate financial impact over all predictions
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialImpact {
    pub rows: Vec<ImpactRow>,
    pub total_actual_demand: f64,
    pub total_predicted_demand: f64,
    pub total_under_forecast_units: f64,
    pub total_over_forecast_units: f64,
    pub total_under_forecast_cost: f64,
    pub total_over_forecast_cost: f64,
    pub total_forecast_cost: f64,
    /// Top-line revenue left on the table by missed demand
    pub total_missed_revenue: f64,
}

/// Compute the dollar impact of forecast residuals.
///
/// error = actual - predicted; a positive error is under-forecast (missed
/// demand), a negative one is over-forecast (excess supply).
pub fn compute_financial_impact(
    predictions: &[PredictionRecord],
    costs: &CostAssumptions,
) -> Result<FinancialImpact> {
    if predictions.is_empty() {
        return Err(ForecastError::ValidationError(
            "No predictions to analyze".to_string(),
        ));
    }

    let rows: Vec<ImpactRow> = predictions
        .iter()
        .map(|p| {
            let forecast_error = p.actual_demand - p.baseline_prediction;
            let under_forecast_units = forecast_error.max(0.0);
            let over_forecast_units = (-forecast_error).max(0.0);
            let under_forecast_cost = under_forecast_units * costs.under_forecast_cost;
            let over_forecast_cost = over_forecast_units * costs.over_forecast_cost;
            ImpactRow {
                date: p.date,
                country: p.country.clone(),
                actual_demand: p.actual_demand,
                baseline_prediction: p.baseline_prediction,
                forecast_error,
                under_forecast_units,
                over_forecast_units,
                under_forecast_cost,
                over_forecast_cost,
                total_forecast_cost: under_forecast_cost + over_forecast_cost,
            }
        })
        .collect();

    let sum = |f: fn(&ImpactRow) -> f64| rows.iter().map(f).sum::<f64>();
    let total_actual_demand = sum(|r| r.actual_demand);
    let total_predicted_demand = sum(|r| r.baseline_prediction);
    let total_under_forecast_units = sum(|r| r.under_forecast_units);
    let total_over_forecast_units = sum(|r| r.over_forecast_units);
    let total_under_forecast_cost = sum(|r| r.under_forecast_cost);
    let total_over_forecast_cost = sum(|r| r.over_forecast_cost);
    let total_forecast_cost = sum(|r| r.total_forecast_cost);
    let total_missed_revenue = total_under_forecast_units * costs.revenue_per_unit;

    Ok(FinancialImpact {
        rows,
        total_actual_demand,
        total_predicted_demand,
        total_under_forecast_units,
        total_over_forecast_units,
        total_under_forecast_cost,
        total_over_forecast_cost,
        total_forecast_cost,
        total_missed_revenue,
    })
}

impl fmt::Display for FinancialImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Financial Impact Summary")?;
        writeln!(f, "{}", "-".repeat(50))?;
        writeln!(
            f,
            "{:<32}: {:>15.2}",
            "Total actual demand", self.total_actual_demand
        )?;
        writeln!(
            f,
            "{:<32}: {:>15.2}",
            "Total predicted demand", self.total_predicted_demand
        )?;
        writeln!(
            f,
            "{:<32}: {:>15.2}",
            "Total under-forecast units", self.total_under_forecast_units
        )?;
        writeln!(
            f,
            "{:<32}: {:>15.2}",
            "Total over-forecast units", self.total_over_forecast_units
        )?;
        writeln!(
            f,
            "{:<32}: {:>15.2}",
            "Total under-forecast cost ($)", self.total_under_forecast_cost
        )?;
        writeln!(
            f,
            "{:<32}: {:>15.2}",
            "Total over-forecast cost ($)", self.total_over_forecast_cost
        )?;
        writeln!(
            f,
            "{:<32}: {:>15.2}",
            "Total forecast cost ($)", self.total_forecast_cost
        )?;
        writeln!(
            f,
            "{:<32}: {:>15.2}",
            "Missed revenue ($)", self.total_missed_revenue
        )
    }
}
