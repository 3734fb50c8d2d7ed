//! Translate forecast errors into financial impact

use demand_forecast::data::read_predictions;
use demand_forecast::impact::compute_financial_impact;
use demand_forecast::{init_logging, CostAssumptions, PipelineConfig, Result};
use tracing::info;

fn main() -> Result<()> {
    init_logging();
    let config = PipelineConfig::from_args();

    let predictions = read_predictions(config.predictions())?;
    info!(rows = predictions.len(), "baseline predictions loaded");

    let costs = CostAssumptions::default();
    info!(
        revenue_per_unit = costs.revenue_per_unit,
        over_forecast_cost = costs.over_forecast_cost,
        under_forecast_cost = costs.under_forecast_cost,
        "applying financial cost assumptions"
    );

    let impact = compute_financial_impact(&predictions, &costs)?;
    println!("{}", impact);
    Ok(())
}
