//! Analyze baseline cross-validation results
//!
//! Does not train models or generate predictions; only answers whether the
//! baseline is good enough to trust.

use demand_forecast::{init_logging, CvReport, PipelineConfig, Result};

fn main() -> Result<()> {
    init_logging();
    let config = PipelineConfig::from_args();

    let report = CvReport::load(config.cv_results())?;
    println!("{}", report);
    Ok(())
}
