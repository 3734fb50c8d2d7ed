//! Generate the synthetic model training dataset

use demand_forecast::data::write_training_data;
use demand_forecast::synthetic::{generate_dataset, SyntheticConfig};
use demand_forecast::{init_logging, PipelineConfig, Result};
use tracing::info;

fn main() -> Result<()> {
    init_logging();
    let config = PipelineConfig::from_args();
    let synth = SyntheticConfig::default();

    info!(
        countries = ?synth.countries,
        days = synth.days,
        seed = synth.seed,
        "generating synthetic training dataset"
    );
    let records = generate_dataset(&synth)?;

    let path = config.training_dataset();
    write_training_data(&path, &records)?;
    info!(rows = records.len(), path = %path.display(), "training dataset written");
    Ok(())
}
