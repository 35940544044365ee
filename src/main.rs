use std::path::Path;

use env_logger::Env;
use scene_sweep::{
    sweep_config::{SweepConfig, CONFIG_FILE_NAME},
    SceneSweepGenerator,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = SweepConfig::load_or_default(Path::new(CONFIG_FILE_NAME))?;
    let generator = SceneSweepGenerator::new(config);
    let report = generator.generate()?;

    if report.found_nothing() {
        println!("failed to find files!");
        return Ok(());
    }

    log::info!(
        "Generated {} scenes from {} templates, skipped {}",
        report.written.len(),
        report.templates_found - report.skipped.len(),
        report.skipped.len()
    );
    Ok(())
}
