//! CLI command implementations.

mod agent;
mod analyze;
mod config;
mod doctor;
mod expected_return;
mod init;
mod profile;
mod recommend;

pub use agent::run_agent;
pub use analyze::run_analyze;
pub use config::run_config;
pub use doctor::run_doctor;
pub use expected_return::run_expected_return;
pub use init::run_init;
pub use profile::run_profile;
pub use recommend::run_recommend;

use crate::analytics::PortfolioAnalytics;
use crate::cli::Output;
use crate::config::Settings;
use crate::dataset::Dataset;

/// Load the dataset from the configured path and build the engine.
///
/// An empty dataset is reported but not fatal; lookups degrade to
/// not-found.
fn load_analytics(settings: &Settings) -> PortfolioAnalytics {
    let path = settings.dataset_path();
    let dataset = Dataset::load(&path);
    if dataset.is_empty() {
        Output::warning(&format!(
            "No stock records loaded from {} (run 'folio init' to create a starter dataset)",
            path.display()
        ));
    }
    PortfolioAnalytics::new(dataset)
}
