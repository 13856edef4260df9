//! Convert the storefront's static assets in place
//!
//! Reads its settings from the environment (see `ConverterConfig`); takes no flags.

use std::process::ExitCode;

use golden_extreme::assets::Converter;
use golden_extreme::config::{self, ConverterConfig};
use golden_extreme::logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    config::load_dotenv();

    let config = match ConverterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid converter configuration");
            return ExitCode::FAILURE;
        }
    };

    match Converter::new(config).run().await {
        Ok(report) => {
            report.log_summary();
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "asset conversion could not start");
            ExitCode::FAILURE
        }
    }
}
