use golden_extreme::api::CatalogClient;
use golden_extreme::app::Storefront;
use golden_extreme::config::{self, StorefrontConfig};
use golden_extreme::logging;

fn main() -> iced::Result {
    logging::init();
    config::load_dotenv();

    // Without a usable API location the storefront has nothing to show
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid storefront configuration");
            std::process::exit(1);
        }
    };
    let client = match CatalogClient::new(config.api_base_url.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create catalog client");
            std::process::exit(1);
        }
    };

    iced::application(Storefront::title, Storefront::update, Storefront::view)
        .subscription(Storefront::subscription)
        .theme(Storefront::theme)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || Storefront::new(config, client))
}
