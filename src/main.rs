use dioxus_logger::tracing::{self, Level};

use marketplace_admin::{
    client::{config::Config, error::Error, store::AppContext},
    model::api::ListParams,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    let ctx = AppContext::new(&config)?;
    tracing::info!("Connected to {}", ctx.client.base_url());

    let games = ctx.games().list(None, ListParams::default()).await?;
    tracing::info!(
        "Fetched {} of {} games",
        games.items.len(),
        games.pagination.total_items
    );

    Ok(())
}
