//! Dashboard API server entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use filinglens_server::{AppState, Config};
use filinglens_store::FilingStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    filinglens_server::init_tracing(&config.logging.level);

    info!(path = %config.data.path.display(), "loading filing dataset");
    let store = FilingStore::load(&config.data.path)
        .context("failed to load the filing dataset; refusing to start")?;
    info!(filings = store.height(), "dataset prepared");

    let state = Arc::new(AppState::new(store));
    state.predictor.fit().context("failed to fit the prediction model")?;
    info!("prediction model fitted");

    filinglens_server::serve(&config.http.listen, state).await
}
