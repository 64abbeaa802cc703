pub mod glossary_link;
pub mod nct_redirect;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use reqwest::Client;
use tower_http::trace::TraceLayer;

use crate::clients::glossary::GlossaryApiClient;
use crate::clients::trials::{TrialsApi, TrialsApiClient};
use crate::config::AppConfig;
use crate::utils::error::Result;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub trials_api: Arc<dyn TrialsApi>,
    pub glossary: Arc<GlossaryApiClient>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds the API clients from configuration. Both clients share one
    /// connection pool.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let http = Client::new();

        let trials_api = TrialsApiClient::new(http.clone(), config.trials_api.clone())?;
        let glossary = GlossaryApiClient::new(http, config.glossary_api.base_url.clone())?;

        Ok(Self {
            trials_api: Arc::new(trials_api),
            glossary: Arc::new(glossary),
            config: Arc::new(config),
        })
    }
}

/// Assembles the application router: the trial pretty-URL redirect and the
/// legacy glossary popup link.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/clinicaltrials/:id", get(nct_redirect::handle))
        .route("/definition", get(glossary_link::handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured listen address and serves until shutdown.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.server.listen_addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
