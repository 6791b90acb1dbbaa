//! Web server and interaction bindings
//!
//! Each routed page maps one control event (button press, dropdown change,
//! page load) to one full adapter -> normalizer -> renderer execution. There
//! is no error route: adapter failures surface as fallback or empty data on
//! the normal pages.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use reqwest::Client;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::GuideConfig;
use crate::restaurants::Cuisine;
use crate::{attractions, restaurants, views, weather};

/// Shared, immutable per-process state: configuration and the HTTP client
/// every adapter call goes through
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GuideConfig>,
    pub client: Client,
}

impl AppState {
    pub fn new(config: GuideConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("williamsburg-guide/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets_dir = state.config.server.assets_dir.clone();

    Router::new()
        .route("/", get(home))
        .route("/attractions", get(attractions_page))
        .route("/restaurants", get(restaurants_page))
        .route("/weather", get(weather_page))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn run(config: GuideConfig) -> Result<()> {
    let port = config.server.port;
    let state = AppState::new(config)?;
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Travel guide running at http://localhost:{port}");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn home() -> Html<String> {
    Html(views::home_page())
}

#[derive(Debug, Deserialize)]
struct AttractionsParams {
    /// Present once the attraction button has been pressed
    pick: Option<u8>,
}

async fn attractions_page(
    State(state): State<AppState>,
    Query(params): Query<AttractionsParams>,
) -> Html<String> {
    // idle state: no button press yet, render the shell only
    if params.pick.is_none() {
        return Html(views::attractions::attractions_page(None));
    }

    let pool = attractions::fetch_attractions(&state.client, &state.config.attractions).await;
    let pick = attractions::pick_attraction(&mut rand::rng(), &pool);
    Html(views::attractions::attractions_page(pick.as_ref()))
}

#[derive(Debug, Deserialize)]
struct RestaurantsParams {
    cuisine: Option<Cuisine>,
}

async fn restaurants_page(
    State(state): State<AppState>,
    Query(params): Query<RestaurantsParams>,
) -> Html<String> {
    let cuisine = params.cuisine.unwrap_or_default();
    let results = restaurants::fetch_restaurants(
        &state.client,
        &state.config.location,
        &state.config.restaurants,
        cuisine,
    )
    .await;
    Html(views::restaurants::restaurants_page(
        &mut rand::rng(),
        cuisine,
        &results,
    ))
}

async fn weather_page(State(state): State<AppState>) -> Html<String> {
    let samples = weather::fetch_hourly_temperatures(
        &state.client,
        &state.config.location,
        &state.config.weather,
    )
    .await;
    Html(views::weather::weather_page(
        &state.config.location.name,
        &samples,
    ))
}
