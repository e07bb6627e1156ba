//! Preview service exposing the renderers over HTTP for host integration checks.
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::configurator::ParameterConfigurator;
use crate::error::Result;
use crate::form::Configuration;
use crate::host::DefaultHost;
use crate::models::{FormParameter, Subscription};
use crate::profile::Profile;
use crate::render::VmRenderer;

#[derive(Clone)]
pub struct AppState {
    pub host: Arc<DefaultHost>,
    pub profile: Profile,
}

impl AppState {
    pub fn new(host: DefaultHost, profile: Profile) -> Self {
        Self {
            host: Arc::new(host),
            profile,
        }
    }

    fn renderer(&self) -> VmRenderer<'_, DefaultHost> {
        VmRenderer::new(self.host.as_ref(), self.profile.clone())
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct FormRequest {
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub parameters: Vec<FormParameter>,
}

async fn health() -> &'static str {
    "ok"
}

async fn render_key(State(state): State<AppState>, Json(subscription): Json<Subscription>) -> Html<String> {
    Html(state.renderer().render_key(&subscription))
}

async fn render_features(State(state): State<AppState>, Json(subscription): Json<Subscription>) -> Html<String> {
    Html(state.renderer().render_features(&subscription))
}

async fn render_details(State(state): State<AppState>, Json(subscription): Json<Subscription>) -> Html<String> {
    Html(state.renderer().render_details_key(&subscription))
}

/// Subscription form with the picker installed, as the host would mount it.
async fn render_form(State(state): State<AppState>, Json(request): Json<FormRequest>) -> Html<String> {
    let parameters = if request.parameters.is_empty() {
        vec![FormParameter::new(&state.profile.instance_parameter, true)]
    } else {
        request.parameters
    };
    let mut configuration = Configuration::new(request.node.as_deref(), parameters);
    ParameterConfigurator::new(state.host.as_ref(), state.profile.clone())
        .configure_subscription_parameters(&mut configuration);
    configuration.render();
    Html(configuration.container.to_html())
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/render/key", post(render_key))
        .route("/render/features", post(render_features))
        .route("/render/details", post(render_details))
        .route("/render/form", post(render_form))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| crate::error::VmAwsError::Config(format!("invalid host/port: {}", e)))?;
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting preview server");
    println!(
        "{} {}",
        yansi::Paint::new("Preview server running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    axum::serve(listener, app).await?;
    Ok(())
}
