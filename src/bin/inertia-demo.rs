//! Demo application for the Inertia adapter.
//!
//! Serves a handful of pages showing the prop kinds and the protocol flows:
//! full document loads, partial reloads, deferred props and form redirects.
//!
//! ```text
//! inertia-demo --listen 127.0.0.1:3000
//! inertia-demo --config inertia.toml
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::middleware::from_fn;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use inertia_axum::config::{load_config, InertiaConfig};
use inertia_axum::http::RequestContext;
use inertia_axum::observability::logging;
use inertia_axum::page::{defer, merge, optional, Inertia, Prop, Props};
use inertia_axum::render::StaticTemplate;
use inertia_axum::{preserve_method_redirects, Error, InertiaService};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "inertia-demo")]
#[command(about = "Demo server for the Inertia axum adapter", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address.
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    listen: String,
}

const SHELL: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>inertia-demo</title>
    <!-- @inertiaHead -->
  </head>
  <body>
    <!-- @inertia -->
  </body>
</html>
"#;

async fn dashboard(inertia: Inertia) -> Result<Response, Error> {
    let props = Props::new()
        .with("user", json!({"name": "jo", "role": "admin"}))
        .with(
            "stats",
            defer(|| async { Ok(json!({"visits": 128, "errors": 3})) }).group("stats"),
        )
        .with(
            "activity",
            merge(|| async { Ok(json!([{"event": "login"}])) }),
        )
        .with(
            "debug",
            optional(|| async { Ok(json!({"build": "dev"})) }),
        );
    inertia.render("dashboard", props).await
}

async fn profile(mut inertia: Inertia) -> Result<Response, Error> {
    inertia.share("section", json!("account"));
    inertia
        .render("profile", Props::new().with("name", json!("jo")))
        .await
}

async fn update_profile(inertia: Inertia) -> Result<Response, Error> {
    // A real handler would persist the form body here.
    inertia.redirect("/profile")
}

async fn version(State(service): State<Arc<InertiaService>>) -> String {
    service.version()
}

fn app(service: Arc<InertiaService>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/profile", get(profile))
        .route("/profile", post(update_profile))
        .route("/version", get(version))
        .with_state(service)
        .layer(from_fn(preserve_method_redirects))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => InertiaConfig::default(),
    };
    logging::init(&config.observability.log_level);

    tracing::info!(
        version = %config.version.0,
        ssr = config.ssr.enabled,
        "configuration loaded"
    );

    let service = Arc::new(
        InertiaService::new(config)?
            .with_template(StaticTemplate::new(SHELL))
            .with_shared("app", json!({"name": "inertia-demo"}))
            .with_shared(
                "current_url",
                Prop::factory(|ctx: Arc<RequestContext>| async move {
                    Ok(Value::from(ctx.url().to_string()))
                }),
            ),
    );

    let listener = TcpListener::bind(&cli.listen).await?;
    tracing::info!(address = %listener.local_addr()?, "inertia-demo listening");

    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
