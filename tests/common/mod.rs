//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use inertia_axum::config::InertiaConfig;
use inertia_axum::render::StaticTemplate;
use inertia_axum::InertiaService;
use tokio::net::TcpListener;

/// HTML shell used by the test apps.
#[allow(dead_code)]
pub const SHELL: &str = "<html><head><!-- @inertiaHead --></head>\
                         <body><!-- @inertia --></body></html>";

/// Serve `router` on an ephemeral port and return its address.
pub async fn spawn_app(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// A service with the in-memory shell and default configuration.
#[allow(dead_code)]
pub fn service() -> Arc<InertiaService> {
    service_with(InertiaConfig::default())
}

/// A service with the in-memory shell and the given configuration.
#[allow(dead_code)]
pub fn service_with(config: InertiaConfig) -> Arc<InertiaService> {
    Arc::new(
        InertiaService::new(config)
            .unwrap()
            .with_template(StaticTemplate::new(SHELL)),
    )
}

/// Client that never follows redirects, so redirect statuses stay visible.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
