mod api;
mod config;
mod dto;
mod error;
mod middleware;
mod state;
mod static_files;
mod stats;

use std::time::Duration;

use axum::http::Method;
use axum::middleware::from_fn_with_state;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passgen_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load()?;
    let bind_addr = config.bind_addr;
    let tls_config = config.tls.clone();
    let tls_enabled = config.tls_enabled();

    let state = AppState::new(config);

    let limits = state.limiter.config();
    tracing::info!(
        "Rate limits: standard={}/{}s, trusted={}/{}s",
        limits.standard_limit,
        limits.window_seconds,
        limits.trusted_limit,
        limits.window_seconds,
    );
    let sweep_interval = Duration::from_secs(limits.sweep_interval_seconds);

    // Idle client sweep
    let sweep_limiter = state.limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            sweep_limiter.sweep(passgen_core::unix_now());
        }
    });

    // CORS: same-origin only by default (no cross-origin requests allowed)
    let cors = CorsLayer::new().allow_methods([Method::GET]);

    let base_router = api::router(state);

    let header_policy = middleware::security_headers::HeaderPolicy { hsts: tls_enabled };
    let app = base_router.layer(from_fn_with_state(
        header_policy,
        middleware::security_headers::security_headers,
    ));
    let app = app
        .layer(RequestBodyLimitLayer::new(16 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    if let (Some(cert), Some(key)) = (&tls_config.cert_path, &tls_config.key_path) {
        use axum_server::tls_rustls::RustlsConfig;
        let rustls_config = RustlsConfig::from_pem_file(cert, key).await?;
        tracing::info!("passgen-web listening on https://{}", bind_addr);
        axum_server::bind_rustls(bind_addr, rustls_config)
            .serve(app.into_make_service_with_connect_info::<std::net::SocketAddr>())
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        tracing::info!("passgen-web listening on http://{}", bind_addr);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .await?;
    }

    Ok(())
}
