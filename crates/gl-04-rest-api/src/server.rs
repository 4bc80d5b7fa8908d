use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ApiConfig;
use crate::errors::ApiError;

/// Serve `router` until `shutdown` resolves.
pub async fn serve<F>(config: &ApiConfig, router: Router, shutdown: F) -> Result<(), ApiError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    info!(%addr, "HTTP server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("HTTP server stopped");
    Ok(())
}
