//! Server assembly: routes, middleware, and the serve loop

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod embeddings;

use std::net::SocketAddr;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Runtime configuration for the mock server
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Port to bind on every interface; 0 lets the OS pick one
    pub server_port: u16,
    /// Serve only this vendor's routes when set
    pub provider_type: Option<String>,
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error when `provider_type` names an unknown vendor
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let listen_address = SocketAddr::from(([0, 0, 0, 0], config.server_port));

        let mut app = match config.provider_type.as_deref() {
            None | Some("") => mimic_chat::chat_router(),
            Some(vendor) => {
                let router = mimic_chat::single_vendor_router(vendor)
                    .ok_or_else(|| anyhow::anyhow!("unknown provider type: {vendor}"))?;
                tracing::info!(vendor, "single-vendor mode");
                router
            }
        };

        app = app.route("/v1/embeddings", axum::routing::post(embeddings::embeddings_handler));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS, wide open like the rest of the mock surface
        app = app.layer(CorsLayer::permissive());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    #[test]
    fn unknown_provider_type_fails_construction() {
        let config = ServerConfig {
            server_port: 0,
            provider_type: Some("anthropic".to_owned()),
        };
        assert!(Server::new(&config).is_err());
    }

    #[test]
    fn empty_provider_type_means_all_routes() {
        let config = ServerConfig {
            server_port: 0,
            provider_type: Some(String::new()),
        };
        assert!(Server::new(&config).is_ok());
    }

    #[tokio::test]
    async fn embeddings_route_answers_not_found() {
        let app = Server::new(&ServerConfig::default()).unwrap().into_router();
        let response = app
            .oneshot(
                http::Request::builder()
                    .method(http::Method::POST)
                    .uri("/v1/embeddings")
                    .header(http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(r#"{"model":"m","input":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Not found"}));
    }
}
