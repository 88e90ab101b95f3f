//! gRPC surface of the recommendation engine.
//!
//! Exposes the engine as the `srv-recommendation` capability: register
//! with the service registry, serve until shutdown, deregister on the way
//! out. The frontend reaches this service through the dispatcher exactly
//! like any other backend.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hotel_proto::recommendation::recommendation_server::{Recommendation, RecommendationServer};
use hotel_proto::recommendation::{RecommendRequest, RecommendResult};
use hotel_registry::Registry;
use tonic::{Request, Response, Status};
use tracing::info;

use crate::engine::RecommendationEngine;

/// Logical name this service registers under.
pub const SERVICE_NAME: &str = "srv-recommendation";

/// Tonic service wrapping the engine.
pub struct RecommendationService {
    engine: Arc<RecommendationEngine>,
}

impl RecommendationService {
    pub fn new(engine: Arc<RecommendationEngine>) -> Self {
        Self { engine }
    }

    pub fn into_server(self) -> RecommendationServer<Self> {
        RecommendationServer::new(self)
    }
}

#[tonic::async_trait]
impl Recommendation for RecommendationService {
    async fn get_recommendations(
        &self,
        request: Request<RecommendRequest>,
    ) -> std::result::Result<Response<RecommendResult>, Status> {
        let req = request.into_inner();
        let hotel_ids = self.engine.recommend(&req.require, req.lat, req.lon);
        Ok(Response::new(RecommendResult { hotel_ids }))
    }
}

/// Serve the engine on `address:port`, registered in `registry`.
///
/// Blocks until `shutdown` resolves, then deregisters.
pub async fn serve(
    engine: Arc<RecommendationEngine>,
    registry: Arc<dyn Registry>,
    address: &str,
    port: u16,
    shutdown: impl std::future::Future<Output = ()>,
) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .context("invalid recommendation service address")?;

    registry
        .register(SERVICE_NAME, address, port)
        .await
        .context("registering recommendation service")?;
    info!("recommendation service listening on {}", addr);

    let result = tonic::transport::Server::builder()
        .add_service(RecommendationService::new(engine).into_server())
        .serve_with_shutdown(addr, shutdown)
        .await
        .context("recommendation service failed");

    registry.deregister(SERVICE_NAME).await;
    result
}
