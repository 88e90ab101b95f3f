//! Client for the recommend capability.

use std::sync::Arc;

use hotel_dispatcher::{CallContext, Dispatcher};
use hotel_proto::recommendation::recommendation_client::RecommendationClient as GrpcRecommendationClient;
use hotel_proto::recommendation::RecommendRequest;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Logical name the recommendation service registers under.
pub const SERVICE_NAME: &str = "srv-recommendation";

/// Typed wrapper over the recommendation service.
#[derive(Clone)]
pub struct RecommendationClient {
    dispatcher: Arc<Dispatcher>,
}

impl RecommendationClient {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Ask the engine for hotel ids under the given scoring mode.
    pub async fn get_recommendations(
        &self,
        ctx: &CallContext,
        require: &str,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<String>> {
        debug!("recommendation mode {} at ({}, {})", require, lat, lon);
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcRecommendationClient::new(channel)
            .get_recommendations(ctx.request(RecommendRequest {
                require: require.to_string(),
                lat,
                lon,
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().hotel_ids)
    }
}
