//! Client for the nearby-search capability.

use std::sync::Arc;

use hotel_dispatcher::{CallContext, Dispatcher};
use hotel_proto::search::search_client::SearchClient as GrpcSearchClient;
use hotel_proto::search::NearbyRequest;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Logical name the search service registers under.
pub const SERVICE_NAME: &str = "srv-search";

/// Typed wrapper over the search service.
#[derive(Clone)]
pub struct SearchClient {
    dispatcher: Arc<Dispatcher>,
}

impl SearchClient {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Find hotel ids near a point for the given stay window.
    pub async fn nearby(
        &self,
        ctx: &CallContext,
        lat: f64,
        lon: f64,
        in_date: &str,
        out_date: &str,
    ) -> Result<Vec<String>> {
        debug!("nearby search at ({}, {})", lat, lon);
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcSearchClient::new(channel)
            .nearby(ctx.request(NearbyRequest {
                lat,
                lon,
                in_date: in_date.to_string(),
                out_date: out_date.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().hotel_ids)
    }
}
