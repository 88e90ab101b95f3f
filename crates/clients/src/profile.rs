//! Client for the profile-enrichment capability.

use std::sync::Arc;

use hotel_dispatcher::{CallContext, Dispatcher};
use hotel_proto::profile::profile_client::ProfileClient as GrpcProfileClient;
use hotel_proto::profile::{Hotel, ProfileRequest, ScoreRequest};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Logical name the profile service registers under.
pub const SERVICE_NAME: &str = "srv-profile";

/// Typed wrapper over the profile service.
#[derive(Clone)]
pub struct ProfileClient {
    dispatcher: Arc<Dispatcher>,
}

impl ProfileClient {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Fetch full hotel records for the given ids, localized.
    pub async fn get_profiles(
        &self,
        ctx: &CallContext,
        hotel_ids: Vec<String>,
        locale: &str,
    ) -> Result<Vec<Hotel>> {
        debug!("fetching {} profiles, locale {}", hotel_ids.len(), locale);
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcProfileClient::new(channel)
            .get_profiles(ctx.request(ProfileRequest {
                hotel_ids,
                locale: locale.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().hotels)
    }

    /// Fold a user score into a hotel's aggregate rating.
    ///
    /// Returns the service's business verdict; `false` means the hotel was
    /// unknown or the update was rejected, not a transport failure.
    pub async fn update_score(&self, ctx: &CallContext, hotel_id: &str, score: f64) -> Result<bool> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcProfileClient::new(channel)
            .update_score(ctx.request(ScoreRequest {
                hotel_id: hotel_id.to_string(),
                score,
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }
}
