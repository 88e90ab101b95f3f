//! Client for the admin capability.

use std::sync::Arc;

use hotel_dispatcher::{CallContext, Dispatcher};
use hotel_proto::admin::admin_client::AdminClient as GrpcAdminClient;
use hotel_proto::admin::{AdminRegisterRequest, CheckRequest, LoginRequest, UpdateRequest};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Logical name the admin service registers under.
pub const SERVICE_NAME: &str = "srv-admin";

/// Typed wrapper over the admin service.
#[derive(Clone)]
pub struct AdminClient {
    dispatcher: Arc<Dispatcher>,
}

impl AdminClient {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn login(&self, ctx: &CallContext, email: &str, password: &str) -> Result<bool> {
        debug!("admin login for {}", email);
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcAdminClient::new(channel)
            .login(ctx.request(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }

    pub async fn register(
        &self,
        ctx: &CallContext,
        name: &str,
        email: &str,
        password: &str,
        hotels: Vec<String>,
        id: &str,
    ) -> Result<bool> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcAdminClient::new(channel)
            .register(ctx.request(AdminRegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                hotels,
                id: id.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }

    /// Does the admin behind `email` own the hotel `id`?
    pub async fn check_hotel(&self, ctx: &CallContext, email: &str, id: &str) -> Result<bool> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcAdminClient::new(channel)
            .check_hotel(ctx.request(CheckRequest {
                email: email.to_string(),
                id: id.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }

    /// Set one field of an owned hotel's profile.
    pub async fn update(
        &self,
        ctx: &CallContext,
        id: &str,
        target: &str,
        content: &str,
    ) -> Result<bool> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcAdminClient::new(channel)
            .update(ctx.request(UpdateRequest {
                id: id.to_string(),
                target: target.to_string(),
                content: content.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }
}
