//! Client for the user-account capability.

use std::sync::Arc;

use hotel_dispatcher::{CallContext, Dispatcher};
use hotel_proto::user::user_client::UserClient as GrpcUserClient;
use hotel_proto::user::{AccountRequest, OrderHistoryRequest, UserRequest};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Logical name the user service registers under.
pub const SERVICE_NAME: &str = "srv-user";

/// Account fields for register/modify, owned by the workflow.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub age: i32,
    pub sex: String,
    pub mail: String,
    pub phone: String,
}

/// Typed wrapper over the user service.
///
/// Every method returns the service's business verdict as a plain bool;
/// "wrong password" is data, not an error.
#[derive(Clone)]
pub struct UserClient {
    dispatcher: Arc<Dispatcher>,
}

impl UserClient {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Are these credentials correct?
    pub async fn check_user(&self, ctx: &CallContext, username: &str, password: &str) -> Result<bool> {
        debug!("checking credentials for {}", username);
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcUserClient::new(channel)
            .check_user(ctx.request(UserRequest {
                username: username.to_string(),
                password: password.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }

    pub async fn register(&self, ctx: &CallContext, account: Account) -> Result<bool> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcUserClient::new(channel)
            .register(ctx.request(account_request(account)))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }

    pub async fn modify(&self, ctx: &CallContext, account: Account) -> Result<bool> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcUserClient::new(channel)
            .modify(ctx.request(account_request(account)))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }

    pub async fn delete(&self, ctx: &CallContext, username: &str, password: &str) -> Result<bool> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcUserClient::new(channel)
            .delete(ctx.request(UserRequest {
                username: username.to_string(),
                password: password.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }

    /// Append one free-text line to the user's order history.
    pub async fn order_history_update(
        &self,
        ctx: &CallContext,
        username: &str,
        order_history: &str,
    ) -> Result<bool> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let reply = GrpcUserClient::new(channel)
            .order_history_update(ctx.request(OrderHistoryRequest {
                username: username.to_string(),
                order_history: order_history.to_string(),
            }))
            .await
            .map_err(|status| ClientError::Rpc {
                service: SERVICE_NAME,
                status,
            })?;
        Ok(reply.into_inner().correct)
    }
}

fn account_request(account: Account) -> AccountRequest {
    AccountRequest {
        username: account.username,
        password: account.password,
        age: account.age,
        sex: account.sex,
        mail: account.mail,
        phone: account.phone,
    }
}
