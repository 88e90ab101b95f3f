//! Client for the reservation capability.
//!
//! All three operations share one request shape. The reply discipline is
//! the service's contract: an empty hotel-id list from `make_reservation`
//! means the booking already exists, and an empty list from
//! `cancel_reservation` means there was no matching booking to cancel.

use std::sync::Arc;

use hotel_dispatcher::{CallContext, Dispatcher};
use hotel_proto::reservation::reservation_client::ReservationClient as GrpcReservationClient;
use hotel_proto::reservation::ReservationRequest;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Logical name the reservation service registers under.
pub const SERVICE_NAME: &str = "srv-reservation";

/// One reservation-service operation's input, owned by the workflow.
#[derive(Debug, Clone)]
pub struct StayRequest {
    pub customer_name: String,
    pub hotel_ids: Vec<String>,
    pub in_date: String,
    pub out_date: String,
    pub room_number: i32,
}

/// Typed wrapper over the reservation service.
#[derive(Clone)]
pub struct ReservationClient {
    dispatcher: Arc<Dispatcher>,
}

impl ReservationClient {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Filter the request's hotel ids down to those with free rooms.
    pub async fn check_availability(
        &self,
        ctx: &CallContext,
        stay: StayRequest,
    ) -> Result<Vec<String>> {
        debug!("availability check for {} hotels", stay.hotel_ids.len());
        self.call(ctx, stay, Op::CheckAvailability).await
    }

    /// Book rooms; empty reply means already reserved.
    pub async fn make_reservation(&self, ctx: &CallContext, stay: StayRequest) -> Result<Vec<String>> {
        self.call(ctx, stay, Op::Make).await
    }

    /// Release rooms; empty reply means no matching booking.
    pub async fn cancel_reservation(
        &self,
        ctx: &CallContext,
        stay: StayRequest,
    ) -> Result<Vec<String>> {
        self.call(ctx, stay, Op::Cancel).await
    }

    async fn call(&self, ctx: &CallContext, stay: StayRequest, op: Op) -> Result<Vec<String>> {
        let channel = self.dispatcher.channel(SERVICE_NAME).await?;
        let mut client = GrpcReservationClient::new(channel);
        let request = ctx.request(ReservationRequest {
            customer_name: stay.customer_name,
            hotel_ids: stay.hotel_ids,
            in_date: stay.in_date,
            out_date: stay.out_date,
            room_number: stay.room_number,
        });

        let reply = match op {
            Op::CheckAvailability => client.check_availability(request).await,
            Op::Make => client.make_reservation(request).await,
            Op::Cancel => client.cancel_reservation(request).await,
        }
        .map_err(|status| ClientError::Rpc {
            service: SERVICE_NAME,
            status,
        })?;
        Ok(reply.into_inner().hotel_ids)
    }
}

enum Op {
    CheckAvailability,
    Make,
    Cancel,
}
