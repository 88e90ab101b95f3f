//! # Request Orchestrator
//!
//! One workflow per externally exposed operation, all the same shape:
//! validate input, run the call chain through the dispatcher, interpret
//! the partial results, produce a single reply.
//!
//! Two reply flavors exist: search and recommend render a GeoJSON
//! FeatureCollection; everything else renders `{"message": ...}`. A
//! downstream business "no" (wrong password, already reserved) stays a
//! successful reply carrying a failure message — only transport failures
//! and invalid input terminate a workflow with an error.

use std::sync::Arc;

use hotel_clients::{
    Account, AdminClient, ProfileClient, RecommendationClient, ReservationClient, SearchClient,
    StayRequest, UserClient,
};
use hotel_dispatcher::{CallContext, Dispatcher};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, WorkflowError};
use crate::geojson::{feature_collection, FeatureCollection};
use crate::validate::{require, require_dates};

/// Room count used for availability checks during search.
const DEFAULT_SEARCH_ROOMS: i32 = 1;

/// Locale applied when the caller does not send one.
const DEFAULT_LOCALE: &str = "en";

/// The message-bearing reply body for non-GeoJSON workflows.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Query parameter shapes
// ============================================================================
// One struct per endpoint, deserialized straight from the query string.
// Everything is optional at this layer; the workflows decide what is
// required and with which user-facing message.

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "inDate")]
    pub in_date: Option<String>,
    #[serde(rename = "outDate")]
    pub out_date: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendParams {
    pub require: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CredentialParams {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountParams {
    pub username: Option<String>,
    pub password: Option<String>,
    pub age: Option<String>,
    pub sex: Option<String>,
    pub mail: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReservationParams {
    #[serde(rename = "inDate")]
    pub in_date: Option<String>,
    #[serde(rename = "outDate")]
    pub out_date: Option<String>,
    #[serde(rename = "hotelId")]
    pub hotel_id: Option<String>,
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvaluateParams {
    #[serde(rename = "inDate")]
    pub in_date: Option<String>,
    #[serde(rename = "outDate")]
    pub out_date: Option<String>,
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "hotelId")]
    pub hotel_id: Option<String>,
    pub score: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminLoginParams {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminRegisterParams {
    pub hotels: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileParams {
    pub email: Option<String>,
    pub password: Option<String>,
    pub id: Option<String>,
    pub target: Option<String>,
    pub content: Option<String>,
}

// ============================================================================
// The orchestrator
// ============================================================================

/// Sequences downstream calls for every inbound operation.
#[derive(Clone)]
pub struct FrontendServer {
    search: SearchClient,
    profile: ProfileClient,
    recommendation: RecommendationClient,
    reservation: ReservationClient,
    user: UserClient,
    admin: AdminClient,
}

impl FrontendServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            search: SearchClient::new(dispatcher.clone()),
            profile: ProfileClient::new(dispatcher.clone()),
            recommendation: RecommendationClient::new(dispatcher.clone()),
            reservation: ReservationClient::new(dispatcher.clone()),
            user: UserClient::new(dispatcher.clone()),
            admin: AdminClient::new(dispatcher),
        }
    }

    /// Hotel search: nearby candidates, availability filter, profile
    /// enrichment, GeoJSON rendering.
    pub async fn search_hotels(
        &self,
        ctx: &CallContext,
        params: SearchParams,
    ) -> Result<FeatureCollection> {
        let in_date = require(&params.in_date, "Please specify inDate/outDate params")?;
        let out_date = require(&params.out_date, "Please specify inDate/outDate params")?;
        let lat = require(&params.lat, "Please specify location params")?;
        let lon = require(&params.lon, "Please specify location params")?;
        let lat: f64 = lat.parse().unwrap_or(0.0);
        let lon: f64 = lon.parse().unwrap_or(0.0);

        let candidates = self
            .search
            .nearby(ctx, lat, lon, in_date, out_date)
            .await?;
        info!("nearby search produced {} candidates", candidates.len());

        let available = self
            .reservation
            .check_availability(
                ctx,
                StayRequest {
                    customer_name: String::new(),
                    hotel_ids: candidates,
                    in_date: in_date.to_string(),
                    out_date: out_date.to_string(),
                    room_number: DEFAULT_SEARCH_ROOMS,
                },
            )
            .await?;
        info!("{} hotels have availability", available.len());

        let locale = params.locale.as_deref().filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LOCALE);
        let hotels = self.profile.get_profiles(ctx, available, locale).await?;

        Ok(feature_collection(hotels))
    }

    /// Recommendation: score through the engine, enrich, render.
    ///
    /// Only the multi-winner modes are exposed here; the engine's fourth
    /// mode (`mix`) is internal and rejected at this surface.
    pub async fn recommend(
        &self,
        ctx: &CallContext,
        params: RecommendParams,
    ) -> Result<FeatureCollection> {
        let lat = require(&params.lat, "Please specify location params")?;
        let lon = require(&params.lon, "Please specify location params")?;
        let lat: f64 = lat.parse().unwrap_or(0.0);
        let lon: f64 = lon.parse().unwrap_or(0.0);

        let require_mode = require(&params.require, "Please specify require params")?;
        if !matches!(require_mode, "dis" | "rate" | "price") {
            return Err(WorkflowError::invalid("Please specify require params"));
        }

        let hotel_ids = self
            .recommendation
            .get_recommendations(ctx, require_mode, lat, lon)
            .await?;
        info!("recommendation returned {} hotels", hotel_ids.len());

        let locale = params.locale.as_deref().filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LOCALE);
        let hotels = self.profile.get_profiles(ctx, hotel_ids, locale).await?;

        Ok(feature_collection(hotels))
    }

    /// User login check.
    pub async fn check_user(&self, ctx: &CallContext, params: CredentialParams) -> Result<Message> {
        let username = require(&params.username, "Please specify username and password")?;
        let password = require(&params.password, "Please specify username and password")?;

        let correct = self.user.check_user(ctx, username, password).await?;
        Ok(Message::new(if correct {
            "Login successfully!"
        } else {
            "Failed. Please check your username and password. "
        }))
    }

    pub async fn register_user(&self, ctx: &CallContext, params: AccountParams) -> Result<Message> {
        let account = self.account_from(params)?;
        let correct = self.user.register(ctx, account).await?;
        Ok(Message::new(if correct {
            "Register successfully!"
        } else {
            "Failed. Please check your username and password. "
        }))
    }

    pub async fn modify_user(&self, ctx: &CallContext, params: AccountParams) -> Result<Message> {
        let account = self.account_from(params)?;
        let correct = self.user.modify(ctx, account).await?;
        Ok(Message::new(if correct {
            "Modify successfully!"
        } else {
            "Failed. Please check your username and password. "
        }))
    }

    pub async fn delete_user(&self, ctx: &CallContext, params: CredentialParams) -> Result<Message> {
        let username = require(&params.username, "Please specify username and password")?;
        let password = require(&params.password, "Please specify username and password")?;

        let correct = self.user.delete(ctx, username, password).await?;
        Ok(Message::new(if correct {
            "Delete successfully!"
        } else {
            "Failed. Please check your username and password. "
        }))
    }

    /// Post-stay evaluation: re-authenticate, then update the user's
    /// order history and the hotel's aggregate score. Both sub-calls are
    /// attempted even if one fails; either failing degrades the reply to
    /// a generic failure, and neither is rolled back.
    pub async fn evaluate(&self, ctx: &CallContext, params: EvaluateParams) -> Result<Message> {
        let in_date = require(&params.in_date, "Please specify inDate/outDate params")?;
        let out_date = require(&params.out_date, "Please specify inDate/outDate params")?;
        require_dates(in_date, out_date)?;
        require(&params.customer_name, "Please specify customerName params")?;
        let username = require(&params.username, "Please specify username and password")?;
        let password = require(&params.password, "Please specify username and password")?;

        let score_raw = require(&params.score, "Please specify a valid score")?;
        let score: f64 = score_raw
            .parse()
            .map_err(|_| WorkflowError::invalid("Please specify a valid score"))?;
        let hotel_id = params.hotel_id.as_deref().unwrap_or("");

        let correct = self.user.check_user(ctx, username, password).await?;
        if !correct {
            return Ok(Message::new("Failed. Please check your username and password. "));
        }

        let order_line = format!(
            "hotelId: {}, inDate: {}, outDate: {}, score: {}",
            hotel_id, in_date, out_date, score_raw
        );

        let history_ok = match self.user.order_history_update(ctx, username, &order_line).await {
            Ok(ok) => ok,
            Err(err) => {
                warn!("order history update failed: {}", err);
                false
            }
        };
        let score_ok = match self.profile.update_score(ctx, hotel_id, score).await {
            Ok(ok) => ok,
            Err(err) => {
                warn!("score update failed: {}", err);
                false
            }
        };

        Ok(Message::new(if history_ok && score_ok {
            "Score successfully!"
        } else {
            "Failed. "
        }))
    }

    /// Reservation: authenticate, then book. Wrong credentials
    /// short-circuit with no reservation call; an empty reply from the
    /// reservation service means the booking already exists.
    pub async fn make_reservation(
        &self,
        ctx: &CallContext,
        params: ReservationParams,
    ) -> Result<Message> {
        let stay = self.stay_from(&params)?;
        let username = require(&params.username, "Please specify username and password")?;
        let password = require(&params.password, "Please specify username and password")?;

        let correct = self.user.check_user(ctx, username, password).await?;
        if !correct {
            return Ok(Message::new("Failed. Please check your username and password. "));
        }

        let reserved = self.reservation.make_reservation(ctx, stay).await?;
        Ok(Message::new(if reserved.is_empty() {
            "Failed. Already reserved. "
        } else {
            "Reserve successfully!"
        }))
    }

    /// Cancellation mirrors reservation; an empty reply means there was
    /// no matching booking to cancel.
    pub async fn cancel_reservation(
        &self,
        ctx: &CallContext,
        params: ReservationParams,
    ) -> Result<Message> {
        let stay = self.stay_from(&params)?;
        let username = require(&params.username, "Please specify username and password")?;
        let password = require(&params.password, "Please specify username and password")?;

        let correct = self.user.check_user(ctx, username, password).await?;
        if !correct {
            return Ok(Message::new("Failed. Please check your username and password. "));
        }

        let cancelled = self.reservation.cancel_reservation(ctx, stay).await?;
        Ok(Message::new(if cancelled.is_empty() {
            "Failed. Not right reservation information."
        } else {
            "Cancel successfully!"
        }))
    }

    pub async fn admin_login(&self, ctx: &CallContext, params: AdminLoginParams) -> Result<Message> {
        let email = require(&params.email, "Please specify username and password")?;
        let password = require(&params.password, "Please specify username and password")?;

        let correct = self.admin.login(ctx, email, password).await?;
        Ok(Message::new(if correct {
            "Login successfully!"
        } else {
            "Failed. Please check your username and password. "
        }))
    }

    pub async fn admin_register(
        &self,
        ctx: &CallContext,
        params: AdminRegisterParams,
    ) -> Result<Message> {
        let hotels_raw = require(&params.hotels, "Please specify username and password")?;
        let name = require(&params.name, "Please specify username and password")?;
        let email = require(&params.email, "Please specify username and password")?;
        let password = require(&params.password, "Please specify username and password")?;
        let id = require(&params.id, "Please specify username and password")?;

        let hotels: Vec<String> = serde_json::from_str(hotels_raw).unwrap_or_default();

        let correct = self
            .admin
            .register(ctx, name, email, password, hotels, id)
            .await?;
        Ok(Message::new(if correct {
            "Register successfully!"
        } else {
            "Failed. Please check your register input. "
        }))
    }

    /// Admin profile update: three dependent calls, each gated on the
    /// previous step. Login, ownership check, field update.
    pub async fn update_profile(
        &self,
        ctx: &CallContext,
        params: UpdateProfileParams,
    ) -> Result<Message> {
        let email = require(&params.email, "Please specify email /password params")?;
        let password = require(&params.password, "Please specify email /password params")?;

        let logged_in = self.admin.login(ctx, email, password).await?;
        if !logged_in {
            return Ok(Message::new("Failed. Please check your username and password. "));
        }

        let id = require(&params.id, "Please specify id params")?;
        let owns = self.admin.check_hotel(ctx, email, id).await?;
        if !owns {
            return Ok(Message::new("It is not your hotel, you could not update it "));
        }

        let target = require(&params.target, "Please specify target/content params")?;
        let content = params.content.as_deref().unwrap_or("");
        let updated = self.admin.update(ctx, id, target, content).await?;
        Ok(Message::new(if updated { "Success" } else { "Update fail" }))
    }

    // ------------------------------------------------------------------------

    fn account_from(&self, params: AccountParams) -> Result<Account> {
        let username = require(&params.username, "Please specify username and password")?;
        let password = require(&params.password, "Please specify username and password")?;
        let age: i32 = params
            .age
            .as_deref()
            .unwrap_or("")
            .parse()
            .map_err(|_| WorkflowError::invalid("Please specify a valid age"))?;

        Ok(Account {
            username: username.to_string(),
            password: password.to_string(),
            age,
            sex: params.sex.unwrap_or_default(),
            mail: params.mail.unwrap_or_default(),
            phone: params.phone.unwrap_or_default(),
        })
    }

    fn stay_from(&self, params: &ReservationParams) -> Result<StayRequest> {
        let in_date = require(&params.in_date, "Please specify inDate/outDate params")?;
        let out_date = require(&params.out_date, "Please specify inDate/outDate params")?;
        require_dates(in_date, out_date)?;
        let hotel_id = require(&params.hotel_id, "Please specify hotelId params")?;
        let customer_name = require(&params.customer_name, "Please specify customerName params")?;

        // Absent or unparsable room count falls back to zero.
        let room_number: i32 = params
            .number
            .as_deref()
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);

        Ok(StayRequest {
            customer_name: customer_name.to_string(),
            hotel_ids: vec![hotel_id.to_string()],
            in_date: in_date.to_string(),
            out_date: out_date.to_string(),
            room_number,
        })
    }
}
