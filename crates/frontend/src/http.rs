//! Inbound HTTP surface.
//!
//! Query-parameter driven endpoints, one per workflow. Search and
//! recommend reply with a GeoJSON FeatureCollection; everything else
//! replies `{"message": ...}`. Input problems become 400 before any
//! downstream call; downstream transport failures become 500; business
//! failures stay 200 with a failure message in the body.
//!
//! Each request gets a `CallContext` carrying the caller's `x-trace-id`
//! (or a fresh token) and a default deadline; cancellation propagates by
//! future drop when the client goes away.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use hotel_dispatcher::{CallContext, TRACE_HEADER};
use tracing::info;

use crate::error::WorkflowError;
use crate::geojson::FeatureCollection;
use crate::orchestrator::{
    AccountParams, AdminLoginParams, AdminRegisterParams, CredentialParams, EvaluateParams,
    FrontendServer, Message, RecommendParams, ReservationParams, SearchParams,
    UpdateProfileParams,
};

/// Upper bound on one request's downstream fan-out.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

type AppState = Arc<FrontendServer>;
type Reply<T> = std::result::Result<Json<T>, WorkflowError>;

/// Build the router over a ready orchestrator.
pub fn router(server: FrontendServer) -> Router {
    Router::new()
        .route("/hotels", get(search_handler))
        .route("/recommendations", get(recommend_handler))
        .route("/user", get(user_handler))
        .route("/userregister", get(user_register_handler))
        .route("/usermodify", get(user_modify_handler))
        .route("/userdelete", get(user_delete_handler))
        .route("/userevaluate", get(user_evaluate_handler))
        .route("/reservation", get(reservation_handler))
        .route("/cancelreservation", get(cancel_reservation_handler))
        .route("/adminlogin", get(admin_login_handler))
        .route("/adminregister", get(admin_register_handler))
        .route("/updateProfile", get(update_profile_handler))
        .with_state(Arc::new(server))
}

/// Serve the router until the process is stopped.
pub async fn serve(server: FrontendServer, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .context("binding frontend port")?;
    info!("frontend listening on :{}", port);
    axum::serve(listener, router(server))
        .await
        .context("frontend server failed")
}

fn call_context(headers: &HeaderMap) -> CallContext {
    let ctx = match headers.get(TRACE_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) => CallContext::with_trace_id(token),
        None => CallContext::new(),
    };
    ctx.with_deadline(DEFAULT_DEADLINE)
}

async fn search_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Reply<FeatureCollection> {
    let ctx = call_context(&headers);
    Ok(Json(server.search_hotels(&ctx, params).await?))
}

async fn recommend_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RecommendParams>,
) -> Reply<FeatureCollection> {
    let ctx = call_context(&headers);
    Ok(Json(server.recommend(&ctx, params).await?))
}

async fn user_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CredentialParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.check_user(&ctx, params).await?))
}

async fn user_register_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AccountParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.register_user(&ctx, params).await?))
}

async fn user_modify_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AccountParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.modify_user(&ctx, params).await?))
}

async fn user_delete_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CredentialParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.delete_user(&ctx, params).await?))
}

async fn user_evaluate_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<EvaluateParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.evaluate(&ctx, params).await?))
}

async fn reservation_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ReservationParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.make_reservation(&ctx, params).await?))
}

async fn cancel_reservation_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ReservationParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.cancel_reservation(&ctx, params).await?))
}

async fn admin_login_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AdminLoginParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.admin_login(&ctx, params).await?))
}

async fn admin_register_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AdminRegisterParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.admin_register(&ctx, params).await?))
}

async fn update_profile_handler(
    State(server): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<UpdateProfileParams>,
) -> Reply<Message> {
    let ctx = call_context(&headers);
    Ok(Json(server.update_profile(&ctx, params).await?))
}
