//! End-to-end workflow tests against mocked backend services.
//!
//! Every downstream capability runs as a real tonic server on a loopback
//! port, registered in a fresh local registry; the recommendation service
//! is the real engine over a fixed snapshot. Each mock records the calls
//! it receives so tests can assert which downstream steps ran.

use std::sync::{Arc, Mutex};

use hotel_dispatcher::{CallContext, Dispatcher};
use hotel_frontend::error::WorkflowError;
use hotel_frontend::orchestrator::{
    AccountParams, AdminLoginParams, AdminRegisterParams, CredentialParams, EvaluateParams,
    FrontendServer, RecommendParams, ReservationParams, SearchParams, UpdateProfileParams,
};
use hotel_proto::profile::profile_server::{Profile, ProfileServer};
use hotel_proto::profile::{
    Address, Hotel as ProfileHotel, ProfileRequest, ProfileResult, ScoreRequest, ScoreResult,
};
use hotel_proto::reservation::reservation_server::{Reservation, ReservationServer};
use hotel_proto::reservation::{ReservationRequest, ReservationResult};
use hotel_proto::search::search_server::{Search, SearchServer};
use hotel_proto::search::{NearbyRequest, SearchResult};
use hotel_proto::user::user_server::{User, UserServer};
use hotel_proto::user::{AccountRequest, OrderHistoryRequest, UserRequest, UserResult};
use hotel_proto::admin::admin_server::{Admin, AdminServer};
use hotel_proto::admin::{
    AdminRegisterRequest, AdminResult, CheckRequest, LoginRequest, UpdateRequest,
};
use hotel_recommendation::{FixedSource, Hotel, RecommendationEngine, RecommendationService};
use hotel_registry::{LocalRegistry, Registry};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};

type CallLog = Arc<Mutex<Vec<String>>>;

fn record(log: &CallLog, entry: &str) {
    log.lock().unwrap().push(entry.to_string());
}

fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

// ============================================================================
// Mock backends
// ============================================================================

struct MockSearch {
    log: CallLog,
}

#[tonic::async_trait]
impl Search for MockSearch {
    async fn nearby(
        &self,
        _request: Request<NearbyRequest>,
    ) -> Result<Response<SearchResult>, Status> {
        record(&self.log, "search.nearby");
        Ok(Response::new(SearchResult {
            hotel_ids: vec!["1".into(), "2".into(), "3".into()],
        }))
    }
}

struct MockProfile {
    log: CallLog,
}

#[tonic::async_trait]
impl Profile for MockProfile {
    async fn get_profiles(
        &self,
        request: Request<ProfileRequest>,
    ) -> Result<Response<ProfileResult>, Status> {
        record(&self.log, "profile.get_profiles");
        let hotels = request
            .into_inner()
            .hotel_ids
            .into_iter()
            .map(|id| ProfileHotel {
                name: format!("Hotel {}", id),
                phone_number: "(415) 555-0100".into(),
                price: 100.0,
                score: 4.0,
                score_times: 5,
                address: Some(Address { lat: 37.7, lon: -122.4 }),
                id,
            })
            .collect();
        Ok(Response::new(ProfileResult { hotels }))
    }

    async fn update_score(
        &self,
        request: Request<ScoreRequest>,
    ) -> Result<Response<ScoreResult>, Status> {
        record(&self.log, "profile.update_score");
        let correct = !request.into_inner().hotel_id.is_empty();
        Ok(Response::new(ScoreResult { correct }))
    }
}

struct MockReservation {
    log: CallLog,
}

#[tonic::async_trait]
impl Reservation for MockReservation {
    async fn check_availability(
        &self,
        request: Request<ReservationRequest>,
    ) -> Result<Response<ReservationResult>, Status> {
        record(&self.log, "reservation.check_availability");
        // Hotel "2" is always booked out.
        let hotel_ids = request
            .into_inner()
            .hotel_ids
            .into_iter()
            .filter(|id| id != "2")
            .collect();
        Ok(Response::new(ReservationResult { hotel_ids }))
    }

    async fn make_reservation(
        &self,
        request: Request<ReservationRequest>,
    ) -> Result<Response<ReservationResult>, Status> {
        record(&self.log, "reservation.make_reservation");
        let req = request.into_inner();
        let hotel_ids = if req.hotel_ids.iter().any(|id| id == "taken") {
            vec![]
        } else {
            req.hotel_ids
        };
        Ok(Response::new(ReservationResult { hotel_ids }))
    }

    async fn cancel_reservation(
        &self,
        request: Request<ReservationRequest>,
    ) -> Result<Response<ReservationResult>, Status> {
        record(&self.log, "reservation.cancel_reservation");
        let req = request.into_inner();
        let hotel_ids = if req.hotel_ids.iter().any(|id| id == "unknown") {
            vec![]
        } else {
            req.hotel_ids
        };
        Ok(Response::new(ReservationResult { hotel_ids }))
    }
}

struct MockUser {
    log: CallLog,
}

#[tonic::async_trait]
impl User for MockUser {
    async fn check_user(
        &self,
        request: Request<UserRequest>,
    ) -> Result<Response<UserResult>, Status> {
        record(&self.log, "user.check_user");
        let req = request.into_inner();
        let correct = req.username == "jan" && req.password == "pass";
        Ok(Response::new(UserResult { correct }))
    }

    async fn register(
        &self,
        request: Request<AccountRequest>,
    ) -> Result<Response<UserResult>, Status> {
        record(&self.log, "user.register");
        let correct = request.into_inner().username != "taken";
        Ok(Response::new(UserResult { correct }))
    }

    async fn modify(
        &self,
        _request: Request<AccountRequest>,
    ) -> Result<Response<UserResult>, Status> {
        record(&self.log, "user.modify");
        Ok(Response::new(UserResult { correct: true }))
    }

    async fn delete(&self, _request: Request<UserRequest>) -> Result<Response<UserResult>, Status> {
        record(&self.log, "user.delete");
        Ok(Response::new(UserResult { correct: true }))
    }

    async fn order_history_update(
        &self,
        request: Request<OrderHistoryRequest>,
    ) -> Result<Response<UserResult>, Status> {
        record(&self.log, "user.order_history_update");
        // A negative score line is rejected by the user service.
        let correct = !request.into_inner().order_history.contains("score: -1");
        Ok(Response::new(UserResult { correct }))
    }
}

struct MockAdmin {
    log: CallLog,
}

#[tonic::async_trait]
impl Admin for MockAdmin {
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<AdminResult>, Status> {
        record(&self.log, "admin.login");
        let req = request.into_inner();
        let correct = req.email == "admin@example.com" && req.password == "root";
        Ok(Response::new(AdminResult { correct }))
    }

    async fn register(
        &self,
        request: Request<AdminRegisterRequest>,
    ) -> Result<Response<AdminResult>, Status> {
        record(&self.log, "admin.register");
        let correct = request.into_inner().name != "taken";
        Ok(Response::new(AdminResult { correct }))
    }

    async fn check_hotel(
        &self,
        request: Request<CheckRequest>,
    ) -> Result<Response<AdminResult>, Status> {
        record(&self.log, "admin.check_hotel");
        let correct = request.into_inner().id == "h1";
        Ok(Response::new(AdminResult { correct }))
    }

    async fn update(
        &self,
        request: Request<UpdateRequest>,
    ) -> Result<Response<AdminResult>, Status> {
        record(&self.log, "admin.update");
        let correct = request.into_inner().target != "locked";
        Ok(Response::new(AdminResult { correct }))
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    server: FrontendServer,
    log: CallLog,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Harness {
    async fn listener() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        (listener, port)
    }

    async fn start() -> Self {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let registry = Arc::new(LocalRegistry::new());
        let mut handles = Vec::new();

        macro_rules! spawn_backend {
            ($name:expr, $service:expr) => {{
                let (listener, port) = Self::listener().await;
                registry.register($name, "127.0.0.1", port).await.unwrap();
                let service = $service;
                handles.push(tokio::spawn(async move {
                    tonic::transport::Server::builder()
                        .add_service(service)
                        .serve_with_incoming(TcpListenerStream::new(listener))
                        .await
                        .expect("mock backend failed");
                }));
            }};
        }

        spawn_backend!("srv-search", SearchServer::new(MockSearch { log: log.clone() }));
        spawn_backend!("srv-profile", ProfileServer::new(MockProfile { log: log.clone() }));
        spawn_backend!(
            "srv-reservation",
            ReservationServer::new(MockReservation { log: log.clone() })
        );
        spawn_backend!("srv-user", UserServer::new(MockUser { log: log.clone() }));
        spawn_backend!("srv-admin", AdminServer::new(MockAdmin { log: log.clone() }));

        // The recommendation backend is the real engine over a fixed
        // snapshot, not a mock.
        let source = FixedSource::new(vec![
            Hotel { id: "1".into(), lat: 0.018, lon: 0.0, rate: 4.5, price: 150.0 },
            Hotel { id: "2".into(), lat: 0.045, lon: 0.0, rate: 3.0, price: 54.0 },
            Hotel { id: "3".into(), lat: 0.09, lon: 0.0, rate: 4.5, price: 190.0 },
        ]);
        let engine = Arc::new(RecommendationEngine::new(Arc::new(source)).await.unwrap());
        spawn_backend!(
            "srv-recommendation",
            RecommendationService::new(engine).into_server()
        );

        let dispatcher = Arc::new(Dispatcher::new(registry));
        Self {
            server: FrontendServer::new(dispatcher),
            log,
            handles,
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn search_params() -> SearchParams {
    SearchParams {
        in_date: some("2024-01-05"),
        out_date: some("2024-01-07"),
        lat: some("0.0"),
        lon: some("0.0"),
        locale: None,
    }
}

fn reservation_params() -> ReservationParams {
    ReservationParams {
        in_date: some("2024-01-05"),
        out_date: some("2024-01-07"),
        hotel_id: some("1"),
        customer_name: some("Jan Smith"),
        username: some("jan"),
        password: some("pass"),
        number: some("2"),
    }
}

// ============================================================================
// Search and recommend
// ============================================================================

#[tokio::test]
async fn test_search_excludes_unavailable_hotels() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let collection = harness
        .server
        .search_hotels(&ctx, search_params())
        .await
        .expect("search");

    let ids: Vec<&str> = collection.features.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"], "hotel 2 failed availability and must not appear");
}

#[tokio::test]
async fn test_search_missing_dates_makes_no_downstream_calls() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let result = harness
        .server
        .search_hotels(&ctx, SearchParams { in_date: None, ..search_params() })
        .await;

    assert!(matches!(result, Err(WorkflowError::InvalidInput(_))));
    assert!(calls(&harness.log).is_empty(), "input errors must precede any call");
}

#[tokio::test]
async fn test_recommend_price_mode_end_to_end() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let collection = harness
        .server
        .recommend(
            &ctx,
            RecommendParams {
                require: some("price"),
                lat: some("0.0"),
                lon: some("0.0"),
                locale: None,
            },
        )
        .await
        .expect("recommend");

    let ids: Vec<&str> = collection.features.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["2"], "hotel 2 is the cheapest in the snapshot");
}

#[tokio::test]
async fn test_recommend_rate_mode_returns_tied_hotels() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let collection = harness
        .server
        .recommend(
            &ctx,
            RecommendParams {
                require: some("rate"),
                lat: some("0.0"),
                lon: some("0.0"),
                locale: None,
            },
        )
        .await
        .expect("recommend");

    let mut ids: Vec<&str> = collection.features.iter().map(|f| f.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn test_recommend_rejects_mix_mode_at_the_surface() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let result = harness
        .server
        .recommend(
            &ctx,
            RecommendParams {
                require: some("mix"),
                lat: some("0.0"),
                lon: some("0.0"),
                locale: None,
            },
        )
        .await;

    assert!(matches!(result, Err(WorkflowError::InvalidInput(_))));
    assert!(calls(&harness.log).is_empty());
}

// ============================================================================
// User lifecycle
// ============================================================================

#[tokio::test]
async fn test_user_login_messages() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let ok = harness
        .server
        .check_user(&ctx, CredentialParams { username: some("jan"), password: some("pass") })
        .await
        .unwrap();
    assert_eq!(ok.message, "Login successfully!");

    let bad = harness
        .server
        .check_user(&ctx, CredentialParams { username: some("jan"), password: some("nope") })
        .await
        .unwrap();
    assert_eq!(bad.message, "Failed. Please check your username and password. ");
}

#[tokio::test]
async fn test_register_user_rejects_malformed_age() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let result = harness
        .server
        .register_user(
            &ctx,
            AccountParams {
                username: some("jan"),
                password: some("pass"),
                age: some("twenty"),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(WorkflowError::InvalidInput(_))));
    assert!(calls(&harness.log).is_empty());
}

#[tokio::test]
async fn test_register_user_success_and_business_failure() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let account = |name: &str| AccountParams {
        username: some(name),
        password: some("pass"),
        age: some("30"),
        sex: some("f"),
        mail: some("a@b.c"),
        phone: some("123"),
    };

    let ok = harness.server.register_user(&ctx, account("fresh")).await.unwrap();
    assert_eq!(ok.message, "Register successfully!");

    let dup = harness.server.register_user(&ctx, account("taken")).await.unwrap();
    assert_eq!(dup.message, "Failed. Please check your username and password. ");
}

#[tokio::test]
async fn test_evaluate_attempts_both_updates_even_when_one_fails() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let reply = harness
        .server
        .evaluate(
            &ctx,
            EvaluateParams {
                in_date: some("2024-01-05"),
                out_date: some("2024-01-07"),
                customer_name: some("Jan Smith"),
                username: some("jan"),
                password: some("pass"),
                hotel_id: some("1"),
                score: some("-1"),
            },
        )
        .await
        .unwrap();

    // The order-history update rejects score -1, but the score update
    // must still have been attempted.
    assert_eq!(reply.message, "Failed. ");
    let log = calls(&harness.log);
    assert!(log.contains(&"user.order_history_update".to_string()));
    assert!(log.contains(&"profile.update_score".to_string()));
}

#[tokio::test]
async fn test_evaluate_success() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let reply = harness
        .server
        .evaluate(
            &ctx,
            EvaluateParams {
                in_date: some("2024-01-05"),
                out_date: some("2024-01-07"),
                customer_name: some("Jan Smith"),
                username: some("jan"),
                password: some("pass"),
                hotel_id: some("1"),
                score: some("4.5"),
            },
        )
        .await
        .unwrap();

    assert_eq!(reply.message, "Score successfully!");
}

#[tokio::test]
async fn test_evaluate_rejects_malformed_dates() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let result = harness
        .server
        .evaluate(
            &ctx,
            EvaluateParams {
                in_date: some("2024-1-05"),
                out_date: some("2024-01-07"),
                customer_name: some("Jan Smith"),
                username: some("jan"),
                password: some("pass"),
                hotel_id: some("1"),
                score: some("4.5"),
            },
        )
        .await;

    assert!(matches!(result, Err(WorkflowError::InvalidInput(_))));
}

// ============================================================================
// Reservation lifecycle
// ============================================================================

#[tokio::test]
async fn test_reservation_success() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let reply = harness
        .server
        .make_reservation(&ctx, reservation_params())
        .await
        .unwrap();
    assert_eq!(reply.message, "Reserve successfully!");
}

#[tokio::test]
async fn test_reservation_already_reserved() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let reply = harness
        .server
        .make_reservation(
            &ctx,
            ReservationParams { hotel_id: some("taken"), ..reservation_params() },
        )
        .await
        .unwrap();
    assert_eq!(reply.message, "Failed. Already reserved. ");
}

#[tokio::test]
async fn test_reservation_wrong_password_skips_booking_call() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let reply = harness
        .server
        .make_reservation(
            &ctx,
            ReservationParams { password: some("wrong"), ..reservation_params() },
        )
        .await
        .unwrap();

    assert_eq!(reply.message, "Failed. Please check your username and password. ");
    let log = calls(&harness.log);
    assert!(log.contains(&"user.check_user".to_string()));
    assert!(
        !log.contains(&"reservation.make_reservation".to_string()),
        "failed auth must short-circuit before the reservation call"
    );
}

#[tokio::test]
async fn test_cancel_with_no_matching_reservation() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let reply = harness
        .server
        .cancel_reservation(
            &ctx,
            ReservationParams { hotel_id: some("unknown"), ..reservation_params() },
        )
        .await
        .unwrap();
    assert_eq!(reply.message, "Failed. Not right reservation information.");
}

#[tokio::test]
async fn test_cancel_success() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let reply = harness
        .server
        .cancel_reservation(&ctx, reservation_params())
        .await
        .unwrap();
    assert_eq!(reply.message, "Cancel successfully!");
}

// ============================================================================
// Admin lifecycle
// ============================================================================

#[tokio::test]
async fn test_admin_login_messages() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let ok = harness
        .server
        .admin_login(
            &ctx,
            AdminLoginParams { email: some("admin@example.com"), password: some("root") },
        )
        .await
        .unwrap();
    assert_eq!(ok.message, "Login successfully!");

    let bad = harness
        .server
        .admin_login(
            &ctx,
            AdminLoginParams { email: some("admin@example.com"), password: some("bad") },
        )
        .await
        .unwrap();
    assert_eq!(bad.message, "Failed. Please check your username and password. ");
}

#[tokio::test]
async fn test_admin_register() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let params = |name: &str| AdminRegisterParams {
        hotels: some(r#"["h1","h2"]"#),
        name: some(name),
        email: some("admin@example.com"),
        password: some("root"),
        id: some("a1"),
    };

    let ok = harness.server.admin_register(&ctx, params("fresh")).await.unwrap();
    assert_eq!(ok.message, "Register successfully!");

    let dup = harness.server.admin_register(&ctx, params("taken")).await.unwrap();
    assert_eq!(dup.message, "Failed. Please check your register input. ");
}

#[tokio::test]
async fn test_update_profile_gates_each_step() {
    let harness = Harness::start().await;
    let ctx = CallContext::new();

    let params = |password: &str, id: &str, target: &str| UpdateProfileParams {
        email: some("admin@example.com"),
        password: some(password),
        id: some(id),
        target: some(target),
        content: some("new value"),
    };

    // Step 1 fails: wrong password, no ownership check ran.
    let reply = harness
        .server
        .update_profile(&ctx, params("bad", "h1", "name"))
        .await
        .unwrap();
    assert_eq!(reply.message, "Failed. Please check your username and password. ");
    assert!(!calls(&harness.log).contains(&"admin.check_hotel".to_string()));

    // Step 2 fails: not the owner, no update ran.
    let reply = harness
        .server
        .update_profile(&ctx, params("root", "h2", "name"))
        .await
        .unwrap();
    assert_eq!(reply.message, "It is not your hotel, you could not update it ");
    assert!(!calls(&harness.log).contains(&"admin.update".to_string()));

    // Step 3 fails: update rejected.
    let reply = harness
        .server
        .update_profile(&ctx, params("root", "h1", "locked"))
        .await
        .unwrap();
    assert_eq!(reply.message, "Update fail");

    // All three steps pass.
    let reply = harness
        .server
        .update_profile(&ctx, params("root", "h1", "name"))
        .await
        .unwrap();
    assert_eq!(reply.message, "Success");
}

// ============================================================================
// Transport failure propagation
// ============================================================================

#[tokio::test]
async fn test_unregistered_backend_surfaces_as_downstream_error() {
    // A registry with no backends at all: the first downstream call must
    // fail with a transport-class error, not a business message.
    let registry = Arc::new(LocalRegistry::new());
    let dispatcher = Arc::new(Dispatcher::new(registry));
    let server = FrontendServer::new(dispatcher);
    let ctx = CallContext::new();

    let result = server
        .check_user(
            &ctx,
            CredentialParams { username: some("jan"), password: some("pass") },
        )
        .await;

    assert!(matches!(result, Err(WorkflowError::Downstream(_))));
}
