//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ClinicRoomService, ScheduleSlotService};
use crate::domain::RepositoryProvider;

use super::common::{ApiResponse, PageResponse, PaginationMeta};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{clinic_rooms, schedule_slots, AppState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Clinic rooms
        clinic_rooms::list_rooms,
        clinic_rooms::get_room,
        clinic_rooms::create_room,
        clinic_rooms::update_room,
        clinic_rooms::delete_room,
        clinic_rooms::list_room_slots,
        // Schedule slots
        schedule_slots::list_slots,
        schedule_slots::get_slot,
        schedule_slots::create_slot,
        schedule_slots::update_slot,
        schedule_slots::book_slot,
        schedule_slots::delete_slot,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PageResponse,
            PaginationMeta,
            health::HealthResponse,
            health::ComponentHealth,
            clinic_rooms::ClinicRoomResponse,
            clinic_rooms::CreateRoomRequest,
            clinic_rooms::UpdateRoomRequest,
            schedule_slots::ScheduleSlotResponse,
            schedule_slots::CreateSlotRequest,
            schedule_slots::UpdateSlotRequest,
            schedule_slots::BookSlotRequest,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and storage health"),
        (name = "Clinic Rooms", description = "Clinic room management"),
        (name = "Schedule Slots", description = "Bookable time slots in clinic rooms"),
    ),
    info(
        title = "Clinic Scheduler API",
        version = "1.0.0",
        description = "REST API for clinic rooms and their schedule slots. \
                       List endpoints accept page, limit, sortBy, sortOrder and select.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is given.
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let state = AppState {
        rooms: Arc::new(ClinicRoomService::new(repos.clone())),
        slots: Arc::new(ScheduleSlotService::new(repos.clone())),
    };

    let api_routes = Router::new()
        // Clinic rooms
        .route(
            "/api/v1/clinic-rooms",
            get(clinic_rooms::list_rooms).post(clinic_rooms::create_room),
        )
        .route(
            "/api/v1/clinic-rooms/{id}",
            get(clinic_rooms::get_room)
                .put(clinic_rooms::update_room)
                .delete(clinic_rooms::delete_room),
        )
        .route(
            "/api/v1/clinic-rooms/{id}/slots",
            get(clinic_rooms::list_room_slots),
        )
        // Schedule slots
        .route(
            "/api/v1/schedule-slots",
            get(schedule_slots::list_slots).post(schedule_slots::create_slot),
        )
        .route(
            "/api/v1/schedule-slots/{id}",
            get(schedule_slots::get_slot)
                .put(schedule_slots::update_slot)
                .delete(schedule_slots::delete_slot),
        )
        .route(
            "/api/v1/schedule-slots/{id}/book",
            post(schedule_slots::book_slot),
        )
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            repos,
            started_at: Arc::new(Instant::now()),
        });

    let mut router = Router::new().merge(api_routes).merge(health_routes);

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    router
        // Route templates are only known inside the router
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .merge(swagger_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;

    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    struct TestApp {
        router: Router,
        repos: Arc<InMemoryRepositoryProvider>,
    }

    impl TestApp {
        fn new() -> Self {
            let repos = Arc::new(InMemoryRepositoryProvider::new());
            let router = create_api_router(repos.clone(), None);
            Self { router, repos }
        }

        async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let (status, _, json) = self.send_raw(method, uri, body, None).await;
            (status, json)
        }

        async fn send_raw(
            &self,
            method: &str,
            uri: &str,
            body: Option<Value>,
            request_id: Option<&str>,
        ) -> (StatusCode, Option<String>, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(id) = request_id {
                builder = builder.header("x-request-id", id);
            }
            let req = match body {
                Some(b) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&b).unwrap()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let mut svc = self.router.clone().into_service();
            let resp = svc.call(req).await.unwrap();
            let status = resp.status();
            let echoed = resp
                .headers()
                .get("x-request-id")
                .map(|v| v.to_str().unwrap().to_string());
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, echoed, json)
        }

        async fn create_room(&self, number: &str) -> Value {
            let (status, json) = self
                .send(
                    "POST",
                    "/api/v1/clinic-rooms",
                    Some(json!({
                        "name": format!("Room {}", number),
                        "roomNumber": number,
                        "roomType": "Consultation",
                        "floor": 1
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{}", json);
            json["data"].clone()
        }

        async fn create_slot(&self, room_id: &str, hour: u32) -> Value {
            let (status, json) = self
                .send(
                    "POST",
                    "/api/v1/schedule-slots",
                    Some(json!({
                        "roomId": room_id,
                        "startTime": format!("2024-05-06T{:02}:00:00Z", hour),
                        "endTime": format!("2024-05-06T{:02}:00:00Z", hour + 1),
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{}", json);
            json["data"].clone()
        }
    }

    #[tokio::test]
    async fn create_and_get_room() {
        let app = TestApp::new();
        let room = app.create_room("C-101").await;
        assert_eq!(room["roomNumber"], "C-101");
        assert_eq!(room["capacity"], 1);
        assert_eq!(room["isActive"], true);

        let uri = format!("/api/v1/clinic-rooms/{}", room["id"].as_str().unwrap());
        let (status, json) = app.send("GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["name"], "Room C-101");
    }

    #[tokio::test]
    async fn duplicate_room_number_is_409() {
        let app = TestApp::new();
        app.create_room("C-101").await;
        let (status, json) = app
            .send(
                "POST",
                "/api/v1/clinic-rooms",
                Some(json!({"name": "Other", "roomNumber": "C-101", "roomType": "Other"})),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn invalid_room_body_is_422() {
        let app = TestApp::new();
        let (status, json) = app
            .send(
                "POST",
                "/api/v1/clinic-rooms",
                Some(json!({"name": "", "roomNumber": "X", "roomType": "Ballroom"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn missing_room_is_404() {
        let app = TestApp::new();
        let (status, json) = app.send("GET", "/api/v1/clinic-rooms/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["message"].as_str().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn list_rooms_paginates() {
        let app = TestApp::new();
        for i in 0..12 {
            app.create_room(&format!("C-{:02}", i)).await;
        }

        let (status, json) = app
            .send("GET", "/api/v1/clinic-rooms?page=3&limit=5", None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        let meta = &json["pagination"];
        assert_eq!(meta["page"], 3);
        assert_eq!(meta["limit"], 5);
        assert_eq!(meta["total"], 12);
        assert_eq!(meta["totalPages"], 3);
        assert_eq!(meta["hasNextPage"], false);
        assert_eq!(meta["hasPrevPage"], true);
        assert!(meta["nextPage"].is_null());
        assert_eq!(meta["prevPage"], 2);
    }

    #[tokio::test]
    async fn list_rooms_normalizes_odd_parameters() {
        let app = TestApp::new();
        app.create_room("C-1").await;

        let (_, json) = app
            .send("GET", "/api/v1/clinic-rooms?page=-3&limit=500", None)
            .await;
        assert_eq!(json["pagination"]["page"], 1);
        assert_eq!(json["pagination"]["limit"], 100);

        let (_, json) = app
            .send("GET", "/api/v1/clinic-rooms?page=abc&limit=xyz", None)
            .await;
        assert_eq!(json["pagination"]["page"], 1);
        assert_eq!(json["pagination"]["limit"], 10);

        let (_, json) = app
            .send("GET", "/api/v1/clinic-rooms?page=999", None)
            .await;
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["pagination"]["hasNextPage"], false);
    }

    #[tokio::test]
    async fn list_rooms_sorts_filters_and_selects() {
        let app = TestApp::new();
        for number in ["B-2", "A-1", "C-3"] {
            app.create_room(number).await;
        }

        let (_, json) = app
            .send(
                "GET",
                "/api/v1/clinic-rooms?sortBy=roomNumber&sortOrder=asc&select=roomNumber",
                None,
            )
            .await;
        let data = json["data"].as_array().unwrap();
        let numbers: Vec<_> = data.iter().map(|d| d["roomNumber"].clone()).collect();
        assert_eq!(numbers, vec!["A-1", "B-2", "C-3"]);
        let first = data[0].as_object().unwrap();
        assert!(first.contains_key("id"));
        assert!(!first.contains_key("name"));

        let (_, json) = app
            .send("GET", "/api/v1/clinic-rooms?search=b-2", None)
            .await;
        assert_eq!(json["pagination"]["total"], 1);

        let (status, _) = app
            .send("GET", "/api/v1/clinic-rooms?roomType=Ballroom", None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn storage_failure_on_list_is_400_pagination_error() {
        let app = TestApp::new();
        app.repos.set_unavailable(true);
        let (status, json) = app.send("GET", "/api/v1/clinic-rooms", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Pagination error:"));
    }

    #[tokio::test]
    async fn update_room_changes_fields() {
        let app = TestApp::new();
        let room = app.create_room("C-1").await;
        let uri = format!("/api/v1/clinic-rooms/{}", room["id"].as_str().unwrap());
        let (status, json) = app
            .send("PUT", &uri, Some(json!({"capacity": 4, "equipment": ["ecg"]})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["capacity"], 4);
        assert_eq!(json["data"]["equipment"], json!(["ecg"]));
        assert_eq!(json["data"]["roomNumber"], "C-1");
    }

    #[tokio::test]
    async fn slot_lifecycle_with_booking() {
        let app = TestApp::new();
        let room = app.create_room("C-1").await;
        let slot = app.create_slot(room["id"].as_str().unwrap(), 9).await;
        assert_eq!(slot["status"], "Available");
        assert_eq!(slot["durationMinutes"], 60);

        let book = format!("/api/v1/schedule-slots/{}/book", slot["id"].as_str().unwrap());
        let (status, json) = app
            .send("POST", &book, Some(json!({"practitioner": "Dr. Ito"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "Booked");
        assert_eq!(json["data"]["practitioner"], "Dr. Ito");

        let (status, _) = app.send("POST", &book, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn slot_with_inverted_window_is_400() {
        let app = TestApp::new();
        let room = app.create_room("C-1").await;
        let (status, json) = app
            .send(
                "POST",
                "/api/v1/schedule-slots",
                Some(json!({
                    "roomId": room["id"],
                    "startTime": "2024-05-06T10:00:00Z",
                    "endTime": "2024-05-06T09:00:00Z",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("endTime"));
    }

    #[tokio::test]
    async fn slot_for_unknown_room_is_404() {
        let app = TestApp::new();
        let (status, _) = app
            .send(
                "POST",
                "/api/v1/schedule-slots",
                Some(json!({
                    "roomId": "ghost",
                    "startTime": "2024-05-06T09:00:00Z",
                    "endTime": "2024-05-06T10:00:00Z",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn slot_list_embeds_room() {
        let app = TestApp::new();
        let room = app.create_room("C-1").await;
        let room_id = room["id"].as_str().unwrap();
        for hour in [9, 10] {
            app.create_slot(room_id, hour).await;
        }

        let (status, json) = app
            .send("GET", "/api/v1/schedule-slots?sortBy=startTime&sortOrder=asc", None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["room"]["roomNumber"], "C-1");
        assert_eq!(data[0]["roomId"], room_id);
    }

    #[tokio::test]
    async fn room_slots_endpoint_scopes_to_room() {
        let app = TestApp::new();
        let a = app.create_room("A-1").await;
        let b = app.create_room("B-1").await;
        app.create_slot(a["id"].as_str().unwrap(), 9).await;
        app.create_slot(a["id"].as_str().unwrap(), 10).await;
        app.create_slot(b["id"].as_str().unwrap(), 9).await;

        let uri = format!(
            "/api/v1/clinic-rooms/{}/slots?limit=1",
            a["id"].as_str().unwrap()
        );
        let (status, json) = app.send("GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["pagination"]["total"], 2);
        assert_eq!(json["pagination"]["totalPages"], 2);

        let (status, _) = app
            .send("GET", "/api/v1/clinic-rooms/ghost/slots", None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_room_removes_its_slots() {
        let app = TestApp::new();
        let room = app.create_room("C-1").await;
        let slot = app.create_slot(room["id"].as_str().unwrap(), 9).await;

        let uri = format!("/api/v1/clinic-rooms/{}", room["id"].as_str().unwrap());
        let (status, json) = app.send("DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Clinic room deleted");

        let slot_uri = format!("/api/v1/schedule-slots/{}", slot["id"].as_str().unwrap());
        let (status, _) = app.send("GET", &slot_uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_storage_state() {
        let app = TestApp::new();
        let (status, json) = app.send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"]["status"], "ok");

        app.repos.set_unavailable(true);
        let (status, json) = app.send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["status"], "degraded");
    }

    #[tokio::test]
    async fn request_id_is_echoed_or_generated() {
        let app = TestApp::new();
        let (_, echoed, _) = app.send_raw("GET", "/health", None, Some("abc-123")).await;
        assert_eq!(echoed.as_deref(), Some("abc-123"));

        let (_, generated, _) = app.send_raw("GET", "/health", None, None).await;
        assert_eq!(generated.map(|id| id.len()), Some(36));
    }

    #[tokio::test]
    async fn metrics_route_absent_without_recorder() {
        let app = TestApp::new();
        let (status, _) = app.send("GET", "/metrics", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn openapi_lists_resource_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/clinic-rooms"));
        assert!(doc.paths.paths.contains_key("/api/v1/schedule-slots/{id}/book"));
    }
}
