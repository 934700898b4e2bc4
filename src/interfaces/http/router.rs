//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{InventoryService, SnapshotService};
use crate::application::simulator::SimulatorService;
use crate::domain::repositories::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::interfaces::http::modules::{
    dashboard, health, metrics as metrics_module, operations, products, profile, snapshot,
};
use crate::interfaces::http::modules::products::ProductDto;
use crate::interfaces::ws::{create_notification_state, ws_notifications_handler};
use crate::notifications::SharedEventBus;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Products
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::search_products,
        products::get_expiring,
        products::get_low_stock,
        products::get_urgent,
        products::get_recent,
        products::export_csv,
        // Dashboard
        dashboard::get_stats,
        dashboard::get_alerts,
        // Operations
        operations::list_operations,
        operations::clear_operations,
        operations::simulate,
        operations::simulate_all,
        // Profile
        profile::get_profile,
        profile::update_profile,
        // Snapshot
        snapshot::export_snapshot,
        snapshot::import_snapshot,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<ProductDto>,
            PaginationParams,
            // Products
            ProductDto,
            products::CreateProductRequest,
            products::UpdateProductRequest,
            // Dashboard
            dashboard::InventoryStatsDto,
            dashboard::AlertsDto,
            dashboard::UrgentAlertDto,
            dashboard::ExpiringAlertDto,
            // Operations
            operations::OperationEntryDto,
            operations::SimulateRequest,
            operations::SimulatedOperationDto,
            // Profile
            profile::ProfileDto,
            profile::UpdateProfileRequest,
            // Snapshot
            snapshot::ImportSummaryDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Products", description = "Inventory product CRUD, queries and CSV export"),
        (name = "Dashboard", description = "Aggregate stats and urgency alerts"),
        (name = "Operations", description = "Bounded operation log and the decorative data-structure simulator"),
        (name = "Profile", description = "Store profile (static configuration, no auth)"),
        (name = "Snapshot", description = "Whole-state JSON export/import"),
        (name = "WebSocket Notifications", description = "Real-time event notifications via WebSocket"),
    ),
    info(
        title = "ExpirySync API",
        version = "1.0.0",
        description = "REST API for inventory-expiry tracking",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
#[allow(clippy::too_many_arguments)]
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    event_bus: SharedEventBus,
    inventory: Arc<InventoryService>,
    simulator: Arc<SimulatorService>,
    snapshot_service: Arc<SnapshotService>,
    prometheus_handle: PrometheusHandle,
) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Products
    let products_state = products::ProductsState {
        inventory: inventory.clone(),
    };
    let product_routes = Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route("/search", get(products::search_products))
        .route("/expiring", get(products::get_expiring))
        .route("/low-stock", get(products::get_low_stock))
        .route("/urgent", get(products::get_urgent))
        .route("/recent", get(products::get_recent))
        .route("/export/csv", get(products::export_csv))
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .with_state(products_state);

    // Dashboard
    let dashboard_routes = Router::new()
        .route("/stats", get(dashboard::get_stats))
        .route("/alerts", get(dashboard::get_alerts))
        .with_state(dashboard::DashboardState {
            inventory: inventory.clone(),
        });

    // Operations (log + simulator)
    let operation_routes = Router::new()
        .route(
            "/",
            get(operations::list_operations).delete(operations::clear_operations),
        )
        .route("/simulate", post(operations::simulate))
        .route("/simulate/all", post(operations::simulate_all))
        .with_state(operations::OperationsState {
            repos: repos.clone(),
            simulator,
        });

    // Profile
    let profile_routes = Router::new()
        .route(
            "/",
            get(profile::get_profile).put(profile::update_profile),
        )
        .with_state(profile::ProfileState {
            repos,
            event_bus: event_bus.clone(),
        });

    // Snapshot
    let snapshot_routes = Router::new()
        .route(
            "/",
            get(snapshot::export_snapshot).post(snapshot::import_snapshot),
        )
        .with_state(snapshot::SnapshotState {
            snapshot: snapshot_service,
        });

    // Notification WebSocket routes (no auth for WebSocket upgrade)
    let notification_state = create_notification_state(event_bus.clone());
    let notification_routes = Router::new()
        .route("/ws", get(ws_notifications_handler))
        .with_state(notification_state);

    let health_state = health::HealthState {
        db,
        event_bus,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = metrics_module::MetricsState {
        handle: prometheus_handle,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check).with_state(health_state))
        // Prometheus scrape endpoint
        .route(
            "/metrics",
            get(metrics_module::prometheus_metrics).with_state(metrics_state),
        )
        // Products
        .nest("/api/v1/products", product_routes)
        // Dashboard
        .nest("/api/v1/dashboard", dashboard_routes)
        // Operations
        .nest("/api/v1/operations", operation_routes)
        // Profile
        .nest("/api/v1/profile", profile_routes)
        // Snapshot
        .nest("/api/v1/snapshot", snapshot_routes)
        // Notifications WebSocket
        .nest("/api/v1/notifications", notification_routes)
        // Middleware
        .layer(middleware::from_fn(
            metrics_module::http_metrics_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
