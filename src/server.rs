//! Reusable ExpirySync server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, seeding, REST API, the status refresh sweep,
//! metrics, and graceful shutdown.
//!
//! Both the root binary and the CLI use this to start/stop the service
//! without duplicating bootstrap code.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::services::{
    InventoryService, RefreshConfig, SnapshotService, StatusRefreshMonitor,
};
use crate::application::simulator::SimulatorService;
use crate::config::AppConfig;
use crate::domain::product::{Product, ProductDraft};
use crate::domain::profile::StoreProfile;
use crate::domain::repositories::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{
    create_api_router, create_event_bus, init_database, DatabaseConfig, SeaOrmRepositoryProvider,
    SharedEventBus,
};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the ExpirySync server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed the demo data set when the store is empty (default: true).
    pub seed_demo_data: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_demo_data: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running ExpirySync server.
///
/// Provides access to internal components (repos, event bus, services)
/// and methods for graceful shutdown.
///
/// # Examples
///
/// ```rust,no_run
/// use expirysync::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Shared event bus for real-time notifications.
    pub event_bus: SharedEventBus,
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Inventory service for record access.
    pub inventory: Arc<InventoryService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// API port the server is listening on.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the ExpirySync server with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations
    /// 3. Seed the default profile (and demo products, if enabled)
    /// 4. Start the REST API server (with Swagger UI)
    /// 5. Start the status refresh sweep
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting ExpirySync...");

        // ── Prometheus metrics recorder ────────────────────────
        // The global metrics recorder can only be installed once per process.
        // On restart (stop + start within the same process) we must reuse it.
        use std::sync::OnceLock;
        static PROM_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
            OnceLock::new();

        let prometheus_handle = PROM_HANDLE
            .get_or_init(|| {
                let h = metrics_exporter_prometheus::PrometheusBuilder::new()
                    .install_recorder()
                    .expect("Failed to install Prometheus metrics recorder");
                info!("📊 Prometheus metrics recorder installed");
                h
            })
            .clone();

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
        };
        info!("Database: {}", db_config.url);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let event_bus = create_event_bus();
        info!("🔔 Event bus initialized for real-time notifications");

        let inventory = Arc::new(InventoryService::new(repos.clone(), event_bus.clone()));
        let simulator = Arc::new(SimulatorService::new(repos.clone(), event_bus.clone()));
        let snapshot = Arc::new(SnapshotService::new(repos.clone(), event_bus.clone()));

        // ── Seeding ────────────────────────────────────────────
        seed_default_profile(repos.as_ref(), &app_cfg).await;
        if opts.seed_demo_data && app_cfg.store.seed_demo_data {
            seed_demo_products(repos.as_ref()).await;
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── Background tasks ───────────────────────────────────
        let refresh = StatusRefreshMonitor::new(repos.clone(), event_bus.clone()).with_config(
            RefreshConfig {
                interval_secs: app_cfg.refresh.interval_secs,
            },
        );
        refresh.start(shutdown_signal.clone());

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(
            repos.clone(),
            db.clone(),
            event_bus.clone(),
            inventory.clone(),
            simulator,
            snapshot,
            prometheus_handle,
        );

        let api_port = app_cfg.server.api_port;
        let api_addr = format!("{}:{}", app_cfg.server.api_host, api_port);
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        info!("🚀 Server started.");

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            event_bus,
            repos,
            inventory,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// Sends the shutdown signal to all server components. Call [`Self::wait`]
    /// to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        if let Err(e) = self.api_task.await {
            error!("REST API server task panicked: {}", e);
        } else {
            info!("REST API server stopped");
        }

        // Close database connection
        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 ExpirySync shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down ExpirySync...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Seed the store profile from config if none exists.
async fn seed_default_profile(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    match repos.profile().get().await {
        Ok(Some(_)) => {}
        Ok(None) => {
            info!("Creating default store profile...");
            let profile = StoreProfile {
                name: app_cfg.store.manager_name.clone(),
                email: app_cfg.store.manager_email.clone(),
                role: app_cfg.store.manager_role.clone(),
                store_name: app_cfg.store.store_name.clone(),
            };
            if let Err(e) = repos.profile().set(profile).await {
                error!("Failed to create default profile: {}", e);
            }
        }
        Err(e) => error!("Failed to read profile: {}", e),
    }
}

/// Seed the demo product set. Only ever runs against an empty store.
async fn seed_demo_products(repos: &dyn RepositoryProvider) {
    let count = match repos.products().count().await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count products: {}", e);
            return;
        }
    };
    if count > 0 {
        return;
    }

    info!("Seeding demo products...");
    let today = Utc::now().date_naive();

    let demo: [(&str, &str, i32, i64, &str, f64); 5] = [
        ("Fresh Milk", "Dairy", 25, 2, "Dairy Corp", 2.99),
        ("Organic Eggs", "Dairy", 12, 30, "Farm Fresh", 4.50),
        ("Whole Wheat Bread", "Bakery", 8, -1, "Bakery Inc", 3.25),
        ("Greek Yogurt", "Dairy", 15, 5, "Yogurt Co", 1.99),
        ("Orange Juice", "Beverages", 20, 45, "Juice Factory", 3.75),
    ];

    for (name, category, quantity, days, supplier, price) in demo {
        let product = Product::from_draft(
            format!("prod_{}", uuid::Uuid::new_v4().simple()),
            ProductDraft {
                name: name.to_string(),
                category: category.to_string(),
                quantity,
                expiry_date: today + Duration::days(days),
                supplier: Some(supplier.to_string()),
                price: Some(price),
            },
            today,
        );
        if let Err(e) = repos.products().insert(product).await {
            error!("Failed to seed product {}: {}", name, e);
        }
    }
    info!("Demo products seeded");
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
