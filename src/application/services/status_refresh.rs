//! Status refresh sweep
//!
//! Derived status/priority drift as the calendar advances: a record that was
//! eight days out yesterday is seven days out today. This background task
//! periodically re-reads the collection, re-derives the cached fields,
//! persists the records that moved and publishes a refresh event. It is a
//! fire-and-forget tick, not coordinated with in-flight mutations.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};

use crate::domain::repositories::RepositoryProvider;
use crate::domain::DomainResult;
use crate::notifications::{Event, SharedEventBus, StatusRefreshedEvent};
use crate::shared::shutdown::ShutdownSignal;

/// Configuration for the refresh sweep
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// How often to re-derive cached fields (in seconds)
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

/// Periodic derived-field refresh task.
pub struct StatusRefreshMonitor {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
    config: RefreshConfig,
}

impl StatusRefreshMonitor {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self {
            repos,
            event_bus,
            config: RefreshConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RefreshConfig) -> Self {
        self.config = config;
        self
    }

    /// Spawn the background task.
    pub fn start(&self, shutdown: ShutdownSignal) {
        let repos = self.repos.clone();
        let event_bus = self.event_bus.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            info!(
                "Status refresh sweep started (interval: {}s)",
                config.interval_secs
            );

            let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs));
            // the first tick fires immediately; skip it so startup seeding settles
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match refresh_once(repos.as_ref()).await {
                            Ok(0) => {}
                            Ok(updated) => {
                                event_bus.publish(Event::StatusRefreshed(StatusRefreshedEvent {
                                    updated,
                                    timestamp: Utc::now(),
                                }));
                                metrics::counter!("status_refresh_updates_total")
                                    .increment(updated as u64);
                            }
                            Err(e) => {
                                warn!("Status refresh error: {}", e);
                            }
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!("Status refresh sweep shutting down");
                        break;
                    }
                }
            }
        });
    }
}

/// One sweep over the collection; returns how many records were re-derived.
pub async fn refresh_once(repos: &dyn RepositoryProvider) -> DomainResult<usize> {
    let today = Utc::now().date_naive();
    let products = repos.products().find_all().await?;

    let mut updated = 0;
    for mut product in products {
        if product.refresh_derived(today) {
            debug!(
                "Derived fields refreshed for {}: {} / priority {}",
                product.id, product.status, product.priority
            );
            repos.products().update(product).await?;
            updated += 1;
        }
    }
    Ok(updated)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{Product, ProductDraft, ProductStatus};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::Duration as ChronoDuration;

    #[tokio::test]
    async fn sweep_fixes_drifted_fields_and_reports_count() {
        let repos = InMemoryRepositoryProvider::new();
        let today = Utc::now().date_naive();

        // derived as-of ten days ago: cached Healthy although the date is now close
        let stale_basis = today - ChronoDuration::days(10);
        let drifted = Product::from_draft(
            "prod_1".into(),
            ProductDraft {
                name: "Fresh Milk".into(),
                category: "Dairy".into(),
                quantity: 5,
                expiry_date: today + ChronoDuration::days(2),
                supplier: None,
                price: None,
            },
            stale_basis,
        );
        assert_eq!(drifted.status, ProductStatus::Healthy);
        repos.products().insert(drifted).await.unwrap();

        // already current
        let fresh = Product::from_draft(
            "prod_2".into(),
            ProductDraft {
                name: "Orange Juice".into(),
                category: "Beverages".into(),
                quantity: 20,
                expiry_date: today + ChronoDuration::days(45),
                supplier: None,
                price: None,
            },
            today,
        );
        repos.products().insert(fresh).await.unwrap();

        let updated = refresh_once(&repos).await.unwrap();
        assert_eq!(updated, 1);

        let fixed = repos
            .products()
            .find_by_id("prod_1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fixed.status, ProductStatus::ExpiringSoon);
        assert_eq!(fixed.priority, 1);

        // second sweep finds nothing to do
        assert_eq!(refresh_once(&repos).await.unwrap(), 0);
    }
}
