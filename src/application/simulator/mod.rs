//! Decorative operation simulator
//!
//! Maps an operation tag to a canned description and a pre-written source
//! snippet for display, and appends a matching operation-log entry. It
//! never touches the record store and carries no data-structure semantics;
//! the snippets are display strings only.

mod snippets;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::operation_log::OperationEntry;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};
use crate::notifications::{Event, OperationLoggedEvent, SharedEventBus};

/// The simulated backend operations the UI can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationTag {
    StackPush,
    StackPop,
    QueueEnqueue,
    QueueDequeue,
    PriorityQueueInsert,
    PriorityQueueRemove,
    QuickSort,
    BinarySearch,
}

impl OperationTag {
    pub const ALL: [OperationTag; 8] = [
        Self::StackPush,
        Self::StackPop,
        Self::QueueEnqueue,
        Self::QueueDequeue,
        Self::PriorityQueueInsert,
        Self::PriorityQueueRemove,
        Self::QuickSort,
        Self::BinarySearch,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "STACK_PUSH" => Some(Self::StackPush),
            "STACK_POP" => Some(Self::StackPop),
            "QUEUE_ENQUEUE" => Some(Self::QueueEnqueue),
            "QUEUE_DEQUEUE" => Some(Self::QueueDequeue),
            "PRIORITY_QUEUE_INSERT" => Some(Self::PriorityQueueInsert),
            "PRIORITY_QUEUE_REMOVE" => Some(Self::PriorityQueueRemove),
            "QUICK_SORT" => Some(Self::QuickSort),
            "BINARY_SEARCH" => Some(Self::BinarySearch),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::StackPush => "STACK_PUSH",
            Self::StackPop => "STACK_POP",
            Self::QueueEnqueue => "QUEUE_ENQUEUE",
            Self::QueueDequeue => "QUEUE_DEQUEUE",
            Self::PriorityQueueInsert => "PRIORITY_QUEUE_INSERT",
            Self::PriorityQueueRemove => "PRIORITY_QUEUE_REMOVE",
            Self::QuickSort => "QUICK_SORT",
            Self::BinarySearch => "BINARY_SEARCH",
        }
    }

    /// Structure label shown next to the snippet.
    pub fn structure(&self) -> &'static str {
        match self {
            Self::StackPush | Self::StackPop => "STACK",
            Self::QueueEnqueue | Self::QueueDequeue => "QUEUE",
            Self::PriorityQueueInsert | Self::PriorityQueueRemove => "PRIORITY QUEUE",
            Self::QuickSort => "SORTING",
            Self::BinarySearch => "SEARCHING",
        }
    }

    /// Operation label for the log.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::StackPush => "PUSH",
            Self::StackPop => "POP",
            Self::QueueEnqueue => "ENQUEUE",
            Self::QueueDequeue => "DEQUEUE",
            Self::PriorityQueueInsert => "INSERT",
            Self::PriorityQueueRemove => "REMOVE",
            Self::QuickSort => "QUICK SORT",
            Self::BinarySearch => "BINARY SEARCH",
        }
    }

    /// Canned description, with the context interpolated when present.
    pub fn description(&self, ctx: &SimulationContext) -> String {
        let product = ctx.product_name.as_deref().unwrap_or("product");
        let term = ctx.search_term.as_deref().unwrap_or("product");
        match self {
            Self::StackPush => format!("Added \"{}\" to inventory stack", product),
            Self::StackPop => "Removed most recent product from stack".to_string(),
            Self::QueueEnqueue => format!("Added \"{}\" to expiry queue", product),
            Self::QueueDequeue => "Processed next expired product from queue".to_string(),
            Self::PriorityQueueInsert => {
                format!("Inserted \"{}\" into priority queue", product)
            }
            Self::PriorityQueueRemove => "Removed highest priority product".to_string(),
            Self::QuickSort => "Sorted products by expiry date using Quick Sort".to_string(),
            Self::BinarySearch => format!("Searching for \"{}\" using Binary Search", term),
        }
    }

    /// The pre-written source snippet shown to the user.
    pub fn snippet(&self) -> &'static str {
        match self {
            Self::StackPush => snippets::STACK_PUSH,
            Self::StackPop => snippets::STACK_POP,
            Self::QueueEnqueue => snippets::QUEUE_ENQUEUE,
            Self::QueueDequeue => snippets::QUEUE_DEQUEUE,
            Self::PriorityQueueInsert => snippets::PRIORITY_QUEUE_INSERT,
            Self::PriorityQueueRemove => snippets::PRIORITY_QUEUE_REMOVE,
            Self::QuickSort => snippets::QUICK_SORT,
            Self::BinarySearch => snippets::BINARY_SEARCH,
        }
    }
}

/// Optional context interpolated into descriptions.
#[derive(Debug, Clone, Default)]
pub struct SimulationContext {
    pub product_name: Option<String>,
    pub search_term: Option<String>,
}

/// A fabricated backend operation, ready for display.
#[derive(Debug, Clone)]
pub struct SimulatedOperation {
    pub id: String,
    pub tag: &'static str,
    pub structure: &'static str,
    pub operation: &'static str,
    pub description: String,
    pub code: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub struct SimulatorService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl SimulatorService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    /// Fabricate one operation: log it, notify, hand back the display data.
    pub async fn simulate(
        &self,
        tag: OperationTag,
        ctx: SimulationContext,
        source: Option<String>,
    ) -> DomainResult<SimulatedOperation> {
        let description = tag.description(&ctx);
        let product_count = self.repos.products().count().await? as i32;

        let entry = OperationEntry::new(
            tag.structure(),
            tag.operation(),
            description.clone(),
            source,
            product_count,
        );
        let entry = self.repos.operations().append(entry).await?;
        self.event_bus
            .publish(Event::OperationLogged(OperationLoggedEvent {
                entry_id: entry.id.clone(),
                structure: entry.structure.clone(),
                operation: entry.operation.clone(),
                description: entry.description.clone(),
                timestamp: entry.timestamp,
            }));

        debug!(tag = tag.tag(), "simulated operation");
        Ok(SimulatedOperation {
            id: format!("sim_{}", uuid::Uuid::new_v4().simple()),
            tag: tag.tag(),
            structure: tag.structure(),
            operation: tag.operation(),
            description,
            code: tag.snippet(),
            timestamp: entry.timestamp,
        })
    }

    /// Resolve a product id into a context carrying its name.
    pub async fn context_for_product(&self, product_id: &str) -> DomainResult<SimulationContext> {
        let product = self.repos.products().find_by_id(product_id).await?;
        let Some(product) = product else {
            return Err(DomainError::NotFound {
                entity: "Product",
                field: "id",
                value: product_id.to_string(),
            });
        };
        Ok(SimulationContext {
            product_name: Some(product.name),
            search_term: None,
        })
    }

    /// The canned demo sequence the dashboard button runs.
    pub async fn simulate_all(&self, source: Option<String>) -> DomainResult<Vec<SimulatedOperation>> {
        let steps: [(OperationTag, SimulationContext); 5] = [
            (
                OperationTag::StackPush,
                SimulationContext {
                    product_name: Some("Test Product".to_string()),
                    search_term: None,
                },
            ),
            (OperationTag::QuickSort, SimulationContext::default()),
            (
                OperationTag::BinarySearch,
                SimulationContext {
                    product_name: None,
                    search_term: Some("Milk".to_string()),
                },
            ),
            (OperationTag::PriorityQueueRemove, SimulationContext::default()),
            (OperationTag::QueueDequeue, SimulationContext::default()),
        ];

        let mut operations = Vec::with_capacity(steps.len());
        for (tag, ctx) in steps {
            operations.push(self.simulate(tag, ctx, source.clone()).await?);
        }
        Ok(operations)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use crate::notifications::create_event_bus;

    fn service() -> (SimulatorService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        (
            SimulatorService::new(repos.clone(), create_event_bus()),
            repos,
        )
    }

    #[test]
    fn tag_parse_round_trip() {
        for tag in OperationTag::ALL {
            assert_eq!(OperationTag::parse(tag.tag()), Some(tag));
        }
        assert_eq!(OperationTag::parse("LINKED_LIST_REVERSE"), None);
    }

    #[test]
    fn labels_match_the_displayed_structure() {
        assert_eq!(OperationTag::StackPush.structure(), "STACK");
        assert_eq!(OperationTag::QueueDequeue.structure(), "QUEUE");
        assert_eq!(
            OperationTag::PriorityQueueInsert.structure(),
            "PRIORITY QUEUE"
        );
        assert_eq!(OperationTag::QuickSort.structure(), "SORTING");
        assert_eq!(OperationTag::BinarySearch.structure(), "SEARCHING");
    }

    #[test]
    fn descriptions_interpolate_context() {
        let ctx = SimulationContext {
            product_name: Some("Fresh Milk".into()),
            search_term: Some("Milk".into()),
        };
        assert_eq!(
            OperationTag::StackPush.description(&ctx),
            "Added \"Fresh Milk\" to inventory stack"
        );
        assert_eq!(
            OperationTag::BinarySearch.description(&ctx),
            "Searching for \"Milk\" using Binary Search"
        );
        // falls back to a generic noun without context
        assert_eq!(
            OperationTag::QueueEnqueue.description(&SimulationContext::default()),
            "Added \"product\" to expiry queue"
        );
    }

    #[tokio::test]
    async fn simulate_logs_and_returns_display_data() {
        let (svc, repos) = service();
        let op = svc
            .simulate(
                OperationTag::QuickSort,
                SimulationContext::default(),
                Some("dashboard".into()),
            )
            .await
            .unwrap();

        assert!(op.id.starts_with("sim_"));
        assert_eq!(op.structure, "SORTING");
        assert!(op.code.contains("quick_sort"));

        let log = repos.operations().recent(1).await.unwrap();
        assert_eq!(log[0].operation, "QUICK SORT");
        assert_eq!(log[0].source.as_deref(), Some("dashboard"));
    }

    #[tokio::test]
    async fn simulate_all_runs_the_canned_sequence() {
        let (svc, repos) = service();
        let ops = svc.simulate_all(None).await.unwrap();
        let tags: Vec<&str> = ops.iter().map(|o| o.tag).collect();
        assert_eq!(
            tags,
            [
                "STACK_PUSH",
                "QUICK_SORT",
                "BINARY_SEARCH",
                "PRIORITY_QUEUE_REMOVE",
                "QUEUE_DEQUEUE"
            ]
        );
        assert_eq!(repos.operations().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn context_for_missing_product_is_not_found() {
        let (svc, _repos) = service();
        let err = svc.context_for_product("prod_ghost").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
