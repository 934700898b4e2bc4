//! SeaORM implementation of OperationLogRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::operation_log::{OperationEntry, OperationLogRepository, LOG_CAPACITY};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::operation_entry;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn entity_to_domain(e: operation_entry::Model) -> OperationEntry {
    OperationEntry {
        id: e.id,
        timestamp: e.timestamp,
        structure: e.structure,
        operation: e.operation,
        description: e.description,
        source: e.source,
        product_count: e.product_count,
    }
}

pub struct SeaOrmOperationLogRepository {
    db: DatabaseConnection,
}

impl SeaOrmOperationLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OperationLogRepository for SeaOrmOperationLogRepository {
    async fn append(&self, entry: OperationEntry) -> DomainResult<OperationEntry> {
        let model = operation_entry::ActiveModel {
            id: Set(entry.id.clone()),
            timestamp: Set(entry.timestamp),
            structure: Set(entry.structure.clone()),
            operation: Set(entry.operation.clone()),
            description: Set(entry.description.clone()),
            source: Set(entry.source.clone()),
            product_count: Set(entry.product_count),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;

        // Ring behavior: drop the oldest rows beyond capacity
        let total = operation_entry::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;
        if total as usize > LOG_CAPACITY {
            let excess = total as usize - LOG_CAPACITY;
            let stale: Vec<String> = operation_entry::Entity::find()
                .order_by_asc(operation_entry::Column::Timestamp)
                .order_by_asc(operation_entry::Column::Id)
                .limit(excess as u64)
                .all(&self.db)
                .await
                .map_err(db_err)?
                .into_iter()
                .map(|m| m.id)
                .collect();
            operation_entry::Entity::delete_many()
                .filter(operation_entry::Column::Id.is_in(stale))
                .exec(&self.db)
                .await
                .map_err(db_err)?;
            debug!("Operation log trimmed: dropped {} oldest entries", excess);
        }

        Ok(entity_to_domain(result))
    }

    async fn recent(&self, limit: usize) -> DomainResult<Vec<OperationEntry>> {
        let models = operation_entry::Entity::find()
            .order_by_desc(operation_entry::Column::Timestamp)
            .order_by_desc(operation_entry::Column::Id)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        operation_entry::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn clear(&self) -> DomainResult<()> {
        operation_entry::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
