//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::product::{Product, ProductRepository, ProductStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::product;

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn entity_to_domain(p: product::Model) -> Product {
    Product {
        id: p.id,
        name: p.name,
        category: p.category,
        quantity: p.quantity,
        expiry_date: p.expiry_date,
        status: match p.status {
            product::ProductStatus::Healthy => ProductStatus::Healthy,
            product::ProductStatus::ExpiringSoon => ProductStatus::ExpiringSoon,
            product::ProductStatus::Expired => ProductStatus::Expired,
        },
        priority: p.priority,
        supplier: p.supplier,
        price: p.price,
        added_date: p.added_date,
        created_at: p.created_at,
        updated_at: p.updated_at,
    }
}

fn status_to_entity(status: ProductStatus) -> product::ProductStatus {
    match status {
        ProductStatus::Healthy => product::ProductStatus::Healthy,
        ProductStatus::ExpiringSoon => product::ProductStatus::ExpiringSoon,
        ProductStatus::Expired => product::ProductStatus::Expired,
    }
}

fn domain_to_active(p: &Product) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(p.id.clone()),
        name: Set(p.name.clone()),
        category: Set(p.category.clone()),
        quantity: Set(p.quantity),
        expiry_date: Set(p.expiry_date),
        status: Set(status_to_entity(p.status)),
        priority: Set(p.priority),
        supplier: Set(p.supplier.clone()),
        price: Set(p.price),
        added_date: Set(p.added_date),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

// ── SeaOrmProductRepository ─────────────────────────────────────

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Product>> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn insert(&self, p: Product) -> DomainResult<Product> {
        let model = domain_to_active(&p);
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Product saved: {} ({})", result.name, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, p: Product) -> DomainResult<()> {
        let existing = product::Entity::find_by_id(&p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Product",
                field: "id",
                value: p.id.clone(),
            });
        };

        let mut model = domain_to_active(&p);
        model.created_at = Set(existing.created_at);
        model.updated_at = Set(Utc::now());
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn search(&self, text: &str) -> DomainResult<Vec<Product>> {
        // SQLite LIKE is case-insensitive for ASCII
        let models = product::Entity::find()
            .filter(
                Condition::any()
                    .add(product::Column::Name.contains(text))
                    .add(product::Column::Category.contains(text))
                    .add(product::Column::Id.contains(text))
                    .add(product::Column::Supplier.contains(text)),
            )
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn replace_all(&self, products: Vec<Product>) -> DomainResult<usize> {
        product::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        let count = products.len();
        if count > 0 {
            let models: Vec<product::ActiveModel> =
                products.iter().map(domain_to_active).collect();
            product::Entity::insert_many(models)
                .exec(&self.db)
                .await
                .map_err(db_err)?;
        }
        info!("Product collection replaced: {} records", count);
        Ok(count)
    }

    async fn count(&self) -> DomainResult<u64> {
        product::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
