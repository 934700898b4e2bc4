//! SeaORM implementation of ProfileRepository

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::profile::{ProfileRepository, StoreProfile};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::profile::{self, PROFILE_ROW_ID};

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

pub struct SeaOrmProfileRepository {
    db: DatabaseConnection,
}

impl SeaOrmProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for SeaOrmProfileRepository {
    async fn get(&self) -> DomainResult<Option<StoreProfile>> {
        let model = profile::Entity::find_by_id(PROFILE_ROW_ID)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(|m| StoreProfile {
            name: m.name,
            email: m.email,
            role: m.role,
            store_name: m.store_name,
        }))
    }

    async fn set(&self, p: StoreProfile) -> DomainResult<StoreProfile> {
        let existing = profile::Entity::find_by_id(PROFILE_ROW_ID)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let model = profile::ActiveModel {
            id: Set(PROFILE_ROW_ID),
            name: Set(p.name.clone()),
            email: Set(p.email.clone()),
            role: Set(p.role.clone()),
            store_name: Set(p.store_name.clone()),
            updated_at: Set(Utc::now()),
        };

        if existing.is_some() {
            model.update(&self.db).await.map_err(db_err)?;
        } else {
            model.insert(&self.db).await.map_err(db_err)?;
        }
        info!("Store profile saved: {} ({})", p.name, p.store_name);
        Ok(p)
    }
}
