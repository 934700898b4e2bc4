//! Store profile repository interface

use async_trait::async_trait;

use super::model::StoreProfile;
use crate::domain::DomainResult;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get(&self) -> DomainResult<Option<StoreProfile>>;
    /// Insert-or-replace the single stored profile.
    async fn set(&self, profile: StoreProfile) -> DomainResult<StoreProfile>;
}
