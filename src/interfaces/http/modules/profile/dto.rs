//! Store profile DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::profile::StoreProfile;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileDto {
    pub name: String,
    pub email: String,
    pub role: String,
    pub store_name: String,
}

impl From<StoreProfile> for ProfileDto {
    fn from(p: StoreProfile) -> Self {
        Self {
            name: p.name,
            email: p.email,
            role: p.role,
            store_name: p.store_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "invalid email address"))]
    pub email: Option<String>,
    pub role: Option<String>,
    #[validate(length(min = 1, max = 100, message = "store name must not be empty"))]
    pub store_name: Option<String>,
}
