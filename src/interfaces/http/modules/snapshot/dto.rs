//! Snapshot DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::services::ImportSummary;

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportSummaryDto {
    /// Products now in the store
    pub products: usize,
    /// Whether the document carried a profile that replaced the stored one
    pub profile_replaced: bool,
}

impl From<ImportSummary> for ImportSummaryDto {
    fn from(s: ImportSummary) -> Self {
        Self {
            products: s.products,
            profile_replaced: s.profile_replaced,
        }
    }
}
