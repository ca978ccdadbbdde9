use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminCheckResponse {
    pub address: String,
    /// `None` when the contract could not be queried
    pub is_admin: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerResponse {
    pub owner: Option<String>,
}
