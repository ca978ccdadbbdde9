use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub connected_account: Option<String>,
    pub wallet_present: bool,
    pub read_ready: bool,
    pub write_ready: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SwitchAccountRequest {
    pub address: String,
}
