use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateQueueRequest {
    pub guild_id: String,
    pub owner_id: String,
    pub game_name: String,
    pub max_players: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JoinQueueRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeaveQueuesRequest {
    pub guild_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
