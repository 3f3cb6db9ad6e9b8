use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartSearchRequest {
    pub user_id: String,
    pub guild_id: String,
    pub game_name: String,
    pub game_mode: Option<String>,
    pub search_time: u32,
}
