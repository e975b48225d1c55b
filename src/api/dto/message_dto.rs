//! 消息 DTO

use serde::{Deserialize, Serialize};

pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful";
pub const RESOURCE_DELETED: &str = "Resource deleted successfully";
pub const MOCK_DATA_RETRIEVED: &str = "Mock data retrieved successfully";

/// 仅含消息的确认负载
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
