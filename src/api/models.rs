use indexmap::IndexMap;
use serde::Deserialize;

/// Successful `/chat` reply: the assistant text plus the backend's current
/// token-usage summary.
#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub token_info: String,
}

/// Role name mapped to role content, in response key order.
pub type RoleMap = IndexMap<String, String>;
