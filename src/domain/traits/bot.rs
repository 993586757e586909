use async_trait::async_trait;
use crate::domain::entities::{CommandInfo, Update};
use crate::application::errors::BotError;

/// Bot trait - abstraction for the messaging transport
#[async_trait]
pub trait Bot: Send + Sync {
    /// Long-poll for updates starting at `offset`, waiting at most `timeout` seconds
    async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError>;

    /// Send a message threaded to `reply_to`, returning the new message ID
    async fn send_reply(&self, chat_id: i64, text: &str, reply_to: i64) -> Result<i64, BotError>;

    /// Publish the command menu
    async fn register_commands(&self, commands: &[CommandInfo]) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: i64,
    pub name: String,
    pub username: String,
}
