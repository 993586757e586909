//! Event loop - long-polls the transport and feeds commands to the dispatcher

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::Dispatcher;
use crate::domain::entities::Update;
use crate::domain::traits::Bot;

/// Default long-poll window in seconds
pub const DEFAULT_POLL_TIMEOUT: u64 = 60;

/// Sequential consumer of the transport's update stream
pub struct EventLoop {
    bot: Arc<dyn Bot>,
    dispatcher: Dispatcher,
    poll_timeout: u64,
    error_delay: Duration,
    offset: i64,
}

impl EventLoop {
    pub fn new(bot: Arc<dyn Bot>, dispatcher: Dispatcher) -> Self {
        Self {
            bot,
            dispatcher,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            error_delay: Duration::from_secs(5),
            offset: 0,
        }
    }

    pub fn with_poll_timeout(mut self, seconds: u64) -> Self {
        self.poll_timeout = seconds;
        self
    }

    pub fn with_error_delay(mut self, delay: Duration) -> Self {
        self.error_delay = delay;
        self
    }

    #[cfg(test)]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Offset acknowledging every update in the batch
    pub fn next_offset(current: i64, updates: &[Update]) -> i64 {
        updates
            .iter()
            .map(|u| u.update_id + 1)
            .max()
            .map_or(current, |next| next.max(current))
    }

    /// Fetch one batch and process each update to completion, in order
    pub async fn poll_once(&mut self) -> Result<usize, BotError> {
        let updates = self.bot.get_updates(self.offset, self.poll_timeout).await?;
        if !updates.is_empty() {
            tracing::debug!("Received {} updates", updates.len());
        }

        // The transport only learns the new offset from the next get_updates call
        self.offset = Self::next_offset(self.offset, &updates);

        for update in &updates {
            let Some(message) = &update.message else {
                continue;
            };
            self.dispatcher.dispatch(message).await;
        }

        Ok(updates.len())
    }

    /// Run until `shutdown` resolves
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!("Starting message loop...");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                result = self.poll_once() => {
                    if let Err(e) = result {
                        tracing::error!("Failed to get updates: {}", e);
                        tokio::select! {
                            _ = &mut shutdown => break,
                            _ = tokio::time::sleep(self.error_delay) => {}
                        }
                    }
                }
            }
        }

        tracing::info!("Message loop stopped");
    }
}
