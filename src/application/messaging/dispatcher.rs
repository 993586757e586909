//! Command dispatcher - Routes commands to handlers and sends one reply each

use std::sync::Arc;

use crate::application::errors::StorageError;
use crate::domain::entities::{Command, Content, Message};
use crate::domain::traits::{Bot, UserStore, WeatherProvider};

/// Fixed user-facing replies
pub mod replies {
    pub const GENERIC_ERROR: &str = "An error occurred";
    pub const CITY_NOT_SET: &str = "Set a city first with the /city command\nFor example: '/city London'";
    pub const NO_COORDINATES: &str = "Could not obtain coordinates";
    pub const NO_WEATHER: &str = "Could not obtain weather for this location";
    pub const UNKNOWN_COMMAND: &str = "This command is not available";

    pub fn city_saved(city: &str) -> String {
        format!("City {} saved", city)
    }

    pub fn temperature(city: &str, celsius: i64) -> String {
        format!("Temperature in {}: {}°C", city, celsius)
    }
}

/// Everything a command handler needs from the inbound message
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub user_id: i64,
    pub username: Option<String>,
    pub chat_id: i64,
    pub message_id: i64,
    pub command: Command,
    pub args: String,
    pub raw_text: String,
}

impl CommandContext {
    /// Returns `None` for non-command messages and messages without a sender
    pub fn from_message(message: &Message) -> Option<Self> {
        let Content::Command { name, args } = &message.content else {
            return None;
        };
        let sender = message.sender.as_ref()?;

        Some(Self {
            user_id: sender.id,
            username: sender.username.clone(),
            chat_id: message.chat_id,
            message_id: message.id,
            command: Command::from_name(name),
            args: args.clone(),
            raw_text: message.raw_text.clone(),
        })
    }
}

/// Command dispatcher with injected store, weather provider and transport
pub struct Dispatcher {
    store: Arc<dyn UserStore>,
    weather: Arc<dyn WeatherProvider>,
    bot: Arc<dyn Bot>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn UserStore>, weather: Arc<dyn WeatherProvider>, bot: Arc<dyn Bot>) -> Self {
        Self { store, weather, bot }
    }

    /// Handle one inbound message. Non-commands are ignored.
    pub async fn dispatch(&self, message: &Message) {
        if !message.content.is_command() {
            return;
        }
        let Some(ctx) = CommandContext::from_message(message) else {
            tracing::debug!("Ignoring command without sender in chat {}", message.chat_id);
            return;
        };

        tracing::info!("Command /{} from {}", ctx.command.name(), ctx.user_id);

        if let Err(e) = self.ensure_user(ctx.user_id).await {
            tracing::error!("ensure_user failed for {}: {}", ctx.user_id, e);
            self.reply(&ctx, replies::GENERIC_ERROR).await;
            return;
        }

        match ctx.command {
            Command::City => self.set_city(&ctx).await,
            Command::Weather => self.send_weather(&ctx).await,
            Command::Unknown(_) => self.unknown_command(&ctx).await,
        }
    }

    /// Create the user record on first sight
    pub async fn ensure_user(&self, user_id: i64) -> Result<(), StorageError> {
        if self.store.get_user(user_id).await?.is_none() {
            self.store.create_user(user_id).await?;
            tracing::info!("Created user {}", user_id);
        }
        Ok(())
    }

    pub async fn set_city(&self, ctx: &CommandContext) {
        let city = ctx.args.as_str();

        if let Err(e) = self.store.update_city(ctx.user_id, city).await {
            tracing::error!("update_city failed for {}: {}", ctx.user_id, e);
            self.reply(ctx, replies::GENERIC_ERROR).await;
            return;
        }

        self.reply(ctx, &replies::city_saved(city)).await;
    }

    pub async fn send_weather(&self, ctx: &CommandContext) {
        let city = match self.store.get_city(ctx.user_id).await {
            Ok(city) => city,
            Err(e) => {
                tracing::error!("get_city failed for {}: {}", ctx.user_id, e);
                self.reply(ctx, replies::GENERIC_ERROR).await;
                return;
            }
        };

        if city.is_empty() {
            self.reply(ctx, replies::CITY_NOT_SET).await;
            return;
        }

        let coordinates = match self.weather.coordinates(&city).await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                tracing::error!("coordinates failed for {:?}: {}", city, e);
                self.reply(ctx, replies::NO_COORDINATES).await;
                return;
            }
        };

        let weather = match self
            .weather
            .current_temperature(coordinates.latitude, coordinates.longitude)
            .await
        {
            Ok(weather) => weather,
            Err(e) => {
                tracing::error!(
                    "current_temperature failed for ({}, {}): {}",
                    coordinates.latitude,
                    coordinates.longitude,
                    e
                );
                self.reply(ctx, replies::NO_WEATHER).await;
                return;
            }
        };

        self.reply(ctx, &replies::temperature(&city, weather.rounded_celsius())).await;
    }

    pub async fn unknown_command(&self, ctx: &CommandContext) {
        tracing::warn!(
            "Unknown command [{}] {}",
            ctx.username.as_deref().unwrap_or("-"),
            ctx.raw_text
        );
        self.reply(ctx, replies::UNKNOWN_COMMAND).await;
    }

    /// Best-effort threaded reply; failures are only logged
    async fn reply(&self, ctx: &CommandContext, text: &str) {
        tracing::debug!("Replying to {} in {}: {}", ctx.message_id, ctx.chat_id, text);
        if let Err(e) = self.bot.send_reply(ctx.chat_id, text, ctx.message_id).await {
            tracing::warn!("Failed to send reply to chat {}: {}", ctx.chat_id, e);
        }
    }
}
