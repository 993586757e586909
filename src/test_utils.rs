//! In-memory fakes of the domain traits, recording every call

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::errors::{BotError, LookupError, StorageError};
use crate::domain::entities::{CommandInfo, Content, Coordinates, Message, Sender, Update, User, Weather};
use crate::domain::traits::{Bot, BotInfo, UserStore, WeatherProvider};

/// Ordered log of calls across all fakes, e.g. `"create_user:1"`
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls_matching(log: &CallLog, prefix: &str) -> Vec<String> {
    log.lock()
        .unwrap()
        .iter()
        .filter(|c| c.starts_with(prefix))
        .cloned()
        .collect()
}

fn record(log: &CallLog, call: String) {
    log.lock().unwrap().push(call);
}

#[derive(Default, Clone, Copy)]
pub struct StoreFailures {
    pub get_user: bool,
    pub create_user: bool,
    pub update_city: bool,
    pub get_city: bool,
}

pub struct FakeStore {
    users: Mutex<HashMap<i64, User>>,
    pub fail: Mutex<StoreFailures>,
    log: CallLog,
}

impl FakeStore {
    pub fn new(log: &CallLog) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            fail: Mutex::new(StoreFailures::default()),
            log: log.clone(),
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().insert(user.id, user);
        self
    }

    pub fn failing(self, failures: StoreFailures) -> Self {
        *self.fail.lock().unwrap() = failures;
        self
    }

    pub fn user(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    fn failure(what: &str) -> StorageError {
        StorageError::Unavailable(format!("{} failed", what))
    }
}

#[async_trait]
impl UserStore for FakeStore {
    async fn get_city(&self, user_id: i64) -> Result<String, StorageError> {
        record(&self.log, format!("get_city:{}", user_id));
        if self.fail.lock().unwrap().get_city {
            return Err(Self::failure("get_city"));
        }
        self.users
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|u| u.city().to_string())
            .ok_or_else(|| StorageError::NotFound(format!("user {}", user_id)))
    }

    async fn create_user(&self, user_id: i64) -> Result<(), StorageError> {
        record(&self.log, format!("create_user:{}", user_id));
        if self.fail.lock().unwrap().create_user {
            return Err(Self::failure("create_user"));
        }
        self.users.lock().unwrap().insert(user_id, User::new(user_id));
        Ok(())
    }

    async fn update_city(&self, user_id: i64, city: &str) -> Result<(), StorageError> {
        record(&self.log, format!("update_city:{}:{}", user_id, city));
        if self.fail.lock().unwrap().update_city {
            return Err(Self::failure("update_city"));
        }
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            user.city = Some(city.to_string());
        }
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, StorageError> {
        record(&self.log, format!("get_user:{}", user_id));
        if self.fail.lock().unwrap().get_user {
            return Err(Self::failure("get_user"));
        }
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

pub struct FakeWeather {
    coordinates: Option<Coordinates>,
    temp_celsius: Option<f64>,
    log: CallLog,
}

impl FakeWeather {
    /// Resolves every city to (48.85, 2.35) at `temp_celsius`
    pub fn new(log: &CallLog, temp_celsius: f64) -> Self {
        Self {
            coordinates: Some(Coordinates::new(48.85, 2.35)),
            temp_celsius: Some(temp_celsius),
            log: log.clone(),
        }
    }

    pub fn without_coordinates(mut self) -> Self {
        self.coordinates = None;
        self
    }

    pub fn without_weather(mut self) -> Self {
        self.temp_celsius = None;
        self
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn coordinates(&self, city: &str) -> Result<Coordinates, LookupError> {
        record(&self.log, format!("coordinates:{}", city));
        self.coordinates
            .ok_or_else(|| LookupError::NotFound(city.to_string()))
    }

    async fn current_temperature(&self, latitude: f64, longitude: f64) -> Result<Weather, LookupError> {
        record(&self.log, format!("current_temperature:{}:{}", latitude, longitude));
        self.temp_celsius.map(Weather::new).ok_or(LookupError::Status(500))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReply {
    pub chat_id: i64,
    pub text: String,
    pub reply_to: i64,
}

pub struct RecordingBot {
    pub sent: Mutex<Vec<SentReply>>,
    pub polled_offsets: Mutex<Vec<i64>>,
    batches: Mutex<VecDeque<Result<Vec<Update>, BotError>>>,
    fail_sends: bool,
    log: CallLog,
}

impl RecordingBot {
    pub fn new(log: &CallLog) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            polled_offsets: Mutex::new(Vec::new()),
            batches: Mutex::new(VecDeque::new()),
            fail_sends: false,
            log: log.clone(),
        }
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Queue the result of the next `get_updates` call
    pub fn push_batch(&self, batch: Result<Vec<Update>, BotError>) {
        self.batches.lock().unwrap().push_back(batch);
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|r| r.text.clone()).collect()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn get_updates(&self, offset: i64, _timeout: u64) -> Result<Vec<Update>, BotError> {
        self.polled_offsets.lock().unwrap().push(offset);
        self.batches.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn send_reply(&self, chat_id: i64, text: &str, reply_to: i64) -> Result<i64, BotError> {
        record(&self.log, format!("send_reply:{}", chat_id));
        self.sent.lock().unwrap().push(SentReply {
            chat_id,
            text: text.to_string(),
            reply_to,
        });
        if self.fail_sends {
            return Err(BotError::Network("send failed".to_string()));
        }
        Ok(1000 + reply_to)
    }

    async fn register_commands(&self, _commands: &[CommandInfo]) -> Result<(), BotError> {
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: 1,
            name: "Weather Bot".to_string(),
            username: "weather_bot".to_string(),
        }
    }
}

/// A command message from `user_id` in a private chat with the same ID
pub fn command(user_id: i64, message_id: i64, name: &str, args: &str) -> Message {
    let raw = if args.is_empty() {
        format!("/{}", name)
    } else {
        format!("/{} {}", name, args)
    };
    Message::new(
        message_id,
        user_id,
        Content::Command {
            name: name.to_string(),
            args: args.to_string(),
        },
    )
    .with_sender(Sender::new(user_id).with_username("tester"))
    .with_raw_text(raw)
}

pub fn text(user_id: i64, message_id: i64, text: &str) -> Message {
    Message::new(message_id, user_id, Content::Text(text.to_string()))
        .with_sender(Sender::new(user_id))
        .with_raw_text(text)
}
