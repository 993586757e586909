/// The account that sent a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub username: Option<String>,
}

impl Sender {
    pub fn new(id: i64) -> Self {
        Self { id, username: None }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// A `/name args` invocation; `args` is the trimmed remainder of the text
    Command { name: String, args: String },
    Empty,
}

impl Content {
    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// An inbound message, already parsed
#[derive(Debug, Clone)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub sender: Option<Sender>,
    pub content: Content,
    pub raw_text: String,
}

impl Message {
    pub fn new(id: i64, chat_id: i64, content: Content) -> Self {
        Self {
            id,
            chat_id,
            sender: None,
            content,
            raw_text: String::new(),
        }
    }

    #[cfg(test)]
    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_sender_opt(mut self, sender: Option<Sender>) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_raw_text(mut self, text: impl Into<String>) -> Self {
        self.raw_text = text.into();
        self
    }
}

/// One entry of the transport's update stream
#[derive(Debug, Clone)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

impl Update {
    pub fn new(update_id: i64, message: Option<Message>) -> Self {
        Self { update_id, message }
    }
}
