/// Commands understood by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/city <text>`
    City,
    /// `/weather`
    Weather,
    Unknown(String),
}

/// Name and menu description of a supported command
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl Command {
    /// Menu entries registered with the transport
    pub const KNOWN: [CommandInfo; 2] = [
        CommandInfo {
            name: "city",
            description: "Set your city, e.g. /city London",
        },
        CommandInfo {
            name: "weather",
            description: "Current temperature in your city",
        },
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "city" => Command::City,
            "weather" => Command::Weather,
            other => Command::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Command::City => "city",
            Command::Weather => "weather",
            Command::Unknown(name) => name,
        }
    }
}
