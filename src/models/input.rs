// Data models for user input during a session

use serde::{Deserialize, Serialize};

/// A key the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    Quit,     // 'q'
    Continue, // 'y'
    Finish,   // 'n'
}

impl KeyCommand {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(KeyCommand::Quit),
            'y' => Some(KeyCommand::Continue),
            'n' => Some(KeyCommand::Finish),
            _ => None,
        }
    }
}
