//! Royal dispatches.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::{KingdomError, Notice, Outcome};

pub const MESSAGE_CAPACITY: usize = 5;
pub const MAX_MESSAGE_LENGTH: usize = 100;

/// Royal dispatches. Once full, further messages are refused.
#[derive(Debug, Clone, Default, Resource, Serialize, Deserialize)]
pub struct Communication {
    messages: Vec<String>,
}

impl Communication {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn message(&self, index: usize) -> Option<&str> {
        self.messages.get(index).map(String::as_str)
    }

    pub fn send_message(&mut self, message: &str) -> Outcome {
        let length = message.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(KingdomError::MessageTooLong {
                length,
                max: MAX_MESSAGE_LENGTH,
            });
        }
        if self.messages.len() >= MESSAGE_CAPACITY {
            return Err(KingdomError::MessageLimit(MESSAGE_CAPACITY));
        }
        self.messages.push(message.to_string());
        Ok(Notice::success(format!("Sent message: {message}.")))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_sixth_message() {
        let mut comms = Communication::default();
        for i in 0..MESSAGE_CAPACITY {
            comms.send_message(&format!("dispatch {i}")).unwrap();
        }
        assert!(matches!(
            comms.send_message("one too many"),
            Err(KingdomError::MessageLimit(5))
        ));
        assert_eq!(comms.message_count(), 5);
        assert_eq!(comms.message(0), Some("dispatch 0"));
        assert_eq!(comms.message(5), None);
    }

    #[test]
    fn refuses_long_messages() {
        let mut comms = Communication::default();
        let long = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(comms.send_message(&long).is_err());
        assert!(comms.send_message(&"a".repeat(MAX_MESSAGE_LENGTH)).is_ok());
        assert_eq!(comms.message_count(), 1);
    }
}
