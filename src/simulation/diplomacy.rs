//! Treaties and relations with the neighboring realm.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::{KingdomError, Notice, Outcome};

pub const NO_TREATY: &str = "No active treaty";

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Diplomacy {
    treaty: Option<String>,
    relations: i32,
    is_alliance: bool,
    trade_sanctions: i32,
}

impl Default for Diplomacy {
    fn default() -> Self {
        Self {
            treaty: None,
            relations: 50,
            is_alliance: false,
            trade_sanctions: 0,
        }
    }
}

impl Diplomacy {
    pub fn treaty(&self) -> Option<&str> {
        self.treaty.as_deref()
    }

    pub fn treaty_label(&self) -> &str {
        self.treaty().unwrap_or(NO_TREATY)
    }

    pub fn relations(&self) -> i32 {
        self.relations
    }

    pub fn is_alliance(&self) -> bool {
        self.is_alliance
    }

    pub fn trade_sanctions(&self) -> i32 {
        self.trade_sanctions
    }

    /// A new treaty replaces any existing one.
    pub fn make_treaty(&mut self, text: &str) -> Outcome {
        let text = text.trim();
        if text.is_empty() || text == NO_TREATY {
            return Err(KingdomError::EmptyTreaty);
        }
        self.treaty = Some(text.to_string());
        self.relations = (self.relations + 10).min(100);
        self.is_alliance = true;
        Ok(Notice::success(format!("Treaty established: {text}")))
    }

    pub fn break_treaty(&mut self) -> Outcome {
        let treaty = self.treaty.take().ok_or(KingdomError::NoActiveTreaty)?;
        self.relations = (self.relations - 20).max(0);
        self.is_alliance = false;
        Ok(Notice::warning(format!(
            "Treaty \"{treaty}\" broken! Relations fell to {}.",
            self.relations
        )))
    }
}
