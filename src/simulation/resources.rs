//! Shared resources and kingdom-level data structures.

use std::path::PathBuf;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

/// A bounded quantity with a hard cap.
///
/// `is_depleted` keeps the historical name from the save-era ledgers: it is set
/// while the stock sits exactly at its cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stock<T> {
    quantity: T,
    max_quantity: T,
    is_depleted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockUpdate {
    Set,
    Capped,
    Rejected,
}

impl<T> Stock<T>
where
    T: Copy + PartialOrd + Default,
{
    pub fn new(max_quantity: T) -> Self {
        Self {
            quantity: T::default(),
            max_quantity,
            is_depleted: false,
        }
    }

    pub fn with_quantity(quantity: T, max_quantity: T) -> Self {
        let mut stock = Self::new(max_quantity);
        stock.set_quantity(quantity);
        stock
    }

    /// Negative quantities are rejected; anything above the cap is capped.
    pub fn set_quantity(&mut self, quantity: T) -> StockUpdate {
        if quantity < T::default() {
            tracing::error!("cannot set a stock to a negative quantity");
            return StockUpdate::Rejected;
        }
        if quantity >= self.max_quantity {
            self.quantity = self.max_quantity;
            self.is_depleted = true;
            return if quantity > self.max_quantity {
                StockUpdate::Capped
            } else {
                StockUpdate::Set
            };
        }
        self.quantity = quantity;
        self.is_depleted = false;
        StockUpdate::Set
    }

    pub fn quantity(&self) -> T {
        self.quantity
    }

    pub fn max_quantity(&self) -> T {
        self.max_quantity
    }

    pub fn is_depleted(&self) -> bool {
        self.is_depleted
    }

    pub fn set_max_quantity(&mut self, max_quantity: T) {
        self.max_quantity = max_quantity;
        if self.quantity >= max_quantity {
            self.quantity = max_quantity;
            self.is_depleted = true;
        } else {
            self.is_depleted = false;
        }
    }
}

#[derive(Debug, Clone, Resource)]
pub struct KingdomConfig {
    pub name: String,
    pub save_path: PathBuf,
    /// Real-time delay per army training cycle.
    pub training_pace: Duration,
    /// Commands between two random events.
    pub event_interval: u32,
    /// Random events between two weather re-rolls.
    pub weather_interval: u32,
    pub seed: Option<u64>,
}

impl KingdomConfig {
    /// Zero pacing and a fixed seed.
    pub fn headless(seed: u64) -> Self {
        Self {
            training_pace: Duration::ZERO,
            seed: Some(seed),
            ..Default::default()
        }
    }
}

impl Default for KingdomConfig {
    fn default() -> Self {
        Self {
            name: "Westland".to_string(),
            save_path: PathBuf::from("score.txt"),
            training_pace: Duration::from_secs(1),
            event_interval: 4,
            weather_interval: 3,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum GameOver {
    Assassinated { king: String },
}

impl GameOver {
    pub fn headline(&self) -> String {
        match self {
            GameOver::Assassinated { king } => {
                format!("{king} has been assassinated! The kingdom is destroyed.")
            }
        }
    }
}

/// Kingdom-wide bookkeeping that does not belong to any subsystem.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Realm {
    pub name: String,
    pub turn: u32,
    pub game_over: Option<GameOver>,
    pub turns_since_last_weather_update: u32,
    pub commands_since_event: u32,
}

impl Realm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            turn: 1,
            game_over: None,
            turns_since_last_weather_update: 0,
            commands_since_event: 0,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }
}

/// The kingdom's single random stream, seeded once.
#[derive(Debug, Resource)]
pub struct KingdomRng(pub SmallRng);

impl KingdomRng {
    pub fn from_config(config: &KingdomConfig) -> Self {
        match config.seed {
            Some(seed) => Self(SmallRng::seed_from_u64(seed)),
            None => Self(SmallRng::from_entropy()),
        }
    }
}
