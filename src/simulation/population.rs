//! Headcount, social classes and food supply.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::simulation::{KingdomError, Notice, Outcome};

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Population {
    total_people: i32,
    peasants: i32,
    merchants: i32,
    nobility: i32,
    military: i32,
    birth_rate: i32,
    death_rate: i32,
    is_plague: bool,
    food_supply: i32,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            total_people: 1000,
            peasants: 600,
            merchants: 200,
            nobility: 100,
            military: 100,
            birth_rate: 5,
            death_rate: 2,
            is_plague: false,
            food_supply: 1000,
        }
    }
}

impl Population {
    pub fn total_people(&self) -> i32 {
        self.total_people
    }

    pub fn peasants(&self) -> i32 {
        self.peasants
    }

    pub fn merchants(&self) -> i32 {
        self.merchants
    }

    pub fn nobility(&self) -> i32 {
        self.nobility
    }

    pub fn military(&self) -> i32 {
        self.military
    }

    pub fn birth_rate(&self) -> i32 {
        self.birth_rate
    }

    pub fn death_rate(&self) -> i32 {
        self.death_rate
    }

    pub fn is_plague(&self) -> bool {
        self.is_plague
    }

    pub fn food_supply(&self) -> i32 {
        self.food_supply
    }

    pub fn set_plague(&mut self, is_plague: bool) {
        self.is_plague = is_plague;
    }

    /// Adds `delta` to the headcount (floored at zero) and then lets natural
    /// growth run until food no longer outstrips headcount. Social classes are
    /// left as they are.
    pub fn update_people(&mut self, delta: i32) -> Notice {
        let clamped = self.shift_total(delta);
        let growth = self.calculate_growth();
        Notice::success(format!(
            "Population changed by {delta} (growth {growth}). New total: {}",
            self.total_people
        ))
        .clamped(clamped)
    }

    /// Applies `(birth - death) * total / 100` round after round while food
    /// outstrips headcount. Stops early once a round would change nothing.
    /// Returns the total growth applied.
    pub fn calculate_growth(&mut self) -> i32 {
        let mut applied = 0;
        while self.food_supply > self.total_people {
            let growth = (self.birth_rate - self.death_rate) * self.total_people / 100;
            if growth == 0 {
                return applied;
            }
            let before = self.total_people;
            self.shift_total(growth);
            applied += self.total_people - before;
        }
        warn!(
            food = self.food_supply,
            people = self.total_people,
            "food shortage preventing population growth"
        );
        applied
    }

    pub fn increase_population(&mut self, amount: i32) -> Outcome {
        if amount < 0 {
            return Err(KingdomError::NegativeAmount {
                action: "increase population",
                amount: amount as f64,
            });
        }
        self.total_people += amount;
        self.rescale_classes(self.total_people, self.total_people - amount);
        Ok(Notice::success(format!(
            "Population increased by {amount}. New total: {}",
            self.total_people
        )))
    }

    pub fn decrease_population(&mut self, amount: i32) -> Outcome {
        if amount < 0 {
            return Err(KingdomError::NegativeAmount {
                action: "decrease population",
                amount: amount as f64,
            });
        }
        let clamped = self.shift_total(-amount);
        self.rescale_classes(self.total_people, self.total_people + amount);
        Ok(Notice::warning(format!(
            "Population decreased by {amount}. New total: {}{}",
            self.total_people,
            if clamped { " (the kingdom is empty)" } else { "" }
        )))
    }

    pub fn handle_plague(&mut self) -> Notice {
        if !self.is_plague {
            return Notice::info("No plague in the kingdom.");
        }
        let deaths = (self.total_people as f64 * 0.1) as i32;
        self.update_people(-deaths);
        Notice::error(format!("Plague has killed {deaths} people!"))
    }

    pub fn update_food_supply(&mut self, amount: i32) -> Notice {
        self.food_supply += amount;
        if self.food_supply < 0 {
            self.food_supply = 0;
            let deaths = (self.total_people as f64 * 0.05) as i32;
            self.update_people(-deaths);
            return Notice::error(format!(
                "Food supply depleted! {deaths} people starved."
            ));
        }
        Notice::success(format!("Food supply is now {}", self.food_supply))
    }

    /// Observation only.
    pub fn check_social_classes(&self) -> Notice {
        let total = self.total_people as f64;
        let mut concerns = Vec::new();
        if self.peasants as f64 > total * 0.7 {
            concerns.push("Peasants are unhappy! Risk of riots!");
        }
        if (self.nobility as f64) < total * 0.05 {
            concerns.push("Nobility too small! Political unrest possible!");
        }
        let summary = format!(
            "Social classes: {} peasants, {} merchants, {} nobles, {} military.",
            self.peasants, self.merchants, self.nobility, self.military
        );
        if concerns.is_empty() {
            Notice::info(summary)
        } else {
            Notice::warning(format!("{} {summary}", concerns.join(" ")))
        }
    }

    /// Returns true when the total had to be floored at zero.
    fn shift_total(&mut self, delta: i32) -> bool {
        self.total_people += delta;
        if self.total_people < 0 {
            self.total_people = 0;
            warn!("population dropped to zero");
            return true;
        }
        false
    }

    // Ratio is taken from post-mutation figures, exactly as the ledgers have
    // always computed it.
    fn rescale_classes(&mut self, numerator: i32, denominator: i32) {
        if denominator == 0 {
            return;
        }
        let ratio = numerator as f64 / denominator as f64;
        self.peasants = (self.peasants as f64 * ratio) as i32;
        self.merchants = (self.merchants as f64 * ratio) as i32;
        self.nobility = (self.nobility as f64 * ratio) as i32;
        self.military = (self.military as f64 * ratio) as i32;
    }
}
