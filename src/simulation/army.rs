//! Standing army: drill, pay and equipment.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::simulation::{Economy, KingdomError, Notice, Outcome};

pub const MAX_MORALE: i32 = 100;
pub const TRAINING_CYCLES: std::ops::RangeInclusive<i32> = 1..=5;
pub const EQUIPMENT_QUALITY: std::ops::RangeInclusive<i32> = 1..=10;

const RECRUITS_PER_TRAINING: i32 = 50;
const PAY_PER_SOLDIER: f64 = 0.1;

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Army {
    size: i32,
    morale: i32,
    is_paid: bool,
    training_level: i32,
    equipment: i32,
    casualties: i32,
    is_rebelling: bool,
}

impl Default for Army {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Army {
    pub fn new(size: i32) -> Self {
        Self {
            size: size.max(0),
            morale: MAX_MORALE,
            is_paid: true,
            training_level: 1,
            equipment: 50,
            casualties: 0,
            is_rebelling: false,
        }
    }

    /// Rebuilds an army from saved figures.
    pub fn restored(size: i32, morale: i32) -> Self {
        Self {
            morale: morale.clamp(0, MAX_MORALE),
            ..Self::new(size)
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn morale(&self) -> i32 {
        self.morale
    }

    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    pub fn training_level(&self) -> i32 {
        self.training_level
    }

    pub fn equipment(&self) -> i32 {
        self.equipment
    }

    pub fn casualties(&self) -> i32 {
        self.casualties
    }

    pub fn is_rebelling(&self) -> bool {
        self.is_rebelling
    }

    /// Runs `cycles` drills. `pace` is invoked once per cycle before the drill
    /// lands, letting interactive callers slow things down.
    pub fn train(&mut self, cycles: i32, mut pace: impl FnMut(i32)) -> Outcome {
        if !TRAINING_CYCLES.contains(&cycles) {
            return Err(KingdomError::TrainingCycles(cycles));
        }
        let mut exhausted = false;
        for cycle in 1..=cycles {
            pace(cycle);
            self.training_level += 1;
            self.morale -= 5;
            if self.morale < 0 {
                self.morale = 0;
                exhausted = true;
                warn!("army morale dropped to zero");
            }
        }
        self.size += RECRUITS_PER_TRAINING;
        Ok(Notice::success(format!(
            "Training done. Army size: {}, Training Level: {}, Morale: {}.",
            self.size, self.training_level, self.morale
        ))
        .clamped(exhausted))
    }

    pub fn pay_soldiers(&mut self, economy: &mut Economy) -> Outcome {
        let cost = self.size as f64 * PAY_PER_SOLDIER;
        economy.spend_gold(cost)?;
        self.is_paid = true;
        self.morale = (self.morale + 10).min(MAX_MORALE);
        Ok(Notice::success(format!(
            "Paid {cost:.2} gold to soldiers. Morale: {}.",
            self.morale
        )))
    }

    pub fn update_equipment(&mut self, quality: i32) -> Outcome {
        if !EQUIPMENT_QUALITY.contains(&quality) {
            return Err(KingdomError::EquipmentQuality(quality));
        }
        self.equipment = quality * 10;
        Ok(Notice::success(format!(
            "Army equipment updated to level {quality} (Quality: {})",
            self.equipment
        )))
    }

    pub fn decrease_size(&mut self, amount: i32) -> Outcome {
        if amount < 0 {
            return Err(KingdomError::NegativeAmount {
                action: "decrease army size",
                amount: amount as f64,
            });
        }
        self.size -= amount;
        if self.size < 0 {
            self.size = 0;
            warn!("army size dropped to zero");
        }
        self.casualties += amount;
        self.morale = (self.morale - amount / 10).max(0);
        Ok(Notice::warning(format!(
            "Army size decreased by {amount}. New size: {}, Morale: {}",
            self.size, self.morale
        )))
    }

    pub fn increase_size(&mut self, amount: i32) -> Outcome {
        if amount < 0 {
            return Err(KingdomError::NegativeAmount {
                action: "increase army size",
                amount: amount as f64,
            });
        }
        self.size += amount;
        self.morale = (self.morale + amount / 20).min(MAX_MORALE);
        Ok(Notice::success(format!(
            "Army size increased by {amount}. New size: {}, Morale: {}",
            self.size, self.morale
        )))
    }
}
