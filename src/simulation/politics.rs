//! The crown, elections and kingdom stability.

use bevy_ecs::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::simulation::{KingdomError, Notice, Outcome};

pub const MAX_STABILITY: i32 = 100;
pub const ELECTION_COOLDOWN: u32 = 10;

const STABILITY_WARNING_LINE: i32 = 20;
const REGNAL_NAMES: [&str; 8] = [
    "Aldric", "Edmund", "Harald", "Osric", "Leofric", "Godwin", "Wulfstan", "Cedric",
];

/// What every ruler can do, whatever kind of ruler it is.
pub trait Leader {
    fn name(&self) -> &str;
    fn skill(&self) -> i32;
    fn popularity(&self) -> i32;
    fn apply_policy(&mut self) -> Notice;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assassination {
    Wounded { health: i32 },
    Slain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct King {
    name: String,
    skill: i32,
    popularity: i32,
    is_corrupt: bool,
    health: i32,
    reign_length: u32,
    assassination_attempts: u32,
}

impl King {
    pub fn new(name: impl Into<String>, skill: i32) -> Self {
        Self {
            name: name.into(),
            skill,
            popularity: 50,
            is_corrupt: false,
            health: 100,
            reign_length: 0,
            assassination_attempts: 0,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        self.is_corrupt
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn reign_length(&self) -> u32 {
        self.reign_length
    }

    pub fn assassination_attempts(&self) -> u32 {
        self.assassination_attempts
    }

    pub fn set_popularity(&mut self, popularity: i32) {
        self.popularity = popularity.clamp(0, 100);
    }

    pub fn increment_reign(&mut self) {
        self.reign_length += 1;
    }

    pub fn face_assassination_attempt(&mut self) -> Assassination {
        self.assassination_attempts += 1;
        self.health -= 20;
        if self.health <= 0 {
            self.health = 0;
            Assassination::Slain
        } else {
            Assassination::Wounded {
                health: self.health,
            }
        }
    }
}

impl Leader for King {
    fn name(&self) -> &str {
        &self.name
    }

    fn skill(&self) -> i32 {
        self.skill
    }

    fn popularity(&self) -> i32 {
        self.popularity
    }

    fn apply_policy(&mut self) -> Notice {
        self.popularity = (self.popularity + 5).min(100);
        Notice::info(format!(
            "{} applies a new policy! Popularity: {}",
            self.name, self.popularity
        ))
    }
}

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Politics {
    current_king: King,
    election_timer: u32,
    stability: i32,
    is_coup: bool,
    corruption_level: i32,
}

impl Default for Politics {
    fn default() -> Self {
        Self {
            current_king: King::new("No King", 50),
            election_timer: 0,
            stability: 50,
            is_coup: false,
            corruption_level: 0,
        }
    }
}

impl Politics {
    pub fn king(&self) -> &King {
        &self.current_king
    }

    pub fn king_mut(&mut self) -> &mut King {
        &mut self.current_king
    }

    pub fn leader(&self) -> &dyn Leader {
        &self.current_king
    }

    pub fn king_name(&self) -> &str {
        self.current_king.name()
    }

    pub fn election_timer(&self) -> u32 {
        self.election_timer
    }

    pub fn stability(&self) -> i32 {
        self.stability
    }

    pub fn is_coup(&self) -> bool {
        self.is_coup
    }

    pub fn corruption_level(&self) -> i32 {
        self.corruption_level
    }

    pub fn hold_election(&mut self, rng: &mut impl Rng) -> Outcome {
        if self.election_timer > 0 {
            return Err(KingdomError::ElectionCooldown {
                remaining: self.election_timer,
            });
        }
        Ok(self.force_election(rng))
    }

    /// Crowns a new king regardless of the election timer.
    pub fn force_election(&mut self, rng: &mut impl Rng) -> Notice {
        let name = REGNAL_NAMES[rng.gen_range(0..REGNAL_NAMES.len())];
        let skill = rng.gen_range(50..100);
        self.current_king = King::new(name, skill);
        self.election_timer = ELECTION_COOLDOWN;
        let capped = self.stability + 10 > MAX_STABILITY;
        self.stability = (self.stability + 10).min(MAX_STABILITY);
        Notice::success(format!(
            "New king elected: {name} (Skill: {skill}). Stability: {}",
            self.stability
        ))
        .clamped(capped)
    }

    pub fn tick_election_timer(&mut self) {
        self.election_timer = self.election_timer.saturating_sub(1);
    }

    /// Stability bottoming out sparks a coup that never subsides on its own.
    pub fn decrease_stability(&mut self, amount: i32) -> Outcome {
        if amount < 0 {
            return Err(KingdomError::NegativeAmount {
                action: "decrease stability",
                amount: amount as f64,
            });
        }
        self.stability -= amount;
        if self.stability <= 0 {
            self.stability = 0;
            if !self.is_coup {
                warn!("kingdom stability dropped to zero, a coup is under way");
            }
            self.is_coup = true;
            return Ok(Notice::warning(format!(
                "Kingdom stability decreased by {amount} and collapsed. A coup has begun!"
            )));
        }
        if self.stability < STABILITY_WARNING_LINE {
            warn!(stability = self.stability, "risk of rebellion");
        }
        Ok(Notice::warning(format!(
            "Kingdom stability decreased by {amount}. New stability: {}",
            self.stability
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn election_crowns_a_skilled_king() {
        let mut politics = Politics::default();
        let mut rng = SmallRng::seed_from_u64(1);
        politics.hold_election(&mut rng).unwrap();
        assert_ne!(politics.king_name(), "No King");
        assert!((50..100).contains(&politics.king().skill()));
        assert_eq!(politics.election_timer(), ELECTION_COOLDOWN);
        assert_eq!(politics.stability(), 60);
        assert_eq!(politics.leader().name(), politics.king_name());
        assert_eq!(politics.leader().skill(), politics.king().skill());
    }

    #[test]
    fn second_election_waits_for_the_timer() {
        let mut politics = Politics::default();
        let mut rng = SmallRng::seed_from_u64(2);
        politics.hold_election(&mut rng).unwrap();
        let king = politics.king_name().to_string();
        assert!(matches!(
            politics.hold_election(&mut rng),
            Err(KingdomError::ElectionCooldown { remaining: 10 })
        ));
        assert_eq!(politics.election_timer(), ELECTION_COOLDOWN);
        assert_eq!(politics.king_name(), king);

        for _ in 0..ELECTION_COOLDOWN {
            politics.tick_election_timer();
        }
        assert!(politics.hold_election(&mut rng).is_ok());
    }

    #[test]
    fn coup_sticks_once_stability_hits_zero() {
        let mut politics = Politics::default();
        politics.decrease_stability(35).unwrap();
        assert!(!politics.is_coup());
        politics.decrease_stability(15).unwrap();
        assert_eq!(politics.stability(), 0);
        assert!(politics.is_coup());

        politics.force_election(&mut SmallRng::seed_from_u64(4));
        assert_eq!(politics.stability(), 10);
        assert!(politics.is_coup());
        assert!(politics.decrease_stability(-1).is_err());
    }

    #[test]
    fn stability_caps_at_hundred() {
        let mut politics = Politics {
            stability: 95,
            ..Politics::default()
        };
        politics.force_election(&mut SmallRng::seed_from_u64(9));
        assert_eq!(politics.stability(), MAX_STABILITY);
    }

    #[test]
    fn five_attempts_slay_a_king() {
        let mut king = King::new("Osric", 70);
        for _ in 0..4 {
            assert!(matches!(
                king.face_assassination_attempt(),
                Assassination::Wounded { .. }
            ));
        }
        assert_eq!(king.face_assassination_attempt(), Assassination::Slain);
        assert_eq!(king.assassination_attempts(), 5);
    }

    #[test]
    fn policy_raises_popularity_up_to_cap() {
        let mut king = King::new("Godwin", 60);
        king.set_popularity(98);
        king.apply_policy();
        assert_eq!(king.popularity(), 100);
    }
}
