//! Caravan route security, re-rolled whenever the realm takes stock of its roads.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityTier {
    Secure,
    Moderate,
    HighRisk,
}

impl SecurityTier {
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..70 => SecurityTier::Secure,
            70..85 => SecurityTier::Moderate,
            _ => SecurityTier::HighRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SecurityTier::Secure => "Secure",
            SecurityTier::Moderate => "Moderate risk",
            SecurityTier::HighRisk => "High risk",
        }
    }

    /// Moderate routes still count as secure; only high-risk roads get raided.
    pub fn is_secure(&self) -> bool {
        !matches!(self, SecurityTier::HighRisk)
    }

    pub fn risk_level(&self) -> f64 {
        match self {
            SecurityTier::Secure => 0.0,
            SecurityTier::Moderate => 0.3,
            SecurityTier::HighRisk => 0.7,
        }
    }

    pub fn attack_probability(&self) -> u32 {
        match self {
            SecurityTier::Secure => 0,
            SecurityTier::Moderate => 20,
            SecurityTier::HighRisk => 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRoute {
    tier: SecurityTier,
    risk_level: f64,
}

impl Default for TradeRoute {
    fn default() -> Self {
        Self::with_tier(SecurityTier::Secure)
    }
}

impl TradeRoute {
    pub fn with_tier(tier: SecurityTier) -> Self {
        Self {
            tier,
            risk_level: tier.risk_level(),
        }
    }

    pub fn tier(&self) -> SecurityTier {
        self.tier
    }

    pub fn is_secure(&self) -> bool {
        self.tier.is_secure()
    }

    pub fn risk_level(&self) -> f64 {
        self.risk_level
    }

    pub fn attack_probability(&self) -> u32 {
        self.tier.attack_probability()
    }

    pub fn update_security(&mut self, rng: &mut impl Rng) -> SecurityTier {
        self.apply_roll(rng.gen_range(0..100))
    }

    pub fn apply_roll(&mut self, roll: u32) -> SecurityTier {
        *self = Self::with_tier(SecurityTier::from_roll(roll));
        self.tier
    }
}
