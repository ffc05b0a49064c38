//! Treasury, taxation and public services.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::simulation::{KingdomError, Notice, Outcome, Population, Stock, StockUpdate};

pub const GOLD_CAP: f64 = 1000.0;
pub const PUBLIC_SERVICES_CAP: i32 = 100;

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Economy {
    gold: Stock<f64>,
    tax_rate: f64,
    inflation: f64,
    is_recession: bool,
    public_services: i32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            gold: Stock::with_quantity(500.0, GOLD_CAP),
            tax_rate: 0.1,
            inflation: 0.0,
            is_recession: false,
            public_services: 50,
        }
    }
}

impl Economy {
    pub fn gold(&self) -> f64 {
        self.gold.quantity()
    }

    pub fn gold_cap(&self) -> f64 {
        self.gold.max_quantity()
    }

    pub fn treasury_full(&self) -> bool {
        self.gold.is_depleted()
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn inflation(&self) -> f64 {
        self.inflation
    }

    pub fn is_recession(&self) -> bool {
        self.is_recession
    }

    pub fn public_services(&self) -> i32 {
        self.public_services
    }

    pub fn set_tax_rate(&mut self, rate: f64) -> Outcome {
        if !(0.0..=1.0).contains(&rate) {
            return Err(KingdomError::TaxRate(rate));
        }
        self.tax_rate = rate;
        Ok(Notice::success(format!(
            "Tax rate set to {:.0}%",
            rate * 100.0
        )))
    }

    pub fn collect_taxes(&mut self, population: &Population) -> Notice {
        let taxes = population.total_people() as f64 * self.tax_rate;
        let capped = self.store(self.gold() + taxes);
        Notice::success(format!(
            "Collected {taxes:.2} gold in taxes. Total gold: {:.2}.",
            self.gold()
        ))
        .clamped(capped)
    }

    /// Negative amounts credit the treasury; the bank issues loans this way.
    pub fn spend_gold(&mut self, amount: f64) -> Outcome {
        finite(amount, "gold amount")?;
        let remaining = self.gold() - amount;
        if remaining < 0.0 {
            return Err(KingdomError::InsufficientGold {
                needed: amount,
                available: self.gold(),
            });
        }
        let capped = self.store(remaining);
        let message = format!("Spent {amount:.2} gold. Remaining: {:.2}.", self.gold());
        Ok(if capped {
            Notice::warning(message)
        } else {
            Notice::info(message)
        })
    }

    pub fn fund_public_services(&mut self, amount: i32) -> Outcome {
        if amount < 0 {
            return Err(KingdomError::NegativeAmount {
                action: "fund public services",
                amount: amount as f64,
            });
        }
        let remaining = self.gold() - amount as f64;
        if remaining < 0.0 {
            return Err(KingdomError::InsufficientGold {
                needed: amount as f64,
                available: self.gold(),
            });
        }
        self.store(remaining);
        self.public_services += amount / 10;
        let capped = self.public_services > PUBLIC_SERVICES_CAP;
        if capped {
            self.public_services = PUBLIC_SERVICES_CAP;
        }
        Ok(Notice::success(format!(
            "Public services funding increased to {}",
            self.public_services
        ))
        .clamped(capped))
    }

    pub fn decrease_gold(&mut self, amount: f64) -> Outcome {
        finite(amount, "gold amount")?;
        if amount < 0.0 {
            return Err(KingdomError::NegativeAmount {
                action: "decrease gold",
                amount,
            });
        }
        let mut remaining = self.gold() - amount;
        if remaining < 0.0 {
            warn!(amount, "gold dropped below zero");
            remaining = 0.0;
        }
        self.store(remaining);
        Ok(Notice::warning(format!(
            "Gold decreased by {amount:.2}. New total: {:.2}",
            self.gold()
        )))
    }

    pub fn increase_gold(&mut self, amount: f64) -> Outcome {
        finite(amount, "gold amount")?;
        if amount < 0.0 {
            return Err(KingdomError::NegativeAmount {
                action: "increase gold",
                amount,
            });
        }
        let capped = self.store(self.gold() + amount);
        Ok(Notice::success(format!(
            "Gold increased by {amount:.2}. New total: {:.2}",
            self.gold()
        ))
        .clamped(capped))
    }

    pub(crate) fn restore_gold(&mut self, gold: f64) {
        self.store(gold.max(0.0));
    }

    /// Returns true when the treasury cap cut the deposit short.
    fn store(&mut self, quantity: f64) -> bool {
        match self.gold.set_quantity(quantity) {
            StockUpdate::Capped => {
                warn!(cap = self.gold.max_quantity(), "treasury is full");
                true
            }
            StockUpdate::Set | StockUpdate::Rejected => false,
        }
    }
}

fn finite(amount: f64, what: &'static str) -> Result<(), KingdomError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(KingdomError::NonFiniteAmount { what })
    }
}
