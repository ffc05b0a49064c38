//! Stockpiles, caravan trade and the granary.

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::simulation::{Economy, KingdomError, Notice, Outcome, Severity, TradeRoute, Weather};

const FOOD_BASE_PRODUCTION: f64 = 50.0;
const FOOD_SHORTAGE_LINE: i32 = 50;
const WEAPONS_PER_SOLDIER: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Wood,
    Stone,
    Iron,
    Food,
    Weapons,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Iron,
        ResourceKind::Food,
        ResourceKind::Weapons,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood",
            ResourceKind::Stone => "stone",
            ResourceKind::Iron => "iron",
            ResourceKind::Food => "food",
            ResourceKind::Weapons => "weapons",
        }
    }

    pub fn base_price(&self) -> f64 {
        match self {
            ResourceKind::Wood => 5.0,
            ResourceKind::Stone => 8.0,
            ResourceKind::Iron => 15.0,
            ResourceKind::Food => 12.0,
            ResourceKind::Weapons => 25.0,
        }
    }

    fn index(&self) -> usize {
        match self {
            ResourceKind::Wood => 0,
            ResourceKind::Stone => 1,
            ResourceKind::Iron => 2,
            ResourceKind::Food => 3,
            ResourceKind::Weapons => 4,
        }
    }
}

impl FromStr for ResourceKind {
    type Err = KingdomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| KingdomError::UnknownResource(s.to_string()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Market {
    stockpiles: [i32; 5],
    price_multiplier: f64,
    trade_route: TradeRoute,
    food_stockpile: i32,
    weapons_stockpile: i32,
    food_consumption_rate: f64,
}

impl Default for Market {
    fn default() -> Self {
        Self {
            stockpiles: [100; 5],
            price_multiplier: 1.0,
            trade_route: TradeRoute::default(),
            food_stockpile: 100,
            weapons_stockpile: 50,
            food_consumption_rate: 1.0,
        }
    }
}

impl Market {
    pub fn stock(&self, kind: ResourceKind) -> i32 {
        self.stockpiles[kind.index()]
    }

    /// Unknown names read as zero.
    pub fn resource(&self, name: &str) -> i32 {
        name.parse::<ResourceKind>()
            .map(|kind| self.stock(kind))
            .unwrap_or(0)
    }

    pub fn price_multiplier(&self) -> f64 {
        self.price_multiplier
    }

    pub fn trade_route(&self) -> &TradeRoute {
        &self.trade_route
    }

    pub fn trade_route_mut(&mut self) -> &mut TradeRoute {
        &mut self.trade_route
    }

    pub fn food_stockpile(&self) -> i32 {
        self.food_stockpile
    }

    pub fn weapons_stockpile(&self) -> i32 {
        self.weapons_stockpile
    }

    pub fn food_consumption_rate(&self) -> f64 {
        self.food_consumption_rate
    }

    /// Positive `amount` buys, negative sells. Caravans on an insecure road may
    /// be raided before any gold changes hands.
    pub fn trade_resource(
        &mut self,
        name: &str,
        amount: i32,
        economy: &mut Economy,
        rng: &mut impl Rng,
    ) -> Outcome {
        if !self.trade_route.is_secure() {
            warn!("trade route is not secure");
            if rng.gen_range(0..100) < self.trade_route.attack_probability() {
                return Err(KingdomError::CaravanAttacked);
            }
        }

        let kind: ResourceKind = name.parse()?;
        if amount == 0 {
            return Err(KingdomError::NonPositiveAmount {
                what: "trade quantity",
            });
        }
        let quantity = amount.unsigned_abs();
        let total_cost = kind.base_price() * quantity as f64 * self.price_multiplier;
        let slot = &mut self.stockpiles[kind.index()];

        if amount > 0 {
            if economy.gold() < total_cost {
                return Err(KingdomError::InsufficientGold {
                    needed: total_cost,
                    available: economy.gold(),
                });
            }
            economy.decrease_gold(total_cost)?;
            *slot = slot.saturating_add(amount);
            Ok(Notice::success(format!(
                "Successfully bought {quantity} {kind} for {total_cost:.2} gold"
            )))
        } else {
            if (*slot as u32) < quantity {
                return Err(KingdomError::InsufficientStock {
                    resource: kind.name(),
                    needed: amount.saturating_neg(),
                    available: *slot,
                });
            }
            let credit = economy.increase_gold(total_cost)?;
            *slot += amount;
            Ok(Notice::success(format!(
                "Successfully sold {quantity} {kind} for {total_cost:.2} gold"
            ))
            .clamped(credit.severity == Severity::Warning))
        }
    }

    pub fn decrease_resource(&mut self, name: &str, amount: i32) -> Outcome {
        if amount < 0 {
            return Err(KingdomError::NegativeAmount {
                action: "decrease resource",
                amount: amount as f64,
            });
        }
        let kind: ResourceKind = name.parse()?;
        let slot = &mut self.stockpiles[kind.index()];
        let mut remaining = *slot - amount;
        if remaining < 0 {
            warn!(resource = kind.name(), "stockpile dropped below zero");
            remaining = 0;
        }
        *slot = remaining;
        Ok(Notice::warning(format!(
            "{kind} decreased by {amount}. New quantity: {remaining}"
        )))
    }

    pub fn update_food_stockpile(&mut self, population: i32, weather: &Weather) -> Notice {
        let production = (FOOD_BASE_PRODUCTION * weather.food_production_multiplier()) as i32;
        self.food_stockpile += production;
        self.consume_food(population);
        if self.check_food_shortage() {
            Notice::warning(format!(
                "Food shortage detected! Granary holds {} after feeding {population} people.",
                self.food_stockpile
            ))
        } else {
            Notice::info(format!(
                "Granary holds {} food (+{production} harvested).",
                self.food_stockpile
            ))
        }
    }

    pub fn consume_food(&mut self, population: i32) {
        let needed = (population as f64 * self.food_consumption_rate) as i32;
        if self.food_stockpile >= needed {
            self.food_stockpile -= needed;
        } else {
            self.food_stockpile = 0;
            error!(needed, "food shortage, population is starving");
        }
    }

    pub fn check_food_shortage(&self) -> bool {
        self.food_stockpile < FOOD_SHORTAGE_LINE
    }

    /// Reports only; the stockpile is not drawn down.
    pub fn update_weapons_stockpile(&self, army_size: i32) -> Option<Notice> {
        let needed = army_size.saturating_mul(WEAPONS_PER_SOLDIER);
        (self.weapons_stockpile < needed).then(|| {
            Notice::warning(format!(
                "Weapons shortage! {} weapons for {army_size} soldiers.",
                self.weapons_stockpile
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SecurityTier;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(5)
    }

    #[test]
    fn names_parse_case_sensitively() {
        assert_eq!("iron".parse::<ResourceKind>().unwrap(), ResourceKind::Iron);
        assert_eq!(" food ".parse::<ResourceKind>().unwrap(), ResourceKind::Food);
        assert!("gold".parse::<ResourceKind>().is_err());
        assert!("Wood".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn buying_costs_base_price() {
        let mut market = Market::default();
        let mut economy = Economy::default();
        market
            .trade_resource("iron", 10, &mut economy, &mut rng())
            .unwrap();
        assert_eq!(market.stock(ResourceKind::Iron), 110);
        assert_eq!(economy.gold(), 350.0);
    }

    #[test]
    fn buy_then_sell_is_neutral() {
        let mut market = Market::default();
        let mut economy = Economy::default();
        let before_stock = market.stock(ResourceKind::Stone);
        market
            .trade_resource("stone", 20, &mut economy, &mut rng())
            .unwrap();
        market
            .trade_resource("stone", -20, &mut economy, &mut rng())
            .unwrap();
        assert_eq!(market.stock(ResourceKind::Stone), before_stock);
        assert_eq!(economy.gold(), 500.0);
    }

    #[test]
    fn selling_needs_stock() {
        let mut market = Market::default();
        let mut economy = Economy::default();
        let err = market
            .trade_resource("wood", -150, &mut economy, &mut rng())
            .unwrap_err();
        assert!(matches!(err, KingdomError::InsufficientStock { needed: 150, .. }));
        assert_eq!(market.stock(ResourceKind::Wood), 100);
    }

    #[test]
    fn buying_needs_gold() {
        let mut market = Market::default();
        let mut economy = Economy::default();
        assert!(market
            .trade_resource("weapons", 100, &mut economy, &mut rng())
            .is_err());
        assert_eq!(economy.gold(), 500.0);
        assert_eq!(market.stock(ResourceKind::Weapons), 100);
    }

    #[test]
    fn unknown_resource_is_rejected() {
        let mut market = Market::default();
        let mut economy = Economy::default();
        assert!(matches!(
            market.trade_resource("silk", 1, &mut economy, &mut rng()),
            Err(KingdomError::UnknownResource(_))
        ));
        assert!(market.decrease_resource("silk", 1).is_err());
        assert_eq!(market.resource("silk"), 0);
    }

    #[test]
    fn raided_caravans_change_nothing() {
        let mut market = Market::default();
        market.trade_route_mut().apply_roll(99);
        assert_eq!(market.trade_route().tier(), SecurityTier::HighRisk);
        let mut economy = Economy::default();
        let mut rng = rng();
        let mut raids = 0;
        for _ in 0..60 {
            let gold = economy.gold();
            let stock = market.stock(ResourceKind::Wood);
            match market.trade_resource("wood", 1, &mut economy, &mut rng) {
                Err(KingdomError::CaravanAttacked) => {
                    raids += 1;
                    assert_eq!(economy.gold(), gold);
                    assert_eq!(market.stock(ResourceKind::Wood), stock);
                }
                Ok(_) => assert_eq!(market.stock(ResourceKind::Wood), stock + 1),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(raids > 0);
    }

    #[test]
    fn decrease_resource_floors_at_zero() {
        let mut market = Market::default();
        market.decrease_resource("food", 130).unwrap();
        assert_eq!(market.stock(ResourceKind::Food), 0);
        assert!(market.decrease_resource("food", -1).is_err());
    }

    #[test]
    fn granary_feeds_population() {
        let mut market = Market::default();
        let notice = market.update_food_stockpile(60, &Weather::default());
        assert_eq!(market.food_stockpile(), 90);
        assert!(!market.check_food_shortage());
        assert_eq!(notice.severity, Severity::Info);

        market.update_food_stockpile(1000, &Weather::default());
        assert_eq!(market.food_stockpile(), 0);
        assert!(market.check_food_shortage());
    }

    #[test]
    fn harvest_follows_the_weather() {
        let mut rng = rng();
        for (roll, harvest) in [(10, 50), (70, 25), (80, 15), (95, 75)] {
            let mut weather = Weather::default();
            weather.apply_roll(roll, &mut rng);
            let mut market = Market::default();
            market.update_food_stockpile(0, &weather);
            assert_eq!(market.food_stockpile(), 100 + harvest, "roll {roll}");
        }
    }

    #[test]
    fn selling_into_a_full_treasury_warns() {
        let mut market = Market::default();
        let mut economy = Economy::default();
        economy.increase_gold(450.0).unwrap();
        let notice = market
            .trade_resource("stone", -20, &mut economy, &mut rng())
            .unwrap();
        assert_eq!(economy.gold(), 1000.0);
        assert_eq!(market.stock(ResourceKind::Stone), 80);
        assert_eq!(notice.severity, Severity::Warning);
    }

    #[test]
    fn weapons_shortage_is_reported_not_applied() {
        let market = Market::default();
        assert!(market.update_weapons_stockpile(20).is_none());
        assert!(market.update_weapons_stockpile(100).is_some());
        assert_eq!(market.weapons_stockpile(), 50);
    }
}
