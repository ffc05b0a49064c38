//! Read-only kingdom snapshot used by the status view and the per-turn debug log.

use serde::Serialize;

use crate::simulation::{
    Army, Bank, Communication, Diplomacy, Economy, GameOver, Market, Politics, Population,
    Realm, ResourceKind, Weather,
};

#[derive(Debug, Clone, Serialize)]
pub struct PopulationSnapshot {
    pub total: i32,
    pub peasants: i32,
    pub merchants: i32,
    pub nobility: i32,
    pub military: i32,
    pub food_supply: i32,
    pub is_plague: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreasurySnapshot {
    pub gold: f64,
    pub gold_cap: f64,
    pub tax_rate: f64,
    pub inflation: f64,
    pub is_recession: bool,
    pub public_services: i32,
    pub loan: f64,
    pub interest_rate: f64,
    pub bank_security_level: i32,
    pub bank_audit_cost: i32,
    pub bank_is_corrupt: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArmySnapshot {
    pub size: i32,
    pub morale: i32,
    pub is_paid: bool,
    pub training_level: i32,
    pub equipment: i32,
    pub casualties: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketSnapshot {
    pub stockpiles: Vec<(ResourceKind, i32)>,
    pub price_multiplier: f64,
    pub food_stockpile: i32,
    pub weapons_stockpile: i32,
    pub route_security: &'static str,
    pub route_risk: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourtSnapshot {
    pub king: String,
    pub skill: i32,
    pub popularity: i32,
    pub health: i32,
    pub reign_length: u32,
    pub stability: i32,
    pub election_timer: u32,
    pub is_coup: bool,
    pub corruption_level: i32,
    pub treaty: String,
    pub relations: i32,
    pub is_alliance: bool,
    pub trade_sanctions: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct KingdomSnapshot {
    pub name: String,
    pub turn: u32,
    pub game_over: Option<GameOver>,
    pub population: PopulationSnapshot,
    pub treasury: TreasurySnapshot,
    pub army: ArmySnapshot,
    pub market: MarketSnapshot,
    pub court: CourtSnapshot,
    pub weather: &'static str,
    pub weather_duration: u32,
    pub messages: usize,
}

/// Borrowed view over every subsystem, filled in by the caller.
pub struct KingdomView<'a> {
    pub realm: &'a Realm,
    pub population: &'a Population,
    pub economy: &'a Economy,
    pub army: &'a Army,
    pub bank: &'a Bank,
    pub market: &'a Market,
    pub politics: &'a Politics,
    pub diplomacy: &'a Diplomacy,
    pub communication: &'a Communication,
    pub weather: &'a Weather,
}

impl KingdomSnapshot {
    pub fn capture(view: KingdomView<'_>) -> Self {
        let KingdomView {
            realm,
            population,
            economy,
            army,
            bank,
            market,
            politics,
            diplomacy,
            communication,
            weather,
        } = view;
        let king = politics.king();
        let leader = politics.leader();

        Self {
            name: realm.name.clone(),
            turn: realm.turn,
            game_over: realm.game_over.clone(),
            population: PopulationSnapshot {
                total: population.total_people(),
                peasants: population.peasants(),
                merchants: population.merchants(),
                nobility: population.nobility(),
                military: population.military(),
                food_supply: population.food_supply(),
                is_plague: population.is_plague(),
            },
            treasury: TreasurySnapshot {
                gold: economy.gold(),
                gold_cap: economy.gold_cap(),
                tax_rate: economy.tax_rate(),
                inflation: economy.inflation(),
                is_recession: economy.is_recession(),
                public_services: economy.public_services(),
                loan: bank.loan_amount(),
                interest_rate: bank.interest_rate(),
                bank_security_level: bank.security_level(),
                bank_audit_cost: bank.audit_cost(),
                bank_is_corrupt: bank.is_corrupt(),
            },
            army: ArmySnapshot {
                size: army.size(),
                morale: army.morale(),
                is_paid: army.is_paid(),
                training_level: army.training_level(),
                equipment: army.equipment(),
                casualties: army.casualties(),
            },
            market: MarketSnapshot {
                stockpiles: ResourceKind::ALL
                    .into_iter()
                    .map(|kind| (kind, market.stock(kind)))
                    .collect(),
                price_multiplier: market.price_multiplier(),
                food_stockpile: market.food_stockpile(),
                weapons_stockpile: market.weapons_stockpile(),
                route_security: market.trade_route().tier().label(),
                route_risk: market.trade_route().risk_level(),
            },
            court: CourtSnapshot {
                king: leader.name().to_string(),
                skill: leader.skill(),
                popularity: leader.popularity(),
                health: king.health(),
                reign_length: king.reign_length(),
                stability: politics.stability(),
                election_timer: politics.election_timer(),
                is_coup: politics.is_coup(),
                corruption_level: politics.corruption_level(),
                treaty: diplomacy.treaty_label().to_string(),
                relations: diplomacy.relations(),
                is_alliance: diplomacy.is_alliance(),
                trade_sanctions: diplomacy.trade_sanctions(),
            },
            weather: weather.current_condition().label(),
            weather_duration: weather.duration(),
            messages: communication.message_count(),
        }
    }
}
