use bevy_ecs::prelude::*;
use tracing::debug;

use crate::simulation::{Army, Chronicle, Market, Notice, Politics, Population, Realm, Weather};

const FOOD_UNREST: i32 = 5;

/// Harvests according to the weather and feeds the population from the granary.
pub fn food_stockpile_system(
    population: Res<Population>,
    weather: Res<Weather>,
    realm: Res<Realm>,
    mut market: ResMut<Market>,
    mut chronicle: ResMut<Chronicle>,
) {
    let notice = market.update_food_stockpile(population.total_people(), &weather);
    if market.check_food_shortage() {
        chronicle.record(realm.turn, notice);
    } else {
        debug!(food = market.food_stockpile(), "{}", notice.message);
    }
}

pub fn weapons_stockpile_system(
    army: Res<Army>,
    realm: Res<Realm>,
    market: Res<Market>,
    mut chronicle: ResMut<Chronicle>,
) {
    if let Some(notice) = market.update_weapons_stockpile(army.size()) {
        chronicle.record(realm.turn, notice);
    }
}

/// An empty granary costs the crown stability every turn it stays empty.
pub fn food_unrest_system(
    market: Res<Market>,
    realm: Res<Realm>,
    mut politics: ResMut<Politics>,
    mut chronicle: ResMut<Chronicle>,
) {
    if !market.check_food_shortage() {
        return;
    }
    let outcome = politics.decrease_stability(FOOD_UNREST);
    chronicle.record(
        realm.turn,
        Notice::warning("Food shortage is causing unrest among the population!"),
    );
    let notice = match outcome {
        Ok(notice) => notice,
        Err(err) => err.notice(),
    };
    chronicle.record(realm.turn, notice);
}
