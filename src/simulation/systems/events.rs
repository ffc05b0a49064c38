//! Resolves the random event table against a kingdom.

use bevy_ecs::prelude::*;
use tracing::{info, warn};

use crate::simulation::{
    Army, Assassination, Chronicle, Economy, EventRoll, GameOver, Kingdom, KingdomConfig, KingdomRng,
    Leader, Market, Notice, Outcome, Politics, Population, RandomEvent, Realm, ResourceKind,
    Weather,
};

const WAR_SUPPLY_LOSS: i32 = 30;
const DISASTER_LOSS: i32 = 20;

/// Rolls the dice from the kingdom's own stream and resolves the result.
pub fn handle_random_event(kingdom: &mut Kingdom) -> RandomEvent {
    let roll = EventRoll::draw(&mut kingdom.world_mut().resource_mut::<KingdomRng>().0);
    apply_random_event(kingdom, roll)
}

/// Weather and trade-route security move first; then the event for `roll` lands.
pub fn apply_random_event(kingdom: &mut Kingdom, roll: EventRoll) -> RandomEvent {
    let world = kingdom.world_mut();
    let turn = world.resource::<Realm>().turn;
    let mut notices = Vec::new();

    advance_weather(world, &mut notices);
    reroll_trade_route(world, &mut notices);

    let event = roll.kind();
    info!(event = event.category(), roll = roll.event, "random event");
    match event {
        RandomEvent::Plague => plague(world, &mut notices),
        RandomEvent::War => war(world, &mut notices),
        RandomEvent::NaturalDisaster => {
            headline(&mut notices, event, "A natural disaster has struck!");
            let mut market = world.resource_mut::<Market>();
            note(
                &mut notices,
                market.decrease_resource(ResourceKind::Food.name(), DISASTER_LOSS),
            );
            note(
                &mut notices,
                market.decrease_resource(ResourceKind::Wood.name(), DISASTER_LOSS),
            );
        }
        RandomEvent::AssassinationAttempt => {
            assassination_attempt(world, roll.assassin_strikes, &mut notices)
        }
        RandomEvent::Revolt => {
            headline(&mut notices, event, "The peasants are revolting!");
            {
                let mut economy = world.resource_mut::<Economy>();
                let loss = (economy.gold() * 0.1).trunc();
                note(&mut notices, economy.decrease_gold(loss));
            }
            note(
                &mut notices,
                world.resource_mut::<Politics>().decrease_stability(15),
            );
        }
        RandomEvent::GoodFortune => {
            headline(
                &mut notices,
                event,
                "A wealthy merchant has donated to the kingdom!",
            );
            let mut economy = world.resource_mut::<Economy>();
            let gain = (economy.gold() * 0.1).trunc();
            note(&mut notices, economy.increase_gold(gain));
        }
        RandomEvent::Calm => headline(&mut notices, event, "The season passes quietly."),
    }

    let mut chronicle = world.resource_mut::<Chronicle>();
    for notice in notices {
        chronicle.record(turn, notice);
    }
    event
}

fn plague(world: &mut World, notices: &mut Vec<Notice>) {
    let shortage = world.resource::<Market>().check_food_shortage();
    let (share, message) = if shortage {
        (0.15, "Food shortage has led to starvation!")
    } else {
        (0.1, "A deadly plague has struck the kingdom!")
    };
    headline(notices, RandomEvent::Plague, message);
    let mut population = world.resource_mut::<Population>();
    let loss = (population.total_people() as f64 * share) as i32;
    note(notices, population.decrease_population(loss));
}

fn war(world: &mut World, notices: &mut Vec<Notice>) {
    headline(
        notices,
        RandomEvent::War,
        "A neighboring kingdom has declared war!",
    );
    {
        let mut economy = world.resource_mut::<Economy>();
        let loss = (economy.gold() * 0.2).trunc();
        note(notices, economy.decrease_gold(loss));
    }
    {
        let mut army = world.resource_mut::<Army>();
        let loss = (army.size() as f64 * 0.15) as i32;
        note(notices, army.decrease_size(loss));
    }
    let mut market = world.resource_mut::<Market>();
    for kind in [ResourceKind::Weapons, ResourceKind::Food] {
        note(notices, market.decrease_resource(kind.name(), WAR_SUPPLY_LOSS));
    }
}

fn assassination_attempt(world: &mut World, assassin_strikes: bool, notices: &mut Vec<Notice>) {
    if assassin_strikes {
        headline(
            notices,
            RandomEvent::AssassinationAttempt,
            "The king has been assassinated! A new election must be held.",
        );
        let notice = world.resource_scope(|world, mut politics: Mut<Politics>| {
            politics.force_election(&mut world.resource_mut::<KingdomRng>().0)
        });
        notices.push(notice);
        return;
    }

    headline(
        notices,
        RandomEvent::AssassinationAttempt,
        "An assassination attempt on the king has failed!",
    );
    let mut politics = world.resource_mut::<Politics>();
    note(notices, politics.decrease_stability(20));
    let king = politics.king().name().to_string();
    let attempt = politics.king_mut().face_assassination_attempt();
    match attempt {
        Assassination::Wounded { health } => {
            notices.push(Notice::warning(format!(
                "{king} was wounded in the attack. Health: {health}"
            )));
        }
        Assassination::Slain => {
            drop(politics);
            warn!(%king, "the king did not survive the attack");
            let game_over = GameOver::Assassinated { king };
            notices.push(Notice::error(game_over.headline()));
            world.resource_mut::<Realm>().game_over = Some(game_over);
        }
    }
}

fn advance_weather(world: &mut World, notices: &mut Vec<Notice>) {
    let interval = world.resource::<KingdomConfig>().weather_interval.max(1);
    {
        let mut realm = world.resource_mut::<Realm>();
        realm.turns_since_last_weather_update += 1;
        if realm.turns_since_last_weather_update < interval {
            return;
        }
        realm.turns_since_last_weather_update = 0;
    }

    world.resource_scope(|world, mut weather: Mut<Weather>| {
        weather.update_weather(&mut world.resource_mut::<KingdomRng>().0);
    });
    let weather = world.resource::<Weather>();
    let label = weather.current_condition().label();
    if weather.is_harsh() {
        notices.push(Notice::warning(format!(
            "Weather Alert: {label}. Food production will be affected for {} turns.",
            weather.duration()
        )));
    } else {
        notices.push(Notice::info(format!("The weather turns: {label}.")));
    }
}

fn reroll_trade_route(world: &mut World, notices: &mut Vec<Notice>) {
    let tier = world.resource_scope(|world, mut market: Mut<Market>| {
        market
            .trade_route_mut()
            .update_security(&mut world.resource_mut::<KingdomRng>().0)
    });
    if !tier.is_secure() {
        notices.push(Notice::warning(format!(
            "Bandits roam the trade roads. Route security: {}.",
            tier.label()
        )));
    }
}

fn headline(notices: &mut Vec<Notice>, event: RandomEvent, message: &str) {
    notices.push(Notice {
        severity: event.severity(),
        message: message.to_string(),
    });
}

fn note(notices: &mut Vec<Notice>, outcome: Outcome) {
    notices.push(match outcome {
        Ok(notice) => notice,
        Err(err) => err.notice(),
    });
}
