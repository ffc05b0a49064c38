mod common;

use stronghold::simulation::{
    EventRoll, GameOver, KingdomConfig, RandomEvent, ResourceKind, apply_random_event,
    handle_random_event,
};
use stronghold::KingdomError;

fn roll(event: u32) -> EventRoll {
    EventRoll::new(event)
}

#[test]
fn plague_takes_a_tenth() {
    let mut kingdom = common::kingdom();
    assert_eq!(apply_random_event(&mut kingdom, roll(5)), RandomEvent::Plague);
    assert_eq!(kingdom.population().total_people(), 900);
}

#[test]
fn starvation_takes_more() {
    let mut kingdom = common::kingdom();
    kingdom.market_mut().consume_food(1000);
    assert!(kingdom.market().check_food_shortage());
    apply_random_event(&mut kingdom, roll(0));
    assert_eq!(kingdom.population().total_people(), 850);
    assert_eq!(common::chronicle_mentions(kingdom.chronicle(), "starvation"), 1);
}

#[test]
fn war_drains_treasury_army_and_supplies() {
    let mut kingdom = common::kingdom();
    assert_eq!(apply_random_event(&mut kingdom, roll(20)), RandomEvent::War);
    assert_eq!(kingdom.economy().gold(), 400.0);
    assert_eq!(kingdom.army().size(), 85);
    assert_eq!(kingdom.army().casualties(), 15);
    assert_eq!(kingdom.army().morale(), 99);
    assert_eq!(kingdom.market().stock(ResourceKind::Weapons), 70);
    assert_eq!(kingdom.market().stock(ResourceKind::Food), 70);
}

#[test]
fn disaster_spoils_food_and_wood() {
    let mut kingdom = common::kingdom();
    apply_random_event(&mut kingdom, roll(35));
    assert_eq!(kingdom.market().stock(ResourceKind::Food), 80);
    assert_eq!(kingdom.market().stock(ResourceKind::Wood), 80);
    assert_eq!(kingdom.market().stock(ResourceKind::Iron), 100);
}

#[test]
fn failed_assassination_shakes_the_realm() {
    let mut kingdom = common::kingdom();
    apply_random_event(&mut kingdom, roll(50));
    assert_eq!(kingdom.politics().stability(), 30);
    assert_eq!(kingdom.politics().king().health(), 80);
    assert_eq!(kingdom.politics().king().assassination_attempts(), 1);
    assert!(!kingdom.is_game_over());
}

#[test]
fn successful_assassination_forces_an_election() {
    let mut kingdom = common::kingdom();
    kingdom.hold_election().unwrap();
    kingdom.end_turn();
    assert!(kingdom.politics().election_timer() > 0);

    let strike = EventRoll {
        event: 55,
        assassin_strikes: true,
    };
    apply_random_event(&mut kingdom, strike);
    assert_eq!(kingdom.politics().election_timer(), 10);
    assert_eq!(kingdom.politics().king().assassination_attempts(), 0);
    assert!(!kingdom.is_game_over());
}

#[test]
fn fifth_wound_ends_the_game() {
    let mut kingdom = common::kingdom();
    for _ in 0..5 {
        apply_random_event(&mut kingdom, roll(45));
    }
    assert!(kingdom.politics().is_coup());
    assert!(matches!(
        kingdom.game_over(),
        Some(GameOver::Assassinated { king }) if king == "No King"
    ));
    assert!(matches!(
        kingdom.collect_taxes(),
        Err(KingdomError::KingdomFallen)
    ));

    let turn = kingdom.turn();
    kingdom.end_turn();
    assert_eq!(kingdom.turn(), turn);
}

#[test]
fn revolt_costs_gold_and_stability() {
    let mut kingdom = common::kingdom();
    assert_eq!(apply_random_event(&mut kingdom, roll(65)), RandomEvent::Revolt);
    assert_eq!(kingdom.economy().gold(), 450.0);
    assert_eq!(kingdom.politics().stability(), 35);
}

#[test]
fn good_fortune_fills_the_treasury() {
    let mut kingdom = common::kingdom();
    apply_random_event(&mut kingdom, roll(80));
    assert_eq!(kingdom.economy().gold(), 550.0);
}

#[test]
fn quiet_season_changes_nothing() {
    let mut kingdom = common::kingdom();
    let before = kingdom.save_record();
    assert_eq!(apply_random_event(&mut kingdom, roll(95)), RandomEvent::Calm);
    assert_eq!(kingdom.save_record(), before);
    assert_eq!(kingdom.politics().stability(), 50);
}

#[test]
fn weather_moves_every_third_event() {
    let mut kingdom = common::kingdom();
    let forecasts = |kingdom: &stronghold::Kingdom| {
        common::chronicle_mentions(kingdom.chronicle(), "eather")
    };
    apply_random_event(&mut kingdom, roll(95));
    apply_random_event(&mut kingdom, roll(95));
    assert_eq!(forecasts(&kingdom), 0);
    apply_random_event(&mut kingdom, roll(95));
    assert_eq!(forecasts(&kingdom), 1);
    for _ in 0..3 {
        apply_random_event(&mut kingdom, roll(95));
    }
    assert_eq!(forecasts(&kingdom), 2);
}

#[test]
fn every_fourth_command_rolls_an_event() {
    let mut kingdom = stronghold::Kingdom::new(KingdomConfig {
        weather_interval: 1,
        ..KingdomConfig::headless(common::SEED)
    });
    for _ in 0..3 {
        kingdom.end_turn();
    }
    assert_eq!(common::chronicle_mentions(kingdom.chronicle(), "eather"), 0);
    kingdom.end_turn();
    assert_eq!(common::chronicle_mentions(kingdom.chronicle(), "eather"), 1);
}

#[test]
fn drawn_events_are_chronicled() {
    let mut kingdom = common::kingdom();
    let cursor = kingdom.chronicle().cursor();
    let event = handle_random_event(&mut kingdom);
    let headline = kingdom
        .chronicle()
        .since(cursor)
        .find(|entry| entry.notice.severity == event.severity());
    assert!(headline.is_some(), "no headline for {event:?}");
}
