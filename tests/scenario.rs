mod common;

use std::io::Cursor;

use stronghold::simulation::{ELECTION_COOLDOWN, ResourceKind, SecurityTier};
use stronghold::ui::{Session, SessionEnd};
use stronghold::{Kingdom, KingdomConfig, KingdomError, Severity};

#[test]
fn taxes_loan_and_repayment() {
    let mut kingdom = common::kingdom();

    kingdom.collect_taxes().unwrap();
    assert_eq!(kingdom.economy().gold(), 600.0);

    kingdom.take_loan(200.0).unwrap();
    assert_eq!(kingdom.bank().loan_amount(), 200.0);
    assert_eq!(kingdom.economy().gold(), 800.0);

    kingdom.repay_loan(500.0).unwrap();
    assert_eq!(kingdom.bank().loan_amount(), 0.0);
    assert_eq!(kingdom.economy().gold(), 600.0);
}

#[test]
fn second_election_is_refused() {
    let mut kingdom = common::kingdom();
    kingdom.hold_election().unwrap();
    let king = kingdom.politics().king_name().to_string();

    let err = kingdom.hold_election().unwrap_err();
    assert!(matches!(err, KingdomError::ElectionCooldown { remaining } if remaining == ELECTION_COOLDOWN));
    assert_eq!(kingdom.politics().election_timer(), ELECTION_COOLDOWN);
    assert_eq!(kingdom.politics().king_name(), king);
}

#[test]
fn election_timer_runs_down_with_turns() {
    let mut kingdom = Kingdom::new(KingdomConfig {
        event_interval: u32::MAX,
        ..KingdomConfig::headless(common::SEED)
    });
    kingdom.hold_election().unwrap();
    for _ in 0..ELECTION_COOLDOWN {
        kingdom.end_turn();
    }
    assert_eq!(kingdom.politics().election_timer(), 0);
    assert!(kingdom.hold_election().is_ok());
}

#[test]
fn overspending_changes_nothing() {
    let mut kingdom = common::kingdom();
    assert!(kingdom.fund_public_services(501).is_err());
    assert!(kingdom.repay_loan(10.0).is_ok());
    assert_eq!(kingdom.economy().gold(), 500.0);
    assert_eq!(kingdom.economy().public_services(), 50);

    assert!(kingdom.pay_soldiers().is_ok());
    assert_eq!(kingdom.economy().gold(), 490.0);
}

#[test]
fn trading_round_trip_on_a_safe_road() {
    let mut kingdom = common::kingdom();
    kingdom.market_mut().trade_route_mut().apply_roll(0);
    assert_eq!(kingdom.market().trade_route().tier(), SecurityTier::Secure);

    kingdom.trade_resource("iron", 12).unwrap();
    assert_eq!(kingdom.economy().gold(), 320.0);
    assert_eq!(kingdom.market().stock(ResourceKind::Iron), 112);

    kingdom.trade_resource("iron", -12).unwrap();
    assert_eq!(kingdom.economy().gold(), 500.0);
    assert_eq!(kingdom.market().stock(ResourceKind::Iron), 100);

    assert!(matches!(
        kingdom.trade_resource("silk", 1),
        Err(KingdomError::UnknownResource(_))
    ));
}

#[test]
fn command_validation_reaches_the_player() {
    let mut kingdom = common::kingdom();
    assert!(matches!(
        kingdom.train_army(6),
        Err(KingdomError::TrainingCycles(6))
    ));
    assert!(matches!(
        kingdom.update_equipment(0),
        Err(KingdomError::EquipmentQuality(0))
    ));
    assert!(kingdom.break_treaty().is_err());
    assert!(kingdom.set_tax_rate(1.5).is_err());

    kingdom.train_army(3).unwrap();
    assert_eq!(kingdom.army().size(), 150);
    assert_eq!(kingdom.army().morale(), 85);
    assert_eq!(kingdom.army().training_level(), 4);

    let notice = kingdom.make_treaty("Peace with Eastland").unwrap();
    assert_eq!(notice.severity, Severity::Success);
    assert_eq!(kingdom.diplomacy().relations(), 60);
}

#[test]
fn empty_granary_breeds_unrest() {
    let mut kingdom = common::kingdom();
    kingdom.end_turn();
    assert!(kingdom.market().check_food_shortage());
    assert_eq!(kingdom.politics().stability(), 45);
    assert_eq!(common::chronicle_mentions(kingdom.chronicle(), "unrest"), 1);
}

#[test]
fn scripted_session_plays_the_scenario() {
    let script = "2\n5\n200\n6\n500\nbogus\n17\n";
    let session = Session::new(common::kingdom(), Cursor::new(script), Vec::new());
    let mut session = session.without_clearing();

    let end = session.run().unwrap();
    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(session.kingdom().economy().gold(), 600.0);
    assert_eq!(session.kingdom().bank().loan_amount(), 0.0);
    assert_eq!(session.kingdom().turn(), 4);

    let (_, output) = session.into_parts();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Collected 100.00 gold in taxes"));
    assert!(output.contains("Please enter a number between 1 and 17!"));
    assert!(output.contains("Thank you for playing Stronghold!"));
}

#[test]
fn session_survives_bad_numbers_and_closed_input() {
    let script = "3\nmany\n1\n\n16\n\n";
    let mut session = Session::new(common::kingdom(), Cursor::new(script), Vec::new())
        .without_clearing();

    assert_eq!(session.run().unwrap(), SessionEnd::InputClosed);
    assert_eq!(session.kingdom().army().size(), 100);
    assert_eq!(session.kingdom().turn(), 4);
    let (_, output) = session.into_parts();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Invalid number of cycles"));
    assert!(output.contains("Kingdom of Westland"));
    assert!(output.contains("No messages."));
}

#[test]
fn off_menu_numbers_cost_a_turn() {
    let script = "99\n0\nsoon\n17\n";
    let mut session = Session::new(common::kingdom(), Cursor::new(script), Vec::new())
        .without_clearing();

    assert_eq!(session.run().unwrap(), SessionEnd::Exited);
    assert_eq!(session.kingdom().turn(), 3);
    let (_, output) = session.into_parts();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Invalid choice! Please try again."));
    assert!(output.contains("Please enter a number between 1 and 17!"));
}

#[test]
fn non_finite_loans_are_refused_at_the_menu() {
    let script = "5\nNaN\n5\ninf\n17\n";
    let mut session = Session::new(common::kingdom(), Cursor::new(script), Vec::new())
        .without_clearing();

    assert_eq!(session.run().unwrap(), SessionEnd::Exited);
    assert_eq!(session.kingdom().economy().gold(), 500.0);
    assert_eq!(session.kingdom().bank().loan_amount(), 0.0);
    let (_, output) = session.into_parts();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("loan amount must be a finite number"));
}
