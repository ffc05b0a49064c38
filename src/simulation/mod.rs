use std::path::Path;
use std::thread;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use tracing::{debug, info, warn};

pub mod army;
pub mod bank;
pub mod communication;
pub mod diplomacy;
pub mod economy;
pub mod events;
pub mod market;
pub mod notice;
pub mod observer;
pub mod politics;
pub mod population;
pub mod resources;
pub mod save;
pub mod systems;
pub mod trade;
pub mod weather;

pub use army::*;
pub use bank::*;
pub use communication::*;
pub use diplomacy::*;
pub use economy::*;
pub use events::*;
pub use market::*;
pub use notice::*;
pub use observer::*;
pub use politics::*;
pub use population::*;
pub use resources::*;
pub use save::*;
pub use systems::*;
pub use trade::*;
pub use weather::*;

/// One kingdom: every subsystem lives as a resource in its own `World`, and
/// end-of-turn upkeep runs as a chained schedule over them.
pub struct Kingdom {
    world: World,
    maintenance: Schedule,
}

impl Kingdom {
    pub fn new(config: KingdomConfig) -> Self {
        let mut world = World::default();
        world.insert_resource(Realm::new(config.name.clone()));
        world.insert_resource(KingdomRng::from_config(&config));
        world.insert_resource(config);
        world.insert_resource(Population::default());
        world.insert_resource(Economy::default());
        world.insert_resource(Army::default());
        world.insert_resource(Bank::default());
        world.insert_resource(Market::default());
        world.insert_resource(Politics::default());
        world.insert_resource(Diplomacy::default());
        world.insert_resource(Communication::default());
        world.insert_resource(Weather::default());
        world.insert_resource(Chronicle::default());

        let mut maintenance = Schedule::default();
        maintenance.add_systems(
            (
                food_stockpile_system,
                weapons_stockpile_system,
                food_unrest_system,
                reign_clock_system,
                snapshot_logging_system,
            )
                .chain(),
        );

        Self { world, maintenance }
    }

    /// Fixed seed, no training delay.
    pub fn headless(seed: u64) -> Self {
        Self::new(KingdomConfig::headless(seed))
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn name(&self) -> &str {
        &self.world.resource::<Realm>().name
    }

    pub fn turn(&self) -> u32 {
        self.world.resource::<Realm>().turn
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        self.world.resource::<Realm>().game_over.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over().is_some()
    }

    pub fn config(&self) -> &KingdomConfig {
        self.world.resource::<KingdomConfig>()
    }

    pub fn population(&self) -> &Population {
        self.world.resource::<Population>()
    }

    pub fn economy(&self) -> &Economy {
        self.world.resource::<Economy>()
    }

    pub fn army(&self) -> &Army {
        self.world.resource::<Army>()
    }

    pub fn bank(&self) -> &Bank {
        self.world.resource::<Bank>()
    }

    pub fn market(&self) -> &Market {
        self.world.resource::<Market>()
    }

    pub fn politics(&self) -> &Politics {
        self.world.resource::<Politics>()
    }

    pub fn diplomacy(&self) -> &Diplomacy {
        self.world.resource::<Diplomacy>()
    }

    pub fn communication(&self) -> &Communication {
        self.world.resource::<Communication>()
    }

    pub fn weather(&self) -> &Weather {
        self.world.resource::<Weather>()
    }

    pub fn chronicle(&self) -> &Chronicle {
        self.world.resource::<Chronicle>()
    }

    pub fn population_mut(&mut self) -> Mut<'_, Population> {
        self.world.resource_mut::<Population>()
    }

    pub fn economy_mut(&mut self) -> Mut<'_, Economy> {
        self.world.resource_mut::<Economy>()
    }

    pub fn army_mut(&mut self) -> Mut<'_, Army> {
        self.world.resource_mut::<Army>()
    }

    pub fn market_mut(&mut self) -> Mut<'_, Market> {
        self.world.resource_mut::<Market>()
    }

    pub fn politics_mut(&mut self) -> Mut<'_, Politics> {
        self.world.resource_mut::<Politics>()
    }

    pub fn weather_mut(&mut self) -> Mut<'_, Weather> {
        self.world.resource_mut::<Weather>()
    }

    pub fn snapshot(&self) -> KingdomSnapshot {
        KingdomSnapshot::capture(KingdomView {
            realm: self.world.resource::<Realm>(),
            population: self.population(),
            economy: self.economy(),
            army: self.army(),
            bank: self.bank(),
            market: self.market(),
            politics: self.politics(),
            diplomacy: self.diplomacy(),
            communication: self.communication(),
            weather: self.weather(),
        })
    }

    /// Stamps `notice` with the current turn and files it in the chronicle.
    pub fn record(&mut self, notice: Notice) -> u64 {
        let turn = self.turn();
        self.world.resource_mut::<Chronicle>().record(turn, notice)
    }

    pub fn collect_taxes(&mut self) -> Outcome {
        self.command("collect taxes", |world| {
            world.resource_scope(|world, mut economy: Mut<Economy>| {
                Ok(economy.collect_taxes(world.resource::<Population>()))
            })
        })
    }

    pub fn set_tax_rate(&mut self, rate: f64) -> Outcome {
        self.command("set tax rate", |world| {
            world.resource_mut::<Economy>().set_tax_rate(rate)
        })
    }

    pub fn fund_public_services(&mut self, amount: i32) -> Outcome {
        self.command("fund public services", |world| {
            world.resource_mut::<Economy>().fund_public_services(amount)
        })
    }

    pub fn train_army(&mut self, cycles: i32) -> Outcome {
        self.command("train army", |world| {
            let pace = world.resource::<KingdomConfig>().training_pace;
            world.resource_mut::<Army>().train(cycles, |cycle| {
                debug!(cycle, "drilling troops");
                if !pace.is_zero() {
                    thread::sleep(pace);
                }
            })
        })
    }

    pub fn pay_soldiers(&mut self) -> Outcome {
        self.command("pay soldiers", |world| {
            world.resource_scope(|world, mut army: Mut<Army>| {
                army.pay_soldiers(&mut world.resource_mut::<Economy>())
            })
        })
    }

    pub fn update_equipment(&mut self, quality: i32) -> Outcome {
        self.command("update equipment", |world| {
            world.resource_mut::<Army>().update_equipment(quality)
        })
    }

    pub fn take_loan(&mut self, amount: f64) -> Outcome {
        self.command("take loan", |world| {
            world.resource_scope(|world, mut bank: Mut<Bank>| {
                bank.take_loan(amount, &mut world.resource_mut::<Economy>())
            })
        })
    }

    pub fn repay_loan(&mut self, amount: f64) -> Outcome {
        self.command("repay loan", |world| {
            world.resource_scope(|world, mut bank: Mut<Bank>| {
                bank.repay_loan(amount, &mut world.resource_mut::<Economy>())
            })
        })
    }

    pub fn trade_resource(&mut self, name: &str, amount: i32) -> Outcome {
        self.command("trade resource", |world| {
            world.resource_scope(|world, mut market: Mut<Market>| {
                world.resource_scope(|world, mut rng: Mut<KingdomRng>| {
                    market.trade_resource(
                        name,
                        amount,
                        &mut world.resource_mut::<Economy>(),
                        &mut rng.0,
                    )
                })
            })
        })
    }

    pub fn hold_election(&mut self) -> Outcome {
        self.command("hold election", |world| {
            world.resource_scope(|world, mut politics: Mut<Politics>| {
                politics.hold_election(&mut world.resource_mut::<KingdomRng>().0)
            })
        })
    }

    pub fn apply_policy(&mut self) -> Outcome {
        self.command("apply policy", |world| {
            Ok(world.resource_mut::<Politics>().king_mut().apply_policy())
        })
    }

    pub fn make_treaty(&mut self, text: &str) -> Outcome {
        self.command("make treaty", |world| {
            world.resource_mut::<Diplomacy>().make_treaty(text)
        })
    }

    pub fn break_treaty(&mut self) -> Outcome {
        self.command("break treaty", |world| {
            world.resource_mut::<Diplomacy>().break_treaty()
        })
    }

    pub fn send_message(&mut self, message: &str) -> Outcome {
        self.command("send message", |world| {
            world.resource_mut::<Communication>().send_message(message)
        })
    }

    pub fn save(&mut self) -> Outcome {
        let path = self.config().save_path.clone();
        self.save_to(&path)
    }

    pub fn save_to(&mut self, path: &Path) -> Outcome {
        let record = self.save_record();
        self.command("save game", |_| {
            record.write_to(path)?;
            Ok(Notice::success(format!("Game saved to {}.", path.display())))
        })
    }

    pub fn load(&mut self) -> Outcome {
        let path = self.config().save_path.clone();
        self.load_from(&path)
    }

    /// Reads the whole file before touching any state, so a bad file changes nothing.
    pub fn load_from(&mut self, path: &Path) -> Outcome {
        self.command("load game", |world| {
            let record = SaveRecord::read_from(path)?;
            restore(world, record)?;
            Ok(Notice::success(format!("Game loaded from {}.", path.display())))
        })
    }

    pub fn save_record(&self) -> SaveRecord {
        SaveRecord {
            name: self.name().to_string(),
            population: self.population().total_people(),
            gold: self.economy().gold(),
            army_size: self.army().size(),
            army_morale: self.army().morale(),
            loan: self.bank().loan_amount(),
            messages: self.communication().messages().to_vec(),
        }
    }

    /// Closes out a command: every few commands a random event strikes, then
    /// upkeep runs. Returns the notices the turn produced.
    pub fn end_turn(&mut self) -> Vec<Notice> {
        let cursor = self.chronicle().cursor();
        let interval = self.config().event_interval.max(1);
        let event_due = {
            let mut realm = self.world.resource_mut::<Realm>();
            realm.commands_since_event += 1;
            let due = realm.commands_since_event >= interval;
            if due {
                realm.commands_since_event = 0;
            }
            due
        };

        if event_due && !self.is_game_over() {
            handle_random_event(self);
        }
        if !self.is_game_over() {
            self.maintenance.run(&mut self.world);
        }

        self.chronicle()
            .since(cursor)
            .map(|entry| entry.notice.clone())
            .collect()
    }

    fn command(
        &mut self,
        action: &'static str,
        op: impl FnOnce(&mut World) -> Outcome,
    ) -> Outcome {
        if self.is_game_over() {
            return Err(KingdomError::KingdomFallen);
        }
        let outcome = op(&mut self.world);
        let notice = match &outcome {
            Ok(notice) => {
                info!(action, severity = notice.severity.label(), "{}", notice.message);
                notice.clone()
            }
            Err(err) => {
                warn!(action, error = %err, "command rejected");
                err.notice()
            }
        };
        self.record(notice);
        outcome
    }
}

/// Only the saved figures are restored; everything else keeps its current value.
fn restore(world: &mut World, record: SaveRecord) -> Result<(), KingdomError> {
    world.resource_mut::<Realm>().name = record.name;

    {
        let mut population = world.resource_mut::<Population>();
        let delta = record.population - population.total_people();
        if delta > 0 {
            population.increase_population(delta)?;
        } else if delta < 0 {
            population.decrease_population(-delta)?;
        }
    }

    *world.resource_mut::<Army>() = Army::restored(record.army_size, record.army_morale);
    world.resource_mut::<Bank>().restore_loan(record.loan);

    {
        let mut communication = world.resource_mut::<Communication>();
        communication.clear();
        for message in &record.messages {
            communication.send_message(message)?;
        }
    }

    world.resource_mut::<Economy>().restore_gold(record.gold);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_kingdom_matches_starting_figures() {
        let kingdom = Kingdom::headless(1);
        assert_eq!(kingdom.name(), "Westland");
        assert_eq!(kingdom.turn(), 1);
        assert_eq!(kingdom.population().total_people(), 1000);
        assert_eq!(kingdom.economy().gold(), 500.0);
        assert_eq!(kingdom.army().size(), 100);
        assert_eq!(kingdom.bank().loan_amount(), 0.0);
        assert_eq!(kingdom.politics().king_name(), "No King");
        assert_eq!(kingdom.diplomacy().treaty_label(), NO_TREATY);
        assert!(!kingdom.is_game_over());
    }

    #[test]
    fn commands_land_in_the_chronicle() {
        let mut kingdom = Kingdom::headless(2);
        kingdom.collect_taxes().unwrap();
        assert!(kingdom.take_loan(-5.0).is_err());
        let severities: Vec<_> = kingdom
            .chronicle()
            .snapshot()
            .iter()
            .map(|entry| entry.notice.severity)
            .collect();
        assert_eq!(severities, vec![Severity::Success, Severity::Error]);
    }

    #[test]
    fn turn_clock_ticks_per_command() {
        let mut kingdom = Kingdom::headless(3);
        kingdom.hold_election().unwrap();
        kingdom.end_turn();
        assert_eq!(kingdom.turn(), 2);
        assert_eq!(kingdom.politics().election_timer(), ELECTION_COOLDOWN - 1);
        assert_eq!(kingdom.politics().king().reign_length(), 1);
    }

    #[test]
    fn fallen_kingdom_refuses_commands() {
        let mut kingdom = Kingdom::headless(4);
        kingdom.world_mut().resource_mut::<Realm>().game_over = Some(GameOver::Assassinated {
            king: "Harald".to_string(),
        });
        assert!(matches!(
            kingdom.collect_taxes(),
            Err(KingdomError::KingdomFallen)
        ));
        assert_eq!(kingdom.economy().gold(), 500.0);
    }
}
