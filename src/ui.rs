mod menu;
mod panels;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::str::FromStr;

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::simulation::{GameOver, Kingdom, Notice, Outcome};
pub use menu::{MenuChoice, render_menu};
pub use panels::{
    render_chronicle, render_header, render_messages, render_notices, render_status,
};

const RECENT_CHRONICLE: u64 = 5;

/// A fully specified player decision, ready to run against the kingdom.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ViewStatus,
    CollectTaxes,
    TrainArmy(i32),
    PaySoldiers,
    TakeLoan(f64),
    RepayLoan(f64),
    Trade { resource: String, amount: i32 },
    HoldElection,
    MakeTreaty(String),
    BreakTreaty,
    Save,
    Load,
    FundPublicServices(i32),
    UpdateEquipment(i32),
    SendMessage(String),
    ViewMessages,
}

impl Command {
    /// Views return `None`; everything else is exactly one kingdom operation.
    pub fn execute(&self, kingdom: &mut Kingdom) -> Option<Outcome> {
        let outcome = match self {
            Command::ViewStatus | Command::ViewMessages => return None,
            Command::CollectTaxes => kingdom.collect_taxes(),
            Command::TrainArmy(cycles) => kingdom.train_army(*cycles),
            Command::PaySoldiers => kingdom.pay_soldiers(),
            Command::TakeLoan(amount) => kingdom.take_loan(*amount),
            Command::RepayLoan(amount) => kingdom.repay_loan(*amount),
            Command::Trade { resource, amount } => kingdom.trade_resource(resource, *amount),
            Command::HoldElection => kingdom.hold_election(),
            Command::MakeTreaty(text) => kingdom.make_treaty(text),
            Command::BreakTreaty => kingdom.break_treaty(),
            Command::Save => kingdom.save(),
            Command::Load => kingdom.load(),
            Command::FundPublicServices(amount) => kingdom.fund_public_services(*amount),
            Command::UpdateEquipment(quality) => kingdom.update_equipment(*quality),
            Command::SendMessage(message) => kingdom.send_message(message),
        };
        Some(outcome)
    }
}

/// Why the menu loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Exited,
    InputClosed,
    Fallen(GameOver),
}

impl SessionEnd {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SessionEnd::Exited | SessionEnd::InputClosed => ExitCode::SUCCESS,
            SessionEnd::Fallen(_) => ExitCode::from(2),
        }
    }
}

pub fn parse_number<T: FromStr>(line: &str, what: &str) -> Result<T, Notice> {
    line.trim()
        .parse()
        .map_err(|_| Notice::error(format!("Invalid {what}: {:?}", line.trim())))
}

/// The text-menu loop over any line source and sink.
pub struct Session<R, W> {
    kingdom: Kingdom,
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(kingdom: Kingdom, input: R, output: W) -> Self {
        Self {
            kingdom,
            input,
            output,
            clear_screen: true,
        }
    }

    pub fn without_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn kingdom(&self) -> &Kingdom {
        &self.kingdom
    }

    pub fn into_parts(self) -> (Kingdom, W) {
        (self.kingdom, self.output)
    }

    pub fn run(&mut self) -> io::Result<SessionEnd> {
        let mut pending = vec![Notice::success(format!(
            "Welcome to Stronghold! Manage {} wisely.",
            self.kingdom.name()
        ))];

        loop {
            self.clear()?;
            render_header(&mut self.output, self.kingdom.name(), self.kingdom.turn())?;
            render_notices(&mut self.output, &pending)?;

            if let Some(game_over) = self.kingdom.game_over().cloned() {
                writeln!(self.output, "Game Over: {}", game_over.headline())?;
                return Ok(SessionEnd::Fallen(game_over));
            }

            render_menu(&mut self.output)?;
            let Some(line) = self.read_line("Enter your choice: ")? else {
                return Ok(SessionEnd::InputClosed);
            };
            // Words are re-asked for free; a number off the menu still costs a turn.
            let Some(choice) = MenuChoice::parse(&line) else {
                if line.trim().parse::<i64>().is_ok() {
                    pending = vec![Notice::error("Invalid choice! Please try again.")];
                    pending.extend(self.kingdom.end_turn());
                } else {
                    pending = vec![Notice::error(format!(
                        "Please enter a number between 1 and {}!",
                        MenuChoice::ALL.len()
                    ))];
                }
                continue;
            };
            if choice == MenuChoice::Exit {
                writeln!(self.output, "Thank you for playing Stronghold!")?;
                return Ok(SessionEnd::Exited);
            }

            pending = match self.prompt(choice)? {
                None => return Ok(SessionEnd::InputClosed),
                Some(Ok(command)) => self.dispatch(&command)?,
                Some(Err(notice)) => vec![notice],
            };
            pending.extend(self.kingdom.end_turn());
        }
    }

    /// Collects whatever arguments `choice` needs. `None` ends the session.
    fn prompt(&mut self, choice: MenuChoice) -> io::Result<Option<Result<Command, Notice>>> {
        let command = match choice {
            MenuChoice::ViewStatus => Ok(Command::ViewStatus),
            MenuChoice::CollectTaxes => Ok(Command::CollectTaxes),
            MenuChoice::PaySoldiers => Ok(Command::PaySoldiers),
            MenuChoice::HoldElection => Ok(Command::HoldElection),
            MenuChoice::BreakTreaty => Ok(Command::BreakTreaty),
            MenuChoice::SaveGame => Ok(Command::Save),
            MenuChoice::LoadGame => Ok(Command::Load),
            MenuChoice::ViewMessages => Ok(Command::ViewMessages),
            MenuChoice::TrainArmy => {
                let Some(line) = self.read_line("Enter number of training cycles (1-5): ")? else {
                    return Ok(None);
                };
                parse_number(&line, "number of cycles").map(Command::TrainArmy)
            }
            MenuChoice::TakeLoan => {
                let Some(line) = self.read_line("Enter loan amount: ")? else {
                    return Ok(None);
                };
                parse_number(&line, "loan amount").map(Command::TakeLoan)
            }
            MenuChoice::RepayLoan => {
                let Some(line) = self.read_line("Enter repayment amount: ")? else {
                    return Ok(None);
                };
                parse_number(&line, "repayment amount").map(Command::RepayLoan)
            }
            MenuChoice::TradeResources => {
                let Some(resource) =
                    self.read_line("Enter resource (wood, stone, iron, food, weapons): ")?
                else {
                    return Ok(None);
                };
                let Some(line) =
                    self.read_line("Enter amount (positive to buy, negative to sell): ")?
                else {
                    return Ok(None);
                };
                parse_number(&line, "amount").map(|amount| Command::Trade {
                    resource: resource.trim().to_string(),
                    amount,
                })
            }
            MenuChoice::MakeTreaty => {
                let Some(text) = self.read_line("Enter treaty (e.g., Peace with Eastland): ")?
                else {
                    return Ok(None);
                };
                Ok(Command::MakeTreaty(text))
            }
            MenuChoice::FundPublicServices => {
                let Some(line) = self.read_line("Enter funding amount: ")? else {
                    return Ok(None);
                };
                parse_number(&line, "funding amount").map(Command::FundPublicServices)
            }
            MenuChoice::UpdateEquipment => {
                let Some(line) = self.read_line("Enter equipment quality level (1-10): ")? else {
                    return Ok(None);
                };
                parse_number(&line, "quality level").map(Command::UpdateEquipment)
            }
            MenuChoice::SendMessage => {
                let Some(text) = self.read_line("Enter your message (max 100 characters): ")?
                else {
                    return Ok(None);
                };
                Ok(Command::SendMessage(text))
            }
            MenuChoice::Exit => return Ok(None),
        };
        Ok(Some(command))
    }

    fn dispatch(&mut self, command: &Command) -> io::Result<Vec<Notice>> {
        match command {
            Command::ViewStatus => {
                let social = self.kingdom.population().check_social_classes();
                render_status(&mut self.output, &self.kingdom.snapshot(), &social)?;
                let chronicle = self.kingdom.chronicle();
                let from = chronicle.cursor().saturating_sub(RECENT_CHRONICLE);
                render_chronicle(&mut self.output, chronicle.since(from))?;
                self.pause()?;
                Ok(Vec::new())
            }
            Command::ViewMessages => {
                render_messages(&mut self.output, self.kingdom.communication().messages())?;
                self.pause()?;
                Ok(Vec::new())
            }
            action => Ok(action
                .execute(&mut self.kingdom)
                .map(|outcome| match outcome {
                    Ok(notice) => notice,
                    Err(err) => err.notice(),
                })
                .into_iter()
                .collect()),
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn pause(&mut self) -> io::Result<()> {
        self.read_line("Press Enter to continue...").map(|_| ())
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}
