use std::io::{self, Write};

use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewStatus,
    CollectTaxes,
    TrainArmy,
    PaySoldiers,
    TakeLoan,
    RepayLoan,
    TradeResources,
    HoldElection,
    MakeTreaty,
    BreakTreaty,
    SaveGame,
    LoadGame,
    FundPublicServices,
    UpdateEquipment,
    SendMessage,
    ViewMessages,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 17] = [
        MenuChoice::ViewStatus,
        MenuChoice::CollectTaxes,
        MenuChoice::TrainArmy,
        MenuChoice::PaySoldiers,
        MenuChoice::TakeLoan,
        MenuChoice::RepayLoan,
        MenuChoice::TradeResources,
        MenuChoice::HoldElection,
        MenuChoice::MakeTreaty,
        MenuChoice::BreakTreaty,
        MenuChoice::SaveGame,
        MenuChoice::LoadGame,
        MenuChoice::FundPublicServices,
        MenuChoice::UpdateEquipment,
        MenuChoice::SendMessage,
        MenuChoice::ViewMessages,
        MenuChoice::Exit,
    ];

    /// Menu numbers start at 1.
    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    pub fn parse(line: &str) -> Option<Self> {
        line.trim().parse().ok().and_then(Self::from_number)
    }

    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| choice == self)
            .map_or(0, |index| index + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::ViewStatus => "View Kingdom Status",
            MenuChoice::CollectTaxes => "Collect Taxes",
            MenuChoice::TrainArmy => "Train Army",
            MenuChoice::PaySoldiers => "Pay Soldiers",
            MenuChoice::TakeLoan => "Take Loan",
            MenuChoice::RepayLoan => "Repay Loan",
            MenuChoice::TradeResources => "Trade Resources",
            MenuChoice::HoldElection => "Hold Election",
            MenuChoice::MakeTreaty => "Make Treaty",
            MenuChoice::BreakTreaty => "Break Treaty",
            MenuChoice::SaveGame => "Save Game",
            MenuChoice::LoadGame => "Load Game",
            MenuChoice::FundPublicServices => "Fund Public Services",
            MenuChoice::UpdateEquipment => "Update Army Equipment",
            MenuChoice::SendMessage => "Send Message",
            MenuChoice::ViewMessages => "View Messages",
            MenuChoice::Exit => "Exit",
        }
    }
}

pub fn render_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Main Menu".bold())?;
    for choice in MenuChoice::ALL {
        writeln!(
            out,
            "  {} {}",
            format!("{:>2}.", choice.number()).color(Color::BrightBlack),
            choice.label()
        )?;
    }
    Ok(())
}
