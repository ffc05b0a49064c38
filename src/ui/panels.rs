use std::io::{self, Write};

use colored::{Color, Colorize};

use crate::simulation::{
    ChronicleEntry, KingdomSnapshot, Notice, badge, format_entry, format_notice,
};

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("== {title} ==").bold().color(Color::BrightCyan))
}

fn flag(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

pub fn render_header(out: &mut impl Write, name: &str, turn: u32) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        badge(name, Color::BrightYellow),
        badge(&format!("Turn {turn}"), Color::BrightBlack)
    )
}

pub fn render_notices(out: &mut impl Write, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        writeln!(out, "{}", format_notice(notice))?;
    }
    Ok(())
}

/// Full kingdom status; `social` is the class-balance verdict shown under the population.
pub fn render_status(
    out: &mut impl Write,
    snapshot: &KingdomSnapshot,
    social: &Notice,
) -> io::Result<()> {
    let KingdomSnapshot {
        population,
        treasury,
        army,
        market,
        court,
        ..
    } = snapshot;

    writeln!(out, "{}", format!("Kingdom of {}", snapshot.name).bold())?;

    section(out, "Population")?;
    writeln!(out, "Total: {}", population.total)?;
    writeln!(
        out,
        "Peasants: {}  Merchants: {}  Nobility: {}  Military: {}",
        population.peasants, population.merchants, population.nobility, population.military
    )?;
    writeln!(
        out,
        "Food supply: {}  Plague: {}",
        population.food_supply,
        flag(population.is_plague)
    )?;
    writeln!(out, "{}", format_notice(social))?;

    section(out, "Treasury")?;
    writeln!(
        out,
        "Gold: {:.2} / {:.0}  Tax rate: {:.0}%  Inflation: {:.2}  Recession: {}",
        treasury.gold,
        treasury.gold_cap,
        treasury.tax_rate * 100.0,
        treasury.inflation,
        flag(treasury.is_recession)
    )?;
    writeln!(out, "Public services: {}", treasury.public_services)?;
    writeln!(
        out,
        "Loan: {:.2}  Interest: {:.0}%  Bank security: {}  Audit cost: {}  Bank corrupt: {}",
        treasury.loan,
        treasury.interest_rate * 100.0,
        treasury.bank_security_level,
        treasury.bank_audit_cost,
        flag(treasury.bank_is_corrupt)
    )?;

    section(out, "Army")?;
    writeln!(
        out,
        "Size: {}  Morale: {}  Paid: {}  Training: {}  Equipment: {}  Casualties: {}",
        army.size,
        army.morale,
        flag(army.is_paid),
        army.training_level,
        army.equipment,
        army.casualties
    )?;

    section(out, "Market")?;
    let stock = market
        .stockpiles
        .iter()
        .map(|(kind, quantity)| format!("{kind}: {quantity}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{stock}")?;
    writeln!(
        out,
        "Price multiplier: {:.2}  Granary: {}  Armory: {}",
        market.price_multiplier, market.food_stockpile, market.weapons_stockpile
    )?;
    writeln!(
        out,
        "Trade route: {} (risk {:.1})",
        market.route_security, market.route_risk
    )?;

    section(out, "Court")?;
    writeln!(
        out,
        "King: {}  Skill: {}  Popularity: {}  Health: {}  Reign: {} turns",
        court.king, court.skill, court.popularity, court.health, court.reign_length
    )?;
    let stability = if court.stability < 20 {
        court.stability.to_string().color(Color::BrightRed)
    } else {
        court.stability.to_string().normal()
    };
    writeln!(
        out,
        "Stability: {stability}  Coup: {}  Corruption: {}  Next election in: {}",
        flag(court.is_coup),
        court.corruption_level,
        court.election_timer
    )?;

    section(out, "Diplomacy")?;
    writeln!(
        out,
        "Treaty: {}  Relations: {}  Alliance: {}  Trade sanctions: {}",
        court.treaty,
        court.relations,
        flag(court.is_alliance),
        court.trade_sanctions
    )?;

    section(out, "Weather")?;
    writeln!(
        out,
        "Condition: {}  Duration: {}",
        snapshot.weather, snapshot.weather_duration
    )?;
    Ok(())
}

pub fn render_messages(out: &mut impl Write, messages: &[String]) -> io::Result<()> {
    section(out, "Royal Messages")?;
    if messages.is_empty() {
        writeln!(out, "No messages.")?;
    }
    for (index, message) in messages.iter().enumerate() {
        writeln!(out, "{}. {message}", index + 1)?;
    }
    Ok(())
}

pub fn render_chronicle<'a>(
    out: &mut impl Write,
    entries: impl IntoIterator<Item = &'a ChronicleEntry>,
) -> io::Result<()> {
    section(out, "Recent Chronicle")?;
    for entry in entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    Ok(())
}
