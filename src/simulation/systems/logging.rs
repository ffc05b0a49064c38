//! Colored severity badges for the console and the per-turn snapshot record.

use bevy_ecs::prelude::*;
use colored::{Color, Colorize};
use tracing::{debug, enabled, Level};

use crate::simulation::{
    Army, Bank, ChronicleEntry, Communication, Diplomacy, Economy, KingdomSnapshot, KingdomView,
    Market, Notice, Politics, Population, Realm, Severity, Weather,
};

pub fn badge(label: &str, color: Color) -> String {
    format!("[{}]", label).color(color).to_string()
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::BrightBlue,
        Severity::Success => Color::BrightGreen,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::BrightRed,
    }
}

pub fn format_notice(notice: &Notice) -> String {
    let color = severity_color(notice.severity);
    format!(
        "{} {}",
        badge(notice.severity.label(), color),
        notice.message.color(color)
    )
}

pub fn format_entry(entry: &ChronicleEntry) -> String {
    format!(
        "{} {}",
        badge(&format!("Turn {}", entry.turn), Color::BrightBlack),
        format_notice(&entry.notice)
    )
}

/// Dumps the whole kingdom as JSON at debug level once per turn.
#[allow(clippy::too_many_arguments)]
pub fn snapshot_logging_system(
    realm: Res<Realm>,
    population: Res<Population>,
    economy: Res<Economy>,
    army: Res<Army>,
    bank: Res<Bank>,
    market: Res<Market>,
    politics: Res<Politics>,
    diplomacy: Res<Diplomacy>,
    communication: Res<Communication>,
    weather: Res<Weather>,
) {
    if !enabled!(Level::DEBUG) {
        return;
    }
    let snapshot = KingdomSnapshot::capture(KingdomView {
        realm: &realm,
        population: &population,
        economy: &economy,
        army: &army,
        bank: &bank,
        market: &market,
        politics: &politics,
        diplomacy: &diplomacy,
        communication: &communication,
        weather: &weather,
    });
    match serde_json::to_string(&snapshot) {
        Ok(json) => debug!(turn = realm.turn, snapshot = %json, "kingdom snapshot"),
        Err(err) => debug!(error = %err, "snapshot could not be serialized"),
    }
}
