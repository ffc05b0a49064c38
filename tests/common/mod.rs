#![allow(dead_code)]

use stronghold::Kingdom;
use stronghold::simulation::{Chronicle, KingdomConfig};

pub const SEED: u64 = 42;

pub fn kingdom() -> Kingdom {
    Kingdom::headless(SEED)
}

/// A headless kingdom whose saves land at `path`.
pub fn kingdom_saving_to(path: &std::path::Path) -> Kingdom {
    Kingdom::new(KingdomConfig {
        save_path: path.to_path_buf(),
        ..KingdomConfig::headless(SEED)
    })
}

pub fn chronicle_mentions(chronicle: &Chronicle, needle: &str) -> usize {
    chronicle
        .snapshot()
        .iter()
        .filter(|entry| entry.notice.message.contains(needle))
        .count()
}
