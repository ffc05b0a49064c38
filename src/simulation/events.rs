//! Random kingdom events and the turn-stamped chronicle of everything that happened.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::{Notice, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomEvent {
    Plague,
    War,
    NaturalDisaster,
    AssassinationAttempt,
    Revolt,
    GoodFortune,
    Calm,
}

impl RandomEvent {
    /// Maps a roll in `[0, 100)` onto the event table; each band is 15 wide
    /// and the last ten rolls are quiet.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..15 => RandomEvent::Plague,
            15..30 => RandomEvent::War,
            30..45 => RandomEvent::NaturalDisaster,
            45..60 => RandomEvent::AssassinationAttempt,
            60..75 => RandomEvent::Revolt,
            75..90 => RandomEvent::GoodFortune,
            _ => RandomEvent::Calm,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            RandomEvent::Plague => "Plague",
            RandomEvent::War => "War",
            RandomEvent::NaturalDisaster => "Disaster",
            RandomEvent::AssassinationAttempt => "Intrigue",
            RandomEvent::Revolt => "Revolt",
            RandomEvent::GoodFortune => "Fortune",
            RandomEvent::Calm => "Calm",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RandomEvent::GoodFortune => Severity::Success,
            RandomEvent::Calm => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

/// The dice behind one random event. Drawn from the kingdom's stream in play,
/// fixed by hand in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRoll {
    pub event: u32,
    /// Decides the assassination branch: the blade either misses or finds the king.
    pub assassin_strikes: bool,
}

impl EventRoll {
    pub fn new(event: u32) -> Self {
        Self {
            event,
            assassin_strikes: false,
        }
    }

    pub fn draw(rng: &mut impl Rng) -> Self {
        Self {
            event: rng.gen_range(0..100),
            assassin_strikes: rng.gen_bool(0.5),
        }
    }

    pub fn kind(&self) -> RandomEvent {
        RandomEvent::from_roll(self.event)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronicleEntry {
    pub seq: u64,
    pub turn: u32,
    pub notice: Notice,
}

/// Bounded history of notices; the oldest entries fall off the front.
#[derive(Debug, Clone, Resource)]
pub struct Chronicle {
    entries: VecDeque<ChronicleEntry>,
    capacity: usize,
    next_seq: u64,
}

impl Chronicle {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_seq: 0,
        }
    }

    pub fn record(&mut self, turn: u32, notice: Notice) -> u64 {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(ChronicleEntry { seq, turn, notice });
        seq
    }

    /// Sequence number the next entry will carry.
    pub fn cursor(&self) -> u64 {
        self.next_seq
    }

    pub fn since(&self, seq: u64) -> impl Iterator<Item = &ChronicleEntry> {
        self.entries.iter().filter(move |entry| entry.seq >= seq)
    }

    pub fn latest(&self) -> Option<&ChronicleEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> Vec<ChronicleEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for Chronicle {
    fn default() -> Self {
        Self::new(128)
    }
}
