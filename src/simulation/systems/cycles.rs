use bevy_ecs::prelude::*;
use tracing::debug;

use crate::simulation::{Politics, Realm};

/// Advances the turn counter, the election countdown and the king's reign.
pub fn reign_clock_system(mut realm: ResMut<Realm>, mut politics: ResMut<Politics>) {
    realm.turn += 1;
    politics.tick_election_timer();
    politics.king_mut().increment_reign();
    debug!(
        turn = realm.turn,
        election_timer = politics.election_timer(),
        reign = politics.king().reign_length(),
        "turn advanced"
    );
}
