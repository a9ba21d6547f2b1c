//! Shared ladder fixture: two matchmade EU players and a small map pool.

#![allow(dead_code)]

use ladder_server::ladder::{
    memory::{MemoryLadderStore, RecordingNotifier},
    replay::{ProfileRef, Region},
    Collaborators, DivisionTable, LadderRules, Ladder, Map, MapPool, PlayerSession, Replay,
    ReplayPlayer,
};
use std::sync::Arc;
use uuid::Uuid;

pub const TEXAS: i32 = 1;
pub const FROST: i32 = 2;
pub const FIGHTING_SPIRIT: i32 = 3;

pub fn map_pool() -> MapPool {
    let map = |id: i32, region: Region, name: &str, ranked: bool| Map {
        id,
        region,
        battle_net_id: 1000 + id,
        battle_net_name: name.to_string(),
        in_ranked_pool: ranked,
    };
    MapPool::new(vec![
        map(TEXAS, Region::Eu, "Starbow - Texas 3.0", true),
        map(FROST, Region::Na, "Frost LE", false),
        map(FIGHTING_SPIRIT, Region::Na, "Starbow - Fighting Spirit", true),
        map(4, Region::Na, "Starbow - Circuit breaker", true),
        map(5, Region::Na, "Starbow - Neo Tau Cross", true),
    ])
}

pub fn divisions() -> DivisionTable {
    DivisionTable::build(4, 5, 500).expect("stock division config")
}

pub fn profile_url(id: i64) -> String {
    format!("http://eu.battle.net/sc2/en/profile/{id}/1/Player{id}/")
}

pub struct Fixture {
    pub ladder: Arc<Ladder>,
    pub store: Arc<MemoryLadderStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub winner: Uuid,
    pub loser: Uuid,
    pub match_id: Uuid,
}

impl Fixture {
    /// Winner (profile 1001) and loser (profile 1002) are matchmade with each
    /// other on Texas, both fresh to the ladder.
    pub fn new() -> Self {
        let store = Arc::new(MemoryLadderStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let winner = Uuid::new_v4();
        let loser = Uuid::new_v4();
        let match_id = Uuid::new_v4();

        for (player, profile_id) in [(winner, 1001), (loser, 1002)] {
            store.add_character(
                player,
                ProfileRef {
                    region: Region::Eu,
                    subregion: 1,
                    profile_id,
                },
            );
        }
        store.put_session(paired(winner, loser, match_id, TEXAS));
        store.put_session(paired(loser, winner, match_id, TEXAS));

        let ladder = Arc::new(Ladder::new(
            Arc::new(divisions()),
            Arc::new(map_pool()),
            LadderRules::default(),
            Collaborators {
                identities: store.clone(),
                sessions: store.clone(),
                results: store.clone(),
                notifier: notifier.clone(),
            },
        ));

        Fixture {
            ladder,
            store,
            notifier,
            winner,
            loser,
            match_id,
        }
    }

    pub fn session(&self, player: Uuid) -> PlayerSession {
        self.store.session(player).expect("session present")
    }
}

pub fn paired(player: Uuid, opponent: Uuid, match_id: Uuid, map_id: i32) -> PlayerSession {
    PlayerSession {
        pending_match_id: Some(match_id),
        pending_opponent_id: Some(opponent),
        pending_map_id: Some(map_id),
        ..PlayerSession::new(player)
    }
}

pub fn participant(profile_id: i64, victory: &str) -> ReplayPlayer {
    ReplayPlayer {
        name: format!("Player{profile_id}"),
        url: profile_url(profile_id),
        race: "Protoss".into(),
        victory: victory.into(),
    }
}

/// A valid 1v1 on Texas won by profile 1001.
pub fn replay(hash: &str) -> Replay {
    Replay {
        region: "eu".into(),
        map_name: "Starbow - Texas 3.0".into(),
        game_length: 600,
        players: vec![participant(1001, "Win"), participant(1002, "Loss")],
        observers: vec![],
        file_hash: hash.into(),
        unix_timestamp: 1_400_000_000,
    }
}
