//! In-process collaborators, used by tests and local tooling.

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::ladder::{
    replay::ProfileRef,
    result::{MatchResult, MatchResultPlayer, MatchResultSource},
    session::PlayerSession,
    store::{
        Character, IdentityResolver, ResultStore, SessionRegistry, SettlementWrite,
        StatsNotifier, StoreError,
    },
};

/// Characters, player sessions and settled results held in `DashMap`s.
#[derive(Debug, Default)]
pub struct MemoryLadderStore {
    characters: DashMap<ProfileRef, Character>,
    sessions: DashMap<Uuid, PlayerSession>,
    sources: DashMap<String, MatchResultSource>,
    results: DashMap<Uuid, MatchResult>,
    result_players: DashMap<Uuid, Vec<MatchResultPlayer>>,
    fail_writes: AtomicBool,
}

impl MemoryLadderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character for `player_id` and return it.
    pub fn add_character(&self, player_id: Uuid, profile: ProfileRef) -> Character {
        let character = Character {
            id: Uuid::new_v4(),
            player_id,
            profile,
        };
        self.characters.insert(profile, character.clone());
        character
    }

    pub fn put_session(&self, session: PlayerSession) {
        self.sessions.insert(session.player_id, session);
    }

    pub fn session(&self, player_id: Uuid) -> Option<PlayerSession> {
        self.sessions.get(&player_id).map(|s| s.value().clone())
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn source(&self, record_hash: &str) -> Option<MatchResultSource> {
        self.sources.get(record_hash).map(|s| s.value().clone())
    }

    pub fn results(&self) -> Vec<MatchResult> {
        self.results.iter().map(|r| r.value().clone()).collect()
    }

    pub fn result_players(&self, match_id: Uuid) -> Vec<MatchResultPlayer> {
        self.result_players
            .get(&match_id)
            .map(|p| p.value().clone())
            .unwrap_or_default()
    }

    /// Make every subsequent write fail, to exercise storage error paths.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("writes disabled");
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityResolver for MemoryLadderStore {
    async fn resolve(&self, profile: &ProfileRef) -> anyhow::Result<Option<Character>> {
        Ok(self.characters.get(profile).map(|c| c.value().clone()))
    }
}

#[async_trait]
impl SessionRegistry for MemoryLadderStore {
    async fn live_session(&self, player_id: Uuid) -> anyhow::Result<Option<PlayerSession>> {
        Ok(self.session(player_id))
    }
}

#[async_trait]
impl ResultStore for MemoryLadderStore {
    async fn count_sources(&self, record_hash: &str) -> anyhow::Result<i64> {
        Ok(self.sources.contains_key(record_hash) as i64)
    }

    async fn settle(&self, write: SettlementWrite<'_>) -> Result<(), StoreError> {
        self.check_writable()?;

        // The vacant entry keeps the hash's shard locked until every row is in.
        match self.sources.entry(write.source.record_hash.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateSource),
            Entry::Vacant(slot) => {
                self.results.insert(write.result.id, write.result.clone());
                self.result_players
                    .insert(write.result.id, write.players.to_vec());
                for session in write.sessions {
                    self.sessions.insert(session.player_id, session.clone());
                }
                slot.insert(write.source.clone());
                Ok(())
            }
        }
    }

    async fn save_session(&self, session: &PlayerSession) -> anyhow::Result<()> {
        self.check_writable()?;
        self.sessions.insert(session.player_id, session.clone());
        Ok(())
    }
}

/// Keeps the latest stats pushed for each player.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pushed: DashMap<Uuid, PlayerSession>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_pushed(&self, player_id: Uuid) -> Option<PlayerSession> {
        self.pushed.get(&player_id).map(|s| s.value().clone())
    }

    pub fn push_count(&self) -> usize {
        self.pushed.len()
    }
}

impl StatsNotifier for RecordingNotifier {
    fn broadcast_stats(&self, session: PlayerSession) {
        self.pushed.insert(session.player_id, session);
    }
}
