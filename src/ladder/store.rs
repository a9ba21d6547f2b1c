//! Collaborators the pipeline talks to. Postgres/Redis adapters live in
//! `crate::db` and `crate::notify`; `crate::ladder::memory` has in-process ones.

use async_trait::async_trait;
use uuid::Uuid;

use crate::ladder::{
    replay::ProfileRef,
    result::{MatchResult, MatchResultPlayer, MatchResultSource},
    session::PlayerSession,
};

/// A registered game account belonging to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: Uuid,
    pub player_id: Uuid,
    pub profile: ProfileRef,
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, profile: &ProfileRef) -> anyhow::Result<Option<Character>>;
}

#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Current ladder state for a player, if the player exists.
    async fn live_session(&self, player_id: Uuid) -> anyhow::Result<Option<PlayerSession>>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record hash already settled")]
    DuplicateSource,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// All rows one settlement writes, committed together.
#[derive(Debug, Clone)]
pub struct SettlementWrite<'a> {
    pub source: &'a MatchResultSource,
    pub result: &'a MatchResult,
    pub players: &'a [MatchResultPlayer],
    pub sessions: &'a [PlayerSession],
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn count_sources(&self, record_hash: &str) -> anyhow::Result<i64>;

    /// Persist a settlement atomically. A hash that is already present fails
    /// with [`StoreError::DuplicateSource`] and writes nothing.
    async fn settle(&self, write: SettlementWrite<'_>) -> Result<(), StoreError>;

    async fn save_session(&self, session: &PlayerSession) -> anyhow::Result<()>;
}

/// Fire-and-forget stats push. Implementations must not block the caller.
pub trait StatsNotifier: Send + Sync {
    fn broadcast_stats(&self, session: PlayerSession);
}
