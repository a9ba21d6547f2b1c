//! Postgres-backed ladder collaborators.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{character_repo, player_repo, result_repo},
    ladder::{
        replay::ProfileRef,
        store::{
            Character, IdentityResolver, ResultStore, SessionRegistry, SettlementWrite,
            StoreError,
        },
        PlayerSession,
    },
};

#[derive(Clone)]
pub struct PgLadderStore {
    db: PgPool,
}

impl PgLadderStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityResolver for PgLadderStore {
    async fn resolve(&self, profile: &ProfileRef) -> anyhow::Result<Option<Character>> {
        character_repo::find_character(&self.db, profile).await
    }
}

#[async_trait]
impl SessionRegistry for PgLadderStore {
    async fn live_session(&self, player_id: Uuid) -> anyhow::Result<Option<PlayerSession>> {
        player_repo::fetch_session(&self.db, player_id).await
    }
}

#[async_trait]
impl ResultStore for PgLadderStore {
    async fn count_sources(&self, record_hash: &str) -> anyhow::Result<i64> {
        result_repo::count_sources(&self.db, record_hash).await
    }

    async fn settle(&self, write: SettlementWrite<'_>) -> Result<(), StoreError> {
        result_repo::settle(&self.db, write).await
    }

    async fn save_session(&self, session: &PlayerSession) -> anyhow::Result<()> {
        let mut conn = self.db.acquire().await?;
        player_repo::save_session(&mut conn, session).await
    }
}
