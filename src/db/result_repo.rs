use anyhow::Context;
use sqlx::PgPool;

use crate::{
    db::player_repo,
    ladder::store::{SettlementWrite, StoreError},
};

pub async fn count_sources(db: &PgPool, record_hash: &str) -> anyhow::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM match_result_sources WHERE record_hash = $1")
        .bind(record_hash)
        .fetch_one(db)
        .await
        .context("counting result sources")
}

/// Source, header, player rows and both players' state in one transaction.
/// The unique index on `record_hash` decides duplicates.
pub async fn settle(db: &PgPool, write: SettlementWrite<'_>) -> Result<(), StoreError> {
    let mut tx = db.begin().await.context("opening settlement transaction")?;

    sqlx::query(
        r#"INSERT INTO match_results (id, map_id, matchmaking_id, played_at)
           VALUES ($1, $2, $3, $4)"#,
    )
    .bind(write.result.id)
    .bind(write.result.map_id)
    .bind(write.result.matchmaking_id)
    .bind(write.result.played_at)
    .execute(&mut *tx)
    .await
    .context("inserting match result")?;

    let source = sqlx::query(
        r#"INSERT INTO match_result_sources (id, match_id, record_hash)
           VALUES ($1, $2, $3)"#,
    )
    .bind(write.source.id)
    .bind(write.source.match_id)
    .bind(&write.source.record_hash)
    .execute(&mut *tx)
    .await;

    match source {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            tx.rollback().await.ok();
            return Err(StoreError::DuplicateSource);
        }
        Err(e) => return Err(anyhow::Error::new(e).context("inserting result source").into()),
    }

    for p in write.players {
        sqlx::query(
            r#"
            INSERT INTO match_result_players
                   (id, match_id, player_id, character_id,
                    points_before, points_after, points_delta, race, victory)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(p.id)
        .bind(p.match_id)
        .bind(p.player_id)
        .bind(p.character_id)
        .bind(p.points_before)
        .bind(p.points_after)
        .bind(p.points_delta)
        .bind(&p.race)
        .bind(p.victory)
        .execute(&mut *tx)
        .await
        .context("inserting match result player")?;
    }

    for session in write.sessions {
        player_repo::save_session(&mut tx, session).await?;
    }

    tx.commit().await.context("committing settlement")?;
    Ok(())
}
