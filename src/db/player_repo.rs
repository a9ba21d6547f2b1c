use anyhow::Context;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{db::models::PlayerRow, ladder::PlayerSession};

pub async fn fetch_session(db: &PgPool, player_id: Uuid) -> anyhow::Result<Option<PlayerSession>> {
    let row = sqlx::query_as::<_, PlayerRow>(
        r#"
        SELECT id, ladder_points, wins, losses, forfeits,
               pending_match_id, pending_opponent_id, pending_map_id
          FROM players
         WHERE id = $1
        "#,
    )
    .bind(player_id)
    .fetch_optional(db)
    .await
    .context("fetching player ladder state")?;

    Ok(row.map(PlayerSession::from))
}

/// Write back points, record and pending linkage for one player.
pub async fn save_session(conn: &mut PgConnection, session: &PlayerSession) -> anyhow::Result<()> {
    let rows = sqlx::query(
        r#"
        UPDATE players
           SET ladder_points       = $2,
               wins                = $3,
               losses              = $4,
               forfeits            = $5,
               pending_match_id    = $6,
               pending_opponent_id = $7,
               pending_map_id      = $8
         WHERE id = $1
        "#,
    )
    .bind(session.player_id)
    .bind(session.ladder_points)
    .bind(session.wins)
    .bind(session.losses)
    .bind(session.forfeits)
    .bind(session.pending_match_id)
    .bind(session.pending_opponent_id)
    .bind(session.pending_map_id)
    .execute(&mut *conn)
    .await
    .context("updating player ladder state")?
    .rows_affected();

    if rows == 0 {
        anyhow::bail!("player {} vanished before update", session.player_id);
    }
    Ok(())
}
