use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::models::{MapRow, MapVetoRow},
    ladder::{MapPool, MapVeto},
};

/// Read the whole `maps` table into a pool. Called once at startup.
pub async fn load_pool(db: &PgPool) -> anyhow::Result<MapPool> {
    let rows = sqlx::query_as::<_, MapRow>(
        "SELECT id, region, battle_net_id, battle_net_name, in_ranked_pool FROM maps ORDER BY id",
    )
    .fetch_all(db)
    .await
    .context("loading map pool")?;

    let maps = rows
        .into_iter()
        .filter_map(|r| {
            let id = r.id;
            let map = r.into_map();
            if map.is_none() {
                log::warn!("map {id} has an unknown region, skipped");
            }
            map
        })
        .collect();
    Ok(MapPool::new(maps))
}

/// A player's vetoes, oldest first.
pub async fn vetoes_for(db: &PgPool, player_id: Uuid) -> anyhow::Result<Vec<MapVeto>> {
    let rows = sqlx::query_as::<_, MapVetoRow>(
        "SELECT id, player_id, map_id FROM map_vetoes WHERE player_id = $1 ORDER BY id",
    )
    .bind(player_id)
    .fetch_all(db)
    .await
    .context("fetching map vetoes")?;

    Ok(rows.into_iter().map(MapVeto::from).collect())
}
