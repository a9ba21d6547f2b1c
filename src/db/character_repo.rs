use anyhow::Context;
use sqlx::PgPool;

use crate::{
    db::models::CharacterRow,
    ladder::{replay::ProfileRef, store::Character},
};

/// Registered character behind a Battle.net profile, if any.
pub async fn find_character(db: &PgPool, profile: &ProfileRef) -> anyhow::Result<Option<Character>> {
    let row = sqlx::query_as::<_, CharacterRow>(
        r#"
        SELECT id, player_id, region, subregion, profile_id
          FROM characters
         WHERE region = $1 AND subregion = $2 AND profile_id = $3
        "#,
    )
    .bind(profile.region.as_str())
    .bind(profile.subregion)
    .bind(profile.profile_id)
    .fetch_optional(db)
    .await
    .context("looking up character by profile")?;

    Ok(row.map(|r| Character {
        id: r.id,
        player_id: r.player_id,
        profile: *profile,
    }))
}
