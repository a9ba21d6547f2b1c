//! Mapping game-record participants onto registered players.

use uuid::Uuid;

use crate::ladder::{
    error::LadderError,
    replay::{parse_profile_url, ReplayPlayer},
    store::IdentityResolver,
};

/// A record participant mapped onto a registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub character_id: Uuid,
    pub player_id: Uuid,
    pub race: String,
    pub victory: bool,
}

/// Resolve one participant through its profile URL. An unparseable URL and an
/// unknown character both come back as `PlayerNotFound`.
pub async fn resolve_participant(
    identities: &dyn IdentityResolver,
    entry: &ReplayPlayer,
) -> Result<Participant, LadderError> {
    let profile = parse_profile_url(&entry.url).ok_or(LadderError::PlayerNotFound)?;
    let character = identities
        .resolve(&profile)
        .await
        .map_err(LadderError::Storage)?
        .ok_or(LadderError::PlayerNotFound)?;

    Ok(Participant {
        character_id: character.id,
        player_id: character.player_id,
        race: entry.race.clone(),
        victory: entry.is_victor(),
    })
}
