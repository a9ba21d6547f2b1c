use sqlx::FromRow;
use uuid::Uuid;

use crate::ladder::{Map, MapVeto, PlayerSession, Region};

#[derive(Debug, FromRow)]
pub struct PlayerRow {
    pub id: Uuid,
    pub ladder_points: i64,
    pub wins: i32,
    pub losses: i32,
    pub forfeits: i32,
    pub pending_match_id: Option<Uuid>,
    pub pending_opponent_id: Option<Uuid>,
    pub pending_map_id: Option<i32>,
}

impl From<PlayerRow> for PlayerSession {
    fn from(r: PlayerRow) -> Self {
        PlayerSession {
            player_id: r.id,
            ladder_points: r.ladder_points,
            wins: r.wins,
            losses: r.losses,
            forfeits: r.forfeits,
            pending_match_id: r.pending_match_id,
            pending_opponent_id: r.pending_opponent_id,
            pending_map_id: r.pending_map_id,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CharacterRow {
    pub id: Uuid,
    pub player_id: Uuid,
    pub region: String,
    pub subregion: i32,
    pub profile_id: i64,
}

#[derive(Debug, FromRow)]
pub struct MapRow {
    pub id: i32,
    pub region: String,
    pub battle_net_id: i32,
    pub battle_net_name: String,
    pub in_ranked_pool: bool,
}

impl MapRow {
    /// `None` for rows carrying a region code we do not serve.
    pub fn into_map(self) -> Option<Map> {
        Some(Map {
            id: self.id,
            region: Region::parse(&self.region)?,
            battle_net_id: self.battle_net_id,
            battle_net_name: self.battle_net_name,
            in_ranked_pool: self.in_ranked_pool,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct MapVetoRow {
    pub id: i64,
    pub player_id: Uuid,
    pub map_id: i32,
}

impl From<MapVetoRow> for MapVeto {
    fn from(r: MapVetoRow) -> Self {
        MapVeto {
            id: r.id,
            player_id: r.player_id,
            map_id: r.map_id,
        }
    }
}
