//! Rows written when a match settles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: Uuid,
    pub map_id: i32,
    pub matchmaking_id: Option<Uuid>,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResultPlayer {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub character_id: Uuid,
    pub points_before: i64,
    pub points_after: i64,
    pub points_delta: i64,
    pub race: String,
    pub victory: bool,
}

/// Idempotency marker: one row per accepted record hash, ever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResultSource {
    pub id: Uuid,
    pub match_id: Uuid,
    pub record_hash: String,
}

/// Everything a settled submission produces. `players[0]` is the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub result: MatchResult,
    pub players: [MatchResultPlayer; 2],
}
