//! Wire messages pushed to clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ladder::{Division, DivisionTable, PlayerSession, Region};

/// How a map is advertised to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMessage {
    pub region: Region,
    pub battle_net_name: String,
    pub battle_net_id: i32,
}

// ---------- server → client ----------
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ServerMsg {
    /// Fresh ladder standing after a settlement or forfeit.
    LadderStats {
        player_id: Uuid,
        points: i64,
        division: String,
        rank: usize,
        wins: i32,
        losses: i32,
        forfeits: i32,
    },
}

impl ServerMsg {
    pub fn ladder_stats(session: &PlayerSession, divisions: &DivisionTable) -> Self {
        let (Division { name, .. }, rank) = divisions.lookup(session.ladder_points);
        ServerMsg::LadderStats {
            player_id: session.player_id,
            points: session.ladder_points,
            division: name.clone(),
            rank,
            wins: session.wins,
            losses: session.losses,
            forfeits: session.forfeits,
        }
    }
}
