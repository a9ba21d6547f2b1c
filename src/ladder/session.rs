//! A player's live ladder state: points, record and pending match linkage.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ladder::division::DivisionTable;

/// Point award constants, injected once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderRules {
    pub starting_points: i64,
    pub win_points_base: i64,
    pub lose_points_base: i64,
    pub win_points_increment: f64,
    pub lose_points_increment: f64,
    pub max_map_vetoes: usize,
    /// Shortest game (seconds) accepted as a ladder result.
    pub min_game_length: i64,
}

impl Default for LadderRules {
    fn default() -> Self {
        Self {
            starting_points: 1250,
            win_points_base: 100,
            lose_points_base: 50,
            win_points_increment: 25.0,
            lose_points_increment: 12.5,
            max_map_vetoes: 3,
            min_game_length: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSession {
    pub player_id: Uuid,
    pub ladder_points: i64,
    pub wins: i32,
    pub losses: i32,
    pub forfeits: i32,
    pub pending_match_id: Option<Uuid>,
    pub pending_opponent_id: Option<Uuid>,
    pub pending_map_id: Option<i32>,
}

impl PlayerSession {
    pub fn new(player_id: Uuid) -> Self {
        Self {
            player_id,
            ladder_points: 0,
            wins: 0,
            losses: 0,
            forfeits: 0,
            pending_match_id: None,
            pending_opponent_id: None,
            pending_map_id: None,
        }
    }

    pub fn games_played(&self) -> i32 {
        self.wins + self.losses
    }

    /// True when this player's pending match names `other` as opponent.
    pub fn is_matched_with(&self, other: &PlayerSession) -> bool {
        self.pending_match_id.is_some() && self.pending_opponent_id == Some(other.player_id)
    }

    pub fn is_on_map(&self, map_id: i32) -> bool {
        self.pending_map_id == Some(map_id)
    }

    pub fn clear_pending(&mut self) {
        self.pending_match_id = None;
        self.pending_opponent_id = None;
        self.pending_map_id = None;
    }

    /// First ladder game starts from the configured seed total.
    pub fn seed(&mut self, rules: &LadderRules) {
        if self.games_played() == 0 {
            self.ladder_points = self.ladder_points.max(rules.starting_points);
        }
    }

    /// Give up the pending match: flat loss penalty and cleared linkage.
    /// Returns false when there was nothing pending.
    pub fn forfeit_pending_match(&mut self, rules: &LadderRules) -> bool {
        if self.pending_match_id.is_none() {
            return false;
        }
        self.seed(rules);
        self.ladder_points = (self.ladder_points - rules.lose_points_base).max(0);
        self.losses += 1;
        self.forfeits += 1;
        self.clear_pending();
        true
    }

    /// Settle a win of `self` over `loser`. Awards scale with how many
    /// ranks the loser sits above the winner.
    pub fn apply_defeat_against(
        &mut self,
        loser: &mut PlayerSession,
        divisions: &DivisionTable,
        rules: &LadderRules,
    ) {
        self.seed(rules);
        loser.seed(rules);

        let gap = divisions.rank_distance(self.ladder_points, loser.ladder_points) as f64;
        let gain = (rules.win_points_base as f64 + rules.win_points_increment * gap)
            .round()
            .max(0.0) as i64;
        let loss = (rules.lose_points_base as f64 + rules.lose_points_increment * gap)
            .round()
            .max(0.0) as i64;

        self.ladder_points += gain;
        loser.ladder_points = (loser.ladder_points - loss).max(0);
        self.wins += 1;
        loser.losses += 1;
    }
}
