//! Turns one submitted game record into a settled ladder result.
//!
//! Gates run in a fixed order and the first failure wins. Nothing is written
//! before the map-consistency gate except the punitive forfeits, and the
//! settlement rows go to the store in a single call while both players'
//! locks are held.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ladder::{
        division::DivisionTable,
        error::LadderError,
        locks::PlayerLocks,
        maps::{Map, MapPool, MapVeto},
        participant::{resolve_participant, Participant},
        replay::{Region, Replay},
        result::{MatchResult, MatchResultPlayer, MatchResultSource, Settlement},
        session::{LadderRules, PlayerSession},
        store::{
            IdentityResolver, ResultStore, SessionRegistry, SettlementWrite, StatsNotifier,
            StoreError,
        },
    },
    metrics,
};

/// External services the ladder depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub identities: Arc<dyn IdentityResolver>,
    pub sessions: Arc<dyn SessionRegistry>,
    pub results: Arc<dyn ResultStore>,
    pub notifier: Arc<dyn StatsNotifier>,
}

pub struct Ladder {
    divisions: Arc<DivisionTable>,
    maps: Arc<MapPool>,
    rules: LadderRules,
    locks: PlayerLocks,
    deps: Collaborators,
}

impl Ladder {
    pub fn new(
        divisions: Arc<DivisionTable>,
        maps: Arc<MapPool>,
        rules: LadderRules,
        deps: Collaborators,
    ) -> Self {
        Self {
            divisions,
            maps,
            rules,
            locks: PlayerLocks::new(),
            deps,
        }
    }

    pub fn divisions(&self) -> &DivisionTable {
        &self.divisions
    }

    pub fn maps(&self) -> &MapPool {
        &self.maps
    }

    pub fn locks(&self) -> &PlayerLocks {
        &self.locks
    }

    /// Random ranked map for a pairing, skipping anything either side vetoed.
    pub fn pick_map(&self, region: Region, vetoes: &[Vec<MapVeto>]) -> Option<&Map> {
        let lists: Vec<_> = vetoes
            .iter()
            .map(|v| self.maps.veto_list(v, self.rules.max_map_vetoes))
            .collect();
        self.maps.pick_random(region, &lists)
    }

    /// Validate and, when the submitter is the victor, settle a game record.
    ///
    /// `Ok(None)` means the record was valid but came from the loser; the
    /// victor's own submission is what settles the match.
    pub async fn submit(
        &self,
        replay: &Replay,
        submitter: Uuid,
    ) -> Result<Option<Settlement>, LadderError> {
        let outcome = self.process(replay, submitter).await;
        match &outcome {
            Ok(Some(settlement)) => {
                metrics::record_submission("settled");
                log::info!(
                    "match {} settled: {} beat {}",
                    settlement.result.id,
                    settlement.players[0].player_id,
                    settlement.players[1].player_id
                );
            }
            Ok(None) => {
                metrics::record_submission("awaiting_victor");
                log::debug!("record from {submitter} accepted, waiting for the victor's copy");
            }
            Err(LadderError::Storage(e)) => {
                metrics::record_submission("storage");
                log::error!("ladder submission from {submitter} failed: {e:?}");
            }
            Err(e) => {
                metrics::record_submission(e.kind());
                log::info!("ladder submission from {submitter} rejected: {}", e.kind());
            }
        }
        outcome
    }

    async fn process(
        &self,
        replay: &Replay,
        submitter: Uuid,
    ) -> Result<Option<Settlement>, LadderError> {
        if replay.game_length < self.rules.min_game_length {
            return Err(LadderError::GameTooShort);
        }

        let map = Region::parse(&replay.region)
            .and_then(|region| self.maps.resolve(region, &replay.map_name))
            .filter(|m| m.in_ranked_pool)
            .ok_or(LadderError::InvalidMap)?;

        if !replay.observers.is_empty() || replay.players.len() != 2 {
            return Err(LadderError::InvalidFormat);
        }
        let played_at = DateTime::<Utc>::from_timestamp(replay.unix_timestamp, 0)
            .ok_or(LadderError::InvalidFormat)?;

        if self.source_seen(&replay.file_hash).await? {
            return Err(LadderError::DuplicateReplay);
        }

        let (player, opponent) = self.resolve_sides(replay, submitter).await?;

        if player.victory == opponent.victory {
            return Err(LadderError::InvalidFormat);
        }

        let guard = self
            .locks
            .lock_pair(player.player_id, opponent.player_id)
            .await;

        // A copy of this record may have settled while we waited.
        if self.source_seen(&replay.file_hash).await? {
            return Err(LadderError::DuplicateReplay);
        }

        if !player.victory {
            return Ok(None);
        }

        let mut client = self.live_session(submitter).await?;
        let mut rival = self.live_session(opponent.player_id).await?;

        if !client.is_matched_with(&rival) {
            self.forfeit(&mut client).await?;
            return Err(LadderError::WrongOpponent);
        }
        if !rival.is_matched_with(&client) {
            self.forfeit(&mut rival).await?;
        }

        if !client.is_on_map(map.id) {
            return Err(LadderError::WrongMap);
        }

        let result = MatchResult {
            id: Uuid::new_v4(),
            map_id: map.id,
            matchmaking_id: client.pending_match_id,
            played_at,
        };
        let source = MatchResultSource {
            id: Uuid::new_v4(),
            match_id: result.id,
            record_hash: replay.file_hash.clone(),
        };

        client.seed(&self.rules);
        rival.seed(&self.rules);
        let client_before = client.ladder_points;
        let rival_before = rival.ladder_points;

        client.apply_defeat_against(&mut rival, &self.divisions, &self.rules);

        client.clear_pending();
        rival.clear_pending();

        let rows = [
            result_row(&player, result.id, client_before, client.ladder_points),
            result_row(&opponent, result.id, rival_before, rival.ladder_points),
        ];
        let sessions = [client, rival];

        self.deps
            .results
            .settle(SettlementWrite {
                source: &source,
                result: &result,
                players: &rows,
                sessions: &sessions,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateSource => LadderError::DuplicateReplay,
                StoreError::Other(e) => LadderError::Storage(e),
            })?;

        drop(guard);

        let [client, rival] = sessions;
        self.deps.notifier.broadcast_stats(client);
        self.deps.notifier.broadcast_stats(rival);

        Ok(Some(Settlement {
            result,
            players: rows,
        }))
    }

    /// Forfeit whatever match `session` is waiting on and persist it.
    /// Returns whether anything was pending.
    pub async fn forfeit(&self, session: &mut PlayerSession) -> Result<bool, LadderError> {
        if !session.forfeit_pending_match(&self.rules) {
            return Ok(false);
        }
        log::warn!("player {} forfeited their pending match", session.player_id);
        self.deps
            .results
            .save_session(session)
            .await
            .map_err(LadderError::Storage)?;
        Ok(true)
    }

    async fn resolve_sides(
        &self,
        replay: &Replay,
        submitter: Uuid,
    ) -> Result<(Participant, Participant), LadderError> {
        let mut player = None;
        let mut opponent = None;

        for entry in &replay.players {
            let participant = match resolve_participant(&*self.deps.identities, entry).await {
                Ok(p) => p,
                Err(LadderError::PlayerNotFound) => return Err(LadderError::InvalidParticipants),
                Err(e) => return Err(e),
            };
            if participant.player_id == submitter {
                player = Some(participant);
            } else {
                opponent = Some(participant);
            }
        }

        let player = player.ok_or(LadderError::ClientNotInvolved)?;
        let opponent = opponent.ok_or(LadderError::InvalidParticipants)?;
        Ok((player, opponent))
    }

    async fn source_seen(&self, record_hash: &str) -> Result<bool, LadderError> {
        let count = self
            .deps
            .results
            .count_sources(record_hash)
            .await
            .map_err(LadderError::Storage)?;
        Ok(count > 0)
    }

    async fn live_session(&self, player_id: Uuid) -> Result<PlayerSession, LadderError> {
        self.deps
            .sessions
            .live_session(player_id)
            .await
            .map_err(LadderError::Storage)?
            .ok_or(LadderError::PlayerNotFound)
    }
}

fn result_row(
    participant: &Participant,
    match_id: Uuid,
    points_before: i64,
    points_after: i64,
) -> MatchResultPlayer {
    MatchResultPlayer {
        id: Uuid::new_v4(),
        match_id,
        player_id: participant.player_id,
        character_id: participant.character_id,
        points_before,
        points_after,
        points_delta: points_after - points_before,
        race: participant.race.clone(),
        victory: participant.victory,
    }
}
