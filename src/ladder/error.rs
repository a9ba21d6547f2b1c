//! Player-facing rejection reasons for result submissions.

use thiserror::Error;

/// Why a submitted result was refused. Messages are safe to show players.
#[derive(Debug, Error)]
pub enum LadderError {
    #[error("The player was not found.")]
    PlayerNotFound,
    #[error("None of your registered characters were found in the game's participant list.")]
    ClientNotInvolved,
    #[error("All participants of a game must be registered.")]
    InvalidParticipants,
    #[error("Matches must be on a valid map in the ranked pool.")]
    InvalidMap,
    #[error("Matches must be a 1v1 with no observers and a single victor.")]
    InvalidFormat,
    #[error("This game has already been processed.")]
    DuplicateReplay,
    #[error("The game was too short.")]
    GameTooShort,
    #[error("The game was not against your matchmade opponent. You have been forfeited.")]
    WrongOpponent,
    #[error("The game was not on the matchmade map.")]
    WrongMap,
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

impl LadderError {
    /// Stable label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LadderError::PlayerNotFound => "player_not_found",
            LadderError::ClientNotInvolved => "client_not_involved",
            LadderError::InvalidParticipants => "invalid_participants",
            LadderError::InvalidMap => "invalid_map",
            LadderError::InvalidFormat => "invalid_format",
            LadderError::DuplicateReplay => "duplicate_replay",
            LadderError::GameTooShort => "game_too_short",
            LadderError::WrongOpponent => "wrong_opponent",
            LadderError::WrongMap => "wrong_map",
            LadderError::Storage(_) => "storage",
        }
    }
}
