//! Parsed game records as handed to the ladder by the upload layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Battle.net server region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Na,
    Eu,
    Kr,
    Sea,
    Cn,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::Na, Region::Eu, Region::Kr, Region::Sea, Region::Cn];

    /// Region code as written in game records (`us`, `eu`, …).
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "us" | "na" => Some(Region::Na),
            "eu" => Some(Region::Eu),
            "kr" => Some(Region::Kr),
            "sea" => Some(Region::Sea),
            "cn" => Some(Region::Cn),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Na => "na",
            Region::Eu => "eu",
            Region::Kr => "kr",
            Region::Sea => "sea",
            Region::Cn => "cn",
        }
    }

    fn from_host(host: &str) -> Option<Self> {
        let host = host.to_ascii_lowercase();
        if host.ends_with("battlenet.com.cn") {
            return Some(Region::Cn);
        }
        match host.split('.').next()? {
            "us" => Some(Region::Na),
            "eu" => Some(Region::Eu),
            "kr" => Some(Region::Kr),
            "sea" => Some(Region::Sea),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External identity embedded in a participant entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileRef {
    pub region: Region,
    pub subregion: i32,
    pub profile_id: i64,
}

/// Parse `http(s)://<host>/sc2/<lang>/profile/<id>/<subregion>/<name>/`.
pub fn parse_profile_url(url: &str) -> Option<ProfileRef> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let mut parts = rest.split('/').filter(|p| !p.is_empty());

    let region = Region::from_host(parts.next()?)?;
    if parts.next()? != "sc2" {
        return None;
    }
    let _lang = parts.next()?;
    if parts.next()? != "profile" {
        return None;
    }
    let profile_id = parts.next()?.parse().ok()?;
    let subregion = parts.next()?.parse().ok()?;

    Some(ProfileRef {
        region,
        subregion,
        profile_id,
    })
}

/// One participant as it appears in the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayPlayer {
    pub name: String,
    /// Profile URL identifying the participant's account.
    pub url: String,
    pub race: String,
    /// `"Win"` for the victor; anything else counts as a loss.
    pub victory: String,
}

impl ReplayPlayer {
    pub fn is_victor(&self) -> bool {
        self.victory == "Win"
    }
}

/// A game record already parsed out of the uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    pub region: String,
    pub map_name: String,
    /// Game length in seconds.
    pub game_length: i64,
    pub players: Vec<ReplayPlayer>,
    #[serde(default)]
    pub observers: Vec<String>,
    /// Content hash of the uploaded file.
    pub file_hash: String,
    /// Unix timestamp the game was played at.
    pub unix_timestamp: i64,
}
