//! Ranked map pool and veto-filtered random selection.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ladder::replay::Region, protocol::MapMessage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub id: i32,
    pub region: Region,
    pub battle_net_id: i32,
    pub battle_net_name: String,
    pub in_ranked_pool: bool,
}

impl Map {
    pub fn advertisement(&self) -> MapMessage {
        MapMessage {
            region: self.region,
            battle_net_name: self.battle_net_name.clone(),
            battle_net_id: self.battle_net_id,
        }
    }
}

/// A player's exclusion of one map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapVeto {
    pub id: i64,
    pub player_id: Uuid,
    pub map_id: i32,
}

/// Every known map, ranked or not. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct MapPool {
    maps: Vec<Map>,
}

impl MapPool {
    pub fn new(maps: Vec<Map>) -> Self {
        Self { maps }
    }

    pub fn maps(&self) -> &[Map] {
        &self.maps
    }

    pub fn get(&self, id: i32) -> Option<&Map> {
        self.maps.iter().find(|m| m.id == id)
    }

    /// Exact match on region and Battle.net name.
    pub fn resolve(&self, region: Region, name: &str) -> Option<&Map> {
        self.maps
            .iter()
            .find(|m| m.region == region && m.battle_net_name == name)
    }

    pub fn ranked(&self, region: Region) -> impl Iterator<Item = &Map> {
        self.maps
            .iter()
            .filter(move |m| m.region == region && m.in_ranked_pool)
    }

    /// Turn one player's veto rows into a veto list, honouring at most
    /// `max_vetoes` of them. Vetoes naming unknown maps become `None`.
    pub fn veto_list(&self, vetoes: &[MapVeto], max_vetoes: usize) -> Vec<Option<&Map>> {
        vetoes
            .iter()
            .take(max_vetoes)
            .map(|v| self.get(v.map_id))
            .collect()
    }

    /// Uniform pick among ranked maps in `region` that no veto list names.
    /// A veto names a map by Battle.net id and region.
    /// `None` when everything has been vetoed or the region has no ranked maps.
    pub fn pick_random(&self, region: Region, vetoes: &[Vec<Option<&Map>>]) -> Option<&Map> {
        self.pick_random_with(&mut rand::rng(), region, vetoes)
    }

    pub fn pick_random_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        region: Region,
        vetoes: &[Vec<Option<&Map>>],
    ) -> Option<&Map> {
        let candidates: Vec<&Map> = self
            .ranked(region)
            .filter(|m| {
                !vetoes
                    .iter()
                    .flatten()
                    .flatten()
                    .any(|v| v.battle_net_id == m.battle_net_id && v.region == m.region)
            })
            .collect();

        candidates.choose(rng).copied()
    }
}
