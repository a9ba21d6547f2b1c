//! Tiered ranking table.
//!
//! Built once at startup from three numbers (tier count, subdivisions per tier,
//! points per subdivision) and shared read-only afterwards.

use serde::Serialize;

/// Tier names, lowest first. The table needs one more name than its tier
/// count because the top tier is appended on its own.
pub const TIER_NAMES: [&str; 5] = ["Bronze", "Silver", "Gold", "Platinum", "Diamond"];

/// One band of the ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Division {
    pub name: String,
    /// Minimum points (inclusive) to sit in this division.
    pub points: i64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DivisionConfigError {
    #[error("{tiers} tiers need {needed} tier names, only {available} known")]
    NotEnoughNames {
        tiers: usize,
        needed: usize,
        available: usize,
    },
    #[error("subdivision count must be at least 1")]
    NoSubdivisions,
    #[error("points per subdivision must be positive, got {0}")]
    NonPositivePoints(i64),
}

/// Ordered division list, ascending by threshold. Index 0 is the lowest tier
/// and always starts at zero points.
#[derive(Debug, Clone, Serialize)]
pub struct DivisionTable {
    divisions: Vec<Division>,
}

impl DivisionTable {
    /// Build with the stock tier names.
    pub fn build(
        tier_count: usize,
        subdivision_count: usize,
        points_per_subdivision: i64,
    ) -> Result<Self, DivisionConfigError> {
        Self::build_with_names(&TIER_NAMES, tier_count, subdivision_count, points_per_subdivision)
    }

    /// Every tier below the top gets `subdivision_count` bands named
    /// `"<Tier> <n>"` with `n` counting down; the top tier is a single band
    /// with no numeral.
    pub fn build_with_names(
        names: &[&str],
        tier_count: usize,
        subdivision_count: usize,
        points_per_subdivision: i64,
    ) -> Result<Self, DivisionConfigError> {
        if names.len() < tier_count + 1 {
            return Err(DivisionConfigError::NotEnoughNames {
                tiers: tier_count,
                needed: tier_count + 1,
                available: names.len(),
            });
        }
        if subdivision_count == 0 {
            return Err(DivisionConfigError::NoSubdivisions);
        }
        if points_per_subdivision <= 0 {
            return Err(DivisionConfigError::NonPositivePoints(points_per_subdivision));
        }

        let tier_size = points_per_subdivision * subdivision_count as i64;
        let mut divisions = Vec::with_capacity(tier_count * subdivision_count + 1);

        for (tier, name) in names.iter().take(tier_count).enumerate() {
            for sub in 0..subdivision_count {
                divisions.push(Division {
                    name: format!("{name} {}", subdivision_count - sub),
                    points: tier_size * tier as i64 + points_per_subdivision * sub as i64,
                });
            }
        }

        divisions.push(Division {
            name: names[tier_count].to_string(),
            points: tier_size * tier_count as i64,
        });

        Ok(Self { divisions })
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    /// Division holding `points` and its rank ordinal. Totals below every
    /// threshold land in the lowest division.
    pub fn lookup(&self, points: i64) -> (&Division, usize) {
        self.divisions
            .iter()
            .enumerate()
            .rev()
            .find(|(_, d)| points >= d.points)
            .map(|(i, d)| (d, i))
            .unwrap_or((&self.divisions[0], 0))
    }

    pub fn rank_index(&self, points: i64) -> usize {
        self.lookup(points).1
    }

    /// Signed number of ranks from `points` up to `other`.
    pub fn rank_distance(&self, points: i64, other: i64) -> i64 {
        self.rank_index(other) as i64 - self.rank_index(points) as i64
    }
}
