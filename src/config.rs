//! Runtime configuration for the ladder server.

use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

use crate::ladder::{DivisionConfigError, DivisionTable, LadderRules};

#[derive(Debug)]
pub struct Settings {
    /// Tiers below the top one.
    pub division_count: usize,
    /// Bands per tier.
    pub subdivision_count: usize,
    /// Points spanned by one band.
    pub division_points: i64,
    pub starting_points: i64,
    pub win_points_base: i64,
    pub lose_points_base: i64,
    pub win_points_increment: f64,
    pub lose_points_increment: f64,
    pub max_map_vetoes: usize,
    /// Shortest accepted game, in seconds.
    pub min_game_length: i64,
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Settings {
    fn from_env() -> Self {
        let defaults = LadderRules::default();

        Settings {
            division_count: var_or("LADDER_DIVISION_COUNT", 4),
            subdivision_count: var_or("LADDER_SUBDIVISION_COUNT", 5),
            division_points: var_or("LADDER_DIVISION_POINTS", 500),
            starting_points: var_or("LADDER_STARTING_POINTS", defaults.starting_points),
            win_points_base: var_or("LADDER_WIN_POINTS_BASE", defaults.win_points_base),
            lose_points_base: var_or("LADDER_LOSE_POINTS_BASE", defaults.lose_points_base),
            win_points_increment: var_or(
                "LADDER_WIN_POINTS_INCREMENT",
                defaults.win_points_increment,
            ),
            lose_points_increment: var_or(
                "LADDER_LOSE_POINTS_INCREMENT",
                defaults.lose_points_increment,
            ),
            max_map_vetoes: var_or("LADDER_MAX_MAP_VETOES", defaults.max_map_vetoes),
            min_game_length: var_or("LADDER_MIN_GAME_SECONDS", defaults.min_game_length),
        }
    }

    pub fn rules(&self) -> LadderRules {
        LadderRules {
            starting_points: self.starting_points,
            win_points_base: self.win_points_base,
            lose_points_base: self.lose_points_base,
            win_points_increment: self.win_points_increment,
            lose_points_increment: self.lose_points_increment,
            max_map_vetoes: self.max_map_vetoes,
            min_game_length: self.min_game_length,
        }
    }

    pub fn divisions(&self) -> Result<DivisionTable, DivisionConfigError> {
        DivisionTable::build(
            self.division_count,
            self.subdivision_count,
            self.division_points,
        )
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
