//! Ladder result server: validates uploaded game records and settles
//! ranked matches between matchmade players.

pub mod config;
pub mod db;
pub mod http;
pub mod ladder;
pub mod metrics;
pub mod notify;
pub mod protocol;
