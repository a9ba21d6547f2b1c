pub mod auth;
pub mod health;
pub mod ladder;
pub mod routes;
