//! Bearer-JWT extractor naming the submitting player.

use actix_web::{
    dev::Payload, error::ErrorUnauthorized, FromRequest, HttpRequest, Result as ActixResult,
};
use futures_util::future::{ready, Ready};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

/// Ladder-relevant claims of an access token. `pid` is the player id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub pid: String,
    pub exp: usize,
}

/// The player a request acts for.
#[derive(Debug, Clone, Copy)]
pub struct JwtAuth {
    pub player_id: Uuid,
}

fn player_from(req: &HttpRequest) -> ActixResult<Uuid> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ErrorUnauthorized("bearer token required"))?;

    let secret = env::var("JWT_SECRET").map_err(|_| ErrorUnauthorized("server mis-config"))?;
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ErrorUnauthorized("invalid / expired token"))?
    .claims;

    Uuid::parse_str(&claims.pid).map_err(|_| ErrorUnauthorized("bad pid"))
}

impl FromRequest for JwtAuth {
    type Error = actix_web::Error;
    type Future = Ready<ActixResult<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
        ready(player_from(req).map(|player_id| JwtAuth { player_id }))
    }
}
