//! Ladder endpoints: result submission, map pool and division table.

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::map_repo,
    http::auth::JwtAuth,
    ladder::{Ladder, LadderError, Region, Replay},
    protocol::MapMessage,
};

fn rejection(e: &LadderError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.kind(), "message": e.to_string() });
    match e {
        LadderError::Storage(_) => HttpResponse::InternalServerError().body("storage error"),
        LadderError::PlayerNotFound => HttpResponse::NotFound().json(body),
        LadderError::ClientNotInvolved => HttpResponse::Forbidden().json(body),
        LadderError::DuplicateReplay | LadderError::WrongOpponent | LadderError::WrongMap => {
            HttpResponse::Conflict().json(body)
        }
        LadderError::InvalidParticipants
        | LadderError::InvalidMap
        | LadderError::InvalidFormat
        | LadderError::GameTooShort => HttpResponse::UnprocessableEntity().json(body),
    }
}

/// POST /api/ladder/results
#[post("/ladder/results")]
pub async fn submit_result(
    auth: JwtAuth,
    replay: web::Json<Replay>,
    ladder: web::Data<Ladder>,
) -> impl Responder {
    match ladder.submit(&replay, auth.player_id).await {
        Ok(Some(settlement)) => HttpResponse::Ok().json(settlement),
        Ok(None) => HttpResponse::Accepted().json(serde_json::json!({ "status": "awaiting_victor" })),
        Err(e) => rejection(&e),
    }
}

/// GET /api/ladder/maps/{region}
#[get("/ladder/maps/{region}")]
pub async fn ranked_maps(path: web::Path<String>, ladder: web::Data<Ladder>) -> impl Responder {
    let Some(region) = Region::parse(&path) else {
        return HttpResponse::NotFound().body("unknown region");
    };
    let maps: Vec<MapMessage> = ladder.maps().ranked(region).map(|m| m.advertisement()).collect();
    HttpResponse::Ok().json(maps)
}

#[derive(Deserialize)]
pub struct PairingQuery {
    pub player: Uuid,
    pub opponent: Uuid,
}

/// GET /api/ladder/maps/{region}/random?player=..&opponent=..
#[get("/ladder/maps/{region}/random")]
pub async fn random_map(
    path: web::Path<String>,
    web::Query(q): web::Query<PairingQuery>,
    ladder: web::Data<Ladder>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let Some(region) = Region::parse(&path) else {
        return HttpResponse::NotFound().body("unknown region");
    };

    let mut vetoes = Vec::with_capacity(2);
    for pid in [q.player, q.opponent] {
        match map_repo::vetoes_for(&db, pid).await {
            Ok(v) => vetoes.push(v),
            Err(e) => {
                log::error!("veto lookup for {pid} failed: {e:?}");
                return HttpResponse::InternalServerError().finish();
            }
        }
    }

    match ladder.pick_map(region, &vetoes) {
        Some(map) => HttpResponse::Ok().json(map.advertisement()),
        None => HttpResponse::NoContent().finish(),
    }
}

/// GET /api/ladder/divisions
#[get("/ladder/divisions")]
pub async fn divisions(ladder: web::Data<Ladder>) -> impl Responder {
    HttpResponse::Ok().json(ladder.divisions().divisions())
}

/// GET /api/ladder/divisions/lookup/{points}
#[get("/ladder/divisions/lookup/{points}")]
pub async fn lookup_division(path: web::Path<i64>, ladder: web::Data<Ladder>) -> impl Responder {
    let (division, rank) = ladder.divisions().lookup(path.into_inner());
    HttpResponse::Ok().json(serde_json::json!({
        "name": division.name,
        "points": division.points,
        "rank": rank,
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_result)
        .service(ranked_maps)
        .service(random_map)
        .service(divisions)
        .service(lookup_division);
}
