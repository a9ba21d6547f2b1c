//! Readiness: the ladder registries loaded and something is playable.

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::ladder::{Ladder, Region};

#[get("/healthz")]
pub async fn healthz(ladder: web::Data<Ladder>) -> impl Responder {
    let divisions = ladder.divisions().len();
    let ranked: Vec<_> = Region::ALL
        .into_iter()
        .filter(|&r| ladder.maps().ranked(r).next().is_some())
        .collect();

    let body = json!({ "divisions": divisions, "ranked_regions": ranked });
    if divisions == 0 || ranked.is_empty() {
        return HttpResponse::ServiceUnavailable().json(body);
    }
    HttpResponse::Ok().json(body)
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(healthz);
}
