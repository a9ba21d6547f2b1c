//! HTTP surface over the in-memory ladder.

mod common;

use actix_web::{http::StatusCode, test, web, App};
use chrono::Utc;
use common::{divisions, replay, Fixture};
use jsonwebtoken::{encode, EncodingKey, Header};
use ladder_server::{
    http::{auth::Claims, health, ladder::init_routes},
    ladder::{
        memory::{MemoryLadderStore, RecordingNotifier},
        Collaborators, Ladder, LadderRules, MapPool,
    },
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

const SECRET: &str = "ladder-test-secret";

fn token_for(player_id: Uuid) -> String {
    std::env::set_var("JWT_SECRET", SECRET);
    let claims = Claims {
        pid: player_id.to_string(),
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn ladder_data(fx: &Fixture) -> web::Data<ladder_server::ladder::Ladder> {
    web::Data::from(Arc::clone(&fx.ladder))
}

#[actix_web::test]
async fn divisions_are_listed_and_looked_up() {
    let fx = Fixture::new();
    let app = test::init_service(
        App::new()
            .app_data(ladder_data(&fx))
            .service(web::scope("/api").configure(init_routes)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/ladder/divisions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 21);

    let req = test::TestRequest::get()
        .uri("/api/ladder/divisions/lookup/1250")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Bronze 3");
    assert_eq!(body["rank"], 2);
}

#[actix_web::test]
async fn ranked_maps_are_advertised_per_region() {
    let fx = Fixture::new();
    let app = test::init_service(
        App::new()
            .app_data(ladder_data(&fx))
            .service(web::scope("/api").configure(init_routes)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/ladder/maps/us").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["battle_net_name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(!names.contains(&"Frost LE"));

    let req = test::TestRequest::get().uri("/api/ladder/maps/mars").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn submission_requires_a_token() {
    let fx = Fixture::new();
    let app = test::init_service(
        App::new()
            .app_data(ladder_data(&fx))
            .service(web::scope("/api").configure(init_routes)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/ladder/results")
        .set_json(replay("h-anon"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn submissions_map_outcomes_to_statuses() {
    let fx = Fixture::new();
    let app = test::init_service(
        App::new()
            .app_data(ladder_data(&fx))
            .service(web::scope("/api").configure(init_routes)),
    )
    .await;

    // Loser's copy is accepted but settles nothing.
    let req = test::TestRequest::post()
        .uri("/api/ladder/results")
        .insert_header(("Authorization", format!("Bearer {}", token_for(fx.loser))))
        .set_json(replay("h-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let req = test::TestRequest::post()
        .uri("/api/ladder/results")
        .insert_header(("Authorization", format!("Bearer {}", token_for(fx.winner))))
        .set_json(replay("h-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["players"][0]["points_delta"], 100);

    let req = test::TestRequest::post()
        .uri("/api/ladder/results")
        .insert_header(("Authorization", format!("Bearer {}", token_for(fx.winner))))
        .set_json(replay("h-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "duplicate_replay");

    let mut short = replay("h-2");
    short.game_length = 30;
    let req = test::TestRequest::post()
        .uri("/api/ladder/results")
        .insert_header(("Authorization", format!("Bearer {}", token_for(fx.winner))))
        .set_json(short)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn healthz_reports_loaded_registries() {
    let fx = Fixture::new();
    let app = test::init_service(
        App::new()
            .app_data(ladder_data(&fx))
            .service(web::scope("/api").configure(health::init_routes)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/healthz").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["divisions"], 21);
    assert_eq!(body["ranked_regions"], serde_json::json!(["na", "eu"]));
}

#[actix_web::test]
async fn healthz_is_unavailable_without_ranked_maps() {
    let store = Arc::new(MemoryLadderStore::new());
    let ladder = Ladder::new(
        Arc::new(divisions()),
        Arc::new(MapPool::default()),
        LadderRules::default(),
        Collaborators {
            identities: store.clone(),
            sessions: store.clone(),
            results: store,
            notifier: Arc::new(RecordingNotifier::new()),
        },
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ladder))
            .service(web::scope("/api").configure(health::init_routes)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/healthz").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ranked_regions"], serde_json::json!([]));
}
