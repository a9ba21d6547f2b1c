use actix_web::{middleware::Logger, web, App, HttpServer};
use ladder_server::{
    config::settings,
    db::{map_repo, PgLadderStore},
    http, metrics,
    ladder::{Collaborators, Ladder},
    notify::RedisStatsNotifier,
};
use redis::Client as RedisClient;
use sqlx::postgres::PgPoolOptions;
use std::{env, sync::Arc};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Configuration
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".into());
    let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into());

    // Postgres pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to create Postgres pool");

    // Redis client
    let redis_client = RedisClient::open(redis_url.as_str()).expect("Invalid REDIS_URL");

    // One-time build of the read-only ladder registries
    let divisions = Arc::new(
        settings()
            .divisions()
            .expect("inconsistent division configuration"),
    );
    let maps = Arc::new(
        map_repo::load_pool(&db_pool)
            .await
            .expect("Failed to load map pool"),
    );
    log::info!(
        "ladder ready: {} divisions, {} maps",
        divisions.len(),
        maps.maps().len()
    );

    let store = Arc::new(PgLadderStore::new(db_pool.clone()));
    let ladder = web::Data::new(Ladder::new(
        divisions.clone(),
        maps,
        settings().rules(),
        Collaborators {
            identities: store.clone(),
            sessions: store.clone(),
            results: store,
            notifier: Arc::new(RedisStatsNotifier::new(redis_client.clone(), divisions)),
        },
    ));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(metrics::METRICS.clone())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(ladder.clone())
            .configure(http::routes::init_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
