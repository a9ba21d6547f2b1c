//! Redis pub/sub push of ladder stats.
//
//  player:<player_id>:events – PUB/SUB channel for one-off pushes (JSON)

use redis::{AsyncCommands, Client as RedisClient};
use std::sync::Arc;

use crate::{
    ladder::{store::StatsNotifier, DivisionTable, PlayerSession},
    protocol::ServerMsg,
};

pub struct RedisStatsNotifier {
    redis: RedisClient,
    divisions: Arc<DivisionTable>,
}

impl RedisStatsNotifier {
    pub fn new(redis: RedisClient, divisions: Arc<DivisionTable>) -> Self {
        Self { redis, divisions }
    }
}

impl StatsNotifier for RedisStatsNotifier {
    /// Publishes from a detached task. Nobody awaits it; failures end up in
    /// the log and nowhere else.
    fn broadcast_stats(&self, session: PlayerSession) {
        let redis = self.redis.clone();
        let msg = ServerMsg::ladder_stats(&session, &self.divisions);
        let pid = session.player_id;

        tokio::spawn(async move {
            let json = match serde_json::to_string(&msg) {
                Ok(j) => j,
                Err(e) => {
                    log::warn!("could not encode stats for {pid}: {e}");
                    return;
                }
            };
            match redis.get_multiplexed_async_connection().await {
                Ok(mut conn) => {
                    let sent: redis::RedisResult<()> =
                        conn.publish(format!("player:{pid}:events"), json).await;
                    if let Err(e) = sent {
                        log::warn!("stats push for {pid} failed: {e}");
                    }
                }
                Err(e) => log::warn!("stats push for {pid} skipped, redis unavailable: {e}"),
            }
        });
    }
}
