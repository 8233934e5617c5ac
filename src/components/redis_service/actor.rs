use crate::components::departure::TravelEstimate;
use crate::components::estimate_store::{EstimateStore, ESTIMATE_KEY};
use crate::error::{store_error, BoardResult};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client as RedisClient};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The Redis actor that processes messages
pub struct RedisActor {
    client: RedisClient,
    connection: Option<MultiplexedConnection>,
    command_rx: mpsc::Receiver<RedisCommand>,
}

/// Commands that can be sent to the Redis actor
pub enum RedisCommand {
    GetEstimate(mpsc::Sender<BoardResult<Option<TravelEstimate>>>),
    SaveEstimate(TravelEstimate, mpsc::Sender<BoardResult<()>>),
    ClearEstimate(mpsc::Sender<BoardResult<()>>),
    Shutdown,
}

/// Handle for communicating with the Redis actor
#[derive(Clone)]
pub struct RedisActorHandle {
    command_tx: mpsc::Sender<RedisCommand>,
}

impl RedisActorHandle {
    /// Create a handle with no actor behind it
    pub fn empty() -> Self {
        let (command_tx, _) = mpsc::channel(32);
        Self { command_tx }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(mpsc::Sender<BoardResult<T>>) -> RedisCommand,
    ) -> BoardResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(make(response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BoardResult<()> {
        let _ = self.command_tx.send(RedisCommand::Shutdown).await;
        Ok(())
    }
}

#[async_trait]
impl EstimateStore for RedisActorHandle {
    async fn get(&self) -> BoardResult<Option<TravelEstimate>> {
        self.request(RedisCommand::GetEstimate).await
    }

    async fn set(&self, estimate: TravelEstimate) -> BoardResult<()> {
        self.request(|tx| RedisCommand::SaveEstimate(estimate, tx)).await
    }

    async fn clear(&self) -> BoardResult<()> {
        self.request(RedisCommand::ClearEstimate).await
    }
}

impl RedisActor {
    /// Create a new actor and return its handle
    pub fn new(redis_url: &str) -> BoardResult<(Self, RedisActorHandle)> {
        let (command_tx, command_rx) = mpsc::channel(32);

        let client = RedisClient::open(redis_url)
            .map_err(|e| store_error(&format!("Failed to create Redis client: {}", e)))?;

        let actor = Self {
            client,
            connection: None,
            command_rx,
        };

        let handle = RedisActorHandle { command_tx };

        Ok((actor, handle))
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Redis actor started");

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                RedisCommand::GetEstimate(response_tx) => {
                    let result = self.get_estimate_from_redis().await;
                    let _ = response_tx.send(result).await;
                }
                RedisCommand::SaveEstimate(estimate, response_tx) => {
                    let result = self.save_estimate_to_redis(estimate).await;
                    let _ = response_tx.send(result).await;
                }
                RedisCommand::ClearEstimate(response_tx) => {
                    let result = self.clear_estimate_in_redis().await;
                    let _ = response_tx.send(result).await;
                }
                RedisCommand::Shutdown => {
                    info!("Redis actor shutting down");
                    break;
                }
            }
        }

        info!("Redis actor shut down");
    }

    /// Get a redis connection, reusing the previous one
    async fn get_redis_connection(&mut self) -> BoardResult<MultiplexedConnection> {
        if let Some(connection) = &self.connection {
            return Ok(connection.clone());
        }

        let connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| store_error(&format!("Failed to connect to Redis: {}", e)))?;
        self.connection = Some(connection.clone());
        Ok(connection)
    }

    /// Drop the cached connection after a failed command so the next one reconnects
    fn forget_connection<T>(&mut self, result: BoardResult<T>) -> BoardResult<T> {
        if result.is_err() {
            self.connection = None;
        }
        result
    }

    async fn get_estimate_from_redis(&mut self) -> BoardResult<Option<TravelEstimate>> {
        let mut redis_conn = self.get_redis_connection().await?;

        let result: BoardResult<Option<String>> = redis_conn
            .get(ESTIMATE_KEY)
            .await
            .map_err(|e| store_error(&format!("Failed to read estimate from Redis: {}", e)));
        let stored = self.forget_connection(result)?;

        debug!("Read travel estimate from Redis: {:?}", stored);
        Ok(stored
            .filter(|d| !d.trim().is_empty())
            .map(TravelEstimate::from_display))
    }

    async fn save_estimate_to_redis(&mut self, estimate: TravelEstimate) -> BoardResult<()> {
        let mut redis_conn = self.get_redis_connection().await?;

        let result: BoardResult<()> = redis_conn
            .set(ESTIMATE_KEY, &estimate.display)
            .await
            .map_err(|e| store_error(&format!("Failed to save estimate to Redis: {}", e)));
        self.forget_connection(result)
    }

    async fn clear_estimate_in_redis(&mut self) -> BoardResult<()> {
        let mut redis_conn = self.get_redis_connection().await?;

        let result: BoardResult<()> = redis_conn
            .del(ESTIMATE_KEY)
            .await
            .map_err(|e| store_error(&format!("Failed to clear estimate in Redis: {}", e)));
        self.forget_connection(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_url() {
        assert!(RedisActor::new("not-a-redis-url").is_err());
        assert!(RedisActor::new("redis://127.0.0.1:6379").is_ok());
    }

    #[tokio::test]
    async fn test_empty_handle_reports_store_error() {
        let handle = RedisActorHandle::empty();
        let err = handle.get().await.unwrap_err();
        assert!(err.to_string().contains("Actor mailbox error"));
        assert!(handle.shutdown().await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_redis_reports_store_error() {
        // Nothing listens on port 1, so every command fails to connect
        let (mut actor, handle) = RedisActor::new("redis://127.0.0.1:1").unwrap();
        let actor_task = tokio::spawn(async move { actor.run().await });

        let err = handle.get().await.unwrap_err();
        assert!(err.to_string().contains("Failed to connect to Redis"));
        assert!(handle.set(TravelEstimate::from_display("27 min")).await.is_err());
        assert!(handle.clear().await.is_err());

        handle.shutdown().await.unwrap();
        actor_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_handle_talks_to_actor_mailbox() {
        // Answer requests directly from the mailbox, standing in for Redis
        let (command_tx, mut command_rx) = mpsc::channel(4);
        let handle = RedisActorHandle { command_tx };

        tokio::spawn(async move {
            let mut stored: Option<TravelEstimate> = None;
            while let Some(cmd) = command_rx.recv().await {
                match cmd {
                    RedisCommand::GetEstimate(tx) => {
                        let _ = tx.send(Ok(stored.clone())).await;
                    }
                    RedisCommand::SaveEstimate(estimate, tx) => {
                        stored = Some(estimate);
                        let _ = tx.send(Ok(())).await;
                    }
                    RedisCommand::ClearEstimate(tx) => {
                        stored = None;
                        let _ = tx.send(Ok(())).await;
                    }
                    RedisCommand::Shutdown => break,
                }
            }
        });

        handle.set(TravelEstimate::from_display("27 min")).await.unwrap();
        assert_eq!(handle.get().await.unwrap().map(|e| e.minutes), Some(27));
        handle.clear().await.unwrap();
        assert_eq!(handle.get().await.unwrap(), None);
        handle.shutdown().await.unwrap();
    }
}
