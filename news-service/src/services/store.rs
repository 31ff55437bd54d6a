use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client, Cmd, FromRedisValue};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

use crate::config::RedisConfig;

/// The list primitives the feed needs from a key-value store.
///
/// Values are opaque strings; encoding belongs to the caller.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Liveness probe.
    async fn ping(&self) -> Result<(), anyhow::Error>;
    /// Insert `value` at the head of the list stored at `key`.
    async fn push_front(&self, key: &str, value: String) -> Result<(), anyhow::Error>;
    /// Every element of the list at `key`, head first. A missing key is an empty list.
    async fn range_all(&self, key: &str) -> Result<Vec<String>, anyhow::Error>;
}

/// Redis-backed store.
///
/// The client is opened once and the multiplexed connection is established
/// by the first command, then shared by every later call. An unreachable
/// server therefore shows up as an error on that command rather than at
/// startup. A connection-level failure drops the cached connection so the
/// next command dials again.
#[derive(Clone)]
pub struct RedisNewsStore {
    client: Client,
    connection: Arc<AsyncMutex<Option<MultiplexedConnection>>>,
}

impl RedisNewsStore {
    pub fn new(config: &RedisConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(
            host = %config.host,
            port = config.port,
            auth = config.password.is_some(),
            "Configuring Redis client"
        );
        let client = Client::open(config.connection_url())?;

        Ok(Self {
            client,
            connection: Arc::new(AsyncMutex::new(None)),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, anyhow::Error> {
        let mut cached = self.connection.lock().await;
        if let Some(conn) = cached.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to Redis: {}", e))?;
        tracing::info!("Connected to Redis");

        *cached = Some(conn.clone());
        Ok(conn)
    }

    async fn query<T>(&self, cmd: &Cmd) -> Result<T, anyhow::Error>
    where
        T: FromRedisValue + Send,
    {
        let mut conn = self.connection().await?;

        match cmd.query_async(&mut conn).await {
            Ok(value) => Ok(value),
            Err(e) => {
                if e.is_io_error() || e.is_connection_dropped() {
                    tracing::warn!(error = %e, "Dropping broken Redis connection");
                    self.connection.lock().await.take();
                }
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl NewsStore for RedisNewsStore {
    async fn ping(&self) -> Result<(), anyhow::Error> {
        let _: String = self
            .query(&redis::cmd("PING"))
            .await
            .map_err(|e| anyhow::anyhow!("Redis health check failed: {}", e))?;
        Ok(())
    }

    async fn push_front(&self, key: &str, value: String) -> Result<(), anyhow::Error> {
        let mut cmd = redis::cmd("LPUSH");
        cmd.arg(key).arg(value);

        let length: i64 = self
            .query(&cmd)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to push to {}: {}", key, e))?;

        tracing::debug!(key = %key, length, "Pushed news record");
        Ok(())
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, anyhow::Error> {
        let mut cmd = redis::cmd("LRANGE");
        cmd.arg(key).arg(0).arg(-1);

        self.query(&cmd)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", key, e))
    }
}

/// Process-local store for tests and local runs without Redis.
pub struct InMemoryNewsStore {
    lists: Mutex<HashMap<String, VecDeque<String>>>,
    unreachable: AtomicBool,
}

impl Default for InMemoryNewsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryNewsStore {
    pub fn new() -> Self {
        Self {
            lists: Mutex::new(HashMap::new()),
            unreachable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail as if the server were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<(), anyhow::Error> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Connection refused (in-memory store offline)"));
        }
        Ok(())
    }
}

#[async_trait]
impl NewsStore for InMemoryNewsStore {
    async fn ping(&self) -> Result<(), anyhow::Error> {
        self.check_reachable()
    }

    async fn push_front(&self, key: &str, value: String) -> Result<(), anyhow::Error> {
        self.check_reachable()?;
        self.lists
            .lock()
            .map_err(|e| anyhow::anyhow!("In-memory store mutex poisoned: {}", e))?
            .entry(key.to_string())
            .or_default()
            .push_front(value);
        Ok(())
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, anyhow::Error> {
        self.check_reachable()?;
        let items = self
            .lists
            .lock()
            .map_err(|e| anyhow::anyhow!("In-memory store mutex poisoned: {}", e))?
            .get(key)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default();
        Ok(items)
    }
}
