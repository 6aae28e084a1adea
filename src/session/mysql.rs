//! sqlx-backed session source. A lease is a `PoolConnection`, returned to the pool on drop.

use crate::config::DatabaseSettings;
use crate::error::SessionError;
use crate::session::{Session, SessionSource};
use crate::sql::{row_to_json, BindValue};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::MySql;

#[derive(Clone)]
pub struct MySqlSessionSource {
    pool: MySqlPool,
}

impl MySqlSessionSource {
    /// Open the pool and establish one connection, so bad credentials fail at startup.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, SessionError> {
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.schema);
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(SessionError::unavailable)?;
        tracing::info!(
            host = %settings.host,
            port = settings.port,
            schema = %settings.schema,
            max_connections = settings.max_connections,
            "database pool ready"
        );
        Ok(MySqlSessionSource { pool })
    }
}

struct MySqlSession {
    conn: PoolConnection<MySql>,
}

fn bind_all<'q>(
    sql: &'q str,
    params: &'q [BindValue],
) -> sqlx::query::Query<'q, MySql, sqlx::mysql::MySqlArguments> {
    let mut query = sqlx::query(sql);
    for p in params {
        query = query.bind(p.clone());
    }
    query
}

#[async_trait]
impl Session for MySqlSession {
    async fn fetch(&mut self, sql: &str, params: &[BindValue]) -> Result<Vec<Value>, SessionError> {
        let rows = bind_all(sql, params)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(SessionError::from_backend)?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn execute(&mut self, sql: &str, params: &[BindValue]) -> Result<u64, SessionError> {
        let done = bind_all(sql, params)
            .execute(&mut *self.conn)
            .await
            .map_err(SessionError::from_backend)?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl SessionSource for MySqlSessionSource {
    async fn acquire(&self) -> Result<Box<dyn Session>, SessionError> {
        let conn = self.pool.acquire().await.map_err(SessionError::unavailable)?;
        Ok(Box::new(MySqlSession { conn }))
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}
