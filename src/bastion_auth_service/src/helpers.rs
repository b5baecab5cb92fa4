use color_eyre::eyre::{Result, WrapErr};
use redis::{Client, RedisResult, aio::MultiplexedConnection};
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Opens a PostgreSQL pool and applies pending migrations.
pub async fn configure_postgresql(url: &str) -> Result<PgPool> {
    let pg_pool = get_postgres_pool(url)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(pg_pool)
}

/// Opens a multiplexed Redis connection; clones share one socket.
pub async fn configure_redis(host_name: &str) -> Result<MultiplexedConnection> {
    let client = get_redis_client(host_name).wrap_err("Failed to get Redis client")?;

    client
        .get_multiplexed_async_connection()
        .await
        .wrap_err("Failed to get Redis connection")
}

pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
