use std::env;

use anyhow::{Context, Result};
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use tokio_postgres::NoTls;

pub fn get_pg_pool() -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(env::var("PG_HOST").context("PG_HOST not set")?);
    cfg.user = Some(env::var("PG_USER").context("PG_USER not set")?);
    cfg.password = env::var("PG_PASS").ok();
    cfg.dbname = Some(env::var("PG_DB").context("PG_DB not set")?);

    if cfg.pool.is_none() {
        cfg.pool = Some(PoolConfig::default());
    }
    if let Some(ref mut pcfg) = cfg.pool {
        pcfg.max_size = 16;
    }

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .context("failed to create postgres pool")
}

/// Creates the tables if they are missing. Likes and comments live inside
/// the post row as JSONB, so every post mutation is a single-row write.
pub async fn init_schema(pool: &Pool) -> Result<()> {
    let client = pool
        .get()
        .await
        .context("failed to get connection for schema init")?;
    client
        .batch_execute(
            "CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                bio TEXT NOT NULL DEFAULT ''
            );
            CREATE TABLE IF NOT EXISTS posts (
                id UUID PRIMARY KEY,
                text TEXT NOT NULL DEFAULT '',
                image TEXT,
                user_id UUID NOT NULL,
                user_name TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                likes JSONB NOT NULL DEFAULT '[]',
                comments JSONB NOT NULL DEFAULT '[]'
            );",
        )
        .await
        .context("failed to create tables")?;
    Ok(())
}
