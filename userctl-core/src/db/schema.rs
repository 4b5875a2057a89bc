//! Schema bootstrap
//!
//! The schema itself belongs to the store; this module only guarantees
//! the demo can run against an empty database. Idempotent DDL, no
//! migration engine.

use sqlx::PgPool;
use tracing::debug;

use crate::error::StoreResult;

const SCHEMA: &str = r#"
-- Users table; email is the unique lookup key for single-record operations
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    age INT NOT NULL,
    balance NUMERIC(12, 2),
    is_active BOOLEAN NOT NULL DEFAULT TRUE
);
"#;

/// Create the users table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    debug!("ensuring users table exists");
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bootstrap_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        ensure_schema(&pool).await.expect("first bootstrap failed");
        ensure_schema(&pool).await.expect("second bootstrap failed");
    }
}
