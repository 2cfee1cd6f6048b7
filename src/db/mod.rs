use dotenv::dotenv;
use sqlx::PgPool;
use std::env;

/// Connects a Postgres pool from `DATABASE_URL`. Used when wiring the
/// directory service against the durable [`PgEmployeeStore`](crate::store::PgEmployeeStore).
pub async fn create_pool() -> Result<PgPool, sqlx::Error> {
    dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPool::connect(&database_url).await
}
