mod pool;

pub use pool::create_pool;

/// Apply the embedded schema migrations.
pub async fn run_migrations(db: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(db).await
}
