use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Result, schema};

// Key for `pg_advisory_xact_lock`, shared by every process that bootstraps the schema.
const SCHEMA_LOCK_KEY: i64 = 0x6c6f_6465;

/// Postgres handle used by the search queries.
pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &lode_config::Postgres) -> Result<Self> {
		let pool = PgPoolOptions::new()
			.max_connections(cfg.pool_max_conns)
			.connect(&cfg.dsn)
			.await?;

		Ok(Self { pool })
	}

	/// Applies `sql/init.sql` inside one transaction.
	///
	/// Concurrent callers serialize on a transaction-scoped advisory lock, and every statement
	/// is idempotent, so this is safe to run on each startup.
	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SCHEMA_LOCK_KEY)
			.execute(&mut *tx)
			.await?;

		let mut applied = 0_usize;

		for statement in statements(&sql) {
			sqlx::query(statement).execute(&mut *tx).await?;

			applied += 1;
		}

		tx.commit().await?;

		tracing::debug!(applied, "Schema is up to date.");

		Ok(())
	}
}

fn statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').map(str::trim).filter(|statement| !statement.is_empty())
}
