use std::sync::Arc;

use lode_service::LodeService;
use lode_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LodeService>,
}
impl AppState {
	/// Connects to Postgres, bootstraps the schema, and wires the default embedding provider.
	pub async fn new(config: lode_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(LodeService::new(config, Arc::new(db))))
	}

	pub fn from_service(service: LodeService) -> Self {
		Self { service: Arc::new(service) }
	}
}
