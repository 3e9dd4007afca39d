pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Provider error: {0}")]
	Provider(#[from] lode_providers::Error),
	#[error(transparent)]
	Storage(#[from] lode_storage::Error),
}
