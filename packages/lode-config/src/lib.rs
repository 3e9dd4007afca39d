mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, Postgres, Providers, Search, SearchHighlight, SearchSemantic,
	Service, Storage,
};

use std::{fs, path::Path};

pub const MIN_HIGHLIGHT_WINDOW_CHARS: usize = 16;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(path, &raw)
}

pub fn parse(path: &Path, raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
		("providers.embedding.api_base", &cfg.providers.embedding.api_base),
		("providers.embedding.api_key", &cfg.providers.embedding.api_key),
		("providers.embedding.model", &cfg.providers.embedding.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("search.default_limit", cfg.search.default_limit),
		("search.global_limit", cfg.search.global_limit),
		("search.max_limit", cfg.search.max_limit),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if cfg.search.default_limit > cfg.search.max_limit {
		return Err(Error::Validation {
			message: "search.default_limit must not exceed search.max_limit.".to_string(),
		});
	}
	if cfg.search.global_limit > cfg.search.max_limit {
		return Err(Error::Validation {
			message: "search.global_limit must not exceed search.max_limit.".to_string(),
		});
	}

	let threshold = cfg.search.semantic.threshold;

	if !threshold.is_finite() {
		return Err(Error::Validation {
			message: "search.semantic.threshold must be a finite number.".to_string(),
		});
	}
	if !(-1.0..=1.0).contains(&threshold) {
		return Err(Error::Validation {
			message: "search.semantic.threshold must be in the range -1.0-1.0.".to_string(),
		});
	}
	if cfg.search.highlight.window_chars < MIN_HIGHLIGHT_WINDOW_CHARS {
		return Err(Error::Validation {
			message: format!(
				"search.highlight.window_chars must be at least {MIN_HIGHLIGHT_WINDOW_CHARS}."
			),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let api_base = cfg.providers.embedding.api_base.trim().trim_end_matches('/');

	cfg.providers.embedding.api_base = api_base.to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
