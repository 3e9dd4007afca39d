use std::time::Duration;

use reqwest::{Client, header::HeaderMap};
use serde::Deserialize;
use serde_json::Value;
use tokio::time;

use crate::{Error, Result};
use lode_config::EmbeddingProviderConfig;

const INITIAL_BACKOFF: Duration = Duration::from_millis(100);
const MAX_BACKOFF: Duration = Duration::from_secs(2);

/// Embeds `texts` with an OpenAI-compatible embeddings endpoint.
///
/// Transient failures are retried up to `cfg.max_retries` times with exponential backoff.
/// Vectors come back in input order regardless of the order the provider lists them in.
pub async fn embed(cfg: &EmbeddingProviderConfig, texts: &[String]) -> Result<Vec<Vec<f32>>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;
	let body = serde_json::json!({
		"model": cfg.model,
		"input": texts,
		"dimensions": cfg.dimensions,
	});
	let mut backoff = INITIAL_BACKOFF;
	let mut attempt = 0_u32;

	loop {
		match send(&client, &url, &headers, &body).await {
			Ok(json) => return parse_embedding_response(json),
			Err(err) if attempt < cfg.max_retries && err.is_transient() => {
				attempt += 1;

				tracing::debug!(
					error = %err,
					attempt,
					provider_id = cfg.provider_id.as_str(),
					"Retrying embedding request."
				);

				time::sleep(backoff).await;

				backoff = backoff.saturating_mul(2).min(MAX_BACKOFF);
			},
			Err(err) => return Err(err),
		}
	}
}

async fn send(client: &Client, url: &str, headers: &HeaderMap, body: &Value) -> Result<Value> {
	let res = client.post(url).headers(headers.clone()).json(body).send().await?;
	let json = res.error_for_status()?.json().await?;

	Ok(json)
}

#[derive(Deserialize)]
struct EmbeddingResponse {
	data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
	#[serde(default)]
	index: Option<usize>,
	embedding: Vec<f32>,
}

fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f32>>> {
	let response: EmbeddingResponse = serde_json::from_value(json).map_err(|err| {
		Error::InvalidResponse { message: format!("Malformed embedding response: {err}.") }
	})?;
	let mut indexed: Vec<(usize, Vec<f32>)> = response
		.data
		.into_iter()
		.enumerate()
		.map(|(position, datum)| (datum.index.unwrap_or(position), datum.embedding))
		.collect();

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, vector)| vector).collect())
}
