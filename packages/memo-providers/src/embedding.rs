use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use memo_config::{EmbeddingProviderConfig, RetryRules};

use crate::{Error, Result, retry};

pub async fn embed(
	cfg: &EmbeddingProviderConfig,
	rules: &RetryRules,
	text: &str,
) -> Result<Vec<f32>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;
	let body = serde_json::json!({
		"model": cfg.model,
		"input": [text],
		"dimensions": cfg.dimensions,
	});
	let dimensions = cfg.dimensions as usize;

	retry::with_retries(rules, "embedding", || {
		let client = client.clone();
		let url = url.clone();
		let headers = headers.clone();
		let body = body.clone();

		async move {
			let res = client.post(url).headers(headers).json(&body).send().await?;
			let json: Value = res.error_for_status()?.json().await?;

			parse_embedding_response(json, dimensions)
		}
	})
	.await
}

fn parse_embedding_response(json: Value, dimensions: usize) -> Result<Vec<f32>> {
	let embedding = json
		.get("data")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|item| item.get("embedding"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Embedding response is missing an embedding array.".to_string(),
		})?;
	let mut vec = Vec::with_capacity(embedding.len());

	for value in embedding {
		let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
			message: "Embedding values must be numeric.".to_string(),
		})?;

		vec.push(number as f32);
	}

	if vec.len() != dimensions {
		return Err(Error::InvalidResponse {
			message: format!("Embedding has {} dimensions; expected {dimensions}.", vec.len()),
		});
	}

	Ok(vec)
}
