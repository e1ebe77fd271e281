use std::{collections::HashSet, time::Duration};

use reqwest::Client;
use serde_json::Value;

use memo_config::{EnrichmentProviderConfig, RetryRules};

use crate::{Error, Result, retry};

pub const MIN_TAGS: usize = 3;
pub const MAX_TAGS: usize = 6;
pub const TASK_COUNT: usize = 3;

const SYSTEM_PROMPT: &str = "You turn raw notes into: \
1) a concrete summary of one to two sentences, \
2) three to six lowercase topical tags, \
3) exactly three short, actionable follow-up tasks in imperative voice. \
Be concise and practical. No boilerplate.";

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NoteEnrichment {
	pub summary: String,
	pub tags: Vec<String>,
	pub tasks: Vec<String>,
}

pub async fn enrich(
	cfg: &EnrichmentProviderConfig,
	rules: &RetryRules,
	title: &str,
	body: &str,
) -> Result<NoteEnrichment> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;
	let request = request_body(cfg, title, body);

	retry::with_retries(rules, "enrichment", || {
		let client = client.clone();
		let url = url.clone();
		let headers = headers.clone();
		let request = request.clone();

		async move {
			let res = client.post(url).headers(headers).json(&request).send().await?;
			let json: Value = res.error_for_status()?.json().await?;

			parse_enrichment_response(json)
		}
	})
	.await
}

fn request_body(cfg: &EnrichmentProviderConfig, title: &str, body: &str) -> Value {
	serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "system", "content": SYSTEM_PROMPT },
			{ "role": "user", "content": format!("Title: {title}\n\nContent: {body}") },
		],
		"response_format": {
			"type": "json_schema",
			"json_schema": {
				"name": "note_enrichment",
				"strict": true,
				"schema": {
					"type": "object",
					"additionalProperties": false,
					"required": ["summary", "tags", "tasks"],
					"properties": {
						"summary": { "type": "string" },
						"tags": {
							"type": "array",
							"items": { "type": "string" },
							"minItems": MIN_TAGS,
							"maxItems": MAX_TAGS,
						},
						"tasks": {
							"type": "array",
							"items": { "type": "string" },
							"minItems": TASK_COUNT,
							"maxItems": TASK_COUNT,
						},
					},
				},
			},
		},
	})
}

fn parse_enrichment_response(json: Value) -> Result<NoteEnrichment> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Enrichment response is missing message content.".to_string(),
		})?;
	let enrichment: NoteEnrichment =
		serde_json::from_str(content).map_err(|_| Error::InvalidResponse {
			message: "Enrichment content does not match the expected schema.".to_string(),
		})?;

	validate_enrichment(&enrichment)?;

	Ok(enrichment)
}

/// Shape checks on top of the upstream schema enforcement. The model is told
/// the same bounds, but a response violating them must never reach storage.
pub fn validate_enrichment(enrichment: &NoteEnrichment) -> Result<()> {
	if enrichment.summary.trim().is_empty() {
		return Err(Error::InvalidResponse {
			message: "Enrichment summary must be non-empty.".to_string(),
		});
	}
	if enrichment.tags.len() < MIN_TAGS || enrichment.tags.len() > MAX_TAGS {
		return Err(Error::InvalidResponse {
			message: format!("Enrichment must carry {MIN_TAGS} to {MAX_TAGS} tags."),
		});
	}
	if enrichment.tags.iter().any(|tag| tag.trim().is_empty()) {
		return Err(Error::InvalidResponse {
			message: "Enrichment tags must be non-empty.".to_string(),
		});
	}

	let distinct: HashSet<&str> = enrichment.tags.iter().map(String::as_str).collect();

	if distinct.len() != enrichment.tags.len() {
		return Err(Error::InvalidResponse {
			message: "Enrichment tags must be distinct.".to_string(),
		});
	}

	if enrichment.tasks.len() != TASK_COUNT {
		return Err(Error::InvalidResponse {
			message: format!("Enrichment must carry exactly {TASK_COUNT} follow-up tasks."),
		});
	}
	if enrichment.tasks.iter().any(|task| task.trim().is_empty()) {
		return Err(Error::InvalidResponse {
			message: "Enrichment tasks must be non-empty.".to_string(),
		});
	}

	Ok(())
}
