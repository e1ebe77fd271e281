use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub notes: NoteRules,
	#[serde(default)]
	pub search: SearchRules,
	#[serde(default)]
	pub retry: RetryRules,
	pub providers: Providers,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NoteRules {
	/// Titles longer than this are rejected.
	pub max_title_chars: usize,
	/// Bodies longer than this are truncated, not rejected.
	pub max_body_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchRules {
	pub default_limit: u32,
	pub max_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryRules {
	/// Retries after the initial attempt, transient failures only.
	pub max_retries: u32,
	pub backoff_base_ms: u64,
	pub backoff_cap_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub enrichment: EnrichmentProviderConfig,
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

impl Default for NoteRules {
	fn default() -> Self {
		Self { max_title_chars: 500, max_body_chars: 8_000 }
	}
}

impl Default for SearchRules {
	fn default() -> Self {
		Self { default_limit: 10, max_limit: 100 }
	}
}

impl Default for RetryRules {
	fn default() -> Self {
		Self { max_retries: 2, backoff_base_ms: 200, backoff_cap_ms: 2_000 }
	}
}
