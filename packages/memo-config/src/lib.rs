mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, EnrichmentProviderConfig, NoteRules, Providers, RetryRules,
	SearchRules,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::Parse { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.notes.max_title_chars == 0 {
		return Err(Error::Validation {
			message: "notes.max_title_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.notes.max_body_chars == 0 {
		return Err(Error::Validation {
			message: "notes.max_body_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_limit < cfg.search.default_limit {
		return Err(Error::Validation {
			message: "search.max_limit must be at least search.default_limit.".to_string(),
		});
	}
	if cfg.retry.backoff_base_ms == 0 {
		return Err(Error::Validation {
			message: "retry.backoff_base_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.retry.backoff_cap_ms < cfg.retry.backoff_base_ms {
		return Err(Error::Validation {
			message: "retry.backoff_cap_ms must be at least retry.backoff_base_ms.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.enrichment.temperature.is_finite()
		|| cfg.providers.enrichment.temperature < 0.0
	{
		return Err(Error::Validation {
			message: "providers.enrichment.temperature must be a finite, non-negative number."
				.to_string(),
		});
	}

	for (label, provider) in [
		("enrichment", provider_fields(&cfg.providers.enrichment)),
		("embedding", embedding_fields(&cfg.providers.embedding)),
	] {
		let ProviderFields { api_base, api_key, path, model, timeout_ms } = provider;

		if api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("providers.{label}.api_base must be non-empty."),
			});
		}
		if api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("providers.{label}.api_key must be non-empty."),
			});
		}
		if path.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("providers.{label}.path must be non-empty."),
			});
		}
		if model.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("providers.{label}.model must be non-empty."),
			});
		}
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("providers.{label}.timeout_ms must be greater than zero."),
			});
		}
	}

	Ok(())
}

struct ProviderFields<'a> {
	api_base: &'a str,
	api_key: &'a str,
	path: &'a str,
	model: &'a str,
	timeout_ms: u64,
}

fn provider_fields(cfg: &EnrichmentProviderConfig) -> ProviderFields<'_> {
	ProviderFields {
		api_base: &cfg.api_base,
		api_key: &cfg.api_key,
		path: &cfg.path,
		model: &cfg.model,
		timeout_ms: cfg.timeout_ms,
	}
}

fn embedding_fields(cfg: &EmbeddingProviderConfig) -> ProviderFields<'_> {
	ProviderFields {
		api_base: &cfg.api_base,
		api_key: &cfg.api_key,
		path: &cfg.path,
		model: &cfg.model,
		timeout_ms: cfg.timeout_ms,
	}
}

fn normalize(cfg: &mut Config) {
	normalize_endpoint(&mut cfg.providers.enrichment.api_base);
	normalize_endpoint(&mut cfg.providers.embedding.api_base);
}

// Bases and paths are concatenated verbatim, so a trailing slash here would
// produce a double slash in request URLs.
fn normalize_endpoint(api_base: &mut String) {
	while api_base.ends_with('/') {
		api_base.pop();
	}
}
