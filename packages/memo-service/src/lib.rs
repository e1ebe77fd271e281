pub mod create_note;
pub mod list;
pub mod notes;
pub mod tasks;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

pub use create_note::{CreateNoteRequest, NoteResponse, TaskResponse};
pub use error::{Error, Result};
pub use list::{ListNotesRequest, ListNotesResponse, NoteSummary};

use memo_config::{Config, EmbeddingProviderConfig, EnrichmentProviderConfig, RetryRules};
use memo_providers::{NoteEnrichment, embedding, enrichment};
use memo_storage::NoteStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EnrichmentProvider
where
	Self: Send + Sync,
{
	fn enrich<'a>(
		&'a self,
		cfg: &'a EnrichmentProviderConfig,
		rules: &'a RetryRules,
		title: &'a str,
		body: &'a str,
	) -> BoxFuture<'a, memo_providers::Result<NoteEnrichment>>;
}

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		rules: &'a RetryRules,
		text: &'a str,
	) -> BoxFuture<'a, memo_providers::Result<Vec<f32>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub enrichment: Arc<dyn EnrichmentProvider>,
	pub embedding: Arc<dyn EmbeddingProvider>,
}

pub struct MemoService {
	pub cfg: Config,
	pub store: Arc<dyn NoteStore>,
	pub providers: Providers,
}

struct DefaultProviders;

impl EnrichmentProvider for DefaultProviders {
	fn enrich<'a>(
		&'a self,
		cfg: &'a EnrichmentProviderConfig,
		rules: &'a RetryRules,
		title: &'a str,
		body: &'a str,
	) -> BoxFuture<'a, memo_providers::Result<NoteEnrichment>> {
		Box::pin(enrichment::enrich(cfg, rules, title, body))
	}
}

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		rules: &'a RetryRules,
		text: &'a str,
	) -> BoxFuture<'a, memo_providers::Result<Vec<f32>>> {
		Box::pin(embedding::embed(cfg, rules, text))
	}
}

impl Providers {
	pub fn new(
		enrichment: Arc<dyn EnrichmentProvider>,
		embedding: Arc<dyn EmbeddingProvider>,
	) -> Self {
		Self { enrichment, embedding }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { enrichment: provider.clone(), embedding: provider }
	}
}

impl MemoService {
	pub fn new(cfg: Config, store: Arc<dyn NoteStore>) -> Self {
		Self { cfg, store, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, store: Arc<dyn NoteStore>, providers: Providers) -> Self {
		Self { cfg, store, providers }
	}
}

// Provider failures carry upstream detail that callers must not see. It is
// logged here and replaced with a stage-level message.
pub(crate) fn enrichment_error(err: memo_providers::Error) -> Error {
	tracing::warn!(error = %err, "Enrichment provider failed.");

	Error::Enrichment { message: "Failed to enrich the note.".to_string() }
}

pub(crate) fn embedding_error(err: memo_providers::Error) -> Error {
	tracing::warn!(error = %err, "Embedding provider failed.");

	Error::Embedding { message: "Failed to embed the text.".to_string() }
}
