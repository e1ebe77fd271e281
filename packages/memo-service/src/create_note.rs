use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use memo_config::NoteRules;
use memo_domain::normalize::{self, NoteDraft, RejectReason};
use memo_providers::NoteEnrichment;
use memo_storage::models::{Note, Task, TaskStatus};

use crate::{Error, MemoService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
	pub title: String,
	pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteResponse {
	pub id: Uuid,
	pub title: String,
	pub body: String,
	pub summary: String,
	pub tags: Vec<String>,
	pub tasks: Vec<TaskResponse>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskResponse {
	pub id: Uuid,
	pub note_id: Uuid,
	pub text: String,
	pub status: TaskStatus,
}

impl MemoService {
	/// Creates a note: normalizes the input, obtains enrichment and embedding
	/// concurrently, then persists the assembled record in one write. Nothing
	/// is stored unless every step succeeds.
	pub async fn create_note(&self, req: CreateNoteRequest) -> Result<NoteResponse> {
		let draft = normalize::normalize_note(&req.title, &req.body, &self.cfg.notes)
			.map_err(|reason| reject_to_error(reason, &self.cfg.notes))?;
		let (enrichment, embedding) = tokio::try_join!(
			async {
				self.providers
					.enrichment
					.enrich(
						&self.cfg.providers.enrichment,
						&self.cfg.retry,
						&draft.title,
						&draft.body,
					)
					.await
					.map_err(crate::enrichment_error)
			},
			async {
				self.providers
					.embedding
					.embed(&self.cfg.providers.embedding, &self.cfg.retry, &draft.body)
					.await
					.map_err(crate::embedding_error)
			},
		)?;

		// The default providers already validate; a substituted provider must
		// not be able to persist an out-of-contract note.
		memo_providers::enrichment::validate_enrichment(&enrichment)
			.map_err(crate::enrichment_error)?;

		if embedding.len() != self.cfg.providers.embedding.dimensions as usize {
			return Err(crate::embedding_error(memo_providers::Error::InvalidResponse {
				message: format!(
					"Embedding has {} dimensions; expected {}.",
					embedding.len(),
					self.cfg.providers.embedding.dimensions
				),
			}));
		}

		let note = assemble_note(draft, enrichment, embedding);

		self.store.insert_note(&note).await?;

		tracing::info!(note_id = %note.id, tags = note.tags.len(), "Created note.");

		Ok(note_response(note))
	}
}

fn reject_to_error(reason: RejectReason, rules: &NoteRules) -> Error {
	match reason {
		RejectReason::EmptyTitle =>
			Error::Validation { message: "Title must be non-empty.".to_string() },
		RejectReason::EmptyBody =>
			Error::Validation { message: "Body must be non-empty.".to_string() },
		RejectReason::TitleTooLong => Error::Validation {
			message: format!("Title must be at most {} characters.", rules.max_title_chars),
		},
	}
}

fn assemble_note(draft: NoteDraft, enrichment: NoteEnrichment, embedding: Vec<f32>) -> Note {
	let note_id = Uuid::new_v4();
	let tasks = enrichment
		.tasks
		.into_iter()
		.map(|text| Task { id: Uuid::new_v4(), note_id, text, status: TaskStatus::Open })
		.collect();

	Note {
		id: note_id,
		title: draft.title,
		body: draft.body,
		summary: enrichment.summary,
		tags: enrichment.tags,
		embedding,
		created_at: OffsetDateTime::now_utc(),
		tasks,
	}
}

pub(crate) fn note_response(note: Note) -> NoteResponse {
	NoteResponse {
		id: note.id,
		title: note.title,
		body: note.body,
		summary: note.summary,
		tags: note.tags,
		tasks: note.tasks.into_iter().map(task_response).collect(),
		created_at: note.created_at,
	}
}

pub(crate) fn task_response(task: Task) -> TaskResponse {
	TaskResponse { id: task.id, note_id: task.note_id, text: task.text, status: task.status }
}
