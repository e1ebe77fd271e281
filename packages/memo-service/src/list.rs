use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use memo_domain::similarity::{self, RankCandidate};
use memo_storage::models::Note;

use crate::{Error, MemoService, Result};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListNotesRequest {
	pub search: Option<String>,
	pub limit: Option<u32>,
	#[serde(default)]
	pub offset: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteSummary {
	pub id: Uuid,
	pub title: String,
	pub summary: String,
	pub tags: Vec<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	pub similarity: Option<f32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListNotesResponse {
	pub notes: Vec<NoteSummary>,
	pub total: usize,
	pub limit: u32,
	pub offset: u32,
}

impl MemoService {
	/// Lists notes newest first, or ranks them against a search term when one
	/// is given. A blank term is treated as no term at all.
	pub async fn list_notes(&self, req: ListNotesRequest) -> Result<ListNotesResponse> {
		let limit = req.limit.unwrap_or(self.cfg.search.default_limit);

		if limit == 0 || limit > self.cfg.search.max_limit {
			return Err(Error::Validation {
				message: format!("limit must be between 1 and {}.", self.cfg.search.max_limit),
			});
		}

		let term = req.search.as_deref().map(str::trim).filter(|term| !term.is_empty());
		let notes = self.store.fetch_all_notes().await?;
		let (items, total) = match term {
			Some(term) => self.ranked_page(term, notes, req.offset, limit).await?,
			None => recent_page(notes, req.offset, limit),
		};

		tracing::info!(total, returned = items.len(), searched = term.is_some(), "Listed notes.");

		Ok(ListNotesResponse { notes: items, total, limit, offset: req.offset })
	}

	async fn ranked_page(
		&self,
		term: &str,
		notes: Vec<Note>,
		offset: u32,
		limit: u32,
	) -> Result<(Vec<NoteSummary>, usize)> {
		let query = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &self.cfg.retry, term)
			.await
			.map_err(crate::embedding_error)?;
		let page = {
			let candidates = notes
				.iter()
				.map(|note| RankCandidate {
					id: note.id,
					created_at: note.created_at,
					embedding: &note.embedding,
				})
				.collect::<Vec<_>>();

			similarity::rank_candidates(&query, &candidates, offset as usize, limit as usize)
		};
		let mut by_id = notes.into_iter().map(|note| (note.id, note)).collect::<HashMap<_, _>>();
		let items = page
			.items
			.into_iter()
			.filter_map(|ranked| {
				by_id
					.remove(&ranked.id)
					.map(|note| summary_with_score(note, Some(ranked.similarity)))
			})
			.collect();

		Ok((items, page.total))
	}
}

fn recent_page(mut notes: Vec<Note>, offset: u32, limit: u32) -> (Vec<NoteSummary>, usize) {
	notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

	let total = notes.len();
	let items = notes
		.into_iter()
		.skip(offset as usize)
		.take(limit as usize)
		.map(|note| summary_with_score(note, None))
		.collect();

	(items, total)
}

fn summary_with_score(note: Note, similarity: Option<f32>) -> NoteSummary {
	NoteSummary {
		id: note.id,
		title: note.title,
		summary: note.summary,
		tags: note.tags,
		created_at: note.created_at,
		similarity,
	}
}
