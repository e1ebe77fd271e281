use std::cmp::Ordering;

use time::OffsetDateTime;
use uuid::Uuid;

pub struct RankCandidate<'a> {
	pub id: Uuid,
	pub created_at: OffsetDateTime,
	pub embedding: &'a [f32],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedNote {
	pub id: Uuid,
	pub similarity: f32,
}

#[derive(Debug, Clone)]
pub struct RankedPage {
	pub items: Vec<RankedNote>,
	/// Size of the full scored candidate set, not of this page.
	pub total: usize,
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
	if a.len() != b.len() || a.is_empty() {
		return 0.0;
	}

	let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
	let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
	let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

	if norm_a == 0.0 || norm_b == 0.0 {
		return 0.0;
	}

	dot / (norm_a * norm_b)
}

/// Scores every candidate against the query and cuts one page out of the
/// ordered result. Ties break by creation time (newest first) and then by id,
/// so repeated calls over the same set page identically.
pub fn rank_candidates(
	query: &[f32],
	candidates: &[RankCandidate<'_>],
	offset: usize,
	limit: usize,
) -> RankedPage {
	let mut scored = Vec::with_capacity(candidates.len());

	for candidate in candidates {
		if candidate.embedding.len() != query.len() {
			tracing::warn!(
				note_id = %candidate.id,
				stored = candidate.embedding.len(),
				expected = query.len(),
				"Skipping candidate with mismatched embedding dimension."
			);

			continue;
		}

		let similarity = cosine_similarity(query, candidate.embedding).clamp(0.0, 1.0);

		scored.push((RankedNote { id: candidate.id, similarity }, candidate.created_at));
	}

	scored.sort_by(|(a, a_created), (b, b_created)| {
		b.similarity
			.partial_cmp(&a.similarity)
			.unwrap_or(Ordering::Equal)
			.then_with(|| b_created.cmp(a_created))
			.then_with(|| b.id.cmp(&a.id))
	});

	let total = scored.len();
	let items = scored.into_iter().skip(offset).take(limit).map(|(ranked, _)| ranked).collect();

	RankedPage { items, total }
}
