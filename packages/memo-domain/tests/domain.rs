use time::{Duration, OffsetDateTime, macros::datetime};
use uuid::Uuid;

use memo_domain::similarity::{RankCandidate, cosine_similarity, rank_candidates};

fn base_time() -> OffsetDateTime {
	datetime!(2026-01-01 00:00:00 UTC)
}

fn candidates<'a>(embeddings: &'a [Vec<f32>]) -> Vec<RankCandidate<'a>> {
	embeddings
		.iter()
		.enumerate()
		.map(|(idx, embedding)| RankCandidate {
			id: Uuid::new_v4(),
			created_at: base_time() + Duration::minutes(idx as i64),
			embedding,
		})
		.collect()
}

#[test]
fn cosine_of_a_vector_with_itself_is_one() {
	let v = [0.6_f32, 0.8, 0.0];

	assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn cosine_of_orthogonal_vectors_is_zero() {
	assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
}

#[test]
fn cosine_of_zero_vector_is_zero() {
	assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
}

#[test]
fn cosine_of_mismatched_lengths_is_zero() {
	assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
}

#[test]
fn opposed_vectors_clamp_to_zero_in_ranking() {
	let embeddings = vec![vec![-1.0_f32, 0.0]];
	let cands = candidates(&embeddings);
	let page = rank_candidates(&[1.0, 0.0], &cands, 0, 10);

	assert_eq!(page.items.len(), 1);
	assert_eq!(page.items[0].similarity, 0.0);
}

#[test]
fn ranking_orders_by_similarity_descending() {
	let embeddings = vec![
		vec![0.0_f32, 1.0],
		vec![1.0, 0.0],
		vec![0.8, 0.6],
		vec![0.6, 0.8],
	];
	let cands = candidates(&embeddings);
	let page = rank_candidates(&[1.0, 0.0], &cands, 0, 10);

	assert_eq!(page.total, 4);

	for pair in page.items.windows(2) {
		assert!(pair[0].similarity >= pair[1].similarity);
	}

	assert!((page.items[0].similarity - 1.0).abs() < 1e-6);
	assert!((page.items[1].similarity - 0.8).abs() < 1e-6);
	assert!((page.items[2].similarity - 0.6).abs() < 1e-6);
	assert_eq!(page.items[3].similarity, 0.0);
}

#[test]
fn equal_scores_break_ties_newest_first() {
	let embedding = vec![1.0_f32, 0.0];
	let older = RankCandidate { id: Uuid::new_v4(), created_at: base_time(), embedding: &embedding };
	let newer = RankCandidate {
		id: Uuid::new_v4(),
		created_at: base_time() + Duration::hours(1),
		embedding: &embedding,
	};
	let newer_id = newer.id;
	let page = rank_candidates(&[1.0, 0.0], &[older, newer], 0, 10);

	assert_eq!(page.items[0].id, newer_id);
}

#[test]
fn equal_scores_and_times_break_ties_by_id() {
	let embedding = vec![1.0_f32, 0.0];
	let a = RankCandidate { id: Uuid::new_v4(), created_at: base_time(), embedding: &embedding };
	let b = RankCandidate { id: Uuid::new_v4(), created_at: base_time(), embedding: &embedding };
	let expected_first = a.id.max(b.id);
	let page = rank_candidates(&[1.0, 0.0], &[a, b], 0, 10);

	assert_eq!(page.items[0].id, expected_first);
}

#[test]
fn pagination_pages_are_disjoint_and_total_is_stable() {
	let embeddings: Vec<Vec<f32>> =
		(0..25).map(|idx| vec![1.0_f32, idx as f32 / 25.0]).collect();
	let cands = candidates(&embeddings);
	let first = rank_candidates(&[1.0, 0.0], &cands, 0, 10);
	let second = rank_candidates(&[1.0, 0.0], &cands, 10, 10);
	let third = rank_candidates(&[1.0, 0.0], &cands, 20, 10);

	assert_eq!(first.total, 25);
	assert_eq!(second.total, 25);
	assert_eq!(third.total, 25);
	assert_eq!(first.items.len(), 10);
	assert_eq!(second.items.len(), 10);
	assert_eq!(third.items.len(), 5);

	for item in &second.items {
		assert!(first.items.iter().all(|other| other.id != item.id));
		assert!(third.items.iter().all(|other| other.id != item.id));
	}
}

#[test]
fn offset_beyond_total_returns_empty_page() {
	let embeddings = vec![vec![1.0_f32, 0.0]];
	let cands = candidates(&embeddings);
	let page = rank_candidates(&[1.0, 0.0], &cands, 5, 10);

	assert!(page.items.is_empty());
	assert_eq!(page.total, 1);
}

#[test]
fn mismatched_dimension_candidates_are_excluded_from_total() {
	let embeddings = vec![vec![1.0_f32, 0.0], vec![1.0_f32, 0.0, 0.0]];
	let cands = candidates(&embeddings);
	let page = rank_candidates(&[1.0, 0.0], &cands, 0, 10);

	assert_eq!(page.total, 1);
	assert_eq!(page.items.len(), 1);
}
