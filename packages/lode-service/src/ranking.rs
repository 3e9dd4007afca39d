use std::cmp::Ordering;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::SearchResult;

pub(crate) struct Candidate<T> {
	pub(crate) item: T,
	pub(crate) score: f32,
	pub(crate) highlight: Option<String>,
	pub(crate) recency: OffsetDateTime,
	pub(crate) id: Uuid,
}

/// Orders by score (descending), then recency (newest first), then id, and keeps `limit`.
pub(crate) fn rank<T>(mut candidates: Vec<Candidate<T>>, limit: usize) -> Vec<SearchResult<T>> {
	candidates.sort_by(compare);
	candidates.truncate(limit);
	candidates
		.into_iter()
		.map(|candidate| SearchResult {
			item: candidate.item,
			score: candidate.score,
			highlight: candidate.highlight,
		})
		.collect()
}

fn compare<T>(a: &Candidate<T>, b: &Candidate<T>) -> Ordering {
	b.score
		.total_cmp(&a.score)
		.then_with(|| b.recency.cmp(&a.recency))
		.then_with(|| a.id.cmp(&b.id))
}
