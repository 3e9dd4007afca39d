pub const PREFIX_SCORE: f32 = 1.0;
pub const SUBSTRING_MAX_SCORE: f32 = 0.95;
pub const SUBSTRING_MIN_SCORE: f32 = 0.8;
pub const TOKEN_MAX_SCORE: f32 = 0.7;
pub const TOKEN_MIN_SCORE: f32 = 0.3;

/// Scores how well `text` matches `query`, in `[0, 1]`.
///
/// Implementations must be pure: the same inputs always produce the same score.
pub trait RelevanceScorer
where
	Self: Send + Sync,
{
	fn score(&self, query: &str, text: &str) -> f32;
}

/// Prefix, then substring, then token-overlap matching. See [`score`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LexicalScorer;
impl RelevanceScorer for LexicalScorer {
	fn score(&self, query: &str, text: &str) -> f32 {
		score(query, text)
	}
}

impl<F> RelevanceScorer for F
where
	F: Fn(&str, &str) -> f32 + Send + Sync,
{
	fn score(&self, query: &str, text: &str) -> f32 {
		self(query, text)
	}
}

/// Case-insensitive lexical relevance.
///
/// - `1.0` when `text` starts with `query`.
/// - `0.8..=0.95` when `query` occurs inside `text`, higher the earlier it occurs.
/// - `0.3..=0.7` proportional to the fraction of query tokens found in `text`.
/// - `0.0` otherwise, including for an empty query.
pub fn score(query: &str, text: &str) -> f32 {
	let query = normalize(query);

	if query.is_empty() {
		return 0.0;
	}

	let text = normalize(text);

	if text.is_empty() {
		return 0.0;
	}
	if text.starts_with(query.as_str()) {
		return PREFIX_SCORE;
	}
	if let Some(byte_pos) = text.find(query.as_str()) {
		let pos = text[..byte_pos].chars().count() as f32;
		let len = text.chars().count() as f32;
		let earliness = 1.0 - pos / len;
		let score = SUBSTRING_MIN_SCORE + (SUBSTRING_MAX_SCORE - SUBSTRING_MIN_SCORE) * earliness;

		return score.clamp(SUBSTRING_MIN_SCORE, SUBSTRING_MAX_SCORE);
	}

	let overlap = token_overlap(&query, &text);

	if overlap > 0.0 {
		return TOKEN_MIN_SCORE + (TOKEN_MAX_SCORE - TOKEN_MIN_SCORE) * overlap;
	}

	0.0
}

/// Trimmed copy of `input`, folded char by char with [`fold_char`].
pub fn normalize(input: &str) -> String {
	input.trim().chars().flat_map(fold_char).collect()
}

/// Lowercases one char without context. Final sigma folds to `σ` so word position never
/// changes a match.
pub fn fold_char(ch: char) -> impl Iterator<Item = char> {
	ch.to_lowercase().map(|lower| if lower == 'ς' { 'σ' } else { lower })
}

/// Lowercased, whitespace-separated query tokens with duplicates removed, in first-seen order.
pub fn query_tokens(query: &str) -> Vec<String> {
	let normalized = normalize(query);
	let mut out: Vec<String> = Vec::new();

	for token in normalized.split_whitespace() {
		if !out.iter().any(|seen| seen == token) {
			out.push(token.to_string());
		}
	}

	out
}

fn token_overlap(query: &str, text: &str) -> f32 {
	let tokens = query_tokens(query);

	if tokens.is_empty() {
		return 0.0;
	}

	let matched = tokens.iter().filter(|token| text.contains(token.as_str())).count();

	matched as f32 / tokens.len() as f32
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prefix_match_scores_one() {
		assert_eq!(score("api", "API Design Discussion"), PREFIX_SCORE);
		assert_eq!(score("  Api  ", "api"), PREFIX_SCORE);
	}

	#[test]
	fn earlier_substring_scores_higher() {
		let early = score("design", "A design review");
		let late = score("design", "Notes from the long overdue design review");

		assert!(early > late);
		assert!((SUBSTRING_MIN_SCORE..=SUBSTRING_MAX_SCORE).contains(&early));
		assert!((SUBSTRING_MIN_SCORE..=SUBSTRING_MAX_SCORE).contains(&late));
	}

	#[test]
	fn partial_token_overlap_is_proportional() {
		let half = score("rust tokio", "Why we chose Rust");
		let full = score("tokio rust", "Rust with Tokio runtime");

		assert!((half - 0.5).abs() < 1e-6);
		assert!((full - TOKEN_MAX_SCORE).abs() < 1e-6);
	}

	#[test]
	fn duplicate_query_tokens_count_once() {
		assert_eq!(query_tokens("Rust rust  TOKIO"), vec!["rust".to_string(), "tokio".to_string()]);
		assert!((score("rust rust go", "rust only") - 0.5).abs() < 1e-6);
	}

	#[test]
	fn empty_inputs_score_zero() {
		assert_eq!(score("", "anything"), 0.0);
		assert_eq!(score("   ", "anything"), 0.0);
		assert_eq!(score("query", ""), 0.0);
	}

	#[test]
	fn unrelated_text_scores_zero() {
		assert_eq!(score("API", "Database Optimization"), 0.0);
	}

	#[test]
	fn final_sigma_folds_like_any_sigma() {
		assert_eq!(normalize(" ΟΔΟΣ "), "οδοσ");
		assert_eq!(normalize("οδος"), normalize("ΟΔΟΣ"));
		assert_eq!(score("οδος", "ΟΔΟΣ"), PREFIX_SCORE);
		assert!(score("οδος", "x x ΟΔΟΣ") >= SUBSTRING_MIN_SCORE);
	}

	#[test]
	fn closures_are_scorers() {
		let constant = |_: &str, _: &str| 0.42_f32;

		assert_eq!(RelevanceScorer::score(&constant, "a", "b"), 0.42);
		assert_eq!(LexicalScorer.score("api", "api"), PREFIX_SCORE);
	}
}
