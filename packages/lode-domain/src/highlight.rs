use unicode_segmentation::UnicodeSegmentation;

use crate::relevance;

pub const ELLIPSIS: &str = "...";

/// Extracts an excerpt of at most `window_chars` graphemes centred on the first match of
/// `query` in `text`, with [`ELLIPSIS`] on each truncated side.
///
/// The whole query is located first; when it does not occur contiguously the earliest
/// matching query token is used instead. Returns `None` when nothing from the query occurs in
/// `text`. A match longer than the window widens the window so the excerpt always contains it.
pub fn highlight(text: &str, query: &str, window_chars: usize) -> Option<String> {
	let (start, end) = locate_match(text, query)?;
	let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
	let total = graphemes.len();
	let first = graphemes.iter().rposition(|(offset, _)| *offset <= start).unwrap_or(0);
	let last = graphemes.iter().position(|(offset, _)| *offset >= end).unwrap_or(total);
	let match_len = last.saturating_sub(first).max(1);
	let window = window_chars.max(match_len);

	if total <= window {
		return Some(text.trim().to_string());
	}

	let centre = first + match_len / 2;
	let mut from = centre.saturating_sub(window / 2).min(total - window).min(first);
	let to = (from + window).max(last).min(total);

	if to - from > window {
		from = to - window;
	}

	Some(slice_graphemes(text, &graphemes, from, to))
}

/// The first `window_chars` graphemes of `text`, with a trailing [`ELLIPSIS`] when cut.
pub fn leading_excerpt(text: &str, window_chars: usize) -> String {
	let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
	let to = window_chars.min(graphemes.len());

	slice_graphemes(text, &graphemes, 0, to)
}

fn slice_graphemes(text: &str, graphemes: &[(usize, &str)], from: usize, to: usize) -> String {
	let total = graphemes.len();
	let byte_from = graphemes.get(from).map(|(offset, _)| *offset).unwrap_or(text.len());
	let byte_to = graphemes.get(to).map(|(offset, _)| *offset).unwrap_or(text.len());
	let mut out = String::with_capacity(byte_to - byte_from + 2 * ELLIPSIS.len());

	if from > 0 {
		out.push_str(ELLIPSIS);
	}

	out.push_str(text[byte_from..byte_to].trim());

	if to < total {
		out.push_str(ELLIPSIS);
	}

	out
}

/// Byte range in `text` of the first case-insensitive occurrence of `query`, or of the earliest
/// query token when the full query does not occur.
pub fn locate_match(text: &str, query: &str) -> Option<(usize, usize)> {
	let needle = relevance::normalize(query);

	if needle.is_empty() {
		return None;
	}

	let folded = FoldedText::new(text);

	if let Some(range) = folded.find(&needle) {
		return Some(range);
	}

	relevance::query_tokens(&needle)
		.iter()
		.filter_map(|token| folded.find(token))
		.min_by_key(|(start, _)| *start)
}

// Folded copy of a text that remembers which source char each folded byte came from.
struct FoldedText {
	folded: String,
	origins: Vec<(usize, usize)>,
}
impl FoldedText {
	fn new(text: &str) -> Self {
		let mut folded = String::with_capacity(text.len());
		let mut origins = Vec::with_capacity(text.len());

		for (offset, ch) in text.char_indices() {
			let span = (offset, offset + ch.len_utf8());

			for lower in relevance::fold_char(ch) {
				folded.push(lower);
				origins.extend(std::iter::repeat_n(span, lower.len_utf8()));
			}
		}

		Self { folded, origins }
	}

	fn find(&self, needle: &str) -> Option<(usize, usize)> {
		if needle.is_empty() {
			return None;
		}

		let pos = self.folded.find(needle)?;
		let (start, _) = self.origins[pos];
		let (_, end) = self.origins[pos + needle.len() - 1];

		Some((start, end))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_text_is_returned_whole() {
		let excerpt = highlight("Use an index on user_id.", "INDEX", 120).expect("Expected a match.");

		assert_eq!(excerpt, "Use an index on user_id.");
	}

	#[test]
	fn long_text_is_windowed_around_the_match() {
		let text = format!("{} database tuning {}", "a".repeat(200), "b".repeat(200));
		let excerpt = highlight(&text, "Database", 40).expect("Expected a match.");

		assert!(excerpt.starts_with(ELLIPSIS));
		assert!(excerpt.ends_with(ELLIPSIS));
		assert!(excerpt.contains("database"));
		assert!(excerpt.chars().count() <= 40 + 2 * ELLIPSIS.len());
	}

	#[test]
	fn match_at_start_has_no_leading_ellipsis() {
		let text = format!("Database tuning {}", "x".repeat(300));
		let excerpt = highlight(&text, "database", 32).expect("Expected a match.");

		assert!(excerpt.starts_with("Database"));
		assert!(excerpt.ends_with(ELLIPSIS));
	}

	#[test]
	fn token_match_is_used_when_phrase_is_absent() {
		let text = format!("{} we should shard the cluster {}", "z".repeat(150), "z".repeat(150));
		let excerpt = highlight(&text, "cluster sharding", 30).expect("Expected a match.");

		assert!(excerpt.contains("cluster"));
	}

	#[test]
	fn preserves_original_case() {
		let (start, end) = locate_match("Hello WORLD", "world").expect("Expected a match.");

		assert_eq!(&"Hello WORLD"[start..end], "WORLD");
	}

	#[test]
	fn no_match_returns_none() {
		assert!(highlight("nothing relevant here", "database", 40).is_none());
		assert!(highlight("anything", "   ", 40).is_none());
	}

	#[test]
	fn leading_excerpt_cuts_long_text() {
		assert_eq!(leading_excerpt("short", 10), "short");
		assert_eq!(leading_excerpt("abcdefghij", 4), format!("abcd{ELLIPSIS}"));
	}

	#[test]
	fn sigma_matches_regardless_of_word_position() {
		let text = format!("{} ΟΔΟΣ", "x ".repeat(100));
		let excerpt = highlight(&text, "οδος", 40).expect("Expected a match.");

		assert!(excerpt.contains("ΟΔΟΣ"));

		let (start, end) = locate_match("Η ΟΔΟΣ ΣΤΟ ΚΕΝΤΡΟ", "οδος στο").expect("Expected a match.");

		assert_eq!(&"Η ΟΔΟΣ ΣΤΟ ΚΕΝΤΡΟ"[start..end], "ΟΔΟΣ ΣΤΟ");
	}

	#[test]
	fn windows_respect_grapheme_boundaries() {
		let text = format!("{}café database{}", "é".repeat(100), "ü".repeat(100));
		let excerpt = highlight(&text, "database", 20).expect("Expected a match.");

		assert!(excerpt.contains("database"));
	}
}
