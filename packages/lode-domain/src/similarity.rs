/// Cosine similarity of two embeddings.
///
/// Returns `None` for vectors of different or zero length and for zero-magnitude vectors, so
/// callers can treat those items as having no usable embedding.
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f32> {
	if a.is_empty() || a.len() != b.len() {
		return None;
	}

	let mut dot = 0.0_f64;
	let mut norm_a = 0.0_f64;
	let mut norm_b = 0.0_f64;

	for (x, y) in a.iter().zip(b) {
		let (x, y) = (f64::from(*x), f64::from(*y));

		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	if norm_a == 0.0 || norm_b == 0.0 {
		return None;
	}

	let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());

	if !similarity.is_finite() {
		return None;
	}

	Some(similarity.clamp(-1.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identical_vectors_are_fully_similar() {
		let sim = cosine(&[0.3, 0.4, 0.5], &[0.3, 0.4, 0.5]).expect("Expected a similarity.");

		assert!((sim - 1.0).abs() < 1e-6);
	}

	#[test]
	fn orthogonal_and_opposite_vectors() {
		assert_eq!(cosine(&[1.0, 0.0], &[0.0, 2.0]), Some(0.0));
		assert_eq!(cosine(&[1.0, 0.0], &[-3.0, 0.0]), Some(-1.0));
	}

	#[test]
	fn magnitude_does_not_matter() {
		let a = cosine(&[1.0, 2.0], &[2.0, 4.0]).expect("Expected a similarity.");

		assert!((a - 1.0).abs() < 1e-6);
	}

	#[test]
	fn unusable_vectors_have_no_similarity() {
		assert_eq!(cosine(&[], &[]), None);
		assert_eq!(cosine(&[1.0, 0.0], &[1.0, 0.0, 0.0]), None);
		assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), None);
	}
}
