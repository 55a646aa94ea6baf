use super::alphabet::Alphabet;
use super::transition_matrix::TransitionMatrix;

/// Scores `text` under `matrix`: the exponentiated mean log-probability of
/// its consecutive character pairs, in `(0, 1]`.
///
/// # Notes
/// - The text is normalized against `alphabet` first.
/// - A lookup outside the matrix counts as a neutral `0.0`.
/// - The mean divides by at least 1, so texts with fewer than two
///   characters score `exp(0) = 1.0`.
///
/// The trainer calibrates with this same function, so the threshold and
/// the classifier always agree on what a score means.
pub(crate) fn score(alphabet: &Alphabet, matrix: &TransitionMatrix, text: &str) -> f64 {
	let indices = alphabet.encode(text);

	let mut total = 0.0;
	let mut pairs = 0usize;
	for pair in indices.windows(2) {
		total += matrix.get(pair[0], pair[1]).unwrap_or(0.0);
		pairs += 1;
	}

	(total / pairs.max(1) as f64).exp()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn uniform(alphabet: &Alphabet) -> TransitionMatrix {
		let n = alphabet.len();
		TransitionMatrix::from_counts(n, vec![1.0; n * n])
	}

	#[test]
	fn uniform_matrix_scores_one_over_size() {
		let alphabet = Alphabet::new("ab").unwrap();
		let matrix = uniform(&alphabet);
		let s = score(&alphabet, &matrix, "abba ab");
		assert!((s - 1.0 / 3.0).abs() < 1e-12, "score was {}", s);
	}

	#[test]
	fn short_texts_score_one() {
		let alphabet = Alphabet::default();
		let matrix = uniform(&alphabet);
		assert_eq!(score(&alphabet, &matrix, "a"), 1.0);
		assert_eq!(score(&alphabet, &matrix, "  !! "), 1.0);
	}

	#[test]
	fn mismatched_matrix_lookups_are_neutral() {
		// Matrix built for a smaller alphabet: pairs involving 'c' or the
		// blank fall outside it and contribute 0.0.
		let alphabet = Alphabet::new("abc").unwrap();
		let matrix = TransitionMatrix::from_counts(2, vec![1.0, 1.0, 1.0, 1.0]);
		let s = score(&alphabet, &matrix, "abc");
		let expected = ((0.5f64).ln() / 2.0).exp();
		assert!((s - expected).abs() < 1e-12);
	}
}
