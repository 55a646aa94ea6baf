use super::alphabet::Alphabet;
use super::scorer;
use super::snapshot::ModelSnapshot;
use super::transition_matrix::TransitionMatrix;
use crate::error::{GibberishError, Result};

/// Verbose classification result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
	/// `true` when `score <= threshold`.
	pub is_gibberish: bool,
	pub score: f64,
	pub threshold: f64,
}

/// A trained gibberish model: alphabet, transition matrix and threshold.
///
/// The value is immutable. Training and importing build a new one, so a
/// model can be shared between threads (for example behind an `Arc`) and
/// read concurrently while its owner swaps in a retrained replacement.
///
/// # Invariants
/// - `matrix.size() == alphabet.len()`
/// - `threshold` is finite
#[derive(Clone, Debug, PartialEq)]
pub struct TrainedModel {
	alphabet: Alphabet,
	matrix: TransitionMatrix,
	threshold: f64,
}

impl TrainedModel {
	pub(crate) fn new(alphabet: Alphabet, matrix: TransitionMatrix, threshold: f64) -> Self {
		debug_assert_eq!(alphabet.len(), matrix.size());
		Self { alphabet, matrix, threshold }
	}

	/// Rebuilds a model from an exported snapshot without retraining.
	///
	/// # Errors
	/// - `InvalidModel` if a field is empty, the alphabet is not in
	///   normalized form, or a number is not finite
	/// - `ModelMismatch` if the matrix dimensions differ from the alphabet length
	pub fn from_snapshot(snapshot: &ModelSnapshot) -> Result<Self> {
		let alphabet_len = snapshot.alphabet.chars().count();
		let rows = snapshot.sequences.len();
		if alphabet_len > 0 && rows > 0 && alphabet_len != rows {
			return Err(GibberishError::ModelMismatch { expected: alphabet_len, found: rows });
		}

		let alphabet = Alphabet::from_exported(&snapshot.alphabet)?;
		let matrix = TransitionMatrix::from_rows(alphabet.len(), &snapshot.sequences)?;
		if !snapshot.threshold.is_finite() {
			return Err(GibberishError::invalid_model(format!("threshold {} is not finite", snapshot.threshold)));
		}

		Ok(Self::new(alphabet, matrix, snapshot.threshold))
	}

	/// Exports the model as a self-contained snapshot.
	pub fn to_snapshot(&self) -> ModelSnapshot {
		ModelSnapshot {
			alphabet: self.alphabet.as_string(),
			sequences: self.matrix.to_rows(),
			threshold: self.threshold,
		}
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	pub fn matrix(&self) -> &TransitionMatrix {
		&self.matrix
	}

	pub fn threshold(&self) -> f64 {
		self.threshold
	}

	/// Scores `text` (see `scorer::score`). Higher means more natural.
	pub fn score(&self, text: &str) -> f64 {
		scorer::score(&self.alphabet, &self.matrix, text)
	}

	/// Classifies `text`.
	///
	/// # Errors
	/// `EmptyInput` if nothing is left of `text` once normalized.
	pub fn evaluate(&self, text: &str) -> Result<Verdict> {
		if self.alphabet.normalize(text).is_empty() {
			return Err(GibberishError::EmptyInput);
		}

		let score = self.score(text);
		Ok(Verdict { is_gibberish: score <= self.threshold, score, threshold: self.threshold })
	}

	/// Non-verbose form of `evaluate`.
	pub fn is_gibberish(&self, text: &str) -> Result<bool> {
		self.evaluate(text).map(|verdict| verdict.is_gibberish)
	}

	/// Classifies every text, failing on the first unusable one.
	pub fn evaluate_all<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Verdict>> {
		texts.iter().map(|text| self.evaluate(text.as_ref())).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toy_model(threshold: f64) -> TrainedModel {
		let alphabet = Alphabet::new("ab").unwrap();
		let matrix = TransitionMatrix::from_counts(3, vec![1.0, 4.0, 1.0, 1.0, 1.0, 3.0, 3.0, 1.0, 1.0]);
		TrainedModel::new(alphabet, matrix, threshold)
	}

	#[test]
	fn evaluate_compares_inclusively() {
		// A single character scores exactly exp(0) = 1.0.
		let model = toy_model(1.0);
		let verdict = model.evaluate("a").unwrap();
		assert_eq!(verdict.score, 1.0);
		assert_eq!(verdict.threshold, 1.0);
		assert!(verdict.is_gibberish);

		let model = toy_model(0.999);
		assert!(!model.is_gibberish("a").unwrap());
	}

	#[test]
	fn empty_input_is_rejected() {
		let model = toy_model(0.3);
		assert!(matches!(model.evaluate(""), Err(GibberishError::EmptyInput)));
		assert!(matches!(model.evaluate("xyz 123 !?"), Err(GibberishError::EmptyInput)));
	}

	#[test]
	fn evaluate_reports_score_and_threshold() {
		let model = toy_model(0.3);
		let verdict = model.evaluate("ABAB").unwrap();
		assert_eq!(verdict.score, model.score("abab"));
		assert_eq!(verdict.threshold, 0.3);
		assert!(!verdict.is_gibberish);
		assert!(model.is_gibberish("aaaa").unwrap());
	}

	#[test]
	fn evaluate_all_stops_on_unusable_input() {
		let model = toy_model(0.3);
		let verdicts = model.evaluate_all(&["abab", "aaaa"]).unwrap();
		assert_eq!(verdicts.iter().map(|v| v.is_gibberish).collect::<Vec<_>>(), vec![false, true]);

		assert!(matches!(model.evaluate_all(&["abab", "???"]), Err(GibberishError::EmptyInput)));
	}

	#[test]
	fn snapshot_round_trip_preserves_the_model() {
		let model = toy_model(0.3);
		let snapshot = model.to_snapshot();
		assert_eq!(snapshot.alphabet, "ab ");
		assert_eq!(snapshot.sequences.len(), 3);

		let imported = TrainedModel::from_snapshot(&snapshot).unwrap();
		assert_eq!(imported, model);
	}

	#[test]
	fn import_rejects_bad_snapshots() {
		let mut snapshot = toy_model(0.3).to_snapshot();
		snapshot.threshold = f64::NAN;
		assert!(matches!(TrainedModel::from_snapshot(&snapshot), Err(GibberishError::InvalidModel { .. })));

		let mut snapshot = toy_model(0.3).to_snapshot();
		snapshot.alphabet = "abc ".to_owned();
		assert!(matches!(
			TrainedModel::from_snapshot(&snapshot),
			Err(GibberishError::ModelMismatch { expected: 4, found: 3 })
		));

		let snapshot = ModelSnapshot {
			alphabet: "abc".to_owned(),
			sequences: vec![vec![0.0; 2]; 2],
			threshold: 0.1,
		};
		assert!(matches!(
			TrainedModel::from_snapshot(&snapshot),
			Err(GibberishError::ModelMismatch { expected: 3, found: 2 })
		));

		let mut snapshot = toy_model(0.3).to_snapshot();
		snapshot.sequences.clear();
		assert!(matches!(TrainedModel::from_snapshot(&snapshot), Err(GibberishError::InvalidModel { .. })));
	}
}
