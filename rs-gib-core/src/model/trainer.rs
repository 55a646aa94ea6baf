use super::alphabet::Alphabet;
use super::scorer;
use super::trained_model::TrainedModel;
use super::training_config::TrainingConfig;
use super::transition_matrix::TransitionMatrix;
use crate::error::{GibberishError, Result};

/// Outcome of a threshold calibration.
///
/// `threshold` is the midpoint of `max_bad` and `min_good`, so it always
/// lies in `[max_bad, min_good]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
	/// Lowest score among the known-good examples.
	pub min_good: f64,
	/// Highest score among the known-bad examples.
	pub max_bad: f64,
	pub threshold: f64,
}

/// Runs a full training pass and returns the resulting model.
///
/// Builds the transition matrix from `corpus`, then calibrates the
/// threshold from the labeled examples against that matrix.
///
/// # Errors
/// - `EmptyCorpus` if `corpus` is empty
/// - `InsufficientExamples` if either example list is empty
/// - `IndistinguishableClasses` if a good example scores below a bad one
///
/// Nothing is mutated: on error the caller keeps whatever model it had.
pub fn train<S: AsRef<str>>(
	alphabet: &Alphabet,
	corpus: &[S],
	known_good: &[S],
	known_bad: &[S],
	config: &TrainingConfig,
) -> Result<TrainedModel> {
	let matrix = build_transition_matrix(alphabet, corpus, config)?;
	let calibration = calibrate_threshold(alphabet, &matrix, known_good, known_bad)?;

	tracing::info!(
		"Trained on {} lines: threshold {:.6} (worst good {:.6}, best bad {:.6})",
		corpus.len(),
		calibration.threshold,
		calibration.min_good,
		calibration.max_bad
	);

	Ok(TrainedModel::new(alphabet.clone(), matrix, calibration.threshold))
}

/// Builds the log-probability transition matrix from a corpus.
///
/// # Behavior
/// - Every cell starts at `config.smoothing()`.
/// - Each line is normalized against `alphabet`; every consecutive pair
///   `(a, b)` adds one to `cell[a][b]`.
/// - Rows are then turned into log-probabilities (see
///   `TransitionMatrix::from_counts`).
///
/// # Errors
/// `EmptyCorpus` if `corpus` has no lines.
pub fn build_transition_matrix<S: AsRef<str>>(
	alphabet: &Alphabet,
	corpus: &[S],
	config: &TrainingConfig,
) -> Result<TransitionMatrix> {
	if corpus.is_empty() {
		return Err(GibberishError::EmptyCorpus);
	}

	let size = alphabet.len();
	let mut counts = vec![config.smoothing(); size * size];
	let mut pairs = 0usize;

	for line in corpus {
		let indices = alphabet.encode(line.as_ref());
		for pair in indices.windows(2) {
			counts[pair[0] * size + pair[1]] += 1.0;
			pairs += 1;
		}
	}

	tracing::debug!(
		"Counted {} transitions over {} lines ({}x{} matrix, smoothing {})",
		pairs,
		corpus.len(),
		size,
		size,
		config.smoothing()
	);

	Ok(TransitionMatrix::from_counts(size, counts))
}

/// Calibrates the decision threshold from labeled examples.
///
/// Scores every example with the same function the classifier uses and
/// places the threshold halfway between the worst good score and the best
/// bad score.
///
/// # Errors
/// - `InsufficientExamples` if either list is empty
/// - `IndistinguishableClasses` if `min_good < max_bad`
pub fn calibrate_threshold<S: AsRef<str>>(
	alphabet: &Alphabet,
	matrix: &TransitionMatrix,
	known_good: &[S],
	known_bad: &[S],
) -> Result<Calibration> {
	check_examples(known_good, known_bad)?;

	let min_good = known_good
		.iter()
		.map(|s| scorer::score(alphabet, matrix, s.as_ref()))
		.fold(f64::INFINITY, f64::min);
	let max_bad = known_bad
		.iter()
		.map(|s| scorer::score(alphabet, matrix, s.as_ref()))
		.fold(f64::NEG_INFINITY, f64::max);

	if min_good < max_bad {
		return Err(GibberishError::IndistinguishableClasses { min_good, max_bad });
	}

	Ok(Calibration { min_good, max_bad, threshold: (min_good + max_bad) / 2.0 })
}

fn check_examples<S>(known_good: &[S], known_bad: &[S]) -> Result<()> {
	if known_good.is_empty() || known_bad.is_empty() {
		return Err(GibberishError::InsufficientExamples { good: known_good.len(), bad: known_bad.len() });
	}
	Ok(())
}
