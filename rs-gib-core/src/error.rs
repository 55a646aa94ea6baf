/// Errors reported by alphabet configuration, training, classification,
/// and model import/export.
///
/// Every variant is a distinct failure cause so that callers can branch on
/// it (ask for better training data, reconfigure the alphabet, ...).
/// None of them are transient: retrying with the same inputs fails again.
#[derive(Debug, thiserror::Error)]
pub enum GibberishError {
	#[error("Alphabet must contain at least 2 distinct characters, got {count}")]
	InvalidAlphabet { count: usize },

	#[error("Smoothing constant must be finite and > 0, got {value}")]
	InvalidSmoothing { value: f64 },

	#[error("Training corpus is empty")]
	EmptyCorpus,

	#[error("Known-good and known-bad examples must both be non-empty (good: {good}, bad: {bad})")]
	InsufficientExamples { good: usize, bad: usize },

	#[error("Good and bad examples are not separable: worst good score {min_good} < best bad score {max_bad}")]
	IndistinguishableClasses { min_good: f64, max_bad: f64 },

	#[error("Model has not been trained")]
	UntrainedModel,

	#[error("Input is empty once normalized against the alphabet")]
	EmptyInput,

	#[error("Invalid model: {details}")]
	InvalidModel { details: String },

	#[error("Model mismatch: alphabet has {expected} characters but matrix has {found}")]
	ModelMismatch { expected: usize, found: usize },

	#[error("IO error: {source}")]
	Io {
		#[from]
		source: std::io::Error,
	},
}

impl GibberishError {
	pub(crate) fn invalid_model(details: impl Into<String>) -> Self {
		Self::InvalidModel { details: details.into() }
	}
}

pub type Result<T> = std::result::Result<T, GibberishError>;
