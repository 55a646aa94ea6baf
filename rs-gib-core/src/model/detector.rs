use std::sync::Arc;

use super::alphabet::Alphabet;
use super::snapshot::ModelSnapshot;
use super::trained_model::{TrainedModel, Verdict};
use super::trainer;
use super::training_config::TrainingConfig;
use crate::error::{GibberishError, Result};

/// Pretrained model shipped with the crate (default alphabet, English corpus).
const DEFAULT_MODEL: &str = include_str!("../../assets/default_model.json");

/// Lifecycle of a `Detector`.
///
/// `Unconfigured -> AlphabetSet -> Trained`. Training or importing again
/// stays in `Trained`; switching to a different alphabet drops back to
/// `AlphabetSet`, so a matrix can never outlive the alphabet it was built for.
#[derive(Clone, Debug)]
pub enum DetectorState {
	Unconfigured,
	AlphabetSet(Alphabet),
	Trained(Arc<TrainedModel>),
}

/// High-level gibberish detector.
///
/// # Responsibilities
/// - Hold the current alphabet and trained model
/// - Train, import and export models
/// - Score and classify text
///
/// Training and importing build a new `TrainedModel` first and only then
/// replace the current one, so a failed pass leaves the detector as it was.
/// Readers that need to classify from other threads can take a handle with
/// `current_model` while this detector is retrained.
#[derive(Clone, Debug)]
pub struct Detector {
	state: DetectorState,
	config: TrainingConfig,
}

impl Detector {
	/// Creates a detector loaded with the bundled pretrained model.
	///
	/// # Errors
	/// Only if the bundled model is corrupt.
	pub fn new() -> Result<Self> {
		Self::from_json(DEFAULT_MODEL)
	}

	/// Creates a detector with no alphabet and no model.
	pub fn unconfigured() -> Self {
		Self { state: DetectorState::Unconfigured, config: TrainingConfig::default() }
	}

	/// Creates an untrained detector for the given alphabet.
	pub fn with_alphabet(raw: &str) -> Result<Self> {
		let mut detector = Self::unconfigured();
		detector.set_alphabet(raw)?;
		Ok(detector)
	}

	/// Creates a detector from a previously exported model.
	pub fn from_snapshot(snapshot: &ModelSnapshot) -> Result<Self> {
		let mut detector = Self::unconfigured();
		detector.import(snapshot)?;
		Ok(detector)
	}

	/// Creates a detector from a previously exported model in JSON form.
	pub fn from_json(json: &str) -> Result<Self> {
		Self::from_snapshot(&ModelSnapshot::from_json(json)?)
	}

	pub fn state(&self) -> &DetectorState {
		&self.state
	}

	pub fn is_trained(&self) -> bool {
		matches!(self.state, DetectorState::Trained(_))
	}

	/// Current alphabet, if one is configured.
	pub fn alphabet(&self) -> Option<&Alphabet> {
		match &self.state {
			DetectorState::Unconfigured => None,
			DetectorState::AlphabetSet(alphabet) => Some(alphabet),
			DetectorState::Trained(model) => Some(model.alphabet()),
		}
	}

	/// Shared handle on the current model.
	pub fn current_model(&self) -> Option<Arc<TrainedModel>> {
		match &self.state {
			DetectorState::Trained(model) => Some(Arc::clone(model)),
			_ => None,
		}
	}

	pub fn config(&self) -> &TrainingConfig {
		&self.config
	}

	/// Replaces the training configuration used by later `train` calls.
	pub fn set_config(&mut self, config: TrainingConfig) {
		self.config = config;
	}

	/// Sets the smoothing constant used by later `train` calls.
	pub fn set_smoothing(&mut self, smoothing: f64) -> Result<()> {
		self.config.set_smoothing(smoothing)
	}

	/// Configures the alphabet (see `Alphabet::new` for normalization).
	///
	/// # Behavior
	/// - Same effective alphabet: nothing changes, a trained model is kept.
	/// - Different alphabet: any trained model is discarded.
	///
	/// # Errors
	/// `InvalidAlphabet` if fewer than 2 distinct characters remain. The
	/// detector is left untouched in that case.
	pub fn set_alphabet(&mut self, raw: &str) -> Result<()> {
		let alphabet = Alphabet::new(raw)?;
		if self.alphabet() == Some(&alphabet) {
			return Ok(());
		}

		if self.is_trained() {
			tracing::warn!("Alphabet changed to {}, discarding trained model", alphabet);
		}
		self.state = DetectorState::AlphabetSet(alphabet);
		Ok(())
	}

	/// Trains a new model on the current alphabet and makes it current.
	///
	/// An unconfigured detector trains on the default alphabet.
	///
	/// # Errors
	/// See `trainer::train`. On error the previous state is kept.
	pub fn train<S: AsRef<str>>(&mut self, corpus: &[S], known_good: &[S], known_bad: &[S]) -> Result<()> {
		let alphabet = self.alphabet().cloned().unwrap_or_default();
		let model = trainer::train(&alphabet, corpus, known_good, known_bad, &self.config)?;
		self.state = DetectorState::Trained(Arc::new(model));
		Ok(())
	}

	/// Imports a previously exported model, replacing the alphabet too.
	///
	/// # Errors
	/// `InvalidModel` or `ModelMismatch`. On error the previous state is kept.
	pub fn import(&mut self, snapshot: &ModelSnapshot) -> Result<()> {
		let model = TrainedModel::from_snapshot(snapshot)?;
		tracing::info!("Imported model over alphabet {}", model.alphabet());
		self.state = DetectorState::Trained(Arc::new(model));
		Ok(())
	}

	/// Imports a previously exported model in JSON form.
	pub fn import_json(&mut self, json: &str) -> Result<()> {
		self.import(&ModelSnapshot::from_json(json)?)
	}

	/// Exports the current model.
	///
	/// # Errors
	/// `UntrainedModel` if nothing has been trained or imported.
	pub fn export(&self) -> Result<ModelSnapshot> {
		Ok(self.model()?.to_snapshot())
	}

	/// Exports the current model as JSON.
	pub fn export_json(&self) -> Result<String> {
		self.export()?.to_json()
	}

	/// Scores `text` without classifying it.
	pub fn score(&self, text: &str) -> Result<f64> {
		Ok(self.model()?.score(text))
	}

	/// Classifies `text` and returns the score and threshold with it.
	///
	/// # Errors
	/// - `UntrainedModel` if no model is present
	/// - `EmptyInput` if `text` is empty once normalized
	pub fn evaluate(&self, text: &str) -> Result<Verdict> {
		self.model()?.evaluate(text)
	}

	/// Returns `true` when `text` is classified as gibberish.
	pub fn is_gibberish(&self, text: &str) -> Result<bool> {
		self.model()?.is_gibberish(text)
	}

	fn model(&self) -> Result<&TrainedModel> {
		match &self.state {
			DetectorState::Trained(model) => Ok(model),
			_ => Err(GibberishError::UntrainedModel),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CORPUS: [&str; 3] = ["ab ab ab", "abba abba", "ab ba"];

	fn trained() -> Detector {
		let mut detector = Detector::with_alphabet("ab").unwrap();
		detector.set_smoothing(1.0).unwrap();
		detector.train(&CORPUS, &["abab"], &["aaaa"]).unwrap();
		detector
	}

	#[test]
	fn bundled_model_is_trained_on_the_default_alphabet() {
		let detector = Detector::new().unwrap();
		assert!(detector.is_trained());
		assert_eq!(detector.alphabet(), Some(&Alphabet::default()));
		assert!(!detector.is_gibberish("john smith").unwrap());
		assert!(detector.is_gibberish("kjdjksdf").unwrap());
	}

	#[test]
	fn state_machine_follows_configuration() {
		let mut detector = Detector::unconfigured();
		assert!(matches!(detector.state(), DetectorState::Unconfigured));
		assert!(detector.alphabet().is_none());

		detector.set_alphabet("ab").unwrap();
		assert!(matches!(detector.state(), DetectorState::AlphabetSet(_)));

		detector.set_smoothing(1.0).unwrap();
		detector.train(&CORPUS, &["abab"], &["aaaa"]).unwrap();
		assert!(matches!(detector.state(), DetectorState::Trained(_)));

		detector.set_alphabet("abc").unwrap();
		assert!(matches!(detector.state(), DetectorState::AlphabetSet(_)));
		assert!(detector.current_model().is_none());
	}

	#[test]
	fn unconfigured_detector_trains_on_the_default_alphabet() {
		let mut detector = Detector::unconfigured();
		detector.train(&["the cat sat on the mat"], &["the mat"], &["qxzj"]).unwrap();
		assert_eq!(detector.alphabet(), Some(&Alphabet::default()));
	}

	#[test]
	fn same_alphabet_keeps_the_model() {
		let mut detector = trained();
		let before = detector.current_model().unwrap();

		detector.set_alphabet("AB  a").unwrap();
		let after = detector.current_model().expect("model should survive");
		assert!(Arc::ptr_eq(&before, &after));
	}

	#[test]
	fn invalid_alphabet_leaves_state_untouched() {
		let mut detector = trained();
		assert!(matches!(detector.set_alphabet(""), Err(GibberishError::InvalidAlphabet { .. })));
		assert!(detector.is_trained());
	}

	#[test]
	fn untrained_detector_refuses_to_classify() {
		let detector = Detector::with_alphabet("ab").unwrap();
		assert!(matches!(detector.evaluate("ab"), Err(GibberishError::UntrainedModel)));
		assert!(matches!(detector.is_gibberish("ab"), Err(GibberishError::UntrainedModel)));
		assert!(matches!(detector.score("ab"), Err(GibberishError::UntrainedModel)));
		assert!(matches!(detector.export(), Err(GibberishError::UntrainedModel)));
	}

	#[test]
	fn failed_training_keeps_the_previous_model() {
		let mut detector = trained();
		let before = detector.export().unwrap();
		let empty: [&str; 0] = [];

		assert!(matches!(detector.train(&empty, &["abab"], &["aaaa"]), Err(GibberishError::EmptyCorpus)));
		assert!(matches!(
			detector.train(&CORPUS, &empty, &["aaaa"]),
			Err(GibberishError::InsufficientExamples { .. })
		));
		assert!(matches!(
			detector.train(&CORPUS, &["aaaa"], &["abab"]),
			Err(GibberishError::IndistinguishableClasses { .. })
		));

		assert_eq!(detector.export().unwrap(), before);
	}

	#[test]
	fn failed_import_keeps_the_previous_model() {
		let mut detector = trained();
		let before = detector.export().unwrap();

		let mut broken = before.clone();
		broken.sequences.pop();
		assert!(matches!(detector.import(&broken), Err(GibberishError::ModelMismatch { .. })));
		assert!(matches!(detector.import_json("{}"), Err(GibberishError::InvalidModel { .. })));

		assert_eq!(detector.export().unwrap(), before);
	}

	#[test]
	fn export_then_import_classifies_identically() {
		let detector = trained();
		let restored = Detector::from_json(&detector.export_json().unwrap()).unwrap();

		for text in ["abab", "aaaa", "ba ab", "b"] {
			let original = detector.evaluate(text).unwrap();
			let copy = restored.evaluate(text).unwrap();
			assert_eq!(original.is_gibberish, copy.is_gibberish);
			assert!((original.score - copy.score).abs() < 1e-12);
		}
	}

	#[test]
	fn import_replaces_the_alphabet() {
		let mut detector = Detector::with_alphabet("xyz").unwrap();
		detector.import(&trained().export().unwrap()).unwrap();
		assert_eq!(detector.alphabet().map(Alphabet::as_string), Some("ab ".to_owned()));
	}
}
