use crate::error::{GibberishError, Result};

/// Default smoothing floor added to every transition count.
pub const DEFAULT_SMOOTHING: f64 = 10.0;

/// Tunable parameters of a training pass.
///
/// # Invariants
/// - `smoothing` is finite and strictly positive, so no transition ever
///   ends up with a zero count (and a `-inf` log-probability)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainingConfig {
	smoothing: f64,
}

impl TrainingConfig {
	/// Creates a configuration with the given smoothing constant.
	///
	/// # Errors
	/// `InvalidSmoothing` if the value is not finite or not > 0.
	pub fn new(smoothing: f64) -> Result<Self> {
		let mut config = Self::default();
		config.set_smoothing(smoothing)?;
		Ok(config)
	}

	/// Returns the smoothing constant.
	pub fn smoothing(&self) -> f64 {
		self.smoothing
	}

	/// Sets the smoothing constant.
	///
	/// Larger values flatten the learned distribution, which can make good
	/// and bad examples harder to separate on small corpora.
	pub fn set_smoothing(&mut self, smoothing: f64) -> Result<()> {
		if !smoothing.is_finite() || smoothing <= 0.0 {
			return Err(GibberishError::InvalidSmoothing { value: smoothing });
		}
		self.smoothing = smoothing;
		Ok(())
	}
}

impl Default for TrainingConfig {
	fn default() -> Self {
		Self { smoothing: DEFAULT_SMOOTHING }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_smoothing_is_ten() {
		assert_eq!(TrainingConfig::default().smoothing(), 10.0);
	}

	#[test]
	fn invalid_smoothing_is_rejected() {
		for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
			assert!(matches!(TrainingConfig::new(value), Err(GibberishError::InvalidSmoothing { .. })));
		}

		let mut config = TrainingConfig::default();
		assert!(config.set_smoothing(0.0).is_err());
		assert_eq!(config.smoothing(), DEFAULT_SMOOTHING);
		config.set_smoothing(0.5).unwrap();
		assert_eq!(config.smoothing(), 0.5);
	}
}
