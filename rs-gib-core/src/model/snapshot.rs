use serde::{Deserialize, Serialize};

use crate::error::{GibberishError, Result};

/// Exported form of a trained model.
///
/// A plain value that can be stored anywhere and imported by a later
/// instance without retraining (`TrainedModel::from_snapshot`,
/// `Detector::import`). Decoding only checks the shape; the model-level
/// checks happen on import.
///
/// JSON layout:
/// ```json
/// { "alphabet": "ab ", "sequences": [[-1.1, ...], ...], "threshold": 0.04 }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelSnapshot {
	/// Characters of the alphabet in index order.
	pub alphabet: String,
	/// Transition log-probabilities, one row per alphabet character.
	pub sequences: Vec<Vec<f64>>,
	/// Decision threshold.
	pub threshold: f64,
}

impl ModelSnapshot {
	/// Decodes a snapshot from its JSON string form.
	///
	/// # Errors
	/// `InvalidModel` if the JSON is malformed or a field is missing.
	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(|e| GibberishError::invalid_model(e.to_string()))
	}

	/// Encodes the snapshot as compact JSON.
	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self).map_err(|e| GibberishError::invalid_model(e.to_string()))
	}

	/// Encodes the snapshot as indented JSON.
	pub fn to_json_pretty(&self) -> Result<String> {
		serde_json::to_string_pretty(self).map_err(|e| GibberishError::invalid_model(e.to_string()))
	}

	/// Decodes a snapshot from its `postcard` binary form.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		postcard::from_bytes(bytes).map_err(|e| GibberishError::invalid_model(e.to_string()))
	}

	/// Encodes the snapshot with `postcard`.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		postcard::to_stdvec(self).map_err(|e| GibberishError::invalid_model(e.to_string()))
	}
}
