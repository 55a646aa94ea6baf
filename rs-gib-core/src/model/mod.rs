//! Top-level module for the gibberish detection model.
//!
//! This module provides a character-bigram gibberish detector, including:
//! - Alphabet normalization and character indexing (`Alphabet`)
//! - Transition log-probabilities (`TransitionMatrix`)
//! - Matrix building and threshold calibration (`trainer`)
//! - Immutable trained models and their verdicts (`TrainedModel`, `Verdict`)
//! - Import/export value objects (`ModelSnapshot`)
//! - A stateful high-level interface (`Detector`)

/// Character set of a model and text normalization against it.
pub mod alphabet;

/// High-level detector tracking the alphabet/trained lifecycle.
///
/// Loads the bundled model, trains, imports, exports and classifies.
pub mod detector;

/// Exported form of a trained model (JSON and `postcard` encodings).
pub mod snapshot;

/// Immutable trained model: scoring and classification.
pub mod trained_model;

/// Transition matrix construction and threshold calibration.
pub mod trainer;

/// Training parameters (smoothing constant).
pub mod training_config;

/// Square matrix of transition log-probabilities.
pub mod transition_matrix;

/// Mean log-probability scoring shared by training and classification.
///
/// This module is not exposed publicly.
mod scorer;
