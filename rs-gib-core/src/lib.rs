//! Character-bigram gibberish detection library.
//!
//! This crate decides whether a short string looks like natural text in a
//! configured alphabet, including:
//! - Alphabet normalization and character indexing
//! - Transition-probability training from a text corpus
//! - Threshold calibration from known-good and known-bad examples
//! - Probability-based classification
//! - Model export/import without retraining
//!
//! The common entry point is [`Detector`]:
//!
//! ```
//! use rs_gib_core::Detector;
//!
//! let detector = Detector::new()?;
//! assert!(!detector.is_gibberish("john smith")?);
//! assert!(detector.is_gibberish("kjdjksdf")?);
//! # Ok::<(), rs_gib_core::GibberishError>(())
//! ```

/// Error type shared by every operation.
pub mod error;

/// Gibberish model: alphabet, training, scoring and the detector.
pub mod model;

/// File helpers around the model (corpus reading, snapshot files).
///
/// Kept outside the model itself: nothing in `model` touches the filesystem.
pub mod io;

pub use error::{GibberishError, Result};
pub use model::alphabet::Alphabet;
pub use model::detector::{Detector, DetectorState};
pub use model::snapshot::ModelSnapshot;
pub use model::trained_model::{TrainedModel, Verdict};
pub use model::training_config::TrainingConfig;
