use crate::error::{GibberishError, Result};

/// Square table of log-probabilities that character `to` follows
/// character `from`, both given as alphabet indices.
///
/// # Invariants
/// - `cells.len() == size * size` (row-major)
/// - Every cell is finite: either a computed log-probability or the
///   neutral `0.0` of a row that never occurred
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionMatrix {
	size: usize,
	cells: Vec<f64>,
}

impl TransitionMatrix {
	/// Builds the matrix from per-row transition counts.
	///
	/// Each row `r` with total `T` becomes `ln(count / T)`, or all zeros
	/// when `T` is zero.
	pub(crate) fn from_counts(size: usize, counts: Vec<f64>) -> Self {
		debug_assert_eq!(counts.len(), size * size);

		let mut cells = counts;
		for row in cells.chunks_mut(size.max(1)) {
			let total: f64 = row.iter().sum();
			for cell in row.iter_mut() {
				*cell = if total > 0.0 { (*cell / total).ln() } else { 0.0 };
			}
		}

		Self { size, cells }
	}

	/// Rebuilds a matrix from exported rows.
	///
	/// # Errors
	/// - `ModelMismatch` if the matrix is not `size x size`
	/// - `InvalidModel` if it is empty or a cell is not finite
	pub(crate) fn from_rows(size: usize, rows: &[Vec<f64>]) -> Result<Self> {
		if rows.is_empty() {
			return Err(GibberishError::invalid_model("transition matrix is empty"));
		}
		if rows.len() != size {
			return Err(GibberishError::ModelMismatch { expected: size, found: rows.len() });
		}

		let mut cells = Vec::with_capacity(size * size);
		for (r, row) in rows.iter().enumerate() {
			if row.len() != size {
				return Err(GibberishError::ModelMismatch { expected: size, found: row.len() });
			}
			if let Some(c) = row.iter().position(|cell| !cell.is_finite()) {
				return Err(GibberishError::invalid_model(format!("cell ({}, {}) is not finite", r, c)));
			}
			cells.extend_from_slice(row);
		}

		Ok(Self { size, cells })
	}

	/// Side length (the alphabet size the matrix was built for).
	pub fn size(&self) -> usize {
		self.size
	}

	/// Log-probability of `to` following `from`, or `None` if either index
	/// is out of range.
	pub fn get(&self, from: usize, to: usize) -> Option<f64> {
		if from >= self.size || to >= self.size {
			return None;
		}
		self.cells.get(from * self.size + to).copied()
	}

	/// Copies the matrix out as one `Vec` per row.
	pub fn to_rows(&self) -> Vec<Vec<f64>> {
		self.cells.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
	}
}
