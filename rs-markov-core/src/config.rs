use serde::Deserialize;

use crate::error::ChainError;

/// Default number of tokens produced by a generation, start included.
pub const DEFAULT_LENGTH: usize = 10;

/// Configuration for building a chain and driving generation.
///
/// Every field is optional when deserializing; missing fields fall back
/// to [`ChainConfig::default`].
///
/// # Invariants (after `validate`)
/// - `length >= 1`
/// - `restart_bias` is within `[0.0, 1.0]`
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ChainConfig {
	/// Fixed seed for the random source. `None` seeds from OS entropy.
	pub seed: Option<u64>,

	/// Maximum generated sequence length, start token included.
	pub length: usize,

	/// Probability for a walker to jump back to its origin at each step.
	pub restart_bias: f64,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			seed: None,
			length: DEFAULT_LENGTH,
			restart_bias: 0.0,
		}
	}
}

impl ChainConfig {
	/// Checks the configuration bounds.
	///
	/// # Errors
	/// - `InvalidLength` if `length` is 0.
	/// - `InvalidRestartBias` if `restart_bias` is outside `[0.0, 1.0]`.
	pub fn validate(&self) -> Result<(), ChainError> {
		if self.length == 0 {
			return Err(ChainError::InvalidLength);
		}
		check_restart_bias(self.restart_bias)
	}
}

/// Validates a restart bias value (NaN is rejected too).
pub(crate) fn check_restart_bias(restart_bias: f64) -> Result<(), ChainError> {
	if !(0.0..=1.0).contains(&restart_bias) {
		return Err(ChainError::InvalidRestartBias(restart_bias));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_valid() {
		let config = ChainConfig::default();
		assert_eq!(config.length, DEFAULT_LENGTH);
		assert_eq!(config.seed, None);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn rejects_zero_length() {
		let config = ChainConfig { length: 0, ..Default::default() };
		assert_eq!(config.validate(), Err(ChainError::InvalidLength));
	}

	#[test]
	fn rejects_out_of_range_bias() {
		for bias in [-0.1, 1.5, f64::NAN] {
			let config = ChainConfig { restart_bias: bias, ..Default::default() };
			assert!(matches!(config.validate(), Err(ChainError::InvalidRestartBias(_))));
		}
	}

	#[test]
	fn deserializes_partial_json() {
		let config: ChainConfig = serde_json::from_str(r#"{ "seed": 42, "length": 5 }"#).unwrap();
		assert_eq!(config.seed, Some(42));
		assert_eq!(config.length, 5);
		assert_eq!(config.restart_bias, 0.0);
	}
}
