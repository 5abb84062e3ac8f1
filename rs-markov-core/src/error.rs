use thiserror::Error;

/// Errors returned by the fallible parts of the chain API.
///
/// Training and generation never fail; these only come from
/// configuration validation, random seeding and walker construction.
#[derive(Debug, Error, PartialEq)]
pub enum ChainError {
	#[error("generation length must be >= 1")]
	InvalidLength,

	#[error("restart bias must be between 0.0 and 1.0, got {0}")]
	InvalidRestartBias(f64),

	#[error("no states available for a random start")]
	EmptyModel,
}
