use std::collections::hash_map::Keys;
use std::fmt::Display;
use std::hash::Hash;

use log::{debug, trace};
use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use super::transitions::Transitions;
use super::walker::Walker;
use crate::config::ChainConfig;
use crate::error::ChainError;

/// Strategy used to select the starting token of a generation.
///
/// # Variants
/// - `Random`: pick a random source token among the learned states.
/// - `Custom(T)`: use the provided token, known or not.
#[derive(PartialEq, Debug, Clone)]
pub enum StartSeed<T> {
	Random,
	Custom(T),
}

/// First-order Markov chain over arbitrary tokens.
///
/// The chain maps every source token to the [`Transitions`] observed right
/// after it, and owns the random source used for sampling.
///
/// # Responsibilities
/// - Learn transition counts from token sequences
/// - Generate bounded sequences by weighted sampling
/// - Expose the learned model for inspection
/// - Merge with another chain over the same token type
///
/// # Invariants
/// - Every stored `Transitions` holds at least one successor
/// - Every count is >= 1, counts only grow and nothing is ever removed
///
/// # Notes
/// - `R` is the random source. Production code uses the entropy-seeded
///   default, tests inject a seeded `StdRng` (or any other `Rng`).
/// - Maps use a fixed hasher: two chains trained the same way with the
///   same seed generate the same sequences.
/// - Not synchronized: callers sharing a chain across threads must
///   serialize access themselves.
#[derive(Debug, Clone)]
pub struct MarkovChain<T, R = StdRng> {
	/// Mapping from a source token to its outgoing transitions.
	states: FxHashMap<T, Transitions<T>>,

	/// Instance-owned random source.
	rng: R,
}

impl<T: Eq + Hash + Clone> MarkovChain<T, StdRng> {
	/// Creates an empty chain seeded from OS entropy.
	pub fn new() -> Self {
		Self::with_rng(StdRng::from_os_rng())
	}

	/// Creates an empty chain with a reproducible random source.
	pub fn with_seed(seed: u64) -> Self {
		Self::with_rng(StdRng::seed_from_u64(seed))
	}

	/// Creates an empty chain from a configuration.
	///
	/// Uses `config.seed` when set, OS entropy otherwise.
	///
	/// # Errors
	/// Returns the validation error if the configuration is out of bounds.
	pub fn from_config(config: &ChainConfig) -> Result<Self, ChainError> {
		config.validate()?;
		Ok(match config.seed {
			Some(seed) => Self::with_seed(seed),
			None => Self::new(),
		})
	}
}

impl<T: Eq + Hash + Clone> Default for MarkovChain<T, StdRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Eq + Hash + Clone, R: Rng> MarkovChain<T, R> {
	/// Creates an empty chain drawing from the given random source.
	pub fn with_rng(rng: R) -> Self {
		Self { states: FxHashMap::default(), rng }
	}

	/// Learns every adjacent pair of `sequence`.
	///
	/// For each `(sequence[i], sequence[i + 1])`, the matching count is
	/// incremented. Counts accumulate across calls.
	///
	/// # Notes
	/// - Sequences with fewer than 2 tokens hold no transition and leave
	///   the model untouched.
	pub fn train(&mut self, sequence: &[T]) {
		for pair in sequence.windows(2) {
			self.add_transition(pair[0].clone(), pair[1].clone());
		}
		debug!("trained on {} tokens, {} states known", sequence.len(), self.states.len());
	}

	/// Records a single observed transition `from -> to`.
	pub fn add_transition(&mut self, from: T, to: T) {
		self.states.entry(from).or_default().add_transition(to);
	}

	/// Records both `a -> b` and `b -> a`.
	pub fn add_both_directions(&mut self, a: T, b: T) {
		self.add_transition(a.clone(), b.clone());
		self.add_transition(b, a);
	}

	/// Number of times `from -> to` was observed.
	pub fn count(&self, from: &T, to: &T) -> usize {
		self.states.get(from).map_or(0, |transitions| transitions.count(to))
	}

	/// Outgoing transitions of `from`, `None` if it was never a source.
	pub fn transitions(&self, from: &T) -> Option<&Transitions<T>> {
		self.states.get(from)
	}

	/// Normalized successor probabilities of `from` (empty for a dead end).
	pub fn probabilities(&self, from: &T) -> Vec<(&T, f64)> {
		self.states
			.get(from)
			.map(|transitions| transitions.probabilities())
			.unwrap_or_default()
	}

	/// Number of source tokens.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Iterates over all source tokens in unspecified order.
	pub fn states(&self) -> Keys<'_, T, Transitions<T>> {
		self.states.keys()
	}

	/// Returns a random source token, uniformly among the learned states.
	///
	/// Returns `None` if the chain is empty.
	pub fn get_random_seed(&mut self) -> Option<T> {
		self.states.keys().choose(&mut self.rng).cloned()
	}

	/// Draws one successor of `from`, weighted by the observed counts.
	///
	/// Returns `None` if `from` has no outgoing transition.
	pub fn sample_next(&mut self, from: &T) -> Option<T> {
		self.states.get(from)?.predict(&mut self.rng)
	}

	/// Generates a sequence of at most `length` tokens starting with `start`.
	///
	/// At each step the last token's successors are sampled; generation
	/// stops early when the last token is a dead end.
	///
	/// # Notes
	/// - Always returns at least `[start]`, even for `length == 0`.
	/// - `start` does not need to be a known token.
	pub fn generate(&mut self, start: T, length: usize) -> Vec<T> {
		let mut sequence = vec![start];

		while sequence.len() < length {
			match sequence.last().and_then(|current| self.sample_next(current)) {
				Some(next) => sequence.push(next),
				None => {
					trace!("dead end after {} tokens", sequence.len());
					break;
				}
			}
		}

		sequence
	}

	/// Generates a sequence, choosing the start token from `start_seed`.
	///
	/// # Errors
	/// Returns `EmptyModel` for `StartSeed::Random` on an empty chain.
	pub fn generate_from(&mut self, start_seed: &StartSeed<T>, length: usize) -> Result<Vec<T>, ChainError> {
		let start = match start_seed {
			StartSeed::Custom(start) => start.clone(),
			StartSeed::Random => self.get_random_seed().ok_or(ChainError::EmptyModel)?,
		};
		Ok(self.generate(start, length))
	}

	/// Merges another chain into this one.
	///
	/// # Notes
	/// - Counts of matching transitions are summed, others are copied.
	/// - The random source of `other` is left aside.
	pub fn merge<R2>(&mut self, other: &MarkovChain<T, R2>) {
		for (from, transitions) in &other.states {
			self.states.entry(from.clone()).or_default().merge(transitions);
		}
		debug!("merged {} states, {} states known", other.states.len(), self.states.len());
	}

	/// Starts a stepwise walk at `origin`.
	///
	/// # Errors
	/// Returns `InvalidRestartBias` if `restart_bias` is outside `[0.0, 1.0]`.
	pub fn walker(&mut self, origin: T, restart_bias: f64) -> Result<Walker<'_, T, R>, ChainError> {
		Walker::new(self, origin, restart_bias)
	}

	pub(crate) fn rng_mut(&mut self) -> &mut R {
		&mut self.rng
	}
}

impl<T: Display, R> MarkovChain<T, R> {
	/// Renders one line per source token: `from -> next (count) ...`.
	///
	/// Line and successor order are unspecified. This is a debugging aid,
	/// not a serialization format.
	pub fn model_lines(&self) -> Vec<String> {
		self.states
			.iter()
			.map(|(from, transitions)| format!("{from} -> {transitions}"))
			.collect()
	}

	/// Prints the model to standard output.
	pub fn print_model(&self) {
		for line in self.model_lines() {
			println!("{line}");
		}
	}
}
