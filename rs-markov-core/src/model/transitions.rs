use std::collections::hash_map::Iter;
use std::fmt;
use std::hash::Hash;

use rand::Rng;
use rustc_hash::FxHashMap;

use super::sampling::{total_weight, weighted_choice};

/// Outgoing transitions of a single source token.
///
/// Conceptually, this is the set of weighted edges leaving a node of the
/// Markov chain, where each weight is the number of times the edge was
/// observed during training.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during learning
/// - Predict the next token using weighted random sampling
/// - Merge with another set of transitions (ex. combining two chains)
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - Counts only grow, entries are never removed
/// - Counts saturate at `usize::MAX` instead of wrapping
///
/// ## Notes
/// The map uses a fixed hasher, so two instances filled the same way
/// iterate in the same order and a seeded draw picks the same successor.
#[derive(Clone, Debug)]
pub struct Transitions<T> {
	/// Outgoing transitions indexed by the next token.
	/// Example: { "run" => 2, "jump" => 1 }
	counts: FxHashMap<T, usize>,
}

impl<T> Default for Transitions<T> {
	fn default() -> Self {
		Self { counts: FxHashMap::default() }
	}
}

impl<T: Eq + Hash + Clone> Transitions<T> {
	/// Creates an empty set of transitions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records an occurrence of a transition toward `next`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub fn add_transition(&mut self, next: T) {
		let occurrence = self.counts.entry(next).or_insert(0);
		*occurrence = occurrence.saturating_add(1);
	}

	/// Number of times the transition toward `next` was observed (0 if never).
	pub fn count(&self, next: &T) -> usize {
		self.counts.get(next).copied().unwrap_or(0)
	}

	/// Sum of all occurrence counts (saturating).
	pub fn total(&self) -> usize {
		self.counts.values().fold(0usize, |total, occurrence| total.saturating_add(*occurrence))
	}

	/// Number of distinct successors.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(successor, count)` pairs in unspecified order.
	pub fn iter(&self) -> Iter<'_, T, usize> {
		self.counts.iter()
	}

	/// Returns the normalized probability of each successor.
	///
	/// Probabilities sum to 1.0 (modulo floating point error). Empty
	/// transitions yield an empty list.
	pub fn probabilities(&self) -> Vec<(&T, f64)> {
		let total = self.total() as f64;
		self.counts
			.iter()
			.map(|(next, occurrence)| (next, *occurrence as f64 / total))
			.collect()
	}

	/// Predicts the next token using weighted random sampling.
	///
	/// The probability of selecting a token is proportional to its
	/// occurrence count. The draw comes from `rng`, so a seeded source
	/// gives reproducible results.
	///
	/// Returns `None` if there are no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
		let candidates: Vec<(&T, usize)> = self.counts.iter().map(|(next, occurrence)| (next, *occurrence)).collect();

		let total = total_weight(&candidates);
		if total == 0 {
			return None;
		}

		let draw = rng.random_range(0..total);
		weighted_choice(&candidates, draw).map(|&next| next.clone())
	}

	/// Merges another set of transitions into this one.
	///
	/// Occurrence counts of matching successors are summed, saturating
	/// at `usize::MAX`.
	pub fn merge(&mut self, other: &Self) {
		for (next, occurrence) in &other.counts {
			let existing = self.counts.entry(next.clone()).or_insert(0);
			*existing = existing.saturating_add(*occurrence);
		}
	}
}

impl<T: fmt::Display> fmt::Display for Transitions<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for (next, occurrence) in &self.counts {
			if !first {
				f.write_str(" ")?;
			}
			write!(f, "{next} ({occurrence})")?;
			first = false;
		}
		Ok(())
	}
}
