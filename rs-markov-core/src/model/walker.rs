use std::hash::Hash;

use log::trace;
use rand::Rng;

use super::markov_chain::MarkovChain;
use super::transitions::Transitions;
use crate::config::check_restart_bias;
use crate::error::ChainError;

/// Stepwise walk over a trained chain.
///
/// The walker tracks a current state and moves along observed transitions,
/// either explicitly (`advance`) or by sampling (`next_state`). With a
/// non-zero restart bias, each sampled step may instead jump back to the
/// origin.
///
/// # Invariants
/// - `restart_bias` is within `[0.0, 1.0]`
/// - `current` only changes along an observed transition, or back to `origin`
pub struct Walker<'a, T, R> {
	chain: &'a mut MarkovChain<T, R>,
	origin: T,
	current: T,
	restart_bias: f64,
}

impl<'a, T: Eq + Hash + Clone, R: Rng> Walker<'a, T, R> {
	pub(crate) fn new(chain: &'a mut MarkovChain<T, R>, origin: T, restart_bias: f64) -> Result<Self, ChainError> {
		check_restart_bias(restart_bias)?;
		Ok(Self {
			chain,
			current: origin.clone(),
			origin,
			restart_bias,
		})
	}

	pub fn origin(&self) -> &T {
		&self.origin
	}

	pub fn current(&self) -> &T {
		&self.current
	}

	pub fn restart_bias(&self) -> f64 {
		self.restart_bias
	}

	/// Outgoing transitions of the current state.
	pub fn next_states(&self) -> Option<&Transitions<T>> {
		self.chain.transitions(&self.current)
	}

	/// Moves to `to` if `current -> to` was observed.
	///
	/// Returns `false` and stays in place otherwise.
	pub fn advance(&mut self, to: T) -> bool {
		if self.chain.count(&self.current, &to) == 0 {
			return false;
		}
		self.current = to;
		true
	}

	/// Samples the next state and moves to it.
	///
	/// Returns `None` (and stays in place) if the current state has no
	/// outgoing transition. The restart bias only applies to states that
	/// are not dead ends.
	pub fn next_state(&mut self) -> Option<T> {
		if self.next_states().is_none_or(|transitions| transitions.is_empty()) {
			trace!("walker stuck after dead end");
			return None;
		}

		let next = if self.restart_bias > 0.0 && self.chain.rng_mut().random_bool(self.restart_bias) {
			self.origin.clone()
		} else {
			self.chain.sample_next(&self.current)?
		};

		self.current = next.clone();
		Some(next)
	}

	/// Moves back to the origin.
	pub fn reset(&mut self) {
		self.current = self.origin.clone();
	}
}

impl<T: Eq + Hash + Clone, R: Rng> Iterator for Walker<'_, T, R> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		self.next_state()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ring() -> MarkovChain<u32> {
		// 0 <-> 1, 0 <-> 2, 2 -> 3 (dead end)
		let mut chain = MarkovChain::with_seed(11);
		chain.add_both_directions(0, 1);
		chain.add_both_directions(0, 2);
		chain.add_transition(2, 3);
		chain
	}

	#[test]
	fn rejects_invalid_bias() {
		let mut chain = ring();
		assert!(matches!(chain.walker(0, 1.5), Err(ChainError::InvalidRestartBias(_))));
		assert!(matches!(chain.walker(0, -0.5), Err(ChainError::InvalidRestartBias(_))));
	}

	#[test]
	fn advance_follows_observed_transitions() {
		let mut chain = ring();
		let mut walker = chain.walker(0, 0.0).unwrap();

		assert!(!walker.advance(3));
		assert_eq!(*walker.current(), 0);
		assert!(walker.advance(2));
		assert!(walker.advance(3));
		assert_eq!(*walker.current(), 3);

		walker.reset();
		assert_eq!(walker.current(), walker.origin());
	}

	#[test]
	fn stops_at_dead_end() {
		let mut chain = ring();
		let mut walker = chain.walker(3, 1.0).unwrap();
		assert!(walker.next_states().is_none());
		assert_eq!(walker.next_state(), None);
		assert_eq!(*walker.current(), 3);
	}

	#[test]
	fn full_bias_always_restarts() {
		let mut chain = ring();
		let mut walker = chain.walker(1, 1.0).unwrap();
		let steps: Vec<u32> = walker.by_ref().take(10).collect();
		assert_eq!(steps, vec![1; 10]);
	}

	#[test]
	fn partial_bias_restarts_proportionally() {
		// 0 -> 1, 1 <-> 2: nothing but a restart leads back to 0
		let mut chain = MarkovChain::with_seed(0xB1A5);
		chain.add_transition(0u32, 1);
		chain.add_both_directions(1, 2);

		let mut walker = chain.walker(0, 0.5).unwrap();
		assert_eq!(walker.restart_bias(), 0.5);

		let steps = 10_000;
		let restarts = walker.by_ref().take(steps).filter(|state| *state == 0).count();
		let ratio = restarts as f64 / steps as f64;
		assert!((0.47..=0.53).contains(&ratio), "restart ratio {ratio}");
	}

	#[test]
	fn zero_bias_never_restarts() {
		let mut chain = MarkovChain::with_seed(5);
		chain.add_transition(0u32, 1);
		chain.add_both_directions(1, 2);

		let mut walker = chain.walker(0, 0.0).unwrap();
		assert_eq!(walker.restart_bias(), 0.0);
		assert_eq!(walker.by_ref().take(1_000).filter(|state| *state == 0).count(), 0);
	}

	#[test]
	fn steps_are_observed_transitions() {
		let mut chain = ring();
		let reference = chain.clone();
		let mut walker = chain.walker(0, 0.0).unwrap();

		let mut previous = 0;
		for _ in 0..50 {
			match walker.next_state() {
				Some(next) => {
					assert!(reference.count(&previous, &next) > 0);
					previous = next;
				}
				None => {
					assert_eq!(previous, 3);
					break;
				}
			}
		}
	}
}
