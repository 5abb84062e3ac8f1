//! Top-level module for the Markov chain system.
//!
//! This module provides:
//! - The chain itself (`MarkovChain`)
//! - Per-state transition counts (`Transitions`)
//! - Pure weighted sampling helpers (`sampling`)
//! - Stepwise walks over a chain (`Walker`)
//! - Token interning (`Vocabulary`)

/// Token-level first-order Markov chain.
///
/// Handles sequence ingestion, transition counting, generation
/// and model inspection.
pub mod markov_chain;

/// Outgoing transitions of a single source token.
///
/// Tracks observed successors and supports weighted random sampling.
pub mod transitions;

/// Cumulative-weight sampling, independent of any random source.
pub mod sampling;

/// Stepwise walk with an optional restart bias.
pub mod walker;

/// Token <-> index interning.
pub mod vocabulary;
