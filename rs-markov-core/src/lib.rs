//! First-order Markov chain library.
//!
//! This crate provides a small token-level Markov chain including:
//! - Transition counting over arbitrary hashable tokens
//! - Weighted random sampling with an injectable random source
//! - Bounded sequence generation and stepwise walks
//! - Human-readable model inspection
//!
//! Low-level sampling helpers are exposed so they can be tested
//! independently of any random source.

/// Markov chain models, sampling and generation logic.
pub mod model;

/// Generation and walk configuration.
pub mod config;

/// Error type shared by the fallible entry points.
pub mod error;
