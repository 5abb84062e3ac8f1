use std::collections::HashMap;
use std::hash::Hash;

/// Bidirectional mapping between tokens and dense indices.
///
/// Indices are assigned in insertion order, starting at 0.
#[derive(Clone, Debug)]
pub struct Vocabulary<T> {
	indices: HashMap<T, usize>,
	tokens: Vec<T>,
}

impl<T> Default for Vocabulary<T> {
	fn default() -> Self {
		Self { indices: HashMap::new(), tokens: Vec::new() }
	}
}

impl<T: Eq + Hash + Clone> Vocabulary<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Interns `token` and returns its index.
	///
	/// Adding a known token returns its existing index.
	pub fn add(&mut self, token: T) -> usize {
		if let Some(index) = self.indices.get(&token) {
			return *index;
		}
		let index = self.tokens.len();
		self.indices.insert(token.clone(), index);
		self.tokens.push(token);
		index
	}

	pub fn index_of(&self, token: &T) -> Option<usize> {
		self.indices.get(token).copied()
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		self.tokens.get(index)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Iterates over tokens in index order.
	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.tokens.iter()
	}
}
