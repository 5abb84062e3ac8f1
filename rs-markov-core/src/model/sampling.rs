/// Returns the sum of all candidate weights, saturating at `usize::MAX`.
pub fn total_weight<T>(candidates: &[(T, usize)]) -> usize {
	candidates.iter().fold(0usize, |total, (_, weight)| total.saturating_add(*weight))
}

/// Selects a candidate from a uniform draw over the cumulative weights.
///
/// `draw` is expected in `[0, total_weight(candidates))`. The first
/// candidate whose cumulative weight is strictly greater than `draw` is
/// returned, so a candidate with weight `w` owns exactly `w` draw values.
///
/// Returns `None` if `draw` is out of range (this includes an empty list).
///
/// # Example
/// With `[("a", 1), ("b", 2)]`: draw `0` selects `"a"`, draws `1` and `2`
/// select `"b"`, draw `3` selects nothing.
pub fn weighted_choice<T>(candidates: &[(T, usize)], draw: usize) -> Option<&T> {
	let mut cumulative: usize = 0;
	for (item, weight) in candidates {
		cumulative = cumulative.saturating_add(*weight);
		if draw < cumulative {
			return Some(item);
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn selects_by_cumulative_weight() {
		let candidates = [("a", 1), ("b", 2), ("c", 3)];
		assert_eq!(total_weight(&candidates), 6);

		let picks: Vec<&str> = (0..6).filter_map(|draw| weighted_choice(&candidates, draw).copied()).collect();
		assert_eq!(picks, ["a", "b", "b", "c", "c", "c"]);
	}

	#[test]
	fn out_of_range_draw() {
		let candidates = [("a", 1), ("b", 2)];
		assert_eq!(weighted_choice(&candidates, 3), None);
		assert_eq!(weighted_choice::<&str>(&[], 0), None);
	}

	#[test]
	fn single_candidate_owns_every_draw() {
		let candidates = [('x', 4)];
		for draw in 0..4 {
			assert_eq!(weighted_choice(&candidates, draw), Some(&'x'));
		}
	}
}
