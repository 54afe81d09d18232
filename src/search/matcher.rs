//! Case-insensitive subsequence matching for file names.

/// Return `true` when `query` appears in `candidate` as an ordered,
/// possibly non-contiguous subsequence, ignoring case.
///
/// An empty query matches every candidate; callers treat an empty query as
/// "no search" before reaching this point.
#[must_use]
pub fn matches(candidate: &str, query: &str) -> bool {
	QueryPattern::new(query).matches(candidate)
}

/// A query lowered once up front so it can be tested against many names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPattern {
	lowered: Vec<char>,
}

impl QueryPattern {
	#[must_use]
	pub fn new(query: &str) -> Self {
		Self {
			lowered: query.chars().flat_map(char::to_lowercase).collect(),
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.lowered.is_empty()
	}

	/// Greedy left-to-right scan of `candidate`; no backtracking.
	#[must_use]
	pub fn matches(&self, candidate: &str) -> bool {
		let mut pending = self.lowered.iter().peekable();
		for ch in candidate.chars().flat_map(char::to_lowercase) {
			match pending.peek() {
				Some(&&wanted) if wanted == ch => {
					pending.next();
				}
				Some(_) => {}
				None => return true,
			}
		}
		pending.peek().is_none()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn subsequence_in_order_matches() {
		assert!(matches("README.md", "rdm"));
		assert!(matches("src/main.rs", "smr"));
	}

	#[test]
	fn out_of_order_characters_do_not_match() {
		assert!(!matches("README.md", "mdr"));
		assert!(!matches("a.txt", "c"));
	}

	#[test]
	fn empty_query_matches_anything() {
		assert!(matches("anything", ""));
		assert!(matches("", ""));
		assert!(QueryPattern::new("").is_empty());
	}

	#[test]
	fn case_is_ignored_on_both_sides() {
		assert!(matches("Main.go", "MG"));
		assert!(matches("main.go", "MAIN"));
		assert!(matches("ÄPFEL.txt", "äpf"));
	}

	#[test]
	fn query_longer_than_candidate_fails() {
		assert!(!matches("ab", "abc"));
		assert!(!matches("", "a"));
	}

	#[test]
	fn pattern_is_reusable_across_candidates() {
		let pattern = QueryPattern::new("Cfg");
		assert!(pattern.matches("config.toml"));
		assert!(pattern.matches("CARGO_CFG"));
		assert!(!pattern.matches("cargo.lock"));
	}
}
