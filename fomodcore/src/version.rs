// Version :: Loose comparison of dotted version strings.

use std::cmp::Ordering;

use itertools::{EitherOrBoth, Itertools};

/// Compares two dotted version strings, such as "1.5.97" and "1.6".
///
/// Each segment is compared by its leading number first, and then by whatever text follows it.
/// A missing segment counts as zero, so "1.2" and "1.2.0" are equal.
/// A segment without a suffix ranks above one with a suffix, making "1.0" newer than "1.0beta".
pub fn compare(a: &str, b: &str) -> Ordering {
	let a = a.trim().trim_start_matches(['v', 'V']);
	let b = b.trim().trim_start_matches(['v', 'V']);

	for pair in a.split('.').zip_longest(b.split('.')) {
		let (left, right) = match pair {
			EitherOrBoth::Both(l, r) => (segment(l), segment(r)),
			EitherOrBoth::Left(l) => (segment(l), (0, "")),
			EitherOrBoth::Right(r) => ((0, ""), segment(r)),
		};

		let ordering = left.0.cmp(&right.0)
			.then_with(|| compare_suffix(left.1, right.1));

		if ordering != Ordering::Equal { return ordering; }
	}

	Ordering::Equal
}

/// Splits a segment into its leading number and the text that follows.
fn segment(seg: &str) -> (u64, &str) {
	let seg = seg.trim();
	let split = seg.find(|c: char| !c.is_ascii_digit()).unwrap_or(seg.len());
	let (digits, rest) = seg.split_at(split);

	(digits.parse().unwrap_or(0), rest)
}

fn compare_suffix(a: &str, b: &str) -> Ordering {
	match (a.is_empty(), b.is_empty()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => a.cmp(b),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numeric_segments() {
		assert_eq!(compare("1.10", "1.9"), Ordering::Greater);
		assert_eq!(compare("1.5.97", "1.6"), Ordering::Less);
		assert_eq!(compare("1.2", "1.2.0"), Ordering::Equal);
		assert_eq!(compare("v2.0", "2"), Ordering::Equal);
	}

	#[test]
	fn suffixes_rank_below_releases() {
		assert_eq!(compare("1.0beta", "1.0"), Ordering::Less);
		assert_eq!(compare("1.0b", "1.0a"), Ordering::Greater);
	}
}
