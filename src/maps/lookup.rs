//! Fuzzy map name matching.
//!
//! Players rarely type the full BSP name of a map, so `!jmpmapinfo sky` should
//! find `ut4_skyjumps`, and typos should still produce useful suggestions.

use std::collections::BTreeMap;

/// The result of looking up a map name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapLookup
{
	/// Exactly one map matched.
	Found(String),

	/// Zero or several maps matched, best guesses first.
	Candidates(Vec<String>),
}

/// Looks up `query` in `names`.
///
/// Exact matches win, then matches ignoring the `ut4_`/`ut_` prefix; after
/// that the names "sounding like" the query are returned.
pub(crate) fn lookup<'a, I>(query: &str, names: I) -> MapLookup
where
	I: IntoIterator<Item = &'a str>,
{
	let wanted = query.trim().to_lowercase();
	let names = names.into_iter().collect::<Vec<_>>();

	if let Some(&name) = names.iter().find(|name| name.eq_ignore_ascii_case(&wanted)) {
		return MapLookup::Found(name.to_owned());
	}

	let stripped = names
		.iter()
		.map(|&name| (strip_prefix(&name.to_lowercase()).to_owned(), name))
		.collect::<BTreeMap<_, _>>();

	if let Some(&name) = stripped.get(&wanted) {
		return MapLookup::Found(name.to_owned());
	}

	let mut matches = sounding_like(strip_prefix(&wanted), stripped.keys().map(String::as_str))
		.into_iter()
		.filter_map(|stripped_name| stripped.get(stripped_name))
		.map(|&name| name.to_owned())
		.collect::<Vec<_>>();

	if matches.len() == 1 {
		return MapLookup::Found(matches.remove(0));
	}

	MapLookup::Candidates(matches)
}

fn strip_prefix(name: &str) -> &str
{
	name.strip_prefix("ut4_")
		.or_else(|| name.strip_prefix("ut_"))
		.unwrap_or(name)
}

fn clean(value: &str) -> String
{
	value
		.chars()
		.filter(char::is_ascii_alphanumeric)
		.map(|char| char.to_ascii_lowercase())
		.collect()
}

/// Returns the entries of `expected` that sound like `wanted`.
///
/// In order of preference: an exact match (ignoring punctuation), all entries
/// containing `wanted`, all entries with the same soundex code, and finally
/// every entry ordered by edit distance.
fn sounding_like<'a, I>(wanted: &str, expected: I) -> Vec<&'a str>
where
	I: IntoIterator<Item = &'a str>,
{
	let wanted = clean(wanted);
	let expected = expected
		.into_iter()
		.map(|entry| (clean(entry), entry))
		.collect::<BTreeMap<_, _>>();

	if let Some(&entry) = expected.get(&wanted) {
		return vec![entry];
	}

	let substrings = expected
		.iter()
		.filter(|(cleaned, _)| cleaned.contains(&wanted))
		.map(|(_, &entry)| entry)
		.collect::<Vec<_>>();

	if !substrings.is_empty() {
		return substrings;
	}

	let code = soundex(&wanted);

	if !code.is_empty() {
		let sound_alikes = expected
			.iter()
			.filter(|(cleaned, _)| soundex(cleaned) == code)
			.map(|(_, &entry)| entry)
			.collect::<Vec<_>>();

		if !sound_alikes.is_empty() {
			return sound_alikes;
		}
	}

	let mut by_distance = expected
		.iter()
		.map(|(cleaned, &entry)| (levenshtein(&wanted, cleaned), entry))
		.collect::<Vec<_>>();

	by_distance.sort();
	by_distance.into_iter().map(|(_, entry)| entry).collect()
}

/// Soundex code of the letters in `value`, e.g. `R163` for `Robert`.
///
/// Like B3, `h` and `w` are treated as vowels, so they separate letters with
/// the same code. Returns an empty string if `value` contains no letters.
fn soundex(value: &str) -> String
{
	fn digit(letter: char) -> Option<char>
	{
		match letter {
			'b' | 'f' | 'p' | 'v' => Some('1'),
			'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => Some('2'),
			'd' | 't' => Some('3'),
			'l' => Some('4'),
			'm' | 'n' => Some('5'),
			'r' => Some('6'),
			_ => None,
		}
	}

	let mut letters = value
		.chars()
		.filter(char::is_ascii_alphabetic)
		.map(|char| char.to_ascii_lowercase());

	let Some(first) = letters.next() else {
		return String::new();
	};

	let mut code = String::from(first.to_ascii_uppercase());
	let mut previous = digit(first);

	for letter in letters {
		if code.len() == 4 {
			break;
		}

		let current = digit(letter);

		if let Some(current_digit) = current {
			if previous != current {
				code.push(current_digit);
			}
		}

		previous = current;
	}

	while code.len() < 4 {
		code.push('0');
	}

	code
}

/// Number of single-character edits needed to turn `lhs` into `rhs`.
fn levenshtein(lhs: &str, rhs: &str) -> usize
{
	let rhs = rhs.chars().collect::<Vec<_>>();
	let mut row = (0..=rhs.len()).collect::<Vec<_>>();

	for (lhs_idx, lhs_char) in lhs.chars().enumerate() {
		let mut diagonal = row[0];
		row[0] = lhs_idx + 1;

		for (rhs_idx, &rhs_char) in rhs.iter().enumerate() {
			let substitution = diagonal + usize::from(lhs_char != rhs_char);
			diagonal = row[rhs_idx + 1];
			row[rhs_idx + 1] = substitution.min(row[rhs_idx] + 1).min(diagonal + 1);
		}
	}

	row[rhs.len()]
}

#[cfg(test)]
mod tests
{
	use super::*;

	const MAPS: &[&str] = &[
		"ut4_skyjumps",
		"ut4_skyjumps_b2",
		"ut4_orbital_beta",
		"ut4_ambush",
		"ut_bunker",
		"ut4_cascade",
	];

	fn names() -> impl Iterator<Item = &'static str>
	{
		MAPS.iter().copied()
	}

	#[test]
	fn exact_match()
	{
		assert_eq!(lookup("UT4_Ambush", names()), MapLookup::Found("ut4_ambush".to_owned()));
	}

	#[test]
	fn match_without_prefix()
	{
		assert_eq!(lookup("bunker", names()), MapLookup::Found("ut_bunker".to_owned()));
		assert_eq!(lookup("skyjumps", names()), MapLookup::Found("ut4_skyjumps".to_owned()));
	}

	#[test]
	fn substring_match()
	{
		assert_eq!(lookup("orbital", names()), MapLookup::Found("ut4_orbital_beta".to_owned()));
	}

	#[test]
	fn ambiguous_substring_yields_candidates()
	{
		let MapLookup::Candidates(candidates) = lookup("sky", names()) else {
			panic!("`sky` should be ambiguous");
		};

		assert_eq!(candidates, ["ut4_skyjumps", "ut4_skyjumps_b2"]);
	}

	#[test]
	fn soundex_match()
	{
		assert_eq!(lookup("ambosh", names()), MapLookup::Found("ut4_ambush".to_owned()));
	}

	#[test]
	fn falls_back_to_edit_distance()
	{
		let MapLookup::Candidates(candidates) = lookup("xyz", names()) else {
			panic!("nothing sounds like `xyz`");
		};

		assert_eq!(candidates.len(), MAPS.len());
	}

	#[test]
	fn soundex_codes()
	{
		assert_eq!(soundex("robert"), "R163");
		assert_eq!(soundex("rupert"), "R163");
		assert_eq!(soundex("ashcraft"), "A226");
		assert_eq!(soundex("ashcroft"), "A226");
		assert_eq!(soundex("tymczak"), "T522");
		assert_eq!(soundex("1234"), "");
	}

	#[test]
	fn edit_distance()
	{
		assert_eq!(levenshtein("kitten", "sitting"), 3);
		assert_eq!(levenshtein("", "abc"), 3);
		assert_eq!(levenshtein("same", "same"), 0);
	}
}
