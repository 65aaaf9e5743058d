//! Highlight Matcher
//!
//! Pure rendering of highlight records onto article text by:
//! 1. Taking the distinct highlight strings, longest first, so a short
//!    highlight cannot corrupt the markup of a longer overlapping one
//! 2. Collecting case-insensitive, word-boundary-anchored match ranges
//!    against the original text, skipping anything that overlaps an
//!    already-accepted range
//! 3. Emitting the text in one pass with each accepted range wrapped in
//!    `<mark>` tags, preserving the casing found at the match site
//!
//! A highlight string the regex engine refuses to compile falls back to a
//! literal substring scan; rendering itself never fails.

use regex::Regex;

use crate::highlight::HighlightRecord;

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// How a single highlight string is matched against the text.
///
/// The fallback branch is explicit rather than a caught error: when the
/// anchored pattern cannot be built (e.g. the escaped highlight exceeds the
/// compiled-size limit), the candidate is matched as a plain case-sensitive
/// substring, which may occasionally mark a partial-word occurrence.
enum MatchStrategy {
    Anchored(Regex),
    Literal,
}

fn strategy_for(candidate: &str) -> MatchStrategy {
    match Regex::new(&format!("(?i){}", regex::escape(candidate))) {
        Ok(re) => MatchStrategy::Anchored(re),
        Err(_) => MatchStrategy::Literal,
    }
}

/// Render `text` with every highlight in `records` wrapped in `<mark>` tags.
///
/// Returns `text` unchanged when either side is empty. Non-highlighted
/// portions of the text are never removed or reordered. Callers always pass
/// original unmarked text; the transform is applied once per call, never
/// cumulatively.
pub fn render(text: &str, records: &[HighlightRecord]) -> String {
    if text.is_empty() || records.is_empty() {
        return text.to_string();
    }

    let mut candidates: Vec<&str> = Vec::new();
    for record in records {
        let candidate = record.text.as_str();
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    // Longest first; the sort is stable, so equal lengths keep record order.
    candidates.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for candidate in candidates {
        collect_matches(text, candidate, &mut ranges);
    }
    ranges.sort_by_key(|range| range.0);

    let mut output = String::with_capacity(text.len() + ranges.len() * 16);
    let mut cursor = 0;
    for (start, end) in ranges {
        output.push_str(&text[cursor..start]);
        output.push_str(MARK_OPEN);
        output.push_str(&text[start..end]);
        output.push_str(MARK_CLOSE);
        cursor = end;
    }
    output.push_str(&text[cursor..]);
    output
}

fn collect_matches(text: &str, candidate: &str, ranges: &mut Vec<(usize, usize)>) {
    match strategy_for(candidate) {
        MatchStrategy::Anchored(re) => {
            for m in re.find_iter(text) {
                if !outside_word(text, m.start(), m.end()) {
                    continue;
                }
                if overlaps_any(ranges, m.start(), m.end()) {
                    continue;
                }
                ranges.push((m.start(), m.end()));
            }
        }
        MatchStrategy::Literal => {
            for (start, matched) in text.match_indices(candidate) {
                let end = start + matched.len();
                if overlaps_any(ranges, start, end) {
                    continue;
                }
                ranges.push((start, end));
            }
        }
    }
}

/// A match must not sit inside a larger alphanumeric run. The regex crate
/// has no lookaround, so the neighbouring characters are checked directly.
fn outside_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_none_or(|c| !c.is_alphanumeric()) && after.is_none_or(|c| !c.is_alphanumeric())
}

fn overlaps_any(ranges: &[(usize, usize)], start: usize, end: usize) -> bool {
    ranges.iter().any(|&(s, e)| start < e && s < end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(texts: &[&str]) -> Vec<HighlightRecord> {
        texts
            .iter()
            .map(|t| HighlightRecord {
                text: t.to_string(),
                context: "summary".to_string(),
                timestamp: 0,
            })
            .collect()
    }

    // ========== Identity cases ==========

    #[test]
    fn test_empty_highlights_return_text_unchanged() {
        assert_eq!(render("some text", &[]), "some text");
    }

    #[test]
    fn test_empty_text_returns_empty() {
        assert_eq!(render("", &records(&["x"])), "");
    }

    #[test]
    fn test_no_match_returns_text_unchanged() {
        assert_eq!(
            render("the quick brown fox", &records(&["zebra"])),
            "the quick brown fox"
        );
    }

    // ========== Basic marking ==========

    #[test]
    fn test_single_match_is_marked() {
        assert_eq!(
            render("say hello world now", &records(&["hello world"])),
            "say <mark>hello world</mark> now"
        );
    }

    #[test]
    fn test_all_occurrences_are_marked() {
        assert_eq!(
            render("cat and cat", &records(&["cat"])),
            "<mark>cat</mark> and <mark>cat</mark>"
        );
    }

    #[test]
    fn test_case_insensitive_match_keeps_original_case() {
        assert_eq!(
            render("Visit NEW YORK soon", &records(&["new york"])),
            "Visit <mark>NEW YORK</mark> soon"
        );
    }

    #[test]
    fn test_unmarked_portions_are_untouched() {
        let text = "alpha beta gamma delta";
        let out = render(text, &records(&["beta"]));
        assert_eq!(out.replace(MARK_OPEN, "").replace(MARK_CLOSE, ""), text);
    }

    // ========== Precedence and boundaries ==========

    #[test]
    fn test_longest_match_wins() {
        let out = render(
            "I visited New York City",
            &records(&["New York", "New York City"]),
        );
        assert_eq!(out, "I visited <mark>New York City</mark>");
    }

    #[test]
    fn test_contained_shorter_highlight_is_skipped_not_nested() {
        let out = render(
            "New York City and New Jersey",
            &records(&["New York", "New York City"]),
        );
        assert_eq!(out.matches(MARK_OPEN).count(), 1);
        assert!(!out.contains("<mark><mark>"));
    }

    #[test]
    fn test_no_partial_word_match() {
        assert_eq!(render("concatenate", &records(&["cat"])), "concatenate");
        assert_eq!(
            render("the cat concatenates", &records(&["cat"])),
            "the <mark>cat</mark> concatenates"
        );
    }

    #[test]
    fn test_boundary_respects_non_ascii_letters() {
        // "cat" inside a longer word with accented neighbours is still a
        // partial-word occurrence.
        assert_eq!(render("écaté", &records(&["cat"])), "écaté");
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        assert_eq!(
            render("Go (cat) go", &records(&["cat"])),
            "Go (<mark>cat</mark>) go"
        );
    }

    #[test]
    fn test_adjacent_occurrences_both_marked() {
        assert_eq!(
            render("cat, cat.", &records(&["cat"])),
            "<mark>cat</mark>, <mark>cat</mark>."
        );
    }

    // ========== Metacharacters and fallback ==========

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(
            render("cost is $5 (roughly)", &records(&["$5 (roughly)"])),
            "cost is <mark>$5 (roughly)</mark>"
        );
    }

    #[test]
    fn test_oversized_candidate_falls_back_to_literal() {
        // Large enough to blow the default compiled-regex size limit; the
        // literal branch must still work and never panic.
        let huge = "a".repeat(12 * 1024 * 1024);
        let text = format!("x {} y", huge);
        let out = render(&text, &records(&[huge.as_str()]));
        assert!(out.contains(MARK_OPEN));
    }

    #[test]
    fn test_duplicate_records_mark_once() {
        assert_eq!(
            render("say hello now", &records(&["hello", "hello"])),
            "say <mark>hello</mark> now"
        );
    }

    #[test]
    fn test_multiple_distinct_highlights() {
        assert_eq!(
            render("alpha beta gamma", &records(&["alpha", "gamma"])),
            "<mark>alpha</mark> beta <mark>gamma</mark>"
        );
    }
}
