//! Section Splitter
//!
//! Decomposes a long plain-text article body into titled sections for
//! collapsible display and chunked translation. Two strategies are supported:
//!
//! 1. **Heading markers** - explicit `== Title ==` marker lines (2-6 `=` on
//!    each side), as produced by plain-text extracts of wiki articles.
//! 2. **Heuristic lines** - for sources without markers: a short line that
//!    does not end in a period starts a new section.

/// Maximum rendered heading depth.
const MAX_LEVEL: u8 = 5;

/// Heuristic mode: lines at least this many characters long are never
/// treated as headings.
const HEADING_LINE_MAX_CHARS: usize = 100;

/// A titled or untitled contiguous span of article text. Transient; sections
/// are recomputed from the article body on every render.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Section {
    /// `None` for leading content before the first heading.
    pub title: Option<String>,
    pub content: String,
    /// Heading depth mapped to a display level, `0..=5`.
    pub level: u8,
}

impl Section {
    /// Title to render; untitled sections get a placeholder label.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// Which splitting strategy to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    HeadingMarkers,
    HeuristicLines,
}

pub struct SectionSplitter {
    strategy: SplitStrategy,
}

impl SectionSplitter {
    pub fn new(strategy: SplitStrategy) -> Self {
        SectionSplitter { strategy }
    }

    /// Pick a strategy by inspecting the text: heading-marker mode when at
    /// least one marker line is present, heuristic line mode otherwise.
    pub fn detect(text: &str) -> Self {
        let strategy = if text.lines().any(|line| parse_heading_marker(line).is_some()) {
            SplitStrategy::HeadingMarkers
        } else {
            SplitStrategy::HeuristicLines
        };
        SectionSplitter { strategy }
    }

    pub fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    /// Split `text` into an ordered sequence of sections.
    ///
    /// Empty-input policy: heading-marker mode returns a single untitled
    /// section carrying the (empty) input; heuristic mode returns an empty
    /// sequence.
    pub fn split(&self, text: &str) -> Vec<Section> {
        match self.strategy {
            SplitStrategy::HeadingMarkers => split_by_markers(text),
            SplitStrategy::HeuristicLines => split_by_lines(text),
        }
    }
}

/// Parse a `== Title ==` marker line: a run of 2-6 `=`, a non-empty title,
/// and an equal closing run. Returns the display level and the title.
///
/// The regex crate has no backreferences, so the marker shape is checked by
/// counting the runs directly.
fn parse_heading_marker(line: &str) -> Option<(u8, String)> {
    let trimmed = line.trim();
    let leading = trimmed.chars().take_while(|c| *c == '=').count();
    if !(2..=6).contains(&leading) {
        return None;
    }
    let trailing = trimmed.chars().rev().take_while(|c| *c == '=').count();
    // A line of only '=' counts every char twice; the length check rejects it.
    if leading != trailing || leading + trailing >= trimmed.len() {
        return None;
    }
    let title = trimmed[leading..trimmed.len() - trailing].trim();
    if title.is_empty() {
        return None;
    }
    let level = ((leading / 2) as u8).min(MAX_LEVEL);
    Some((level, title.to_string()))
}

fn push_section(sections: &mut Vec<Section>, title: Option<String>, level: u8, body: &str) {
    let content = body.trim();
    if title.is_some() {
        // Titled sections are kept even when empty, so heading structure
        // survives for articles with stub sections.
        sections.push(Section {
            title,
            content: content.to_string(),
            level,
        });
    } else if !content.is_empty() {
        sections.push(Section {
            title: None,
            content: content.to_string(),
            level: 0,
        });
    }
}

fn split_by_markers(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut title: Option<String> = None;
    let mut level = 0u8;
    let mut body = String::new();

    for line in text.lines() {
        if let Some((next_level, next_title)) = parse_heading_marker(line) {
            push_section(&mut sections, title.take(), level, &body);
            body.clear();
            title = Some(next_title);
            level = next_level;
        } else {
            body.push_str(line);
            body.push('\n');
        }
    }
    push_section(&mut sections, title, level, &body);

    // No markers at all: the whole input is one untitled section.
    if sections.is_empty() {
        sections.push(Section {
            title: None,
            content: text.to_string(),
            level: 0,
        });
    }
    sections
}

fn looks_like_heading(trimmed: &str) -> bool {
    !trimmed.is_empty()
        && trimmed.chars().count() < HEADING_LINE_MAX_CHARS
        && !trimmed.ends_with('.')
}

fn split_by_lines(text: &str) -> Vec<Section> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut title = String::from("Introduction");
    let mut body = String::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if looks_like_heading(trimmed) {
            if !body.trim().is_empty() {
                sections.push(Section {
                    title: Some(std::mem::take(&mut title)),
                    content: body.trim().to_string(),
                    level: 1,
                });
            }
            // Consecutive heading-like lines collapse to the last title.
            body.clear();
            title = trimmed.to_string();
        } else {
            body.push_str(line);
            body.push('\n');
        }
    }
    if !body.trim().is_empty() {
        sections.push(Section {
            title: Some(title),
            content: body.trim().to_string(),
            level: 1,
        });
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_split(text: &str) -> Vec<Section> {
        SectionSplitter::new(SplitStrategy::HeadingMarkers).split(text)
    }

    fn line_split(text: &str) -> Vec<Section> {
        SectionSplitter::new(SplitStrategy::HeuristicLines).split(text)
    }

    // ========== Heading-marker mode ==========

    #[test]
    fn test_marker_round_trip() {
        let sections = marker_split("intro\n== A ==\nbody1\n== B ==\nbody2");
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, None);
        assert_eq!(sections[0].content, "intro");
        assert_eq!(sections[1].title.as_deref(), Some("A"));
        assert_eq!(sections[1].content, "body1");
        assert_eq!(sections[2].title.as_deref(), Some("B"));
        assert_eq!(sections[2].content, "body2");
    }

    #[test]
    fn test_marker_levels() {
        let sections = marker_split("== Top ==\na\n=== Sub ===\nb\n====== Deep ======\nc");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[1].level, 1); // 3 / 2
        assert_eq!(sections[2].level, 3);
    }

    #[test]
    fn test_marker_without_leading_text() {
        let sections = marker_split("== A ==\nbody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_deref(), Some("A"));
    }

    #[test]
    fn test_marker_mismatched_runs_are_content() {
        let sections = marker_split("=== A ==\nbody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, None);
        assert!(sections[0].content.contains("=== A =="));
    }

    #[test]
    fn test_marker_bare_run_is_content() {
        let sections = marker_split("====\nbody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, None);
    }

    #[test]
    fn test_marker_empty_input_yields_single_untitled_section() {
        let sections = marker_split("");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, None);
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[0].level, 0);
    }

    #[test]
    fn test_marker_no_headings_yields_whole_text() {
        let sections = marker_split("just one paragraph\nof plain text");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].content.contains("plain text"));
    }

    #[test]
    fn test_marker_stub_section_is_kept() {
        let sections = marker_split("== A ==\n== B ==\nbody");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[1].content, "body");
    }

    #[test]
    fn test_display_title_placeholder() {
        let sections = marker_split("intro\n== A ==\nbody");
        assert_eq!(sections[0].display_title(), "Untitled");
        assert_eq!(sections[1].display_title(), "A");
    }

    // ========== Heuristic line mode ==========

    #[test]
    fn test_heuristic_basic() {
        let sections = line_split("First paragraph of the article body here.\nHistory\nThe city was founded long ago.");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title.as_deref(), Some("Introduction"));
        assert!(sections[0].content.contains("First paragraph"));
        assert_eq!(sections[1].title.as_deref(), Some("History"));
    }

    #[test]
    fn test_heuristic_empty_input_yields_nothing() {
        assert!(line_split("").is_empty());
    }

    #[test]
    fn test_heuristic_long_line_is_content() {
        let long_line = "x".repeat(120);
        let sections = line_split(&long_line);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_deref(), Some("Introduction"));
    }

    #[test]
    fn test_heuristic_period_line_is_content() {
        let sections = line_split("Short line.\nAnother short line.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_deref(), Some("Introduction"));
    }

    #[test]
    fn test_heuristic_consecutive_headings_collapse() {
        let sections = line_split("Geography\nClimate\nWinters are long and cold there.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_deref(), Some("Climate"));
        assert!(sections[0].content.contains("Winters"));
    }

    #[test]
    fn test_heuristic_threshold_counts_characters_not_bytes() {
        // 40 multibyte characters, well under the threshold: a heading.
        let heading = "й".repeat(40);
        let text = format!("{}\nBody text follows the short heading here.", heading);
        let sections = line_split(&text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_deref(), Some(heading.as_str()));
    }

    // ========== Detection ==========

    #[test]
    fn test_detect_markers() {
        let splitter = SectionSplitter::detect("intro\n== A ==\nbody");
        assert_eq!(splitter.strategy(), SplitStrategy::HeadingMarkers);
    }

    #[test]
    fn test_detect_falls_back_to_heuristic() {
        let splitter = SectionSplitter::detect("plain text without any markers");
        assert_eq!(splitter.strategy(), SplitStrategy::HeuristicLines);
    }
}
