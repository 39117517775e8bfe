//! Bulk search-input parsing.
//!
//! Operators paste multi-line, comma-separated text where each line carries
//! up to three custom tags around a mandatory search term:
//!
//! ```text
//! EID123, jsmith, Finance
//! EID456, mdoe
//! ```
//!
//! Field layout per line: `tag1, term[, tag2[, tag3]]`. The term (second
//! field) must be non-empty; lines that violate this produce a collected,
//! non-fatal error and the parser continues with the remaining lines.

/// One validated line of bulk search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLine {
    /// First field, usually an employee or asset identifier.
    pub tag1: Option<String>,
    /// The search term (name or account-id substring). Never empty.
    pub term: String,
    /// Optional third field.
    pub tag2: Option<String>,
    /// Optional fourth field.
    pub tag3: Option<String>,
}

/// Result of parsing raw operator input: ordered lines plus collected
/// per-line errors. Parse errors never abort the batch.
#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    pub lines: Vec<SearchLine>,
    pub errors: Vec<String>,
}

impl ParsedInput {
    /// True when no usable line survived parsing.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Parse newline-separated, comma-delimited search input.
///
/// Blank lines are skipped. Line order is preserved; it determines the
/// order of emitted results downstream. A line with fewer than two
/// comma-separated segments, or with an empty second segment, contributes
/// one entry to `errors` and nothing to `lines`.
pub fn parse_search_input(raw: &str) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();

        if parts.len() < 2 || parts[1].is_empty() {
            parsed.errors.push(format!(
                "Skipping line '{line}': search term (second field) is missing or empty."
            ));
            continue;
        }

        let field = |idx: usize| -> Option<String> {
            parts
                .get(idx)
                .filter(|s| !s.is_empty())
                .map(|s| (*s).to_string())
        };

        parsed.lines.push(SearchLine {
            tag1: field(0),
            term: parts[1].to_string(),
            tag2: field(2),
            tag3: field(3),
        });
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_line_with_tags() {
        let parsed = parse_search_input("EID123, jsmith, Finance, Manila");
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.lines.len(), 1);
        let line = &parsed.lines[0];
        assert_eq!(line.tag1.as_deref(), Some("EID123"));
        assert_eq!(line.term, "jsmith");
        assert_eq!(line.tag2.as_deref(), Some("Finance"));
        assert_eq!(line.tag3.as_deref(), Some("Manila"));
    }

    #[test]
    fn skips_blank_lines_and_preserves_order() {
        let parsed = parse_search_input("a, one\n\n   \nb, two\nc, three");
        assert_eq!(parsed.lines.len(), 3);
        let terms: Vec<&str> = parsed.lines.iter().map(|l| l.term.as_str()).collect();
        assert_eq!(terms, vec!["one", "two", "three"]);
    }

    #[test]
    fn single_segment_line_is_collected_error() {
        let parsed = parse_search_input("onlyonefield");
        assert!(parsed.lines.is_empty());
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.errors[0].contains("onlyonefield"));
    }

    #[test]
    fn empty_second_segment_is_collected_error() {
        let parsed = parse_search_input("EID123, , Finance");
        assert!(parsed.lines.is_empty());
        assert_eq!(parsed.errors.len(), 1);
    }

    #[test]
    fn bad_line_does_not_abort_remaining_lines() {
        let parsed = parse_search_input("bad\nEID1, good\nworse,");
        assert_eq!(parsed.lines.len(), 1);
        assert_eq!(parsed.lines[0].term, "good");
        assert_eq!(parsed.errors.len(), 2);
    }

    #[test]
    fn whitespace_is_trimmed_from_every_field() {
        let parsed = parse_search_input("  EID1 ,  jsmith  ,  Finance  ");
        let line = &parsed.lines[0];
        assert_eq!(line.tag1.as_deref(), Some("EID1"));
        assert_eq!(line.term, "jsmith");
        assert_eq!(line.tag2.as_deref(), Some("Finance"));
    }

    #[test]
    fn empty_first_field_becomes_none() {
        let parsed = parse_search_input(", jsmith");
        assert_eq!(parsed.lines.len(), 1);
        assert_eq!(parsed.lines[0].tag1, None);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let parsed = parse_search_input("");
        assert!(parsed.is_empty());
        assert!(parsed.errors.is_empty());
    }
}
