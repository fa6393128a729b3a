use crate::search::Query;
use crate::types::Segment;

/// Partition `content` into alternating non-match/match spans for `query`.
///
/// Matching is greedy, leftmost-first and non-overlapping; spans keep the
/// original text and casing, and match spans are numbered 0.. in order of
/// appearance. Back-to-back matches keep the zero-length non-match span
/// between them, so downstream indexing always sees strict alternation.
/// The empty query yields a single non-match span holding all of `content`.
pub fn segment(query: &Query, content: &str) -> Vec<Segment> {
    let Some(pattern) = query.pattern() else {
        return vec![Segment::plain(content)];
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut match_index = 0;

    for found in pattern.find_iter(content) {
        segments.push(Segment::plain(&content[cursor..found.start()]));
        segments.push(Segment::matched(found.as_str(), match_index));
        match_index += 1;
        cursor = found.end();
    }
    segments.push(Segment::plain(&content[cursor..]));

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_scenario_two_foxes() {
        let content = "The quick brown fox. The fox jumps.";
        let segments = segment(&Query::new("fox"), content);

        assert_eq!(
            segments,
            vec![
                Segment::plain("The quick brown "),
                Segment::matched("fox", 0),
                Segment::plain(". The "),
                Segment::matched("fox", 1),
                Segment::plain(" jumps."),
            ]
        );
    }

    #[test]
    fn test_lossless_partition() {
        let cases = [
            ("The quick brown fox. The fox jumps.", "fox"),
            ("aaaa", "aa"),
            ("", "fox"),
            ("no occurrences here", "fox"),
            ("fox", "fox"),
            ("foxfoxfox", "fox"),
            ("ünïcode höher öfter", "ö"),
            ("line one\nline two\nline three", "line"),
            ("anything at all", ""),
            ("anything at all", "   "),
        ];

        for (content, term) in cases {
            let segments = segment(&Query::new(term), content);
            assert_eq!(reassemble(&segments), content, "term {:?}", term);
        }
    }

    #[test]
    fn test_empty_query_single_segment() {
        let content = "some document text";
        for term in ["", "  ", "\t"] {
            let segments = segment(&Query::new(term), content);
            assert_eq!(segments, vec![Segment::plain(content)]);
        }
    }

    #[test]
    fn test_back_to_back_matches_keep_empty_gap() {
        let segments = segment(&Query::new("ab"), "abab");
        assert_eq!(
            segments,
            vec![
                Segment::plain(""),
                Segment::matched("ab", 0),
                Segment::plain(""),
                Segment::matched("ab", 1),
                Segment::plain(""),
            ]
        );
    }

    #[test]
    fn test_case_insensitive_keeps_original_casing() {
        let segments = segment(&Query::new("hello"), "Hello HELLO heLLo");
        let matches: Vec<&str> = segments
            .iter()
            .filter(|s| s.is_match)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(matches, vec!["Hello", "HELLO", "heLLo"]);
    }

    #[test]
    fn test_overlap_is_leftmost_non_overlapping() {
        let segments = segment(&Query::new("aa"), "aaa");
        let match_count = segments.iter().filter(|s| s.is_match).count();
        assert_eq!(match_count, 1);
        assert_eq!(reassemble(&segments), "aaa");
    }

    #[test]
    fn test_match_indices_sequential() {
        let segments = segment(&Query::new("a"), "a b a b a");
        let indices: Vec<isize> = segments
            .iter()
            .filter(|s| s.is_match)
            .map(|s| s.match_index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(segments.iter().filter(|s| !s.is_match).all(|s| s.match_index == -1));
    }
}
