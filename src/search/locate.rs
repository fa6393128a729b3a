use crate::search::Query;

/// Count non-overlapping, case-insensitive occurrences of `query` in
/// `content` without building the segment partition. The viewer uses this
/// as the authoritative total and cross-checks the segmenter against it.
pub fn count_matches(query: &Query, content: &str) -> usize {
    match query.pattern() {
        Some(pattern) => pattern.find_iter(content).count(),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::segment;

    #[test]
    fn test_counts() {
        assert_eq!(count_matches(&Query::new("fox"), "The quick brown fox. The fox jumps."), 2);
        assert_eq!(count_matches(&Query::new("fox"), "no canines here"), 0);
        assert_eq!(count_matches(&Query::new("aa"), "aaaa"), 2);
        assert_eq!(count_matches(&Query::new("a"), ""), 0);
    }

    #[test]
    fn test_empty_query_counts_zero() {
        assert_eq!(count_matches(&Query::new(""), "anything"), 0);
        assert_eq!(count_matches(&Query::new("   "), "anything"), 0);
    }

    #[test]
    fn test_agrees_with_segmenter() {
        let cases = [
            ("The quick brown fox. The fox jumps.", "fox"),
            ("aaaa", "aa"),
            ("", ""),
            ("", "fox"),
            ("Hello HELLO heLLo", "hello"),
            ("a.b axb a.b", "a.b"),
            ("foxfoxfox", "fox"),
            ("multi\nline\nfox\ntext", "fox"),
        ];

        for (content, term) in cases {
            let query = Query::new(term);
            let from_segments = segment(&query, content)
                .iter()
                .filter(|s| s.is_match)
                .count();
            assert_eq!(
                count_matches(&query, content),
                from_segments,
                "content {:?} term {:?}",
                content,
                term
            );
        }
    }
}
