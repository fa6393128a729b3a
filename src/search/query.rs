use regex::{Regex, RegexBuilder};

/// A user-typed search term normalized into a case-insensitive,
/// literal-matching pattern.
///
/// Every pattern metacharacter in the raw term is escaped, so searching
/// for `a.b` matches only the literal substring `a.b`, never `axb`.
/// A blank or whitespace-only term is the "no search" query; it matches
/// nothing. Construction never fails, whatever the input.
#[derive(Clone, Debug)]
pub struct Query {
    raw: String,
    pattern: Option<Regex>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let pattern = if raw.trim().is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&regex::escape(raw))
                    .case_insensitive(true)
                    .build()
                    .expect("escaped literal is always a valid pattern"),
            )
        };

        Self {
            raw: raw.to_string(),
            pattern,
        }
    }

    /// The term as the user typed it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True for the "no search" query.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    pub(crate) fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}
