use crate::types::FocusTarget;

/// Which occurrence, if any, the viewer is currently centered on.
///
/// `current` is 1-based so it can double as the "3 of 12" indicator; the
/// 0-based occurrence key only appears inside [`FocusTarget`]. Keeping the
/// two cases as a tagged state rules out `current > 0` with zero matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchNavigator {
    #[default]
    NoMatches,
    HasMatches {
        current: usize,
        total: usize,
    },
}

impl MatchNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-enter the machine after a (re)search that produced `total`
    /// occurrences. Lands on the first occurrence when there is one and
    /// returns the focus instruction for it.
    pub fn search(&mut self, total: usize) -> Option<FocusTarget> {
        *self = if total == 0 {
            Self::NoMatches
        } else {
            Self::HasMatches { current: 1, total }
        };
        self.focus()
    }

    /// Step to the next occurrence. Clamped: a no-op at the last
    /// occurrence and with no matches, returning no instruction.
    pub fn next(&mut self) -> Option<FocusTarget> {
        match self {
            Self::HasMatches { current, total } if *current < *total => {
                *current += 1;
                self.focus()
            }
            _ => None,
        }
    }

    /// Step to the previous occurrence. Clamped at the first occurrence.
    pub fn prev(&mut self) -> Option<FocusTarget> {
        match self {
            Self::HasMatches { current, .. } if *current > 1 => {
                *current -= 1;
                self.focus()
            }
            _ => None,
        }
    }

    /// 1-based current occurrence, 0 when there are no matches.
    pub fn current(&self) -> usize {
        match self {
            Self::NoMatches => 0,
            Self::HasMatches { current, .. } => *current,
        }
    }

    pub fn total(&self) -> usize {
        match self {
            Self::NoMatches => 0,
            Self::HasMatches { total, .. } => *total,
        }
    }

    fn focus(&self) -> Option<FocusTarget> {
        match self {
            Self::NoMatches => None,
            Self::HasMatches { current, .. } => Some(FocusTarget {
                match_index: current - 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_with_matches_lands_on_first() {
        let mut nav = MatchNavigator::new();
        let focus = nav.search(3);
        assert_eq!(focus, Some(FocusTarget { match_index: 0 }));
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.total(), 3);
    }

    #[test]
    fn test_search_without_matches() {
        let mut nav = MatchNavigator::new();
        nav.search(5);
        let focus = nav.search(0);
        assert_eq!(focus, None);
        assert_eq!(nav, MatchNavigator::NoMatches);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.total(), 0);
    }

    #[test]
    fn test_next_and_prev_emit_focus() {
        let mut nav = MatchNavigator::new();
        nav.search(3);
        assert_eq!(nav.next(), Some(FocusTarget { match_index: 1 }));
        assert_eq!(nav.next(), Some(FocusTarget { match_index: 2 }));
        assert_eq!(nav.prev(), Some(FocusTarget { match_index: 1 }));
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_clamped_at_bounds() {
        let mut nav = MatchNavigator::new();
        nav.search(2);
        assert_eq!(nav.prev(), None);
        assert_eq!(nav.current(), 1);

        nav.next();
        assert_eq!(nav.next(), None);
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_no_op_without_matches() {
        let mut nav = MatchNavigator::new();
        assert_eq!(nav.next(), None);
        assert_eq!(nav.prev(), None);
        assert_eq!(nav, MatchNavigator::NoMatches);
    }

    #[test]
    fn test_scenario_two_foxes() {
        let mut nav = MatchNavigator::new();
        nav.search(2);
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.next(), Some(FocusTarget { match_index: 1 }));
        assert_eq!(nav.current(), 2);
        assert_eq!(nav.next(), None);
        assert_eq!(nav.current(), 2);
    }
}
