use crate::types::Segment;

/// Display-side view of one segment. Match nodes carry their occurrence
/// number as the lookup key, plus whether they hold the emphasis marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayNode {
    Plain {
        text: String,
    },
    Match {
        text: String,
        match_index: usize,
        focused: bool,
    },
}

/// Pure mapping from the segment list and the 1-based current match to
/// display nodes, one node per segment. Display only: segment text is
/// passed through untouched, and at most one node is focused.
pub fn display_nodes(segments: &[Segment], current_match: usize) -> Vec<DisplayNode> {
    segments
        .iter()
        .map(|seg| {
            if seg.is_match {
                let match_index = seg.match_index as usize;
                DisplayNode::Match {
                    text: seg.text.clone(),
                    match_index,
                    focused: current_match > 0 && match_index + 1 == current_match,
                }
            } else {
                DisplayNode::Plain {
                    text: seg.text.clone(),
                }
            }
        })
        .collect()
}

/// For each occurrence, the 0-based display line it starts on when the
/// content is rendered split at '\n'. Used to turn a focus instruction
/// into a scroll position.
pub fn match_start_lines(segments: &[Segment]) -> Vec<usize> {
    let mut lines = Vec::new();
    let mut line = 0;
    for seg in segments {
        if seg.is_match {
            lines.push(line);
        }
        line += seg.text.matches('\n').count();
    }
    lines
}
