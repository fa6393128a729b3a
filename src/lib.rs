pub mod cmd;
pub mod search;
pub mod store;
pub mod types;
pub mod utils;

pub use search::{count_matches, display_nodes, segment, DisplayNode, MatchNavigator, Query};
pub use store::DocumentStore;
pub use types::{Document, FileType, FocusTarget, Segment};
pub use utils::parse_filetype;
