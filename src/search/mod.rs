pub mod locate;
pub mod nav;
pub mod query;
pub mod render;
pub mod segment;

pub use locate::count_matches;
pub use nav::MatchNavigator;
pub use query::Query;
pub use render::{display_nodes, match_start_lines, DisplayNode};
pub use segment::segment;
