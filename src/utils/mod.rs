pub mod editor;
pub mod ids;
pub mod output;
pub mod tags;
pub mod terminal;
pub mod time;

pub use editor::open_editor;
pub use ids::{generate_id, is_valid_id};
pub use output::{JsonItem, ListStyle, format_ambiguous_matches, format_item_list, truncate};
pub use tags::{MAX_TAG_LENGTH, parse_tags, validate_tags};
pub use terminal::{single_line, strip_ansi_codes};
pub use time::{days_since, format_timestamp};
