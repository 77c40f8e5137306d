//! CSV reading utilities.

mod header;
mod reader;

pub use header::parse_header_line;
pub use reader::{read_feature_table, read_header, validate_encoding};
