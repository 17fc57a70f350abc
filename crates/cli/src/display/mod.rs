pub mod formatter;

pub use formatter::{format_block, print_block, print_block_json};
