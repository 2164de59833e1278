//! Terminal output

mod cli;

pub use cli::{print_error, print_raw_summary, write_lexemes};
