//! Interactive console: validated prompts, filter collection, raw-data paging.

pub mod collector;
pub mod pager;
pub mod prompt;
