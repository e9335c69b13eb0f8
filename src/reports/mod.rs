//! Report generation for repository activity
//!
//! Both generators take an [`ActivityReport`](crate::facts::hosting::ActivityReport) and write
//! into any `core::fmt::Write` sink:
//! - **Console**: one `login count` line per top committer, then one line each for pull
//!   requests and issues
//! - **JSON**: the same data as a single pretty-printed object

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
