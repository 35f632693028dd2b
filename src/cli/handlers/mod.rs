//! Shared command handler plumbing

mod list;
mod progress;
mod watch;

pub use list::run_list_command;
pub use progress::{fetch_all_settled, fetch_with_spinner};
pub use watch::watch_url;
