//! Filter argument types for list commands

use clap::Args;

/// Client-side search and limit shared by the list commands
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Case-insensitive substring filter
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Maximum number of rows to show
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl SearchArgs {
    pub fn query(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Apply the row limit
    pub fn take<T>(&self, items: Vec<T>) -> Vec<T> {
        match self.limit {
            Some(limit) => items.into_iter().take(limit).collect(),
            None => items,
        }
    }
}
