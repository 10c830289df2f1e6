//! XML utilities for navigating namespace-qualified ISO metadata trees.

mod utils;

pub use utils::{find_all, find_first, find_text, node_text};
