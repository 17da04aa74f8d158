//! The `client` module is the terminal display surface: a live viewer that
//! prints the board and auto-scrolls it.

pub mod scroll;
pub mod watcher;

pub use watcher::run_watch;

#[cfg(test)]
mod tests;
